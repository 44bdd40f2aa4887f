// src/game/search.rs

//! The search engine: a time-boxed iterative-deepening driver around a
//! single fail-soft negamax procedure with principal variation search,
//! quiescence, a transposition table and the usual pruning heuristics.
//!
//! The recursion is ordinary synchronous call-stack recursion; there is no
//! parallelism anywhere in the search. Time is handled cooperatively: the
//! node loop polls the clock at a bounded interval and unwinds through
//! ordinary `Result` returns when the budget is gone, so an aborted subtree
//! can never leave a half-searched score in the transposition table.

pub mod ordering;
pub mod tt;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Chess, EnPassantMode, Move, MoveList, Position, san::SanPlus};
use tracing::info;

use crate::constants::{DRAW_SCORE, INFINITY, MATE_BOUND, MATE_SCORE, MAX_PLY};
use crate::game::evaluation;
use ordering::{HistoryTable, KillerTable};
use tt::{Bound, TranspositionTable, TtEntry};

/// Depth limits for the shallow pruning heuristics.
const RFP_MAX_DEPTH: i32 = 7;
const FUTILITY_MAX_DEPTH: i32 = 4;
const RAZOR_MAX_DEPTH: i32 = 2;
const NMP_MIN_DEPTH: i32 = 3;
const NMP_DEPTH_REDUCTION: i32 = 3;
const LMR_MIN_DEPTH: i32 = 3;
const LMR_MIN_MOVES: u32 = 3;

/// Upper bound on a single move's thinking time, however much clock is left.
const MAX_THINK_TIME: Duration = Duration::from_millis(5_000);

/// How often (in visited nodes) the clock is polled during search.
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Toggles and tuning constants for one search configuration.
///
/// Every heuristic the engine knows is individually switchable, so a
/// configuration describes one concrete engine variant; the defaults enable
/// everything except razoring.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Number of transposition table slots, rounded up to a power of two.
    pub tt_capacity: usize,
    pub use_aspiration_windows: bool,
    /// Half-width, in centipawns, of the aspiration window around the
    /// previous iteration's score.
    pub aspiration_window: i32,
    pub use_quiescence_search: bool,
    pub use_null_move_pruning: bool,
    pub use_lmr: bool,
    pub use_futility_pruning: bool,
    pub use_reverse_futility_pruning: bool,
    pub use_razoring: bool,
    pub use_killer_moves: bool,
    pub use_history_heuristic: bool,
    /// Safety margin per depth for reverse futility pruning.
    pub rfp_margin: i32,
    /// Margin per depth below alpha under which quiet moves are futile.
    pub futility_margin: i32,
    /// Margin per depth below alpha at which shallow nodes drop straight
    /// into quiescence.
    pub razor_margin: i32,
    /// Flat bonus for the side to move.
    pub tempo_bonus: i32,
    /// Fraction of the remaining clock allocated to one move (1/n).
    pub time_fraction: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            tt_capacity: TranspositionTable::DEFAULT_CAPACITY,
            use_aspiration_windows: true,
            aspiration_window: 25,
            use_quiescence_search: true,
            use_null_move_pruning: true,
            use_lmr: true,
            use_futility_pruning: true,
            use_reverse_futility_pruning: true,
            use_razoring: false,
            use_killer_moves: true,
            use_history_heuristic: true,
            rfp_margin: 74,
            futility_margin: 141,
            razor_margin: 220,
            tempo_bonus: 16,
            time_fraction: 30,
        }
    }
}

/// Sentinel unwound through the recursion when the time budget is exhausted.
/// Nothing on the abort path is written back to the transposition table.
#[derive(Clone, Copy, Debug)]
pub struct SearchAborted;

type SearchResult = Result<i32, SearchAborted>;

/// Outcome of one call to the driver.
#[derive(Clone, Debug)]
pub struct SearchReport {
    /// Best move of the deepest fully-completed iteration. `None` only when
    /// the position has no legal moves.
    pub best_move: Option<Move>,
    /// Score of `best_move` from the side to move's perspective.
    pub score: i32,
    /// Deepest fully-completed iteration.
    pub depth: u8,
    /// Full-width nodes visited.
    pub nodes: u64,
    /// Quiescence nodes visited.
    pub qnodes: u64,
    pub elapsed: Duration,
}

/// A principal-variation searcher.
///
/// Owns every piece of mutable search state: the transposition table (kept
/// across moves of a game so later searches benefit from earlier work), and
/// the killer/history tables, which are cleared at the start of every
/// `choose_move` call. One searcher must only ever run one search at a time.
pub struct PvsSearcher {
    config: SearchConfig,
    table: TranspositionTable,
    history: HistoryTable,
    killers: KillerTable,
    /// Zobrist keys of the positions on the line currently being searched,
    /// used for repetition detection inside the tree.
    line: Vec<Zobrist64>,
    nodes: u64,
    qnodes: u64,
    started: Instant,
    hard_deadline: Option<Instant>,
    /// Best root move of the iteration currently in progress.
    root_best: Option<Move>,
}

impl PvsSearcher {
    pub fn new(config: SearchConfig) -> Self {
        let table = TranspositionTable::new(config.tt_capacity);
        Self {
            config,
            table,
            history: HistoryTable::new(),
            killers: KillerTable::new(),
            line: Vec::with_capacity(MAX_PLY as usize + 1),
            nodes: 0,
            qnodes: 0,
            started: Instant::now(),
            hard_deadline: None,
            root_best: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Picks a move for the side to move, spending a fraction of the
    /// remaining clock time.
    ///
    /// Always returns a legal move while any exists, however small the
    /// budget: the first legal move stands in until depth 1 completes.
    pub fn choose_move(
        &mut self,
        pos: &Chess,
        remaining: Duration,
        increment: Duration,
    ) -> Option<Move> {
        let budget =
            (remaining / self.config.time_fraction.max(1) + increment / 2).min(MAX_THINK_TIME);
        self.think(pos, self.config.max_depth, Some(budget)).best_move
    }

    /// Searches to a fixed depth with no time limit. Deterministic: the same
    /// position and depth always produce the same move and score.
    pub fn search_to_depth(&mut self, pos: &Chess, depth: u8) -> SearchReport {
        self.think(pos, depth, None)
    }

    /// The iterative-deepening driver.
    ///
    /// Runs the recursive search at depth 1, 2, 3, ... inside an aspiration
    /// window centered on the previous iteration's score, widening the
    /// window and repeating the depth whenever the score lands outside it.
    /// The report only ever reflects fully-completed iterations; whatever a
    /// timed-out iteration had found so far is discarded.
    fn think(&mut self, pos: &Chess, max_depth: u8, budget: Option<Duration>) -> SearchReport {
        self.started = Instant::now();
        self.hard_deadline = budget.map(|b| self.started + b);
        let soft_limit = budget.map(|b| b / 2);

        self.history.clear();
        self.killers.clear();
        self.nodes = 0;
        self.qnodes = 0;
        self.line.clear();
        self.line.push(pos.zobrist_hash(EnPassantMode::Legal));

        let legal = pos.legal_moves();
        let mut report = SearchReport {
            best_move: legal.first().copied(),
            score: if pos.is_check() { -MATE_SCORE } else { DRAW_SCORE },
            depth: 0,
            nodes: 0,
            qnodes: 0,
            elapsed: Duration::ZERO,
        };
        if legal.is_empty() {
            return report;
        }

        let mut prev_score: i32 = 0;
        'deepening: for depth in 1..=max_depth {
            let mut delta = self.config.aspiration_window.max(1);
            let use_window =
                self.config.use_aspiration_windows && depth >= 2 && prev_score.abs() < MATE_BOUND;
            let (mut alpha, mut beta) = if use_window {
                (prev_score - delta, prev_score + delta)
            } else {
                (-INFINITY, INFINITY)
            };

            let score = loop {
                self.root_best = None;
                match self.alpha_beta(pos, i32::from(depth), 0, alpha, beta, true) {
                    Err(SearchAborted) => break 'deepening,
                    Ok(score) if score <= alpha => {
                        delta *= 2;
                        alpha = (score - delta).max(-INFINITY);
                    }
                    Ok(score) if score >= beta => {
                        delta *= 2;
                        beta = (score + delta).min(INFINITY);
                    }
                    Ok(score) => break score,
                }
            };

            report.score = score;
            report.depth = depth;
            if let Some(m) = self.root_best {
                report.best_move = Some(m);
            }
            report.nodes = self.nodes;
            report.qnodes = self.qnodes;
            report.elapsed = self.started.elapsed();

            let bestmove = report
                .best_move
                .map(|m| SanPlus::from_move(pos.clone(), m).to_string())
                .unwrap_or_default();
            info!(
                depth,
                score,
                nodes = self.nodes,
                qnodes = self.qnodes,
                elapsed_ms = report.elapsed.as_millis() as u64,
                %bestmove,
                "completed search iteration"
            );

            prev_score = score;

            // Don't start an iteration there is probably no time to finish.
            if let Some(soft) = soft_limit {
                if self.started.elapsed() > soft {
                    break;
                }
            }
        }

        report.elapsed = self.started.elapsed();
        report
    }

    /// The unified negamax / alpha-beta / quiescence procedure.
    ///
    /// `depth <= 0` (after the check extension) makes this a quiescence
    /// node: the static evaluation acts as a lower bound and only captures
    /// are examined. Fail-soft: the returned score may lie outside the
    /// `alpha..beta` window.
    fn alpha_beta(
        &mut self,
        pos: &Chess,
        mut depth: i32,
        ply: i32,
        mut alpha: i32,
        beta: i32,
        allow_null: bool,
    ) -> SearchResult {
        if (self.nodes + self.qnodes) % TIME_CHECK_INTERVAL == 0 && self.out_of_time() {
            return Err(SearchAborted);
        }

        let is_root = ply == 0;
        let key: Zobrist64 = pos.zobrist_hash(EnPassantMode::Legal);

        if !is_root && self.is_draw(pos, key) {
            return Ok(DRAW_SCORE);
        }
        if ply >= MAX_PLY {
            return Ok(evaluation::evaluate(pos, &self.config));
        }

        // Search forcing lines deeper.
        let in_check = pos.is_check();
        if in_check {
            depth += 1;
        }

        if !self.config.use_quiescence_search && depth <= 0 {
            return Ok(evaluation::evaluate(pos, &self.config));
        }

        let in_qsearch = depth <= 0;
        let is_pv = beta - alpha > 1;
        if in_qsearch {
            self.qnodes += 1;
        } else {
            self.nodes += 1;
        }

        // A previously-stored result for this position can short-circuit the
        // node entirely, as long as it was searched at least as deep as we
        // are about to and its bound admits a cutoff.
        let mut tt_move = None;
        if let Some(entry) = self.table.probe(&key) {
            tt_move = entry.best_move;
            if !is_root && i32::from(entry.depth) >= depth {
                let score = tt::score_from_tt(entry.score, ply);
                let usable = match entry.bound {
                    Bound::Exact => true,
                    Bound::Lower => score >= beta,
                    Bound::Upper => score <= alpha,
                };
                if usable {
                    return Ok(score);
                }
            }
        }

        // Quiescence stand pat: the side to move can usually do at least as
        // well as doing nothing, so the static evaluation is a floor.
        let mut best = -INFINITY;
        if in_qsearch && !in_check {
            let stand_pat = evaluation::evaluate(pos, &self.config);
            if stand_pat >= beta {
                return Ok(stand_pat);
            }
            best = stand_pat;
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        }

        // Forward pruning. Only at full-width nodes with a null window, and
        // never while in check.
        let mut futile = false;
        if !in_qsearch && !is_pv && !in_check {
            let static_eval = evaluation::evaluate(pos, &self.config);

            // Reverse futility: so far above beta that no search is needed.
            if self.config.use_reverse_futility_pruning
                && depth <= RFP_MAX_DEPTH
                && static_eval - self.config.rfp_margin * depth >= beta
            {
                return Ok(static_eval);
            }

            // Razoring: so far below alpha that only a capture sequence
            // could rescue the node, which is quiescence's job.
            if self.config.use_razoring
                && depth <= RAZOR_MAX_DEPTH
                && static_eval + self.config.razor_margin * depth < alpha
            {
                let score = self.alpha_beta(pos, 0, ply, alpha, alpha + 1, false)?;
                if score < alpha && score.abs() < MATE_BOUND {
                    return Ok(score);
                }
            }

            // Null move: hand the opponent a free tempo and search reduced.
            // If beta still holds, the real position is almost certainly a
            // cutoff too. Skipped when only pawns and kings remain, where
            // being forced to move is often the real problem (zugzwang).
            if self.config.use_null_move_pruning
                && allow_null
                && depth >= NMP_MIN_DEPTH
                && static_eval >= beta
            {
                let board = pos.board();
                let sliders_or_minors =
                    board.by_color(pos.turn()) & !board.pawns() & !board.kings();
                if !sliders_or_minors.is_empty() {
                    if let Ok(null_pos) = pos.clone().swap_turn() {
                        let score = self.search_child(
                            &null_pos,
                            depth - NMP_DEPTH_REDUCTION,
                            ply + 1,
                            -beta,
                            -beta + 1,
                            false,
                        )?;
                        if score >= beta {
                            // An unproven mate from a skipped turn is not a
                            // mate we can trust.
                            return Ok(if score >= MATE_BOUND { beta } else { score });
                        }
                    }
                }
            }

            // Futility flag: this node is so far below alpha that quiet
            // moves have no realistic chance of raising it. The moves
            // themselves are skipped in the loop below.
            if self.config.use_futility_pruning && depth <= FUTILITY_MAX_DEPTH {
                futile = static_eval + self.config.futility_margin * depth <= alpha;
            }
        }

        let mut moves: MoveList = pos.legal_moves();
        if in_qsearch && !in_check {
            moves.retain(|m| m.is_capture());
        }

        if moves.is_empty() {
            if in_check {
                // Offset by ply so that shallower mates score higher.
                return Ok(ply - MATE_SCORE);
            }
            if !in_qsearch {
                return Ok(DRAW_SCORE);
            }
            // Quiet quiescence node: nothing to capture, stand pat.
            return Ok(best);
        }

        ordering::order_moves(
            &mut moves,
            pos,
            ply as usize,
            tt_move,
            &self.killers,
            &self.history,
            &self.config,
        );

        let original_alpha = alpha;
        let mut best_move: Option<Move> = None;
        let mut searched: u32 = 0;

        for &m in &moves {
            // A futile node only looks at its first move, captures and
            // promotions; remaining quiet moves cannot raise alpha anyway.
            if futile && searched > 0 && !m.is_capture() && m.promotion().is_none() {
                continue;
            }

            let mut child = pos.clone();
            child.play_unchecked(m);

            // Principal variation search: the first move gets the full
            // window. Later moves are probed with a null window, reduced for
            // late quiet moves, and only re-searched in full when the probe
            // beats alpha.
            let score = if searched == 0 || in_qsearch {
                self.search_child(&child, depth - 1, ply + 1, -beta, -alpha, true)?
            } else {
                let mut reduction = 0;
                if self.config.use_lmr
                    && depth >= LMR_MIN_DEPTH
                    && searched >= LMR_MIN_MOVES
                    && !in_check
                    && !m.is_capture()
                    && m.promotion().is_none()
                {
                    reduction = (1.0
                        + (depth as f32).ln() * (searched as f32).ln() / 2.0)
                        as i32;
                    reduction = reduction.clamp(0, depth - 1);
                }

                let mut score = self.search_child(
                    &child,
                    depth - 1 - reduction,
                    ply + 1,
                    -alpha - 1,
                    -alpha,
                    true,
                )?;
                if score > alpha && reduction > 0 {
                    score =
                        self.search_child(&child, depth - 1, ply + 1, -alpha - 1, -alpha, true)?;
                }
                if score > alpha && score < beta {
                    score = self.search_child(&child, depth - 1, ply + 1, -beta, -alpha, true)?;
                }
                score
            };
            searched += 1;

            if score > best {
                best = score;
                if score > alpha {
                    alpha = score;
                    best_move = Some(m);
                    if is_root {
                        self.root_best = Some(m);
                    }
                }
                if alpha >= beta {
                    // A quiet move strong enough to refute this whole line is
                    // worth trying early elsewhere.
                    if !m.is_capture() {
                        if self.config.use_killer_moves {
                            self.killers.store(ply as usize, m);
                        }
                        if self.config.use_history_heuristic {
                            self.history.reward(pos, m, depth.max(1));
                        }
                    }
                    break;
                }
            }
        }

        let bound = if best <= original_alpha {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.store(TtEntry {
            key,
            depth: depth.max(0) as u8,
            score: tt::score_to_tt(best, ply),
            bound,
            best_move: best_move.or(tt_move),
        });

        Ok(best)
    }

    /// Recurses into `child`, keeping the repetition line in sync and
    /// negating the returned score into the parent's perspective.
    fn search_child(
        &mut self,
        child: &Chess,
        depth: i32,
        ply: i32,
        alpha: i32,
        beta: i32,
        allow_null: bool,
    ) -> SearchResult {
        self.line.push(child.zobrist_hash(EnPassantMode::Legal));
        let result = self.alpha_beta(child, depth, ply, alpha, beta, allow_null);
        self.line.pop();
        result.map(|score| -score)
    }

    fn out_of_time(&self) -> bool {
        self.hard_deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Draw detection inside the tree: twofold repetition along the current
    /// line, the fifty-move rule, or bare-kings material.
    fn is_draw(&self, pos: &Chess, key: Zobrist64) -> bool {
        pos.halfmoves() >= 100
            || pos.is_insufficient_material()
            || self.line.iter().filter(|&&k| k == key).count() >= 2
    }
}

impl Default for PvsSearcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

// --- Piece values (centipawns) ---
//
// Used by move ordering and by the pruning margins. The evaluator carries its
// own tapered (middlegame/endgame) values next to the piece-square tables.
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

// Constants for game phase calculation
pub const QUEEN_PHASE_VAL: i32 = 4;
pub const ROOK_PHASE_VAL: i32 = 2;
pub const BISHOP_PHASE_VAL: i32 = 1;
pub const KNIGHT_PHASE_VAL: i32 = 1;
pub const TOTAL_PHASE: i32 =
    (QUEEN_PHASE_VAL * 2) + (ROOK_PHASE_VAL * 4) + (BISHOP_PHASE_VAL * 4) + (KNIGHT_PHASE_VAL * 4);

// --- Search scores ---

/// Upper bound on every score the search can produce. Used as the full
/// alpha-beta window and as the "nothing found yet" sentinel when negated.
pub const INFINITY: i32 = 1_000_000;

/// Being checkmated at the root scores `-MATE_SCORE`; a mate `n` plies into
/// the search scores `n - MATE_SCORE` for the mated side, so shallower mates
/// are always preferred.
pub const MATE_SCORE: i32 = 900_000;

/// Hard cap on the distance from root, including extensions.
pub const MAX_PLY: i32 = 128;

/// Scores at or beyond this magnitude encode a mate distance rather than a
/// centipawn evaluation. The margin leaves room for re-basing mate scores by
/// up to `MAX_PLY` in each direction when they pass through the
/// transposition table.
pub const MATE_BOUND: i32 = MATE_SCORE - 2 * MAX_PLY;

pub const DRAW_SCORE: i32 = 0;

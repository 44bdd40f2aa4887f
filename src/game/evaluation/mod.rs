//! Evaluation of a chess position.
//!
//! Material and piece-square bonuses only, blended between a middlegame and
//! an endgame table by the amount of non-pawn material left on the board
//! ("tapered" evaluation), plus a small tempo bonus for the side to move.

pub mod pst;

use shakmaty::{Board, Chess, Color, Piece, Position, Role};

use crate::constants::{
    BISHOP_PHASE_VAL, BISHOP_VALUE, KNIGHT_PHASE_VAL, KNIGHT_VALUE, PAWN_VALUE, QUEEN_PHASE_VAL,
    QUEEN_VALUE, ROOK_PHASE_VAL, ROOK_VALUE, TOTAL_PHASE,
};
use crate::game::search::SearchConfig;

/// Calculates the game phase.
///
/// The phase is a value between 0 and [`TOTAL_PHASE`] (24), where the
/// maximum means all minor and major pieces are still on the board and 0
/// means only pawns and kings are left.
pub fn game_phase(board: &Board) -> i32 {
    let mut phase = 0;
    for &role in &[Role::Knight, Role::Bishop, Role::Rook, Role::Queen] {
        let count = board.by_role(role).count() as i32;
        phase += count
            * match role {
                Role::Queen => QUEEN_PHASE_VAL,
                Role::Rook => ROOK_PHASE_VAL,
                Role::Bishop => BISHOP_PHASE_VAL,
                Role::Knight => KNIGHT_PHASE_VAL,
                _ => 0,
            };
    }
    // Clamp in case of promotions
    phase.min(TOTAL_PHASE)
}

/// Single-figure piece value, used by move ordering and pruning margins.
pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => 0,
    }
}

/// Accumulates material and piece-square bonuses over the whole board, as
/// White's total minus Black's total. Returns the middlegame and endgame
/// partial sums, which still need to be blended by game phase.
pub fn material_and_pst(board: &Board) -> (i32, i32) {
    let mut mg = 0;
    let mut eg = 0;

    for &color in &Color::ALL {
        for &role in &Role::ALL {
            for square in board.by_piece(Piece { color, role }) {
                let (piece_mg, piece_eg) = pst::values(color, role, square);
                if color == Color::White {
                    mg += piece_mg;
                    eg += piece_eg;
                } else {
                    mg -= piece_mg;
                    eg -= piece_eg;
                }
            }
        }
    }

    (mg, eg)
}

/// Evaluates the board from the perspective of the side to move.
///
/// Returns a score in centipawns; positive is good for the player whose turn
/// it is. Pure function of the position.
pub fn evaluate(pos: &Chess, config: &SearchConfig) -> i32 {
    let board = pos.board();
    let phase = game_phase(board);
    let (mg, eg) = material_and_pst(board);

    let blended = (mg * phase + eg * (TOTAL_PHASE - phase)) / TOTAL_PHASE;

    let perspective = if pos.turn() == Color::White {
        blended
    } else {
        -blended
    };

    perspective + config.tempo_bonus
}

#[cfg(test)]
pub mod tests;

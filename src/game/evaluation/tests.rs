//! Unit tests for the evaluation terms.

use super::*;
use crate::constants::{QUEEN_PHASE_VAL, TOTAL_PHASE};
use crate::game::search::SearchConfig;
use shakmaty::{fen::Fen, CastlingMode, Chess, Position};

fn position(fen: &str) -> Chess {
    let fen: Fen = fen.parse().unwrap();
    fen.into_position(CastlingMode::Standard).unwrap()
}

/// Mirrors a FEN across the color axis: piece colors are swapped, ranks are
/// reversed, and the side to move flips. The result is the same position
/// from the other player's point of view.
fn mirror_fen(fen: &str) -> String {
    let mut fields: Vec<String> = fen.split_whitespace().map(str::to_string).collect();

    let swap_case = |c: char| {
        if c.is_ascii_uppercase() {
            c.to_ascii_lowercase()
        } else if c.is_ascii_lowercase() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    };

    fields[0] = fields[0]
        .split('/')
        .rev()
        .map(|rank| rank.chars().map(swap_case).collect::<String>())
        .collect::<Vec<_>>()
        .join("/");
    fields[1] = if fields[1] == "w" { "b".into() } else { "w".into() };
    let mut castling: Vec<char> = fields[2].chars().map(swap_case).collect();
    castling.sort_by_key(|c| match c {
        'K' => 0,
        'Q' => 1,
        'k' => 2,
        'q' => 3,
        _ => 4,
    });
    fields[2] = castling.into_iter().collect();

    fields.join(" ")
}

#[test]
fn test_game_phase_starting_position() {
    let pos = Chess::default();
    assert_eq!(game_phase(pos.board()), TOTAL_PHASE);
}

#[test]
fn test_game_phase_endgame() {
    let pos = position("8/4k3/8/8/8/8/4K3/8 w - - 0 1");
    assert_eq!(game_phase(pos.board()), 0);
}

#[test]
fn test_game_phase_queenless_middlegame() {
    let pos = position("r1b1kb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNB1K2R w KQkq - 0 1");
    assert_eq!(game_phase(pos.board()), TOTAL_PHASE - 2 * QUEEN_PHASE_VAL);
}

#[test]
fn test_evaluate_starting_position_is_tempo_only() {
    // The starting position is symmetric, so everything cancels except the
    // tempo bonus for the side to move.
    let pos = Chess::default();
    let config = SearchConfig::default();
    assert_eq!(evaluate(&pos, &config), config.tempo_bonus);
}

#[test]
fn test_evaluate_white_advantage() {
    let pos = position("4k3/8/8/8/8/8/8/4K2Q w - - 0 1");
    let config = SearchConfig::default();
    assert!(evaluate(&pos, &config) > 850);
}

#[test]
fn test_evaluate_black_advantage() {
    let pos = position("4k2q/8/8/8/8/8/8/4K3 w - - 0 1");
    let config = SearchConfig::default();
    assert!(evaluate(&pos, &config) < -850);
}

#[test]
fn test_evaluate_black_advantage_black_to_move() {
    let pos = position("4k2q/8/8/8/8/8/8/4K3 b - - 0 1");
    let config = SearchConfig::default();
    assert!(evaluate(&pos, &config) > 850);
}

#[test]
fn test_material_and_pst_negates_under_mirroring() {
    // The white-minus-black sums must be exactly negated when the position
    // is mirrored across the color axis.
    let fens = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1",
        "2r2bk1/p5p1/1p1p2Qp/2PNp3/PR1nNr1q/3P4/5PPP/5RK1 b - - 0 1",
        "8/3k4/3p4/8/3P4/8/3K4/3R4 w - - 0 1",
        "4k3/8/8/8/8/8/8/4K2Q w - - 0 1",
    ];

    for fen in fens {
        let pos = position(fen);
        let mirrored = position(&mirror_fen(fen));

        let (mg, eg) = material_and_pst(pos.board());
        let (mirror_mg, mirror_eg) = material_and_pst(mirrored.board());
        assert_eq!(mirror_mg, -mg, "mg sum not negated for {fen}");
        assert_eq!(mirror_eg, -eg, "eg sum not negated for {fen}");
    }
}

#[test]
fn test_evaluate_is_mirror_invariant() {
    // Mirroring the board and the side to move relabels the players, so the
    // mover-relative score must not change.
    let config = SearchConfig::default();
    let fens = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1",
        "2r2bk1/p5p1/1p1p2Qp/2PNp3/PR1nNr1q/3P4/5PPP/5RK1 b - - 0 1",
        "8/3k4/3p4/8/3P4/8/3K4/3R4 w - - 0 1",
    ];

    for fen in fens {
        let pos = position(fen);
        let mirrored = position(&mirror_fen(fen));
        assert_eq!(
            evaluate(&pos, &config),
            evaluate(&mirrored, &config),
            "mover-relative score changed under mirroring for {fen}"
        );
    }
}

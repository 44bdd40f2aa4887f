//! Piece-square tables for the tapered evaluation.
//!
//! The values are the PeSTO tables from the
//! [Chess Programming Wiki](https://www.chessprogramming.org/PeSTO%27s_Evaluation_Function),
//! one middlegame and one endgame table per piece type. Each table is
//! authored once from White's point of view with the eighth rank in the top
//! row, exactly as it is usually printed; the orientation needed for lookups
//! by absolute rank is produced at compile time by `flip`.

use shakmaty::{Color, Role, Square};

type Pst = [[i32; 8]; 8];

const fn flip(pst: &Pst) -> Pst {
    let mut flipped = [[0; 8]; 8];
    let mut i = 0;
    while i < 8 {
        let mut j = 0;
        while j < 8 {
            flipped[i][j] = pst[7 - i][j];
            j += 1;
        }
        i += 1;
    }
    flipped
}

#[rustfmt::skip]
const PAWN_MG: Pst = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 98, 134,  61,  95,  68, 126,  34, -11],
    [ -6,   7,  26,  31,  65,  56,  25, -20],
    [-14,  13,   6,  21,  23,  12,  17, -23],
    [-27,  -2,  -5,  12,  17,   6,  10, -25],
    [-26,  -4,  -4, -10,   3,   3,  33, -12],
    [-35,  -1, -20, -23, -15,  24,  38, -22],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const PAWN_EG: Pst = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [178, 173, 158, 134, 147, 132, 165, 187],
    [ 94, 100,  85,  67,  56,  53,  82,  84],
    [ 32,  24,  13,   5,  -2,   4,  17,  17],
    [ 13,   9,  -3,  -7,  -7,  -8,   3,  -1],
    [  4,   7,  -6,   1,   0,  -5,  -1,  -8],
    [ 13,   8,   8,  10,  13,   0,   2,  -7],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_MG: Pst = [
    [-167, -89, -34, -49,  61, -97, -15, -107],
    [ -73, -41,  72,  36,  23,  62,   7,  -17],
    [ -47,  60,  37,  65,  84, 129,  73,   44],
    [  -9,  17,  19,  53,  37,  69,  18,   22],
    [ -13,   4,  16,  13,  28,  19,  21,   -8],
    [ -23,  -9,  12,  10,  19,  17,  25,  -16],
    [ -29, -53, -12,  -3,  -1,  18, -14,  -19],
    [-105, -21, -58, -33, -17, -28, -19,  -23],
];

#[rustfmt::skip]
const KNIGHT_EG: Pst = [
    [-58, -38, -13, -28, -31, -27, -63, -99],
    [-25,  -8, -25,  -2,  -9, -25, -24, -52],
    [-24, -20,  10,   9,  -1,  -9, -19, -41],
    [-17,   3,  22,  22,  22,  11,   8, -18],
    [-18,  -6,  16,  25,  16,  17,   4, -18],
    [-23,  -3,  -1,  15,  10,  -3, -20, -22],
    [-42, -20, -10,  -5,  -2, -20, -23, -44],
    [-29, -51, -23, -15, -22, -18, -50, -64],
];

#[rustfmt::skip]
const BISHOP_MG: Pst = [
    [-29,   4, -82, -37, -25, -42,   7,  -8],
    [-26,  16, -18, -13,  30,  59,  18, -47],
    [-16,  37,  43,  40,  35,  50,  37,  -2],
    [ -4,   5,  19,  50,  37,  37,   7,  -2],
    [ -6,  13,  13,  26,  34,  12,  10,   4],
    [  0,  15,  15,  15,  14,  27,  18,  10],
    [  4,  15,  16,   0,   7,  21,  33,   1],
    [-33,  -3, -14, -21, -13, -12, -39, -21],
];

#[rustfmt::skip]
const BISHOP_EG: Pst = [
    [-14, -21, -11,  -8,  -7,  -9, -17, -24],
    [ -8,  -4,   7, -12,  -3, -13,  -4, -14],
    [  2,  -8,   0,  -1,  -2,   6,   0,   4],
    [ -3,   9,  12,   9,  14,  10,   3,   2],
    [ -6,   3,  13,  19,   7,  10,  -3,  -9],
    [-12,  -3,   8,  10,  13,   3,  -7, -15],
    [-14, -18,  -7,  -1,   4,  -9, -15, -27],
    [-23,  -9, -23,  -5,  -9, -16,  -5, -17],
];

#[rustfmt::skip]
const ROOK_MG: Pst = [
    [ 32,  42,  32,  51,  63,   9,  31,  43],
    [ 27,  32,  58,  62,  80,  67,  26,  44],
    [ -5,  19,  26,  36,  17,  45,  61,  16],
    [-24, -11,   7,  26,  24,  35,  -8, -20],
    [-36, -26, -12,  -1,   9,  -7,   6, -23],
    [-45, -25, -16, -17,   3,   0,  -5, -33],
    [-44, -16, -20,  -9,  -1,  11,  -6, -71],
    [-19, -13,   1,  17,  16,   7, -37, -26],
];

#[rustfmt::skip]
const ROOK_EG: Pst = [
    [13, 10, 18, 15, 12,  12,   8,   5],
    [11, 13, 13, 11, -3,   3,   8,   3],
    [ 7,  7,  7,  5,  4,  -3,  -5,  -3],
    [ 4,  3, 13,  1,  2,   1,  -1,   2],
    [ 3,  5,  8,  4, -5,  -6,  -8, -11],
    [-4,  0, -5, -1, -7, -12,  -8, -16],
    [-6, -6,  0,  2, -9,  -9, -11,  -3],
    [-9,  2,  3, -1, -5, -13,   4, -20],
];

#[rustfmt::skip]
const QUEEN_MG: Pst = [
    [-28,   0,  29,  12,  59,  44,  43,  45],
    [-24, -39,  -5,   1, -16,  57,  28,  54],
    [-13, -17,   7,   8,  29,  56,  47,  57],
    [-27, -27, -16, -16,  -1,  17,  -2,   1],
    [ -9, -26,  -9, -10,  -2,  -4,   3,  -3],
    [-14,   2, -11,  -2,  -5,   2,  14,   5],
    [-35,  -8,  11,   2,   8,  15,  -3,   1],
    [ -1, -18,  -9,  10, -15, -25, -31, -50],
];

#[rustfmt::skip]
const QUEEN_EG: Pst = [
    [ -9,  22,  22,  27,  27,  19,  10,  20],
    [-17,  20,  32,  41,  58,  25,  30,   0],
    [-20,   6,   9,  49,  47,  35,  19,   9],
    [  3,  22,  24,  45,  57,  40,  57,  36],
    [-18,  28,  19,  47,  31,  34,  39,  23],
    [-16, -27,  15,   6,   9,  17,  10,   5],
    [-22, -23, -30, -16, -16, -23, -36, -32],
    [-33, -28, -22, -43,  -5, -32, -20, -41],
];

#[rustfmt::skip]
const KING_MG: Pst = [
    [-65,  23,  16, -15, -56, -34,   2,  13],
    [ 29,  -1, -20,  -7,  -8,  -4, -38, -29],
    [ -9,  24,   2, -16, -20,   6,  22, -22],
    [-17, -20, -12, -27, -30, -25, -14, -36],
    [-49,  -1, -27, -39, -46, -44, -33, -51],
    [-14, -14, -22, -46, -44, -30, -15, -27],
    [  1,   7,  -8, -64, -43, -16,   9,   8],
    [-15,  36,  12, -54,   8, -28,  24,  14],
];

#[rustfmt::skip]
const KING_EG: Pst = [
    [-74, -35, -18, -18, -11,  15,   4, -17],
    [-12,  17,  14,  17,  17,  38,  23,  11],
    [ 10,  17,  23,  15,  20,  45,  44,  13],
    [ -8,  22,  24,  27,  26,  33,  26,   3],
    [-18,  -4,  21,  24,  27,  23,   9, -11],
    [-19,  -3,  11,  21,  23,  16,   7,  -9],
    [-27, -11,   4,  13,  14,   4,  -5, -17],
    [-53, -34, -21, -11, -28, -14, -24, -43],
];

// White pieces index the tables by absolute rank (rank 1 = row 0), so the
// authored orientation is rank-flipped once at compile time. Black pieces
// read the authored tables directly, which is exactly the vertical mirror
// of White.
static WHITE_PAWN: (Pst, Pst) = (flip(&PAWN_MG), flip(&PAWN_EG));
static WHITE_KNIGHT: (Pst, Pst) = (flip(&KNIGHT_MG), flip(&KNIGHT_EG));
static WHITE_BISHOP: (Pst, Pst) = (flip(&BISHOP_MG), flip(&BISHOP_EG));
static WHITE_ROOK: (Pst, Pst) = (flip(&ROOK_MG), flip(&ROOK_EG));
static WHITE_QUEEN: (Pst, Pst) = (flip(&QUEEN_MG), flip(&QUEEN_EG));
static WHITE_KING: (Pst, Pst) = (flip(&KING_MG), flip(&KING_EG));

static BLACK_PAWN: (Pst, Pst) = (PAWN_MG, PAWN_EG);
static BLACK_KNIGHT: (Pst, Pst) = (KNIGHT_MG, KNIGHT_EG);
static BLACK_BISHOP: (Pst, Pst) = (BISHOP_MG, BISHOP_EG);
static BLACK_ROOK: (Pst, Pst) = (ROOK_MG, ROOK_EG);
static BLACK_QUEEN: (Pst, Pst) = (QUEEN_MG, QUEEN_EG);
static BLACK_KING: (Pst, Pst) = (KING_MG, KING_EG);

/// Tapered material values, aligned with the PeSTO tables. Indexed by
/// `Role as usize - 1` (pawn through king).
pub const MG_VALUE: [i32; 6] = [82, 337, 365, 477, 1025, 0];
pub const EG_VALUE: [i32; 6] = [94, 281, 297, 512, 936, 0];

/// Middlegame and endgame values (material plus square bonus) for a piece of
/// the given color standing on `square`.
pub fn values(color: Color, role: Role, square: Square) -> (i32, i32) {
    let (mg_table, eg_table) = match (color, role) {
        (Color::White, Role::Pawn) => &WHITE_PAWN,
        (Color::White, Role::Knight) => &WHITE_KNIGHT,
        (Color::White, Role::Bishop) => &WHITE_BISHOP,
        (Color::White, Role::Rook) => &WHITE_ROOK,
        (Color::White, Role::Queen) => &WHITE_QUEEN,
        (Color::White, Role::King) => &WHITE_KING,
        (Color::Black, Role::Pawn) => &BLACK_PAWN,
        (Color::Black, Role::Knight) => &BLACK_KNIGHT,
        (Color::Black, Role::Bishop) => &BLACK_BISHOP,
        (Color::Black, Role::Rook) => &BLACK_ROOK,
        (Color::Black, Role::Queen) => &BLACK_QUEEN,
        (Color::Black, Role::King) => &BLACK_KING,
    };

    let rank = square.rank() as usize;
    let file = square.file() as usize;
    let material = role as usize - 1;

    (
        mg_table[rank][file] + MG_VALUE[material],
        eg_table[rank][file] + EG_VALUE[material],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_color_symmetric() {
        for &role in &Role::ALL {
            for index in 0..64u32 {
                let square = Square::new(index);
                let mirrored = Square::new(index ^ 56);
                assert_eq!(
                    values(Color::White, role, square),
                    values(Color::Black, role, mirrored),
                    "{role:?} on {square} (white) vs {mirrored} (black)"
                );
            }
        }
    }

    #[test]
    fn test_advanced_pawns_outvalue_home_pawns() {
        let (home_mg, home_eg) = values(Color::White, Role::Pawn, Square::E2);
        let (advanced_mg, advanced_eg) = values(Color::White, Role::Pawn, Square::E7);
        assert!(advanced_mg > home_mg);
        assert!(advanced_eg > home_eg);
    }
}

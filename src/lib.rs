//! A chess-playing search agent built on top of the `shakmaty` board
//! library.
//!
//! The crate is a library first: the whole engine is behind
//! [`PvsSearcher::choose_move`], which picks a move for the side to move
//! within a time budget. Board representation, move generation and game-end
//! detection are `shakmaty`'s job; this crate supplies the iterative
//! deepening driver, the alpha-beta/quiescence search with its pruning
//! heuristics, the transposition table, the move ordering and the tapered
//! material/piece-square evaluation.

pub mod config;
pub mod constants;
pub mod game;

pub use game::evaluation;
pub use game::search::{PvsSearcher, SearchConfig, SearchReport};

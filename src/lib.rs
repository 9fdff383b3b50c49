//! Reversi rules engine with a generic minimax searcher.
//!
//! The rules live in [`board`] and [`game`]; [`ai::search`] knows nothing about
//! Reversi and drives any [`ai::SearchProblem`]. [`bindings`] exposes a game
//! session to JavaScript.

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod bindings;
pub mod board;
pub mod error;
pub mod game;
pub mod types;

pub use board::Board;
pub use error::ReversiError;
pub use game::GameState;
pub use types::{Direction, Move, Piece, Player, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

use crate::types::Position;

/// Errors raised by the game core.
///
/// These report bad input from the caller (a player or the UI); the core never
/// recovers from them internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReversiError {
    /// Direction value outside the eight compass points.
    #[error("not a valid direction: {0}")]
    InvalidDirection(i32),

    /// Coordinates outside the 8x8 board.
    #[error("position out of range: row {row}, column {column}")]
    OutOfRange { row: i32, column: i32 },

    /// Placement that flips no opponent pieces, or lands on an occupied cell.
    #[error("illegal move at {0}")]
    IllegalMove(Position),

    /// Pass attempted while the legal move list is not exactly `[Pass]`.
    #[error("pass is not allowed: {0}")]
    InvalidPassMove(&'static str),

    /// Malformed move value.
    #[error("not a valid move: {0}")]
    NotAValidMove(String),
}

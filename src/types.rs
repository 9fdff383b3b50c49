use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ReversiError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

const COLUMN_NAMES: [char; BOARD_SIZE] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
const ROW_NAMES: [char; BOARD_SIZE] = ['1', '2', '3', '4', '5', '6', '7', '8'];

/// A board coordinate, always within `0..8` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    pub fn new(row: i32, column: i32) -> Result<Self, ReversiError> {
        if in_bounds(row, column) {
            Ok(Self {
                row: row as u8,
                column: column as u8,
            })
        } else {
            Err(ReversiError::OutOfRange { row, column })
        }
    }

    /// Inverse of [`Position::index`]. Returns `None` for indices past the board.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_SQUARES {
            return None;
        }
        Some(Self {
            row: (index % BOARD_SIZE) as u8,
            column: (index / BOARD_SIZE) as u8,
        })
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    /// Cell index, column-major: `row + 8 * column`.
    pub fn index(&self) -> usize {
        self.row as usize + BOARD_SIZE * self.column as usize
    }

    /// The neighboring position in `direction`, or `None` when it falls off the board.
    pub fn step(&self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();
        Self::new(self.row as i32 + dr, self.column as i32 + dc).ok()
    }

    /// Like [`Position::step`], taking the direction as its raw number `0..8`.
    pub fn step_raw(&self, direction: i32) -> Result<Option<Self>, ReversiError> {
        Direction::try_from(direction).map(|direction| self.step(direction))
    }

    /// Iterates every position in row order, then column.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |column| Position { row, column }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            ROW_NAMES[self.row as usize], COLUMN_NAMES[self.column as usize]
        )
    }
}

/// The eight compass directions, numbered `0..8` in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// `(row delta, column delta)`. North points towards increasing rows.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = ReversiError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(ReversiError::InvalidDirection(value))
    }
}

/// Player id, serialized as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn piece(self) -> Piece {
        match self {
            Player::One => Piece::Player1,
            Player::Two => Piece::Player2,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Piece {
    pub fn owner(self) -> Option<Player> {
        match self {
            Piece::Empty => None,
            Piece::Player1 => Some(Player::One),
            Piece::Player2 => Some(Player::Two),
        }
    }

    /// `0` for empty, otherwise the owner's id.
    pub fn to_u8(self) -> u8 {
        self.owner().map_or(0, Player::id)
    }
}

/// A move offered by [`crate::game::GameState::legal_moves`].
///
/// `Pass` and `GameOver` only ever appear as the single entry of a legal move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Place(Position),
    Pass,
    GameOver,
}

impl Move {
    pub fn position(&self) -> Option<Position> {
        match self {
            Move::Place(position) => Some(*position),
            Move::Pass | Move::GameOver => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(position) => write!(f, "{position}"),
            Move::Pass => f.write_str("Pass"),
            Move::GameOver => f.write_str("Game over"),
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Row-major cells: 0=empty, 1=player 1, 2=player 2.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub player1_count: u8,
    pub player2_count: u8,
    pub empty_count: u8,
    pub legal_moves: Vec<Position>,
    /// `true` exactly when the only legal move is a pass.
    pub can_pass: bool,
    pub is_game_over: bool,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 0 on a draw.
    pub winner: u8,
    pub player1_count: u8,
    pub player2_count: u8,
}

/// A move as submitted by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoveInput {
    pub kind: String,
    #[serde(default)]
    pub row: Option<i32>,
    #[serde(default)]
    pub column: Option<i32>,
}

impl TryFrom<MoveInput> for Move {
    type Error = ReversiError;

    fn try_from(input: MoveInput) -> Result<Self, Self::Error> {
        match (input.kind.as_str(), input.row, input.column) {
            ("place", Some(row), Some(column)) => Ok(Move::Place(Position::new(row, column)?)),
            ("place", _, _) => Err(ReversiError::NotAValidMove(
                "placement without a position".to_string(),
            )),
            ("pass", _, _) => Ok(Move::Pass),
            (kind, _, _) => Err(ReversiError::NotAValidMove(format!("unknown kind {kind:?}"))),
        }
    }
}

fn in_bounds(row: i32, column: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&column)
}

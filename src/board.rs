use std::fmt;

use crate::types::{Direction, Move, NUM_SQUARES, Piece, Player, Position};

/// Reversi board: 64 cells indexed by [`Position::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Piece; NUM_SQUARES],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Piece::Empty; NUM_SQUARES],
        }
    }

    /// Creates the starting board: player 1 on 4D and 5E, player 2 on 4E and 5D.
    pub fn initial() -> Self {
        let mut board = Self::new();
        for position in Position::all() {
            let piece = match (position.row(), position.column()) {
                (3, 3) | (4, 4) => Piece::Player1,
                (3, 4) | (4, 3) => Piece::Player2,
                _ => continue,
            };
            board.set(position, piece);
        }
        board
    }

    pub fn get(&self, position: Position) -> Piece {
        self.cells[position.index()]
    }

    /// Raw index access. `None` for indices past the board.
    pub fn get_index(&self, index: usize) -> Option<Piece> {
        self.cells.get(index).copied()
    }

    pub fn set(&mut self, position: Position, piece: Piece) {
        self.cells[position.index()] = piece;
    }

    /// Raw index write. Out-of-range indices are ignored.
    pub fn set_index(&mut self, index: usize, piece: Piece) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = piece;
        }
    }

    /// Independent copy; later writes to either board do not affect the other.
    pub fn copy(&self) -> Self {
        *self
    }

    pub fn clear(&mut self) {
        self.cells = [Piece::Empty; NUM_SQUARES];
    }

    /// Returns `(player1_count, player2_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.cells
            .iter()
            .fold((0, 0), |(one, two), piece| match piece {
                Piece::Player1 => (one + 1, two),
                Piece::Player2 => (one, two + 1),
                Piece::Empty => (one, two),
            })
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (one, two) = self.count();
        NUM_SQUARES as u8 - one - two
    }

    /// Converts the board to row-major `[u8; 64]` where 0=empty, 1=player 1, 2=player 2.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut out = [0u8; NUM_SQUARES];
        for (slot, position) in out.iter_mut().zip(Position::all()) {
            *slot = self.get(position).to_u8();
        }
        out
    }

    /// Opponent pieces that `player` would capture by placing at `position`.
    ///
    /// Empty when the cell is occupied or nothing is enclosed, i.e. when the
    /// placement is illegal.
    pub fn turned_pieces(&self, position: Position, player: Player) -> Vec<Position> {
        let mut turned = Vec::new();
        if self.get(position) != Piece::Empty {
            return turned;
        }

        let own = player.piece();
        let other = player.opponent().piece();

        for direction in Direction::ALL {
            let mut run = Vec::new();
            let mut next = position.step(direction);

            while let Some(current) = next {
                let piece = self.get(current);
                if piece == other {
                    run.push(current);
                    next = current.step(direction);
                } else {
                    if piece == own && !run.is_empty() {
                        turned.append(&mut run);
                    }
                    break;
                }
            }
        }

        turned
    }

    /// Every placement available to `player`, in row order then column.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        Position::all()
            .filter(|&position| !self.turned_pieces(position, player).is_empty())
            .map(Move::Place)
            .collect()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        Position::all().any(|position| !self.turned_pieces(position, player).is_empty())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-text dump: `x` for player 1, `o` for player 2.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  A B C D E F G H")?;
        for (i, position) in Position::all().enumerate() {
            if position.column() == 0 {
                write!(f, "{}", position.row() + 1)?;
            }
            let mark = match self.get(position) {
                Piece::Empty => '.',
                Piece::Player1 => 'x',
                Piece::Player2 => 'o',
            };
            write!(f, " {mark}")?;
            if i % 8 == 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i32, column: i32) -> Position {
        Position::new(row, column).unwrap()
    }

    #[test]
    fn get_and_set_piece() {
        let mut board = Board::new();
        let p = pos(3, 3);

        assert_eq!(board.get(p), Piece::Empty);
        board.set(p, Piece::Player1);
        assert_eq!(board.get(p), Piece::Player1);
        assert_eq!(board.get_index(27), Some(Piece::Player1));
    }

    #[test]
    fn raw_index_out_of_range() {
        let mut board = Board::new();
        let before = board;

        assert_eq!(board.get_index(64), None);
        board.set_index(64, Piece::Player2);
        assert_eq!(board, before);
    }

    #[test]
    fn copy_is_independent() {
        let mut board = Board::new();
        let p = pos(3, 3);
        board.set(p, Piece::Player1);

        let copy = board.copy();
        board.set(p, Piece::Player2);

        assert_eq!(board.get(p), Piece::Player2);
        assert_eq!(copy.get(p), Piece::Player1);
    }

    #[test]
    fn clear_empties_every_cell() {
        let mut board = Board::initial();
        board.clear();

        assert_eq!(board.count(), (0, 0));
        assert_eq!(board.empty_count(), 64);
    }

    #[test]
    fn initial_board_has_diagonal_center() {
        let board = Board::initial();

        assert_eq!(board.get(pos(3, 3)), Piece::Player1);
        assert_eq!(board.get(pos(4, 4)), Piece::Player1);
        assert_eq!(board.get(pos(3, 4)), Piece::Player2);
        assert_eq!(board.get(pos(4, 3)), Piece::Player2);
        assert_eq!(board.get_index(27), Some(Piece::Player1));
        assert_eq!(board.get_index(35), Some(Piece::Player2));
        assert_eq!(board.count(), (2, 2));
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn turned_pieces_single_run() {
        let board = Board::initial();

        assert_eq!(board.turned_pieces(pos(3, 2), Player::Two), vec![pos(3, 3)]);
        assert_eq!(board.turned_pieces(pos(4, 2), Player::One), vec![pos(4, 3)]);
    }

    #[test]
    fn turned_pieces_on_occupied_cell_is_empty() {
        let board = Board::initial();

        for p in Position::all().filter(|&p| board.get(p) != Piece::Empty) {
            assert!(board.turned_pieces(p, Player::One).is_empty());
            assert!(board.turned_pieces(p, Player::Two).is_empty());
        }
    }

    #[test]
    fn run_ending_on_empty_or_edge_is_discarded() {
        let mut board = Board::new();
        // Opponent line running into the edge.
        for column in 1..8 {
            board.set(pos(0, column), Piece::Player2);
        }
        // Opponent line followed by an empty cell.
        board.set(pos(1, 0), Piece::Player2);

        assert!(board.turned_pieces(pos(0, 0), Player::One).is_empty());
    }

    #[test]
    fn runs_in_several_directions_are_combined() {
        let mut board = Board::new();
        board.set(pos(3, 4), Piece::Player2);
        board.set(pos(3, 5), Piece::Player1);
        board.set(pos(4, 3), Piece::Player2);
        board.set(pos(5, 3), Piece::Player2);
        board.set(pos(6, 3), Piece::Player1);
        board.set(pos(2, 2), Piece::Player2);

        let mut turned = board.turned_pieces(pos(3, 3), Player::One);
        turned.sort_by_key(Position::index);
        let mut expected = vec![pos(3, 4), pos(4, 3), pos(5, 3)];
        expected.sort_by_key(Position::index);

        assert_eq!(turned, expected);
    }

    #[test]
    fn initial_legal_moves() {
        let board = Board::initial();

        assert_eq!(
            board.legal_moves(Player::One),
            vec![
                Move::Place(pos(2, 4)),
                Move::Place(pos(3, 5)),
                Move::Place(pos(4, 2)),
                Move::Place(pos(5, 3)),
            ]
        );
        assert!(board.has_legal_move(Player::Two));
    }

    #[test]
    fn display_dumps_rows() {
        let text = Board::initial().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[4], "4 . . . x o . . .");
        assert_eq!(lines[5], "5 . . . o x . . .");
    }
}

use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

use crate::board::Board;
use crate::error::ReversiError;
use crate::types::{GameResult, GameSnapshot, Move, Player};

/// Picks a move for the player to move in `state`.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, state: &GameState) -> Result<Move, ReversiError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, state: &GameState) -> Result<Move, ReversiError> {
        Ok(state.legal_moves()[0])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LastLegalMoveSelector;

impl MoveSelector for LastLegalMoveSelector {
    fn select_move(&self, state: &GameState) -> Result<Move, ReversiError> {
        let moves = state.legal_moves();
        Ok(moves[moves.len() - 1])
    }
}

/// Picks uniformly among the legal moves.
#[derive(Debug)]
pub struct RandomMoveSelector {
    rng: Mutex<StdRng>,
}

impl RandomMoveSelector {
    /// The same seed replays the same choices.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl MoveSelector for RandomMoveSelector {
    fn select_move(&self, state: &GameState) -> Result<Move, ReversiError> {
        let moves = state.legal_moves();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(*moves.choose(&mut *rng).unwrap_or(&moves[0]))
    }
}

/// A board together with the player to move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    current_player: Player,
}

impl GameState {
    pub fn new(board: Board, current_player: Player) -> Self {
        Self {
            board,
            current_player,
        }
    }

    /// Resets to the opening position with player 1 to move.
    pub fn setup(&mut self) {
        self.board = Board::initial();
        self.current_player = Player::One;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions in tests and tools.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    /// Legal moves for the current player. Never empty.
    ///
    /// Without a placement for the current player the list is `[Pass]` if the
    /// opponent can still place, `[GameOver]` otherwise.
    pub fn legal_moves(&self) -> Vec<Move> {
        let moves = self.board.legal_moves(self.current_player);
        if !moves.is_empty() {
            return moves;
        }

        if self.board.has_legal_move(self.current_player.opponent()) {
            vec![Move::Pass]
        } else {
            vec![Move::GameOver]
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.legal_moves() == [Move::GameOver]
    }

    #[instrument(level = "debug", skip(self), fields(player = ?self.current_player))]
    pub fn make_move(&mut self, mv: Move) -> Result<(), ReversiError> {
        match mv {
            Move::Pass => self.make_pass_move(),
            Move::GameOver => Err(ReversiError::InvalidPassMove(
                "game over is not a playable move",
            )),
            Move::Place(position) => {
                let turned = self.board.turned_pieces(position, self.current_player);
                if turned.is_empty() {
                    return Err(ReversiError::IllegalMove(position));
                }

                let piece = self.current_player.piece();
                for turned_position in &turned {
                    self.board.set(*turned_position, piece);
                }
                self.board.set(position, piece);
                debug!(%position, flipped = turned.len(), "placed");

                self.current_player = self.current_player.opponent();
                Ok(())
            }
        }
    }

    /// Applies `mv` to a copy of this state and returns the copy.
    pub fn do_move(&self, mv: Move) -> Result<GameState, ReversiError> {
        let mut next = self.clone();
        next.make_move(mv)?;
        Ok(next)
    }

    pub fn to_snapshot(&self) -> GameSnapshot {
        let (player1_count, player2_count) = self.board.count();
        let legal_moves = self.legal_moves();
        GameSnapshot {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.id(),
            player1_count,
            player2_count,
            empty_count: self.board.empty_count(),
            legal_moves: legal_moves.iter().filter_map(Move::position).collect(),
            can_pass: legal_moves == [Move::Pass],
            is_game_over: legal_moves == [Move::GameOver],
        }
    }

    pub fn result(&self) -> GameResult {
        let (player1_count, player2_count) = self.board.count();
        GameResult {
            winner: if player1_count > player2_count {
                Player::One.id()
            } else if player2_count > player1_count {
                Player::Two.id()
            } else {
                0
            },
            player1_count,
            player2_count,
        }
    }

    fn make_pass_move(&mut self) -> Result<(), ReversiError> {
        match self.legal_moves().as_slice() {
            [Move::Pass] => {
                debug!(player = ?self.current_player, "pass");
                self.current_player = self.current_player.opponent();
                Ok(())
            }
            [Move::GameOver] => Err(ReversiError::InvalidPassMove("the game is over")),
            _ => Err(ReversiError::InvalidPassMove("a placement is available")),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Board::initial(), Player::One)
    }
}

use crate::ai::search::{SearchProblem, Searcher};
use crate::board::Board;
use crate::error::ReversiError;
use crate::game::{GameState, MoveSelector};
use crate::types::{Move, Piece, Player, Position};

/// Scores a board from player 1's point of view.
pub trait BoardEvaluator {
    fn evaluate(&self, board: &Board) -> f64;
}

impl<F> BoardEvaluator for F
where
    F: Fn(&Board) -> f64,
{
    fn evaluate(&self, board: &Board) -> f64 {
        self(board)
    }
}

/// +1 for every player 1 piece, -1 for every player 2 piece.
#[derive(Debug, Default, Clone, Copy)]
pub struct PieceCountEvaluator;

impl BoardEvaluator for PieceCountEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        simple_evaluator(board)
    }
}

pub fn simple_evaluator(board: &Board) -> f64 {
    Position::all()
        .map(|position| match board.get(position) {
            Piece::Player1 => 1.0,
            Piece::Player2 => -1.0,
            Piece::Empty => 0.0,
        })
        .sum()
}

/// Reversi as a [`SearchProblem`]. Player 1 maximizes.
///
/// A finished game has no actions, so it is always scored as a leaf.
#[derive(Debug, Clone, Copy)]
pub struct ReversiProblem<E> {
    evaluator: E,
}

impl<E: BoardEvaluator> ReversiProblem<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl<E: BoardEvaluator> SearchProblem for ReversiProblem<E> {
    type State = GameState;
    type Action = Move;
    type Error = ReversiError;

    fn evaluate(&self, state: &GameState) -> f64 {
        self.evaluator.evaluate(state.board())
    }

    fn actions(&self, state: &GameState) -> Vec<Move> {
        let moves = state.legal_moves();
        if moves == [Move::GameOver] {
            Vec::new()
        } else {
            moves
        }
    }

    fn apply(&self, state: &GameState, action: &Move) -> Result<GameState, ReversiError> {
        state.do_move(*action)
    }

    fn is_maximizing(&self, state: &GameState) -> bool {
        state.current_player() == Player::One
    }
}

/// Best move after a pruned minimax search `ply` half-moves deep.
///
/// Returns `GameOver` when the game has already ended.
pub fn best_move_minimax<E: BoardEvaluator>(
    state: &GameState,
    evaluator: E,
    ply: u32,
) -> Result<Move, ReversiError> {
    minimax_move(state, evaluator, ply, true)
}

fn minimax_move<E: BoardEvaluator>(
    state: &GameState,
    evaluator: E,
    ply: u32,
    with_pruning: bool,
) -> Result<Move, ReversiError> {
    let problem = ReversiProblem::new(evaluator);
    let outcome = Searcher::new(&problem, ply)
        .with_pruning(with_pruning)
        .search(state)?;
    Ok(outcome.action.unwrap_or_else(|| state.legal_moves()[0]))
}

/// Best move by looking a single half-move ahead.
///
/// Ties keep the earliest move in legal-move order.
pub fn best_move_greedy<E: BoardEvaluator>(
    state: &GameState,
    evaluator: &E,
) -> Result<Move, ReversiError> {
    let moves = state.legal_moves();
    if moves == [Move::GameOver] {
        return Ok(Move::GameOver);
    }

    let sign = match state.current_player() {
        Player::One => 1.0,
        Player::Two => -1.0,
    };

    let mut best_move = moves[0];
    let mut best_score = f64::NEG_INFINITY;
    for mv in moves {
        let next = state.do_move(mv)?;
        let score = evaluator.evaluate(next.board()) * sign;
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
    }
    Ok(best_move)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySelector<E> {
    pub evaluator: E,
}

impl<E: BoardEvaluator + Send + Sync> MoveSelector for GreedySelector<E> {
    fn select_move(&self, state: &GameState) -> Result<Move, ReversiError> {
        best_move_greedy(state, &self.evaluator)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MinimaxSelector<E> {
    pub evaluator: E,
    pub ply: u32,
    pub with_pruning: bool,
}

impl<E: BoardEvaluator + Copy + Send + Sync> MoveSelector for MinimaxSelector<E> {
    fn select_move(&self, state: &GameState) -> Result<Move, ReversiError> {
        minimax_move(state, self.evaluator, self.ply, self.with_pruning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::search::search;

    fn pos(row: i32, column: i32) -> Position {
        Position::new(row, column).unwrap()
    }

    /// Column 0 owned by `player`, a growing triangle of opponent pieces to its right.
    fn staircase(player: Player) -> GameState {
        let mut game = GameState::new(Board::new(), player);
        let board = game.board_mut();
        for row in 0..8 {
            board.set(pos(row, 0), player.piece());
            for column in 1..row {
                board.set(pos(row, column), player.opponent().piece());
            }
        }
        game
    }

    #[test]
    fn piece_count_of_opening_and_first_move() {
        let game = GameState::default();
        assert_eq!(simple_evaluator(game.board()), 0.0);

        for mv in game.legal_moves() {
            let next = game.do_move(mv).unwrap();
            assert_eq!(PieceCountEvaluator.evaluate(next.board()), 3.0);
        }
    }

    #[test]
    fn greedy_takes_longest_row() {
        for player in [Player::One, Player::Two] {
            let game = staircase(player);
            assert_eq!(game.legal_moves().len(), 9);

            let mv = GreedySelector {
                evaluator: PieceCountEvaluator,
            }
            .select_move(&game)
            .unwrap();
            assert_eq!(mv, Move::Place(pos(7, 7)), "{player:?}");
        }
    }

    #[test]
    fn closures_work_as_evaluators() {
        let game = GameState::default();
        let mv = best_move_greedy(&game, &|_: &Board| 0.0).unwrap();

        assert_eq!(mv, game.legal_moves()[0]);
    }

    #[test]
    fn minimax_over_game_returns_legal_move() {
        let game = GameState::default();
        let problem = ReversiProblem::new(PieceCountEvaluator);

        let plain = search(&problem, &game, 2, false).unwrap();
        let pruned = search(&problem, &game, 2, true).unwrap();

        let mv = pruned.action.unwrap();
        assert!(game.legal_moves().contains(&mv));
        assert_eq!(pruned.value, plain.value);
        assert!(pruned.nodes_visited <= plain.nodes_visited);
        assert_eq!(plain.nodes_visited, 1 + 4 + 12);
    }

    #[test]
    fn minimax_for_second_player_minimizes() {
        let mut game = GameState::default();
        game.make_move(Move::Place(pos(4, 2))).unwrap();

        let problem = ReversiProblem::new(PieceCountEvaluator);
        let outcome = search(&problem, &game, 1, false).unwrap();

        // Every reply flips one piece: 5 - 1 -> 3 - 3.
        assert_eq!(outcome.value, 0.0);
        assert!(game.legal_moves().contains(&outcome.action.unwrap()));
    }

    #[test]
    fn finished_game_is_a_leaf() {
        let mut game = GameState::default();
        game.board_mut().set(pos(3, 4), Piece::Player1);
        game.board_mut().set(pos(4, 3), Piece::Player1);

        let problem = ReversiProblem::new(PieceCountEvaluator);
        let outcome = search(&problem, &game, 3, true).unwrap();

        assert_eq!(outcome.action, None);
        assert_eq!(outcome.value, 4.0);
        assert_eq!(best_move_minimax(&game, PieceCountEvaluator, 3), Ok(Move::GameOver));
        assert_eq!(best_move_greedy(&game, &PieceCountEvaluator), Ok(Move::GameOver));
    }

    #[test]
    fn pass_is_searched_through() {
        let mut board = Board::new();
        for p in Position::all() {
            board.set(p, Piece::Player2);
        }
        board.set(pos(0, 0), Piece::Empty);
        board.set(pos(0, 1), Piece::Player1);
        let game = GameState::new(board, Player::One);

        let selector = MinimaxSelector {
            evaluator: PieceCountEvaluator,
            ply: 2,
            with_pruning: true,
        };
        assert_eq!(selector.select_move(&game), Ok(Move::Pass));
    }

    #[test]
    fn minimax_selector_pruning_does_not_change_choice() {
        let mut game = GameState::default();
        for _ in 0..12 {
            let moves = game.legal_moves();
            if moves == [Move::GameOver] {
                break;
            }

            for ply in 1..4 {
                let plain = MinimaxSelector {
                    evaluator: PieceCountEvaluator,
                    ply,
                    with_pruning: false,
                };
                let pruned = MinimaxSelector {
                    with_pruning: true,
                    ..plain
                };

                let mv = plain.select_move(&game).unwrap();
                assert!(moves.contains(&mv));
                assert_eq!(pruned.select_move(&game), Ok(mv), "ply {ply}");
            }

            game.make_move(moves[moves.len() / 2]).unwrap();
        }
    }
}

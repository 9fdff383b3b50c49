pub mod evaluate;
pub mod search;

pub use evaluate::{
    BoardEvaluator, GreedySelector, MinimaxSelector, PieceCountEvaluator, ReversiProblem,
    best_move_greedy, best_move_minimax, simple_evaluator,
};
pub use search::{SearchOutcome, SearchProblem, Searcher, search};

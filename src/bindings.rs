use std::fmt::Display;

use tracing::info;
use wasm_bindgen::prelude::*;

use crate::ai::{GreedySelector, MinimaxSelector, PieceCountEvaluator};
use crate::error::ReversiError;
use crate::game::{
    FirstLegalMoveSelector, GameState, LastLegalMoveSelector, MoveSelector, RandomMoveSelector,
};
use crate::types::{Move, MoveInput, Position};

/// Computer opponent kinds selectable from the UI.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    First,
    Last,
    Random,
    Greedy,
    Minimax,
}

/// One game session driven by the browser UI.
///
/// `level` picks the computer opponent: 0 plays the first legal move, 1 looks
/// one move ahead, higher levels run minimax that many half-moves deep.
#[wasm_bindgen]
pub struct ReversiGame {
    state: GameState,
    selector: Box<dyn MoveSelector>,
}

#[wasm_bindgen]
impl ReversiGame {
    #[wasm_bindgen(constructor)]
    pub fn new(level: u32) -> ReversiGame {
        Self::with_selector(selector_for_level(level))
    }

    /// Picks the opponent explicitly. `level` is the minimax depth, `seed`
    /// drives the random opponent; each is ignored by the other kinds.
    #[wasm_bindgen(js_name = withOpponent)]
    pub fn with_opponent(opponent: Opponent, level: u32, seed: u64) -> ReversiGame {
        Self::with_selector(selector_for(opponent, level, seed))
    }

    /// Current [`crate::types::GameSnapshot`].
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.state.to_snapshot())?)
    }

    /// Current [`crate::types::GameResult`].
    pub fn result(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.state.result())?)
    }

    /// Plays a `{ kind, row, column }` move object for the player to move.
    pub fn play(&mut self, input: JsValue) -> Result<String, JsValue> {
        let input: MoveInput = serde_wasm_bindgen::from_value(input)?;
        let mv = Move::try_from(input).map_err(to_js)?;
        self.apply(mv).map_err(to_js)?;
        Ok(mv.to_string())
    }

    pub fn place(&mut self, row: i32, column: i32) -> Result<String, JsValue> {
        let mv = Move::Place(Position::new(row, column).map_err(to_js)?);
        self.apply(mv).map_err(to_js)?;
        Ok(mv.to_string())
    }

    pub fn pass(&mut self) -> Result<(), JsValue> {
        self.apply(Move::Pass).map_err(to_js)
    }

    /// Lets the computer move for the current player and returns its label.
    pub fn ai_move(&mut self) -> Result<String, JsValue> {
        self.computer_turn().map(|mv| mv.to_string()).map_err(to_js)
    }

    pub fn board_text(&self) -> String {
        self.state.board().to_string()
    }
}

impl ReversiGame {
    pub fn with_selector(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            state: GameState::default(),
            selector,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn apply(&mut self, mv: Move) -> Result<(), ReversiError> {
        self.state.make_move(mv)
    }

    /// A finished game yields `GameOver` and leaves the state unchanged.
    pub fn computer_turn(&mut self) -> Result<Move, ReversiError> {
        if self.state.is_game_over() {
            return Ok(Move::GameOver);
        }
        let mv = self.selector.select_move(&self.state)?;
        info!(player = ?self.state.current_player(), %mv, "computer move");
        self.state.make_move(mv)?;
        Ok(mv)
    }
}

fn selector_for_level(level: u32) -> Box<dyn MoveSelector> {
    match level {
        0 => selector_for(Opponent::First, level, 0),
        1 => selector_for(Opponent::Greedy, level, 0),
        ply => selector_for(Opponent::Minimax, ply, 0),
    }
}

fn selector_for(opponent: Opponent, ply: u32, seed: u64) -> Box<dyn MoveSelector> {
    match opponent {
        Opponent::First => Box::new(FirstLegalMoveSelector),
        Opponent::Last => Box::new(LastLegalMoveSelector),
        Opponent::Random => Box::new(RandomMoveSelector::from_seed(seed)),
        Opponent::Greedy => Box::new(GreedySelector {
            evaluator: PieceCountEvaluator,
        }),
        Opponent::Minimax => Box::new(MinimaxSelector {
            evaluator: PieceCountEvaluator,
            ply,
            with_pruning: true,
        }),
    }
}

fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

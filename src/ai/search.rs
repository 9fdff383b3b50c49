use tracing::{debug, trace};

const MIN_SCORE: f64 = f64::NEG_INFINITY;
const MAX_SCORE: f64 = f64::INFINITY;

/// A two-player game tree as seen by [`Searcher`].
///
/// The searcher knows nothing else about the game: states are expanded with
/// `actions`, followed with `apply` and scored with `evaluate`.
pub trait SearchProblem {
    type State;
    type Action;
    type Error;

    /// Static value of `state`; larger is better for the maximizing side.
    fn evaluate(&self, state: &Self::State) -> f64;

    /// Actions available in `state`. An empty list makes `state` a leaf.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn apply(&self, state: &Self::State, action: &Self::Action)
    -> Result<Self::State, Self::Error>;

    /// Whether the side to move in `state` maximizes. Only consulted at the root.
    fn is_maximizing(&self, _state: &Self::State) -> bool {
        true
    }
}

/// Result of [`Searcher::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<A> {
    /// Best root action, `None` when the root itself is a leaf.
    pub action: Option<A>,
    pub value: f64,
    /// Calls into the max/min value functions, leaves included.
    pub nodes_visited: u64,
    /// Leaf evaluations.
    pub evaluations: u64,
}

struct Scored<A> {
    value: f64,
    action: Option<A>,
}

enum Expansion<A> {
    Leaf(f64),
    Inner(Vec<A>),
}

/// Depth-limited minimax with optional alpha-beta pruning.
pub struct Searcher<'a, P: SearchProblem> {
    problem: &'a P,
    ply: u32,
    with_pruning: bool,
    nodes_visited: u64,
    evaluations: u64,
}

impl<'a, P: SearchProblem> Searcher<'a, P> {
    pub fn new(problem: &'a P, ply: u32) -> Self {
        Self {
            problem,
            ply,
            with_pruning: false,
            nodes_visited: 0,
            evaluations: 0,
        }
    }

    pub fn with_pruning(mut self, with_pruning: bool) -> Self {
        self.with_pruning = with_pruning;
        self
    }

    /// Searches `ply` half-moves deep from `state`.
    ///
    /// Runtime grows exponentially with `ply`.
    pub fn search(&mut self, state: &P::State) -> Result<SearchOutcome<P::Action>, P::Error> {
        self.nodes_visited = 0;
        self.evaluations = 0;

        let scored = if self.problem.is_maximizing(state) {
            self.max_value(state, self.ply, MIN_SCORE, MAX_SCORE)?
        } else {
            self.min_value(state, self.ply, MIN_SCORE, MAX_SCORE)?
        };

        debug!(
            ply = self.ply,
            pruning = self.with_pruning,
            value = scored.value,
            nodes = self.nodes_visited,
            evaluations = self.evaluations,
            "search finished"
        );

        Ok(SearchOutcome {
            action: scored.action,
            value: scored.value,
            nodes_visited: self.nodes_visited,
            evaluations: self.evaluations,
        })
    }

    fn expand(&mut self, state: &P::State, ply: u32) -> Expansion<P::Action> {
        if ply > 0 {
            let actions = self.problem.actions(state);
            if !actions.is_empty() {
                return Expansion::Inner(actions);
            }
        }
        self.evaluations += 1;
        Expansion::Leaf(self.problem.evaluate(state))
    }

    fn max_value(
        &mut self,
        state: &P::State,
        ply: u32,
        mut alpha: f64,
        beta: f64,
    ) -> Result<Scored<P::Action>, P::Error> {
        self.nodes_visited += 1;
        let actions = match self.expand(state, ply) {
            Expansion::Leaf(value) => return Ok(Scored { value, action: None }),
            Expansion::Inner(actions) => actions,
        };

        let mut best_value = MIN_SCORE;
        let mut best_index = None;

        for (index, action) in actions.iter().enumerate() {
            let child = self.problem.apply(state, action)?;
            let value = self.min_value(&child, ply - 1, alpha, beta)?.value;

            if best_index.is_none() || value > best_value {
                best_value = value;
                best_index = Some(index);
            }
            if self.with_pruning && value >= beta {
                trace!(ply, index, value, beta, "beta cutoff");
                break;
            }
            if value > alpha {
                alpha = value;
            }
        }

        Ok(Scored {
            value: best_value,
            action: best_index.and_then(|index| actions.into_iter().nth(index)),
        })
    }

    fn min_value(
        &mut self,
        state: &P::State,
        ply: u32,
        alpha: f64,
        mut beta: f64,
    ) -> Result<Scored<P::Action>, P::Error> {
        self.nodes_visited += 1;
        let actions = match self.expand(state, ply) {
            Expansion::Leaf(value) => return Ok(Scored { value, action: None }),
            Expansion::Inner(actions) => actions,
        };

        let mut best_value = MAX_SCORE;
        let mut best_index = None;

        for (index, action) in actions.iter().enumerate() {
            let child = self.problem.apply(state, action)?;
            let value = self.max_value(&child, ply - 1, alpha, beta)?.value;

            if best_index.is_none() || value < best_value {
                best_value = value;
                best_index = Some(index);
            }
            if self.with_pruning && value <= alpha {
                trace!(ply, index, value, alpha, "alpha cutoff");
                break;
            }
            if value < beta {
                beta = value;
            }
        }

        Ok(Scored {
            value: best_value,
            action: best_index.and_then(|index| actions.into_iter().nth(index)),
        })
    }
}

/// Shorthand for `Searcher::new(problem, ply).with_pruning(with_pruning).search(state)`.
pub fn search<P: SearchProblem>(
    problem: &P,
    state: &P::State,
    ply: u32,
    with_pruning: bool,
) -> Result<SearchOutcome<P::Action>, P::Error> {
    Searcher::new(problem, ply)
        .with_pruning(with_pruning)
        .search(state)
}

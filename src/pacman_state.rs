use arrayvec::ArrayVec;

use crate::variables::{Action, Position};

/// The index of the controlled agent. Ghosts are `1..num_agents()`.
pub const PACMAN_INDEX: usize = 0;

/// What the agents may know about one ghost.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GhostView {
    pub position: Position,
    /// Ghost moves left until the ghost stops being scared.
    pub scared_timer: u32,
}

impl GhostView {
    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

/// The game engine, as seen by the agents.
///
/// A state is an immutable snapshot: taking an action never mutates it but
/// produces a new successor state.
pub trait PacmanState: Sized {
    /// Returns the legal actions for the given agent. Terminal states have none.
    fn legal_actions(&self, agent_index: usize) -> ArrayVec<Action, 5>;

    /// Returns the state that results from the given agent taking the given action.
    fn successor(&self, agent_index: usize, action: Action) -> Self;

    /// Returns the number of agents (Pacman plus ghosts).
    fn num_agents(&self) -> usize;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    /// Returns the game score.
    fn score(&self) -> f64;

    fn pacman_position(&self) -> Position;

    /// Returns the positions of the remaining food.
    fn food_positions(&self) -> Vec<Position>;

    /// Returns the ghost that moves as agent `agent_index`.
    ///
    /// Panics unless `1 <= agent_index < num_agents()`.
    fn ghost(&self, agent_index: usize) -> GhostView;

    /// Returns the positions of the remaining capsules.
    fn capsules(&self) -> &[Position];

    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }

    /// Returns every ghost, in agent order.
    fn ghosts(&self) -> Vec<GhostView> {
        (1..self.num_agents()).map(|i| self.ghost(i)).collect()
    }
}

pub fn manhattan_distance(a: Position, b: Position) -> usize {
    usize::abs_diff(a.0, b.0) + usize::abs_diff(a.1, b.1)
}

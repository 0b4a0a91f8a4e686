use arrayvec::ArrayVec;
use ndarray::Array2;

use crate::variables::{Action, Position, SCARED_TIME};

/// The state of one ghost: where it is, where it is heading, and how much
/// longer it stays scared.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GhostAgent {
    start: Position,
    pub pos: Position,
    pub direction: Action,
    pub scared_timer: u32,
}

impl GhostAgent {
    pub fn new(start: Position) -> Self {
        Self {
            start,
            pos: start,
            direction: Action::Stop,
            scared_timer: 0,
        }
    }

    fn is_move_legal(move_pos: Option<Position>, walls: &Array2<bool>) -> bool {
        move_pos.map_or(false, |pos| !walls.get(pos).copied().unwrap_or(true))
    }

    /// Returns the legal actions for this ghost. Ghosts never stop, and only
    /// turn around when there is nowhere else to go.
    pub fn legal_actions(&self, walls: &Array2<bool>) -> ArrayVec<Action, 5> {
        let mut possible: ArrayVec<Action, 5> = [Action::North, Action::South, Action::East, Action::West]
            .into_iter()
            .filter(|action| Self::is_move_legal(action.apply(self.pos), walls))
            .collect();
        let reverse = self.direction.reverse();
        if possible.len() > 1 {
            possible.retain(|action| *action != reverse);
        }
        possible
    }

    /// Moves the ghost one cell in the direction of `action` and ticks its scared timer.
    ///
    /// Panics if the move would leave the maze.
    pub fn apply(&mut self, action: Action) {
        self.pos = action
            .apply(self.pos)
            .expect("ghost moved off the edge of the maze");
        if action != Action::Stop {
            self.direction = action;
        }
        self.scared_timer = self.scared_timer.saturating_sub(1);
    }

    /// Sends the ghost back to its start cell and removes the scared condition.
    /// This function is called when the ghost gets eaten by Pacman.
    pub fn send_home(&mut self) {
        self.pos = self.start;
        self.direction = Action::Stop;
        self.scared_timer = 0;
    }

    /// Makes the ghost scared for `SCARED_TIME` ghost moves, resetting the
    /// timer if it was already scared.
    pub fn become_scared(&mut self) {
        self.scared_timer = SCARED_TIME;
    }

    /// Returns true if the ghost is scared.
    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

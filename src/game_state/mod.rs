#[cfg(feature = "python")]
mod py_wrappers;

#[cfg(feature = "python")]
pub use py_wrappers::reflex_action_values;

use std::{fmt, sync::Arc};

use arrayvec::ArrayVec;
use ndarray::Array2;
#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::{
    ghost_agent::GhostAgent,
    grid::Layout,
    pacman_state::{GhostView, PacmanState, PACMAN_INDEX},
    variables::{
        Action, GridValue, Position, FOOD_SCORE, GHOST_SCORE, LOSE_PENALTY, TIME_PENALTY,
        WIN_SCORE,
    },
};

/// A minimal grid Pacman engine.
///
/// Every successor is a fresh value; the walls are shared between all states
/// descended from the same layout. A state cannot be changed once created:
///
/// ```compile_fail
/// use pacman_agents::{game_state::GameState, grid::Layout};
///
/// let mut state = GameState::new(&Layout::named("tiny").unwrap());
/// state.pacman = (3, 1);
/// ```
///
/// ```compile_fail
/// use pacman_agents::{game_state::GameState, grid::Layout};
///
/// let mut state = GameState::new(&Layout::named("tiny").unwrap());
/// state.ghosts_mut()[0].become_scared();
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "python", pyclass)]
pub struct GameState {
    walls: Arc<Array2<bool>>,
    food: Array2<bool>,
    /// The number of remaining food pellets.
    food_count: usize,
    capsules: Vec<Position>,
    pacman: Position,
    ghosts: Vec<GhostAgent>,
    score: i32,
    win: bool,
    lose: bool,
}

impl GameState {
    /// Creates the initial state for the given layout.
    pub fn new(layout: &Layout) -> Self {
        let food = layout.food();
        Self {
            walls: Arc::new(layout.walls()),
            food_count: food.iter().filter(|&&f| f).count(),
            food,
            capsules: layout.capsules(),
            pacman: layout.pacman_start,
            ghosts: layout.ghost_starts.iter().map(|&pos| GhostAgent::new(pos)).collect(),
            score: 0,
            win: false,
            lose: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn ghosts_mut(&mut self) -> &mut [GhostAgent] {
        &mut self.ghosts
    }

    /// Returns the number of remaining food pellets.
    pub fn food_count(&self) -> usize {
        self.food_count
    }

    pub fn has_food(&self, pos: Position) -> bool {
        self.food.get(pos).copied().unwrap_or(false)
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.get(pos).copied().unwrap_or(true)
    }

    /// Returns the static and consumable contents of every cell, indexed by `[x, y]`.
    pub fn grid(&self) -> Array2<GridValue> {
        let mut grid = Array2::from_shape_fn(self.walls.dim(), |pos| {
            if self.walls[pos] {
                GridValue::Wall
            } else if self.food[pos] {
                GridValue::Food
            } else {
                GridValue::Empty
            }
        });
        for &pos in &self.capsules {
            grid[pos] = GridValue::Capsule;
        }
        grid
    }

    /// Moves Pacman, eating whatever is on the destination cell.
    fn move_pacman(&mut self, action: Action) {
        let new_pos = action
            .apply(self.pacman)
            .filter(|&pos| !self.is_wall(pos))
            .unwrap_or_else(|| panic!("illegal Pacman action {action:?}"));
        self.score -= TIME_PENALTY;
        self.pacman = new_pos;

        if self.has_food(new_pos) {
            self.food[new_pos] = false;
            self.food_count -= 1;
            self.score += FOOD_SCORE;
            if self.food_count == 0 && !self.lose {
                self.score += WIN_SCORE;
                self.win = true;
            }
        }

        if let Some(index) = self.capsules.iter().position(|&pos| pos == new_pos) {
            self.capsules.remove(index);
            self.ghosts.iter_mut().for_each(GhostAgent::become_scared);
        }
    }

    /// Moves a ghost one cell.
    fn move_ghost(&mut self, ghost_index: usize, action: Action) {
        let ghost = &self.ghosts[ghost_index];
        assert!(
            ghost.legal_actions(&self.walls).contains(&action),
            "illegal action {action:?} for ghost {ghost_index}"
        );
        self.ghosts[ghost_index].apply(action);
    }

    /// Resolves collisions between Pacman and the ghost(s) that may have just
    /// moved onto the same cell.
    fn check_death(&mut self, agent_index: usize) {
        if agent_index == PACMAN_INDEX {
            for ghost_index in 0..self.ghosts.len() {
                self.check_collision(ghost_index);
            }
        } else {
            self.check_collision(agent_index - 1);
        }
    }

    /// A scared ghost on Pacman's cell is eaten; any other ghost there ends the game.
    fn check_collision(&mut self, ghost_index: usize) {
        let ghost = &mut self.ghosts[ghost_index];
        if ghost.pos != self.pacman {
            return;
        }
        if ghost.is_scared() {
            ghost.send_home();
            self.score += GHOST_SCORE;
        } else if !self.win {
            self.score -= LOSE_PENALTY;
            self.lose = true;
        }
    }
}

impl PacmanState for GameState {
    fn legal_actions(&self, agent_index: usize) -> ArrayVec<Action, 5> {
        if self.is_terminal() {
            return ArrayVec::new();
        }
        if agent_index == PACMAN_INDEX {
            Action::ALL
                .into_iter()
                .filter(|action| {
                    action
                        .apply(self.pacman)
                        .map_or(false, |pos| !self.is_wall(pos))
                })
                .collect()
        } else {
            self.ghosts
                .get(agent_index - 1)
                .map(|ghost| ghost.legal_actions(&self.walls))
                .unwrap_or_default()
        }
    }

    /// Panics if this state is terminal or the action is illegal.
    fn successor(&self, agent_index: usize, action: Action) -> Self {
        assert!(
            !self.is_terminal(),
            "can't generate a successor of a terminal state"
        );
        let mut next = self.clone();
        if agent_index == PACMAN_INDEX {
            next.move_pacman(action);
        } else {
            next.move_ghost(agent_index - 1, action);
        }
        next.check_death(agent_index);
        next
    }

    fn num_agents(&self) -> usize {
        1 + self.ghosts.len()
    }

    fn is_win(&self) -> bool {
        self.win
    }

    fn is_lose(&self) -> bool {
        self.lose
    }

    fn score(&self) -> f64 {
        self.score as f64
    }

    fn pacman_position(&self) -> Position {
        self.pacman
    }

    fn food_positions(&self) -> Vec<Position> {
        self.food
            .indexed_iter()
            .filter(|&(_, &has_food)| has_food)
            .map(|(pos, _)| pos)
            .collect()
    }

    fn ghost(&self, agent_index: usize) -> GhostView {
        let ghost = &self.ghosts[agent_index - 1];
        GhostView {
            position: ghost.pos,
            scared_timer: ghost.scared_timer,
        }
    }

    fn capsules(&self) -> &[Position] {
        &self.capsules
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print the score.
        write!(f, "Score: {}", self.score)?;
        if self.win {
            write!(f, "  [WIN]")?;
        } else if self.lose {
            write!(f, "  [LOSE]")?;
        }
        writeln!(f)?;

        // Print the game grid.
        let grid = self.grid();
        let (width, height) = grid.dim();
        for y in (0..height).rev() {
            for x in 0..width {
                let ghost = self.ghosts.iter().find(|ghost| ghost.pos == (x, y));
                let ch = if (x, y) == self.pacman {
                    'P'
                } else if let Some(ghost) = ghost {
                    if ghost.is_scared() {
                        'S'
                    } else {
                        'G'
                    }
                } else {
                    match grid[(x, y)] {
                        GridValue::Wall => '%',
                        GridValue::Food => '.',
                        GridValue::Empty => ' ',
                        GridValue::Capsule => 'o',
                    }
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::SCARED_TIME;

    fn state(text: &str) -> GameState {
        GameState::new(&Layout::parse(text).unwrap())
    }

    #[test]
    fn pacman_legal_actions_include_stop() {
        let state = state("%%%%%\n% . %\n%.P %\n%%%%%\n");
        let actions = state.legal_actions(PACMAN_INDEX);
        assert_eq!(
            actions.as_slice(),
            &[Action::North, Action::East, Action::West, Action::Stop]
        );
    }

    #[test]
    fn eating_food_scores_and_clearing_the_board_wins() {
        let start = state("%%%%%%%\n%P.. G%\n%%%%%%%\n");
        assert_eq!(start.food_count(), 2);

        let one = start.successor(PACMAN_INDEX, Action::East);
        assert_eq!(one.score(), (FOOD_SCORE - TIME_PENALTY) as f64);
        assert_eq!(one.food_count(), 1);
        assert!(!one.is_terminal());

        let two = one.successor(PACMAN_INDEX, Action::East);
        assert!(two.is_win());
        assert_eq!(
            two.score(),
            (2 * (FOOD_SCORE - TIME_PENALTY) + WIN_SCORE) as f64
        );
        assert!(two.legal_actions(PACMAN_INDEX).is_empty());
        assert!(two.legal_actions(1).is_empty());
    }

    #[test]
    fn stepping_onto_a_ghost_loses() {
        let start = state("%%%%%\n%P G%\n%%%%%\n");
        let next = start.successor(PACMAN_INDEX, Action::East);
        assert!(!next.is_terminal());
        let caught = next.successor(1, Action::West);
        assert!(caught.is_lose());
        assert_eq!(caught.score(), (-TIME_PENALTY - LOSE_PENALTY) as f64);
    }

    #[test]
    fn capsules_scare_ghosts_and_scared_ghosts_are_eaten() {
        let start = state("%%%%%%\n%Po G%\n%%%%%%\n");
        let powered = start.successor(PACMAN_INDEX, Action::East);
        assert!(powered.capsules().is_empty());
        assert!(powered.ghosts().iter().all(|g| g.scared_timer == SCARED_TIME));

        let ghost_moved = powered.successor(1, Action::West);
        assert_eq!(ghost_moved.ghost(1).position, (3, 1));
        assert_eq!(ghost_moved.ghost(1).scared_timer, SCARED_TIME - 1);

        let eaten = ghost_moved.successor(PACMAN_INDEX, Action::East);
        assert!(!eaten.is_terminal());
        assert_eq!(eaten.ghost(1).position, (4, 1));
        assert!(!eaten.ghost(1).is_scared());
        assert_eq!(eaten.score(), (GHOST_SCORE - 2 * TIME_PENALTY) as f64);
    }

    #[test]
    fn successors_do_not_touch_the_parent() {
        let start = state("%%%%%%%\n%P.. G%\n%%%%%%%\n");
        let before = start.to_string();
        let _ = start.successor(PACMAN_INDEX, Action::East);
        let _ = start.successor(1, Action::West);
        assert_eq!(start.to_string(), before);
        assert_eq!(start.food_count(), 2);
    }

    #[test]
    #[should_panic(expected = "terminal")]
    fn terminal_states_have_no_successors() {
        let start = state("%%%%\n%P.%\n%G %\n%%%%\n");
        let won = start.successor(PACMAN_INDEX, Action::East);
        assert!(won.is_win());
        let _ = won.successor(1, Action::North);
    }

    #[test]
    fn ghosts_are_reported_by_agent_index() {
        let start = state("%%%%%%\n%2P 1%\n%%%%%%\n");
        assert_eq!(start.num_agents(), 3);
        assert_eq!(
            start.ghost(1),
            GhostView {
                position: (4, 1),
                scared_timer: 0
            }
        );
        assert_eq!(start.ghost(2).position, (1, 1));
        assert_eq!(start.ghosts(), vec![start.ghost(1), start.ghost(2)]);
    }

    #[test]
    fn display_draws_agents_over_cells() {
        let start = state("%%%%%\n%P.G%\n%%%%%\n");
        assert_eq!(start.to_string(), "Score: 0\n%%%%%\n%P.G%\n%%%%%\n");
    }
}

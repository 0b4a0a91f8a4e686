use ndarray::Array2;
use num_enum::TryFromPrimitive;
use numpy::{IntoPyArray, PyArray2};
use pyo3::{exceptions::PyValueError, prelude::*};

use super::GameState;
use crate::{
    grid::{Layout, LayoutError},
    heuristic_values,
    pacman_state::PacmanState,
    variables::Action,
};

impl From<LayoutError> for PyErr {
    fn from(err: LayoutError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn action_from_py(action: u8) -> PyResult<Action> {
    Action::try_from_primitive(action).map_err(|_| PyValueError::new_err("Invalid action"))
}

#[pymethods]
impl GameState {
    /// Creates the initial state for a bundled layout name or a layout file path.
    #[new]
    #[pyo3(signature = (layout = "small"))]
    fn py_new(layout: &str) -> PyResult<Self> {
        Ok(GameState::new(&Layout::load(layout)?))
    }

    /// Returns the legal actions for the given agent as action codes.
    #[pyo3(name = "legal_actions", signature = (agent_index = 0))]
    fn py_legal_actions(&self, agent_index: usize) -> Vec<u8> {
        self.legal_actions(agent_index)
            .into_iter()
            .map(u8::from)
            .collect()
    }

    /// Returns the state after the given agent takes the given action.
    /// Raises ValueError for terminal states and illegal actions.
    #[pyo3(name = "successor")]
    fn py_successor(&self, agent_index: usize, action: u8) -> PyResult<Self> {
        let action = action_from_py(action)?;
        if self.is_terminal() {
            return Err(PyValueError::new_err("can't generate a successor of a terminal state"));
        }
        if !self.legal_actions(agent_index).contains(&action) {
            return Err(PyValueError::new_err(format!(
                "illegal action {action:?} for agent {agent_index}"
            )));
        }
        Ok(self.successor(agent_index, action))
    }

    #[getter(score)]
    fn py_score(&self) -> f64 {
        self.score()
    }

    #[getter(num_agents)]
    fn py_num_agents(&self) -> usize {
        self.num_agents()
    }

    #[pyo3(name = "is_win")]
    fn py_is_win(&self) -> bool {
        self.is_win()
    }

    #[pyo3(name = "is_lose")]
    fn py_is_lose(&self) -> bool {
        self.is_lose()
    }

    #[getter(pacman_position)]
    fn py_pacman_position(&self) -> (usize, usize) {
        self.pacman_position()
    }

    /// The ghosts as `(position, scared_timer)` pairs.
    #[getter(ghosts)]
    fn py_ghosts(&self) -> Vec<((usize, usize), u32)> {
        self.ghosts
            .iter()
            .map(|ghost| (ghost.pos, ghost.scared_timer))
            .collect()
    }

    #[getter(capsules)]
    fn py_capsules(&self) -> Vec<(usize, usize)> {
        self.capsules.clone()
    }

    /// The remaining food, as a boolean NumPy array indexed by `[x, y]`.
    fn food_numpy(&self, py: Python<'_>) -> Py<PyArray2<bool>> {
        self.food.clone().into_pyarray(py).into()
    }

    /// The cell contents (`GridValue` codes), as a NumPy array indexed by `[x, y]`.
    fn grid_numpy(&self, py: Python<'_>) -> Py<PyArray2<u8>> {
        let grid: Array2<u8> = self.grid().mapv(u8::from);
        grid.into_pyarray(py).into()
    }

    fn __str__(&self) -> String {
        self.to_string()
    }
}

/// Computes the reflex value of each of the 5 actions for the given state
/// (None for illegal actions).
#[pyfunction]
pub fn reflex_action_values(game_state: &GameState) -> [Option<f64>; 5] {
    heuristic_values::action_values(game_state)
}

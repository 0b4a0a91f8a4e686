pub mod agents;
pub mod game_state;
pub mod ghost_agent;
pub mod grid;
pub mod heuristic_values;
pub mod pacman_state;
pub mod variables;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module exposing the reference engine and the Pacman agents.
#[cfg(feature = "python")]
#[pymodule]
fn pacman_agents(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<game_state::GameState>()?;
    m.add_class::<agents::py_agent::PyAgent>()?;
    m.add_function(wrap_pyfunction!(game_state::reflex_action_values, m)?)?;
    Ok(())
}

use pyo3::{exceptions::PyValueError, prelude::*};
use rand::{rngs::StdRng, SeedableRng};

use super::{Agent, AgentConfig, AgentError, AgentKind};
use crate::game_state::GameState;

impl From<AgentError> for PyErr {
    fn from(err: AgentError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// A Pacman agent playing on the reference engine.
#[pyclass(name = "Agent")]
pub struct PyAgent {
    agent: Box<dyn Agent<GameState> + Send>,
    kind: AgentKind,
    config: AgentConfig,
}

#[pymethods]
impl PyAgent {
    /// Creates an agent by name. Unknown names raise ValueError.
    /// Without a seed, ties are broken with an entropy-seeded generator.
    #[new]
    #[pyo3(signature = (kind = "MinimaxAgent", eval_fn = "scoreEvaluationFunction", depth = 2, seed = None))]
    fn new(kind: &str, eval_fn: &str, depth: u32, seed: Option<u64>) -> PyResult<Self> {
        let kind: AgentKind = kind.parse()?;
        let config = AgentConfig::new(eval_fn.parse()?, depth);
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Ok(Self {
            agent: kind.build(config, rng),
            kind,
            config,
        })
    }

    /// Returns Pacman's chosen action code for the given state.
    fn get_action(&mut self, state: &GameState) -> PyResult<u8> {
        Ok(self.agent.get_action(state)?.into())
    }

    fn __repr__(&self) -> String {
        format!(
            "Agent({}, eval_fn={}, depth={})",
            self.kind, self.config.eval_fn, self.config.depth
        )
    }
}

//! Pacman agents: a one-step reflex agent and the adversarial search agents.
//!
//! Agents are built from an [`AgentKind`] and an [`AgentConfig`], both of
//! which can be resolved from strings so that callers can pick an agent and
//! its options by name:
//!
//! ```
//! use pacman_agents::agents::{Agent, AgentConfig, AgentKind};
//! use pacman_agents::game_state::GameState;
//! use pacman_agents::grid::Layout;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let kind: AgentKind = "AlphaBetaAgent".parse().unwrap();
//! let config = AgentConfig::from_args("depth=2,evalFn=better").unwrap();
//! let mut agent = kind.build::<GameState, _>(config, StdRng::seed_from_u64(0));
//!
//! let state = GameState::new(&Layout::named("tiny").unwrap());
//! let action = agent.get_action(&state).unwrap();
//! println!("{action:?}");
//! ```

#[cfg(feature = "python")]
pub mod py_agent;
pub mod reflex;
pub mod search;

use std::{fmt, str::FromStr};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

use crate::{
    heuristic_values::EvalFn,
    pacman_state::PacmanState,
    variables::{Action, DEFAULT_DEPTH},
};

pub use reflex::ReflexAgent;
pub use search::{Decision, SearchAgent, SearchRule, SearchStats};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("unknown evaluation function {0:?}")]
    UnknownEvalFn(String),
    #[error("unknown agent {0:?}")]
    UnknownAgent(String),
    #[error("unknown agent option {0:?}")]
    UnknownOption(String),
    #[error("malformed agent option {0:?}, expected key=value")]
    MalformedOption(String),
    #[error("invalid search depth {0:?}")]
    InvalidDepth(String),
    #[error("Pacman has no legal actions")]
    NoLegalActions,
}

/// Something that picks Pacman's move each turn.
pub trait Agent<S: PacmanState> {
    /// Returns one legal action for Pacman in `state`.
    fn get_action(&mut self, state: &S) -> Result<Action, AgentError>;
}

/// The construction-time options of a search agent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AgentConfig {
    /// The evaluation applied at search leaves.
    pub eval_fn: EvalFn,
    /// The search depth, in full rounds (Pacman plus every ghost).
    pub depth: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            eval_fn: EvalFn::default(),
            depth: DEFAULT_DEPTH,
        }
    }
}

impl AgentConfig {
    pub fn new(eval_fn: EvalFn, depth: u32) -> Self {
        Self { eval_fn, depth }
    }

    /// Resolves an evaluation function name and a depth string.
    pub fn from_names(eval_fn: &str, depth: &str) -> Result<Self, AgentError> {
        Ok(Self {
            eval_fn: eval_fn.parse()?,
            depth: parse_depth(depth)?,
        })
    }

    /// Parses comma-separated `key=value` options, e.g. `depth=3,evalFn=better`.
    /// Options that are not given keep their defaults.
    pub fn from_args(args: &str) -> Result<Self, AgentError> {
        let mut config = Self::default();
        for option in args.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            let (key, value) = option
                .split_once('=')
                .ok_or_else(|| AgentError::MalformedOption(option.to_owned()))?;
            match key.trim() {
                "depth" => config.depth = parse_depth(value.trim())?,
                "evalFn" | "eval_fn" => config.eval_fn = value.trim().parse()?,
                _ => return Err(AgentError::UnknownOption(key.trim().to_owned())),
            }
        }
        Ok(config)
    }
}

fn parse_depth(depth: &str) -> Result<u32, AgentError> {
    depth
        .parse()
        .map_err(|_| AgentError::InvalidDepth(depth.to_owned()))
}

/// The available agents.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AgentKind {
    Reflex,
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl AgentKind {
    /// Builds an agent of this kind. The reflex agent ignores `config`.
    pub fn build<S, R>(self, config: AgentConfig, rng: R) -> Box<dyn Agent<S> + Send>
    where
        S: PacmanState + 'static,
        R: Rng + Send + 'static,
    {
        match self {
            AgentKind::Reflex => Box::new(ReflexAgent::new(rng)),
            AgentKind::Minimax => Box::new(SearchAgent::minimax(config, rng)),
            AgentKind::AlphaBeta => Box::new(SearchAgent::alpha_beta(config, rng)),
            AgentKind::Expectimax => Box::new(SearchAgent::expectimax(config, rng)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Reflex => "ReflexAgent",
            AgentKind::Minimax => "MinimaxAgent",
            AgentKind::AlphaBeta => "AlphaBetaAgent",
            AgentKind::Expectimax => "ExpectimaxAgent",
        }
    }
}

impl FromStr for AgentKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ReflexAgent" | "reflex" => Ok(AgentKind::Reflex),
            "MinimaxAgent" | "minimax" => Ok(AgentKind::Minimax),
            "AlphaBetaAgent" | "alphabeta" | "alpha_beta" => Ok(AgentKind::AlphaBeta),
            "ExpectimaxAgent" | "expectimax" => Ok(AgentKind::Expectimax),
            _ => Err(AgentError::UnknownAgent(s.to_owned())),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the indices of all maximal values.
pub(crate) fn best_indices(values: &[f64]) -> Vec<usize> {
    let Some(best) = values.iter().copied().map(OrderedFloat).max() else {
        return Vec::new();
    };
    values
        .iter()
        .positions(|&value| OrderedFloat(value) == best)
        .collect()
}

/// Picks uniformly at random among the given candidate indices.
pub(crate) fn choose_index<R: Rng>(candidates: &[usize], rng: &mut R) -> Result<usize, AgentError> {
    candidates
        .choose(rng)
        .copied()
        .ok_or(AgentError::NoLegalActions)
}

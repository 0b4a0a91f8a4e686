//! Depth-limited adversarial search over the multi-agent turn order.
//!
//! One round is a move by Pacman (agent 0) followed by a move by each ghost
//! (agents `1..num_agents`), and the search depth counts rounds. Pacman's
//! turns are max nodes; ghost turns are min nodes under minimax and alpha-beta,
//! and chance nodes (uniform over the ghost's legal moves) under expectimax.
//! All three rules share [`SearchAgent::node_value`]; they differ only in the
//! node kind chosen for ghost turns and in whether bounds are used to prune.

use log::{debug, trace, warn};
use rand::Rng;

use super::{best_indices, choose_index, Agent, AgentConfig, AgentError};
use crate::{
    pacman_state::{PacmanState, PACMAN_INDEX},
    variables::Action,
};

/// How a search agent models the ghosts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchRule {
    /// Ghosts play adversarially.
    Minimax,
    /// Minimax with alpha-beta pruning. Chooses exactly what `Minimax` chooses.
    AlphaBeta,
    /// Ghosts pick uniformly at random among their legal moves.
    Expectimax,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NodeKind {
    Max,
    Min,
    Chance,
}

/// Alpha-beta bounds: the value Pacman is already assured of (`alpha`) and
/// the value the ghosts are already assured of (`beta`) along the current path.
#[derive(Clone, Copy, Debug)]
struct Window {
    alpha: f64,
    beta: f64,
}

impl Window {
    const FULL: Window = Window {
        alpha: f64::NEG_INFINITY,
        beta: f64::INFINITY,
    };
}

/// Counters collected during one decision.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Nodes whose children were generated, including the root.
    pub expanded_nodes: usize,
    /// Calls to the evaluation function.
    pub leaf_evaluations: usize,
    /// Times the remaining siblings of a node were skipped by pruning.
    pub cutoffs: usize,
    /// The fewest agent moves between the root and any evaluated leaf.
    pub shallowest_leaf: Option<usize>,
    /// The most agent moves between the root and any evaluated leaf.
    pub deepest_leaf: Option<usize>,
}

impl SearchStats {
    fn record_leaf(&mut self, ply: usize) {
        self.leaf_evaluations += 1;
        self.shallowest_leaf = Some(self.shallowest_leaf.map_or(ply, |p| p.min(ply)));
        self.deepest_leaf = Some(self.deepest_leaf.map_or(ply, |p| p.max(ply)));
    }
}

/// The outcome of one search.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub action: Action,
    /// The search value of `action`.
    pub value: f64,
    /// The search value of each of Pacman's legal actions at the root.
    pub action_values: Vec<(Action, f64)>,
    pub stats: SearchStats,
}

/// A Pacman agent that searches the game tree to a fixed depth.
pub struct SearchAgent<R> {
    rule: SearchRule,
    config: AgentConfig,
    rng: R,
}

impl<R: Rng> SearchAgent<R> {
    /// Creates a search agent. `rng` breaks ties between equally good actions.
    pub fn new(rule: SearchRule, config: AgentConfig, rng: R) -> Self {
        Self { rule, config, rng }
    }

    pub fn minimax(config: AgentConfig, rng: R) -> Self {
        Self::new(SearchRule::Minimax, config, rng)
    }

    pub fn alpha_beta(config: AgentConfig, rng: R) -> Self {
        Self::new(SearchRule::AlphaBeta, config, rng)
    }

    pub fn expectimax(config: AgentConfig, rng: R) -> Self {
        Self::new(SearchRule::Expectimax, config, rng)
    }

    /// Searches from `state` and returns the best action for Pacman along with
    /// the root values and search statistics. Ties are broken uniformly at random.
    ///
    /// Each root action is searched with a full alpha-beta window, so the root
    /// values are exact under every rule.
    pub fn decide<S: PacmanState>(&mut self, state: &S) -> Result<Decision, AgentError> {
        let actions = state.legal_actions(PACMAN_INDEX);
        if actions.is_empty() {
            return Err(AgentError::NoLegalActions);
        }

        let mut stats = SearchStats {
            expanded_nodes: 1,
            ..Default::default()
        };
        let (next_agent, next_depth) = next_turn(PACMAN_INDEX, 0, state.num_agents());
        let values: Vec<f64> = actions
            .iter()
            .map(|&action| {
                let successor = state.successor(PACMAN_INDEX, action);
                self.node_value(&successor, next_depth, next_agent, Window::FULL, &mut stats)
            })
            .collect();

        let index = choose_index(&best_indices(&values), &mut self.rng)?;
        let action_values: Vec<(Action, f64)> =
            actions.iter().copied().zip(values.iter().copied()).collect();
        trace!("{:?} root values: {:?}", self.rule, action_values);
        debug!(
            "{:?} (depth {}, {}) chose {:?} with value {} ({:?})",
            self.rule, self.config.depth, self.config.eval_fn, actions[index], values[index], stats
        );

        Ok(Decision {
            action: actions[index],
            value: values[index],
            action_values,
            stats,
        })
    }

    fn node_kind(&self, agent_index: usize) -> NodeKind {
        match (agent_index, self.rule) {
            (PACMAN_INDEX, _) => NodeKind::Max,
            (_, SearchRule::Expectimax) => NodeKind::Chance,
            (_, SearchRule::Minimax | SearchRule::AlphaBeta) => NodeKind::Min,
        }
    }

    /// Returns the search value of `state` with `agent_index` to move, `depth`
    /// rounds below the root.
    fn node_value<S: PacmanState>(
        &self,
        state: &S,
        depth: u32,
        agent_index: usize,
        mut window: Window,
        stats: &mut SearchStats,
    ) -> f64 {
        let num_agents = state.num_agents();
        if depth >= self.config.depth || state.is_terminal() {
            return self.leaf_value(state, depth, agent_index, stats);
        }

        let actions = state.legal_actions(agent_index);
        if actions.is_empty() {
            warn!("agent {agent_index} has no legal actions in a non-terminal state");
            return self.leaf_value(state, depth, agent_index, stats);
        }
        stats.expanded_nodes += 1;

        let (next_agent, next_depth) = next_turn(agent_index, depth, num_agents);
        let prune = self.rule == SearchRule::AlphaBeta;
        let child_value = |action: Action, window: Window, stats: &mut SearchStats| {
            let successor = state.successor(agent_index, action);
            self.node_value(&successor, next_depth, next_agent, window, stats)
        };

        match self.node_kind(agent_index) {
            NodeKind::Max => {
                let mut best = f64::NEG_INFINITY;
                for &action in &actions {
                    best = best.max(child_value(action, window, stats));
                    if prune {
                        if best >= window.beta {
                            stats.cutoffs += 1;
                            break;
                        }
                        window.alpha = window.alpha.max(best);
                    }
                }
                best
            }
            NodeKind::Min => {
                let mut best = f64::INFINITY;
                for &action in &actions {
                    best = best.min(child_value(action, window, stats));
                    if prune {
                        if best <= window.alpha {
                            stats.cutoffs += 1;
                            break;
                        }
                        window.beta = window.beta.min(best);
                    }
                }
                best
            }
            NodeKind::Chance => {
                let total: f64 = actions
                    .iter()
                    .map(|&action| child_value(action, window, stats))
                    .sum();
                total / actions.len() as f64
            }
        }
    }

    fn leaf_value<S: PacmanState>(
        &self,
        state: &S,
        depth: u32,
        agent_index: usize,
        stats: &mut SearchStats,
    ) -> f64 {
        stats.record_leaf(depth as usize * state.num_agents() + agent_index);
        self.config.eval_fn.evaluate(state)
    }
}

/// Returns who moves after `agent_index` and the depth they move at; the
/// depth advances once the last ghost has moved.
fn next_turn(agent_index: usize, depth: u32, num_agents: usize) -> (usize, u32) {
    if agent_index + 1 >= num_agents {
        (PACMAN_INDEX, depth + 1)
    } else {
        (agent_index + 1, depth)
    }
}

impl<S: PacmanState, R: Rng> Agent<S> for SearchAgent<R> {
    fn get_action(&mut self, state: &S) -> Result<Action, AgentError> {
        self.decide(state).map(|decision| decision.action)
    }
}

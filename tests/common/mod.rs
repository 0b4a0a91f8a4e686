//! Synthetic `PacmanState`s for exercising the agents on exact trees.

#![allow(dead_code)]

use std::rc::Rc;

use arrayvec::ArrayVec;
use pacman_agents::{
    pacman_state::{GhostView, PacmanState},
    variables::{Action, Position},
};

/// One node of an explicit game tree.
#[derive(Clone, Debug, Default)]
pub struct Node {
    pub score: f64,
    pub win: bool,
    pub lose: bool,
    pub pacman: Position,
    /// `ghosts[i]` is agent `i + 1`.
    pub ghosts: Vec<GhostView>,
    pub capsules: Vec<Position>,
    pub children: Vec<(Action, Rc<Node>)>,
}

pub fn leaf(score: f64) -> Node {
    Node {
        score,
        ..Default::default()
    }
}

pub fn node(children: Vec<(Action, Node)>) -> Node {
    Node {
        children: children
            .into_iter()
            .map(|(action, child)| (action, Rc::new(child)))
            .collect(),
        ..Default::default()
    }
}

/// Walks an explicit tree. Whoever is to move picks one of the current
/// node's children; the agent index only matters for the turn order.
#[derive(Clone, Debug)]
pub struct TreeState {
    node: Rc<Node>,
    num_agents: usize,
}

impl TreeState {
    pub fn new(root: Node, num_agents: usize) -> Self {
        Self {
            node: Rc::new(root),
            num_agents,
        }
    }
}

impl PacmanState for TreeState {
    fn legal_actions(&self, _agent_index: usize) -> ArrayVec<Action, 5> {
        if self.is_terminal() {
            return ArrayVec::new();
        }
        self.node.children.iter().map(|(action, _)| *action).collect()
    }

    fn successor(&self, _agent_index: usize, action: Action) -> Self {
        let child = self
            .node
            .children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, child)| Rc::clone(child))
            .expect("no child for action");
        Self {
            node: child,
            num_agents: self.num_agents,
        }
    }

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn is_win(&self) -> bool {
        self.node.win
    }

    fn is_lose(&self) -> bool {
        self.node.lose
    }

    fn score(&self) -> f64 {
        self.node.score
    }

    fn pacman_position(&self) -> Position {
        self.node.pacman
    }

    fn food_positions(&self) -> Vec<Position> {
        Vec::new()
    }

    fn ghost(&self, agent_index: usize) -> GhostView {
        self.node
            .ghosts
            .get(agent_index - 1)
            .copied()
            .unwrap_or_default()
    }

    fn capsules(&self) -> &[Position] {
        &self.node.capsules
    }
}

/// An implicit tree of uniform branching factor whose scores are a hash of
/// the path taken, with many ties.
#[derive(Clone, Debug)]
pub struct PathState {
    pub path: u64,
    pub ply: usize,
    pub num_agents: usize,
    pub branching: usize,
    /// Every state at least this many moves below the root is a win.
    pub terminal_at: Option<usize>,
}

impl PathState {
    pub fn new(path: u64, num_agents: usize, branching: usize) -> Self {
        Self {
            path,
            ply: 0,
            num_agents,
            branching,
            terminal_at: None,
        }
    }
}

impl PacmanState for PathState {
    fn legal_actions(&self, _agent_index: usize) -> ArrayVec<Action, 5> {
        if self.is_terminal() {
            return ArrayVec::new();
        }
        Action::ALL[..self.branching].iter().copied().collect()
    }

    fn successor(&self, _agent_index: usize, action: Action) -> Self {
        Self {
            path: self.path * 7 + u8::from(action) as u64 + 1,
            ply: self.ply + 1,
            ..self.clone()
        }
    }

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn is_win(&self) -> bool {
        self.terminal_at.map_or(false, |ply| self.ply >= ply)
    }

    fn is_lose(&self) -> bool {
        false
    }

    fn score(&self) -> f64 {
        (self.path.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 60) as f64
    }

    fn pacman_position(&self) -> Position {
        (0, 0)
    }

    fn food_positions(&self) -> Vec<Position> {
        Vec::new()
    }

    fn ghost(&self, _agent_index: usize) -> GhostView {
        GhostView::default()
    }

    fn capsules(&self) -> &[Position] {
        &[]
    }
}

use std::{fmt, str::FromStr};

use crate::{
    agents::AgentError,
    pacman_state::{manhattan_distance, PacmanState, PACMAN_INDEX},
    variables::{
        Action, CAPSULE_BONUS, GHOST_COLLISION_PENALTY, SCARED_GHOST_BONUS, STOP_PENALTY,
    },
};

/// The leaf evaluation functions a search agent can be configured with.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EvalFn {
    /// The state's own score.
    #[default]
    Score,
    /// [`better_evaluation`].
    Better,
}

impl EvalFn {
    /// Returns the evaluation function this variant names.
    pub fn function<S: PacmanState>(self) -> fn(&S) -> f64 {
        match self {
            EvalFn::Score => score_evaluation,
            EvalFn::Better => better_evaluation,
        }
    }

    pub fn evaluate<S: PacmanState>(self, state: &S) -> f64 {
        self.function::<S>()(state)
    }

    pub fn name(self) -> &'static str {
        match self {
            EvalFn::Score => "scoreEvaluationFunction",
            EvalFn::Better => "betterEvaluationFunction",
        }
    }
}

impl FromStr for EvalFn {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scoreEvaluationFunction" | "score" => Ok(EvalFn::Score),
            "betterEvaluationFunction" | "better" => Ok(EvalFn::Better),
            _ => Err(AgentError::UnknownEvalFn(s.to_owned())),
        }
    }
}

impl fmt::Display for EvalFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the state's score. This is the default leaf evaluation for the
/// search agents.
pub fn score_evaluation<S: PacmanState>(state: &S) -> f64 {
    state.score()
}

/// Scores taking `action` from `state` by looking only at the resulting
/// successor: its score, adjusted for ghost collisions, stopping and capsules.
pub fn reflex_evaluation<S: PacmanState>(state: &S, action: Action) -> f64 {
    let successor = state.successor(PACMAN_INDEX, action);
    let pacman_pos = successor.pacman_position();
    let mut score = successor.score();

    for ghost in successor.ghosts() {
        if ghost.position == pacman_pos {
            if ghost.is_scared() {
                score += SCARED_GHOST_BONUS;
            } else {
                score -= GHOST_COLLISION_PENALTY;
            }
        }
    }

    if action == Action::Stop {
        score -= STOP_PENALTY;
    }

    if successor.capsules().contains(&pacman_pos) {
        score += CAPSULE_BONUS;
    }

    score
}

/// Computes the reflex value of each of the 5 actions for the given state,
/// or None for actions that are not legal.
pub fn action_values<S: PacmanState>(state: &S) -> [Option<f64>; 5] {
    let legal = state.legal_actions(PACMAN_INDEX);
    array_init::array_init(|i| {
        let action = Action::from_index(i);
        legal
            .contains(&action)
            .then(|| reflex_evaluation(state, action))
    })
}

const TERMINAL_BONUS: f64 = 10_000.0;
const FOOD_DISTANCE_WEIGHT: f64 = 10.0;
const FOOD_LEFT_WEIGHT: f64 = 4.0;
const CAPSULE_LEFT_WEIGHT: f64 = 20.0;
const SCARED_GHOST_WEIGHT: f64 = 200.0;
const DANGER_DIST: usize = 1;
const DANGER_WEIGHT: f64 = 500.0;
const GHOST_WEIGHT: f64 = 2.0;

/// A richer evaluation of a state for use at search leaves.
///
/// Starts from the score, then rewards being near food, penalizes food and
/// capsules left on the board, rewards closing in on ghosts that will still be
/// scared on arrival, and penalizes being near ghosts that are not.
pub fn better_evaluation<S: PacmanState>(state: &S) -> f64 {
    let score = state.score();
    if state.is_win() {
        return score + TERMINAL_BONUS;
    }
    if state.is_lose() {
        return score - TERMINAL_BONUS;
    }

    let pos = state.pacman_position();
    let food = state.food_positions();

    let food_heuristic = food
        .iter()
        .map(|&food_pos| manhattan_distance(pos, food_pos))
        .min()
        .map_or(0.0, |dist| FOOD_DISTANCE_WEIGHT / (dist as f64 + 1.0));

    let leftovers_heuristic = -FOOD_LEFT_WEIGHT * food.len() as f64
        - CAPSULE_LEFT_WEIGHT * state.capsules().len() as f64;

    let ghost_heuristic: f64 = (1..state.num_agents())
        .map(|agent_index| {
            let ghost = state.ghost(agent_index);
            let dist = manhattan_distance(pos, ghost.position);
            if ghost.scared_timer as usize > dist {
                SCARED_GHOST_WEIGHT / (dist as f64 + 1.0)
            } else if dist <= DANGER_DIST {
                -DANGER_WEIGHT
            } else {
                -GHOST_WEIGHT / dist as f64
            }
        })
        .sum();

    score + food_heuristic + leftovers_heuristic + ghost_heuristic
}

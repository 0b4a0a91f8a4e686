use log::debug;
use rand::Rng;

use super::{best_indices, choose_index, Agent, AgentError};
use crate::{
    heuristic_values::reflex_evaluation,
    pacman_state::{PacmanState, PACMAN_INDEX},
    variables::Action,
};

/// Picks the move whose immediate successor scores best under
/// [`reflex_evaluation`], without looking any further ahead.
pub struct ReflexAgent<R> {
    rng: R,
}

impl<R: Rng> ReflexAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<S: PacmanState, R: Rng> Agent<S> for ReflexAgent<R> {
    fn get_action(&mut self, state: &S) -> Result<Action, AgentError> {
        let actions = state.legal_actions(PACMAN_INDEX);
        let scores: Vec<f64> = actions
            .iter()
            .map(|&action| reflex_evaluation(state, action))
            .collect();

        // Stopping never wins a tie against moving.
        let mut best = best_indices(&scores);
        if best.iter().any(|&i| actions[i] != Action::Stop) {
            best.retain(|&i| actions[i] != Action::Stop);
        }

        let chosen = actions[choose_index(&best, &mut self.rng)?];
        debug!("reflex agent chose {chosen:?} from {:?}", scores);
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{game_state::GameState, grid::Layout};

    fn state(text: &str) -> GameState {
        GameState::new(&Layout::parse(text).unwrap())
    }

    #[test]
    fn heads_for_food() {
        let state = state("%%%%%%%\n%.P   %\n%%%%G%%\n%%%%%%%\n");
        let mut agent = ReflexAgent::new(StdRng::seed_from_u64(1));
        assert_eq!(agent.get_action(&state).unwrap(), Action::West);
    }

    #[test]
    fn never_stops_when_moving_is_as_good() {
        // no food anywhere: East and West tie
        let state = state("%%%%%%%\n%  P  %\n%%%%%G%\n%%%%%%%\n");
        for seed in 0..32 {
            let mut agent = ReflexAgent::new(StdRng::seed_from_u64(seed));
            let action = agent.get_action(&state).unwrap();
            assert_ne!(action, Action::Stop);
        }
    }

    #[test]
    fn avoids_stepping_onto_a_ghost() {
        let state = state("%%%%%%\n% PG %\n%%%%%%\n");
        for seed in 0..16 {
            let mut agent = ReflexAgent::new(StdRng::seed_from_u64(seed));
            assert_eq!(agent.get_action(&state).unwrap(), Action::West);
        }
    }

    #[test]
    fn terminal_states_have_no_action() {
        let start = state("%%%%\n%P.%\n%G %\n%%%%\n");
        let won = start.successor(PACMAN_INDEX, Action::East);
        let mut agent = ReflexAgent::new(StdRng::seed_from_u64(0));
        assert!(matches!(
            agent.get_action(&won),
            Err(AgentError::NoLegalActions)
        ));
    }
}

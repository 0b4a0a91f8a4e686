mod common;

use common::{leaf, node, Node, TreeState};
use pacman_agents::{
    agents::{Agent, AgentConfig, AgentKind, ReflexAgent},
    game_state::GameState,
    grid::Layout,
    heuristic_values::{action_values, reflex_evaluation},
    pacman_state::{GhostView, PacmanState},
    variables::{Action, STOP_PENALTY},
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn stop_loses_ties_to_moving() {
    // stopping scores exactly the stop penalty more, so after the penalty the two tie
    let tree = node(vec![
        (Action::East, leaf(0.0)),
        (Action::Stop, leaf(STOP_PENALTY)),
    ]);
    let state = TreeState::new(tree, 2);
    assert_eq!(
        reflex_evaluation(&state, Action::East),
        reflex_evaluation(&state, Action::Stop)
    );
    for seed in 0..32 {
        let mut agent = ReflexAgent::new(StdRng::seed_from_u64(seed));
        assert_eq!(agent.get_action(&state).unwrap(), Action::East);
    }
}

#[test]
fn stop_is_chosen_when_it_is_strictly_best() {
    let tree = node(vec![
        (Action::West, leaf(-50.0)),
        (Action::Stop, leaf(STOP_PENALTY + 1.0)),
    ]);
    let state = TreeState::new(tree, 2);
    let mut agent = ReflexAgent::new(StdRng::seed_from_u64(0));
    assert_eq!(agent.get_action(&state).unwrap(), Action::Stop);
}

#[test]
fn scared_ghosts_are_worth_chasing() {
    let onto_ghost = |scared_timer| Node {
        pacman: (2, 1),
        ghosts: vec![GhostView {
            position: (2, 1),
            scared_timer,
        }],
        ..leaf(0.0)
    };
    let calm = TreeState::new(node(vec![(Action::East, onto_ghost(0))]), 2);
    let scared = TreeState::new(node(vec![(Action::East, onto_ghost(5))]), 2);

    assert!(reflex_evaluation(&scared, Action::East) > 0.0);
    assert!(reflex_evaluation(&calm, Action::East) < 0.0);
}

#[test]
fn capsules_are_attractive() {
    let onto = |capsule| Node {
        pacman: (1, 1),
        capsules: vec![capsule],
        ..leaf(0.0)
    };
    let on_capsule = TreeState::new(node(vec![(Action::North, onto((1, 1)))]), 1);
    let off_capsule = TreeState::new(node(vec![(Action::North, onto((3, 3)))]), 1);
    assert!(
        reflex_evaluation(&on_capsule, Action::North)
            > reflex_evaluation(&off_capsule, Action::North)
    );
}

#[test]
fn action_values_cover_only_legal_moves() {
    let state = GameState::new(&Layout::named("small").unwrap());
    let values = action_values(&state);
    let legal = state.legal_actions(0);
    for (index, value) in values.iter().enumerate() {
        assert_eq!(value.is_some(), legal.contains(&Action::from_index(index)));
    }
}

#[test]
fn every_agent_kind_plays_a_legal_move() {
    let layout = Layout::named("small").unwrap();
    let state = GameState::new(&layout);
    let config = AgentConfig::from_args("depth=1,evalFn=better").unwrap();
    for name in ["ReflexAgent", "MinimaxAgent", "AlphaBetaAgent", "ExpectimaxAgent"] {
        let kind: AgentKind = name.parse().unwrap();
        let mut agent = kind.build::<GameState, _>(config, StdRng::seed_from_u64(3));
        let action = agent.get_action(&state).unwrap();
        assert!(state.legal_actions(0).contains(&action), "{name} chose {action:?}");
    }
}

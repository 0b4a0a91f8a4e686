use anyhow::Context;
use clap::Parser;
use log::info;
use pacman_agents::{
    agents::{AgentConfig, AgentKind, SearchAgent, SearchRule},
    game_state::GameState,
    grid::{Layout, LAYOUTS},
    heuristic_values,
    pacman_state::PacmanState,
    variables::Action,
};
use rand::{rngs::StdRng, SeedableRng};

/// Loads a layout and prints the move an agent picks for Pacman's first turn.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Bundled layout name or path to a layout file
    #[arg(short, long, default_value = "small")]
    layout: String,

    /// Agent to use (ReflexAgent, MinimaxAgent, AlphaBetaAgent, ExpectimaxAgent)
    #[arg(short = 'p', long, default_value = "MinimaxAgent")]
    agent: String,

    /// Comma-separated agent options, e.g. "depth=3,evalFn=better"
    #[arg(short = 'a', long, default_value = "")]
    agent_args: String,

    /// Seed for tie-breaking (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// List the bundled layouts and exit
    #[arg(long)]
    list_layouts: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_layouts {
        let mut names: Vec<_> = LAYOUTS.keys().collect();
        names.sort();
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let layout = Layout::load(&args.layout)
        .with_context(|| format!("failed to load layout {:?}", args.layout))?;
    let kind: AgentKind = args.agent.parse()?;
    let config = AgentConfig::from_args(&args.agent_args)?;
    let rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    info!("{kind} with {config:?} on {:?}", args.layout);

    let state = GameState::new(&layout);
    print!("{state}");

    let rule = match kind {
        AgentKind::Reflex => {
            let mut agent = kind.build::<GameState, _>(config, rng);
            let action = agent.get_action(&state)?;
            for (i, value) in heuristic_values::action_values(&state).iter().enumerate() {
                if let Some(value) = value {
                    println!("{:>6}: {value}", Action::from_index(i).name());
                }
            }
            println!("{kind} chose {}", action.name());
            return Ok(());
        }
        AgentKind::Minimax => SearchRule::Minimax,
        AgentKind::AlphaBeta => SearchRule::AlphaBeta,
        AgentKind::Expectimax => SearchRule::Expectimax,
    };

    let decision = SearchAgent::new(rule, config, rng).decide(&state)?;
    for (action, value) in &decision.action_values {
        println!("{:>6}: {value}", action.name());
    }
    println!(
        "{kind} chose {} (value {}) after expanding {} nodes and evaluating {} leaves over {} agents",
        decision.action.name(),
        decision.value,
        decision.stats.expanded_nodes,
        decision.stats.leaf_evaluations,
        state.num_agents(),
    );
    Ok(())
}

//! Duel arena - MCTS agent vs random baseline over a series of battles.
//!
//! Runs each battle from the same starter configuration and tallies
//! win/loss/draw outcomes for both players, as a quick quality check of the
//! search configuration.

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use card_duel::battle::duel::Duel;
use card_duel::battle::simulator::BattleSimulator;
use card_duel::logging::setup_logging;
use card_duel::mcts::config::MctsConfig;
use card_duel::{agent::MctsAgent, CardDuelError, Result};

#[derive(Parser, Debug)]
#[command(
    name = "arena",
    about = "Run MCTS agent vs random baseline duels"
)]
struct Args {
    /// Number of duels to play per side
    #[arg(long, default_value_t = 20)]
    duels: usize,

    /// Number of MCTS iterations per decision
    #[arg(long, default_value_t = 100)]
    iterations: usize,

    /// UCB exploration constant
    #[arg(long, default_value_t = 1.4)]
    exploration: f64,

    /// Base RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Dump the search tree after each decision (debug log level)
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// JSON config file overriding the flags above
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Tally {
    wins: usize,
    losses: usize,
    draws: usize,
}

impl Tally {
    fn record(&mut self, duel: &Duel) {
        if duel.enemy_hp() <= 0 && duel.player_hp() > 0 {
            self.wins += 1;
        } else if duel.player_hp() <= 0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
    }
}

fn run_mcts_duel(agent: &mut MctsAgent, seed: u64) -> Result<Duel> {
    let mut duel = Duel::with_seed(seed);
    while !duel.ended() {
        let mv = agent.choose_card(&duel)?;
        duel.play(&mv);
    }
    Ok(duel)
}

fn run_random_duel(rng: &mut StdRng, seed: u64) -> Duel {
    let mut duel = Duel::with_seed(seed);
    while !duel.ended() {
        let actions = duel.legal_actions();
        let pick = actions[rng.random_range(0..actions.len())];
        duel.apply(&pick);
    }
    duel
}

fn main() -> Result<()> {
    setup_logging();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MctsConfig::from_file(path)?,
        None => {
            let config = MctsConfig {
                iterations: args.iterations,
                exploration_constant: args.exploration,
                verbose: args.verbose,
                seed: args.seed,
            };
            config.validate().map_err(CardDuelError::Config)?;
            config
        }
    };

    info!(
        "arena: {} duels, {} iterations, exploration {}",
        args.duels, config.iterations, config.exploration_constant
    );

    let base_seed = config.seed.unwrap_or(0);
    let mut agent = MctsAgent::new(config);
    let mut baseline_rng = StdRng::seed_from_u64(base_seed.wrapping_add(1));

    let mut mcts = Tally::default();
    let mut random = Tally::default();

    for game in 0..args.duels {
        let duel_seed = base_seed.wrapping_add(game as u64);

        let finished = run_mcts_duel(&mut agent, duel_seed)?;
        mcts.record(&finished);
        info!(
            "duel {game}: mcts finished turn {} with player {} hp, enemy {} hp",
            finished.turn(),
            finished.player_hp(),
            finished.enemy_hp()
        );

        let finished = run_random_duel(&mut baseline_rng, duel_seed);
        random.record(&finished);
    }

    info!(
        "mcts agent: {} wins / {} losses / {} draws",
        mcts.wins, mcts.losses, mcts.draws
    );
    info!(
        "random baseline: {} wins / {} losses / {} draws",
        random.wins, random.losses, random.draws
    );

    Ok(())
}

//! Decision driver: runs the configured number of search iterations against
//! independently randomized clones of the live battle and extracts the final
//! decision. The live battle is never mutated here; the caller applies the
//! returned move exactly once.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::battle::action::Move;
use crate::battle::simulator::BattleSimulator;
use crate::mcts::config::MctsConfig;
use crate::mcts::tree::SearchTree;
use crate::{CardDuelError, Result};

/// MCTS-backed battle agent
pub struct MctsAgent {
    config: MctsConfig,
    rng: StdRng,
}

impl MctsAgent {
    pub fn new(config: MctsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        MctsAgent { config, rng }
    }

    /// Picks the next move for the current battle state.
    ///
    /// With a single legal action no search runs and the action converts
    /// directly. Zero legal actions on a battle that has not ended is an
    /// upstream contract violation and fails fast. Otherwise a fresh tree is
    /// searched for exactly the configured number of iterations, each against
    /// its own randomized clone, and the most-visited root child wins; a
    /// childless root falls back to a uniform-random live action.
    pub fn choose_card<S: BattleSimulator>(&mut self, battle: &S) -> Result<Move> {
        let actions = battle.legal_actions();
        if actions.is_empty() {
            return Err(CardDuelError::Search(
                "battle offered zero legal actions at decision time".to_string(),
            ));
        }
        if actions.len() == 1 {
            return Ok(actions[0].to_move(battle));
        }

        let mut tree = SearchTree::new(self.config.exploration_constant, actions.clone());
        for _ in 0..self.config.iterations {
            let mut sim = battle.clone_with_fresh_randomness();
            tree.step(&mut sim, &mut self.rng);
        }

        if self.config.verbose {
            tree.log_tree();
        }

        let chosen = match tree.best_action() {
            Some(action) => action,
            None => {
                debug!("root has no children, falling back to a random legal action");
                actions[self.rng.random_range(0..actions.len())]
            }
        };
        Ok(chosen.to_move(battle))
    }

    /// Agent-target selection: always the first candidate.
    pub fn choose_agent_target<'a, T>(&self, _list_name: &str, candidates: &'a [T]) -> Result<&'a T> {
        candidates
            .first()
            .ok_or_else(|| CardDuelError::Search("empty agent target list".to_string()))
    }

    /// Card-target selection: always the first candidate.
    pub fn choose_card_target<'a, T>(&self, _list_name: &str, candidates: &'a [T]) -> Result<&'a T> {
        candidates
            .first()
            .ok_or_else(|| CardDuelError::Search("empty card target list".to_string()))
    }
}

//! Heuristic rollout policy driving simulations to a terminal state.
//!
//! A rollout classifies its scenario once, from the battle configuration at
//! rollout start, and keeps that classification for the whole rollout even if
//! health crosses a threshold along the way. The per-step tables below are
//! handcrafted weights, not learned values.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::battle::action::GameAction;
use crate::battle::card::CardKind;
use crate::battle::simulator::BattleSimulator;

/// Maximum-health cutoff separating the low-health recovery scenario from the
/// high-health one.
pub const LOW_HEALTH_MAX_HP: i32 = 8;

/// One-time classification of a rollout context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Fragile player holding at least one recovery card: survive first
    LowHealthRecovery,
    /// Healthy player holding at least one recovery card: weight recovery by
    /// current health
    HighHealthRecovery,
    /// No recovery card in the deck
    Default,
}

/// Classifies the scenario from the battle's current configuration.
pub fn classify<S: BattleSimulator>(sim: &S) -> Scenario {
    let has_recovery = sim.deck().iter().any(|card| card.is_recovery());
    if !has_recovery {
        Scenario::Default
    } else if sim.max_health() <= LOW_HEALTH_MAX_HP {
        Scenario::LowHealthRecovery
    } else {
        Scenario::HighHealthRecovery
    }
}

/// Drives the simulation to termination and returns the terminal reward.
pub fn rollout<S: BattleSimulator, R: Rng>(sim: &mut S, rng: &mut R) -> f64 {
    // Classified once; not re-evaluated mid-rollout
    let scenario = classify(sim);

    while !sim.ended() {
        let actions = sim.legal_actions();
        if actions.is_empty() {
            break;
        }
        let health = sim.health_fraction();
        let choice = match scenario {
            Scenario::LowHealthRecovery => pick_low_health(&actions, health, rng),
            Scenario::HighHealthRecovery => pick_weighted(&actions, health, rng),
            Scenario::Default => pick_default(&actions, rng),
        };
        sim.apply(&choice);
    }

    terminal_reward(sim)
}

/// Reward at rollout termination.
///
/// Win (score 1.0 with the player alive) is worth 1.0, death is worth 0.0,
/// and a draw or timeout blends progress and survival as score × health.
pub fn terminal_reward<S: BattleSimulator>(sim: &S) -> f64 {
    let score = sim.score();
    let health = sim.health_fraction();
    if score == 1.0 && health > 0.0 {
        return 1.0;
    }
    if health <= 0.0 {
        return 0.0;
    }
    (score * health).clamp(0.0, 1.0)
}

/// Damage table for the low-health attack fallback; unlisted kinds map to 0
fn attack_damage(kind: CardKind) -> i32 {
    match kind {
        CardKind::Bludgeon => 32,
        CardKind::SearingBlow => 12,
        CardKind::PommelStrike => 9,
        CardKind::Bash => 8,
        CardKind::Strike => 6,
        CardKind::Thunderclap => 4,
        _ => 0,
    }
}

/// Recovery-card weight as a function of current health fraction
fn recovery_weight(health: f64) -> u32 {
    if health > 0.75 {
        3
    } else if health > 0.40 {
        2
    } else {
        0
    }
}

/// Weight table for the high-health recovery scenario; end-turn and unlisted
/// kinds default to 1
fn high_recovery_weight(action: &GameAction, health: f64) -> u32 {
    match action.card() {
        None => 1,
        Some(kind) => match kind {
            CardKind::Offering => recovery_weight(health),
            CardKind::SearingBlow => 6,
            CardKind::Strike => 4,
            CardKind::Thunderclap => 3,
            CardKind::Defend => 2,
            _ => 1,
        },
    }
}

/// Weight table for the default scenario; end-turn and unlisted kinds default
/// to 1
fn default_weight(action: &GameAction) -> u32 {
    match action.card() {
        None => 1,
        Some(kind) => match kind {
            CardKind::Bludgeon => 32,
            CardKind::SearingBlow => 12,
            CardKind::PommelStrike => 9,
            CardKind::Bash => 8,
            CardKind::Strike => 6,
            CardKind::Anger => 6,
            CardKind::Thunderclap => 4,
            _ => 1,
        },
    }
}

fn uniform<R: Rng>(actions: &[GameAction], rng: &mut R) -> GameAction {
    actions[rng.random_range(0..actions.len())]
}

/// Low-health priority order: recover while above half health, then block,
/// then the hardest-hitting card, then end the turn.
fn pick_low_health<R: Rng>(actions: &[GameAction], health: f64, rng: &mut R) -> GameAction {
    if health > 0.50 {
        let recoveries: Vec<GameAction> = actions
            .iter()
            .filter(|a| a.card().is_some_and(|c| c.is_recovery()))
            .copied()
            .collect();
        if !recoveries.is_empty() {
            return uniform(&recoveries, rng);
        }
    }

    let defensive: Vec<GameAction> = actions
        .iter()
        .filter(|a| a.card().is_some_and(|c| c.is_defensive()))
        .copied()
        .collect();
    if !defensive.is_empty() {
        return uniform(&defensive, rng);
    }

    let card_actions: Vec<GameAction> = actions
        .iter()
        .filter(|a| a.card().is_some())
        .copied()
        .collect();
    if !card_actions.is_empty() {
        let best = card_actions
            .iter()
            .map(|a| attack_damage(a.card().unwrap_or(CardKind::Other)))
            .max()
            .unwrap_or(0);
        let top: Vec<GameAction> = card_actions
            .iter()
            .filter(|a| attack_damage(a.card().unwrap_or(CardKind::Other)) == best)
            .copied()
            .collect();
        return uniform(&top, rng);
    }

    *actions
        .iter()
        .find(|a| matches!(a, GameAction::EndTurn))
        .unwrap_or(&actions[0])
}

/// High-health scenario: weighted random draw over the table, with a uniform
/// fallback when the total weight is zero.
fn pick_weighted<R: Rng>(actions: &[GameAction], health: f64, rng: &mut R) -> GameAction {
    let weights: Vec<u32> = actions
        .iter()
        .map(|a| high_recovery_weight(a, health))
        .collect();
    match WeightedIndex::new(&weights) {
        Ok(distribution) => actions[distribution.sample(rng)],
        Err(_) => uniform(actions, rng),
    }
}

/// Default scenario: uniform choice among the actions with the highest table
/// weight.
fn pick_default<R: Rng>(actions: &[GameAction], rng: &mut R) -> GameAction {
    let best = actions.iter().map(default_weight).max().unwrap_or(1);
    let top: Vec<GameAction> = actions
        .iter()
        .filter(|a| default_weight(a) == best)
        .copied()
        .collect();
    uniform(&top, rng)
}

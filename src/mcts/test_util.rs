//! Scripted battle stub shared by the engine unit tests.

use crate::battle::action::GameAction;
use crate::battle::card::CardKind;
use crate::battle::simulator::BattleSimulator;

/// A fully scripted [`BattleSimulator`]: legal actions and health per step
/// come from fixed tables, the battle ends after a fixed number of applied
/// actions, and the terminal score/health pair is keyed by the first action
/// that was applied.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedBattle {
    pub hand: Vec<CardKind>,
    pub deck: Vec<CardKind>,
    pub max_health: i32,
    pub playable: bool,
    /// Legal actions offered at each step; the last entry repeats
    pub script: Vec<Vec<GameAction>>,
    /// Health fraction reported at each step; the last entry repeats
    pub health_script: Vec<f64>,
    /// Number of applied actions after which the battle ends
    pub horizon: usize,
    /// Terminal (score, health) keyed by the first applied action
    pub outcomes: Vec<(GameAction, (f64, f64))>,
    /// Terminal (score, health) when no key matches
    pub default_outcome: (f64, f64),
    pub applied: Vec<GameAction>,
}

impl ScriptedBattle {
    /// A battle that is already over, used for action-conversion tests
    pub fn with_hand(hand: Vec<CardKind>) -> Self {
        ScriptedBattle {
            hand,
            deck: Vec::new(),
            max_health: 70,
            playable: true,
            script: Vec::new(),
            health_script: vec![1.0],
            horizon: 0,
            outcomes: Vec::new(),
            default_outcome: (0.0, 1.0),
            applied: Vec::new(),
        }
    }

    /// A one-decision battle: `actions` are legal at the root, the battle
    /// ends after a single applied action, and the terminal outcome depends
    /// on which action was applied.
    pub fn branching(actions: Vec<GameAction>, outcomes: Vec<(GameAction, (f64, f64))>) -> Self {
        ScriptedBattle {
            hand: Vec::new(),
            deck: Vec::new(),
            max_health: 70,
            playable: true,
            script: vec![actions],
            health_script: vec![1.0],
            horizon: 1,
            outcomes,
            default_outcome: (0.0, 0.0),
            applied: Vec::new(),
        }
    }

    fn terminal_outcome(&self) -> (f64, f64) {
        if let Some(first) = self.applied.first() {
            for (action, outcome) in &self.outcomes {
                if action == first {
                    return *outcome;
                }
            }
        }
        self.default_outcome
    }
}

impl BattleSimulator for ScriptedBattle {
    fn ended(&self) -> bool {
        self.applied.len() >= self.horizon
    }

    fn legal_actions(&self) -> Vec<GameAction> {
        if self.ended() || self.script.is_empty() {
            return Vec::new();
        }
        let step = self.applied.len().min(self.script.len() - 1);
        self.script[step].clone()
    }

    fn apply(&mut self, action: &GameAction) {
        if let GameAction::Play(kind) = action {
            if let Some(pos) = self.deck.iter().position(|c| c == kind) {
                self.deck.remove(pos);
            }
        }
        self.applied.push(*action);
    }

    fn clone_with_fresh_randomness(&self) -> Self {
        self.clone()
    }

    fn score(&self) -> f64 {
        self.terminal_outcome().0
    }

    fn health_fraction(&self) -> f64 {
        if self.ended() {
            return self.terminal_outcome().1;
        }
        let step = self.applied.len().min(self.health_script.len() - 1);
        self.health_script[step]
    }

    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn deck(&self) -> &[CardKind] {
        &self.deck
    }

    fn hand(&self) -> &[CardKind] {
        &self.hand
    }

    fn is_playable(&self, _card: CardKind) -> bool {
        self.playable
    }
}

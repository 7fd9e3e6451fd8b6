use crate::battle::action::GameAction;
use crate::battle::card::CardKind;

/// Contract the decision engine consumes from the battle engine.
///
/// The engine never mutates the live battle: every search iteration runs
/// against a private clone obtained from [`clone_with_fresh_randomness`],
/// which must resolve hidden information (draw order, enemy rolls) under an
/// independent random stream so chance is re-sampled per iteration.
///
/// [`clone_with_fresh_randomness`]: BattleSimulator::clone_with_fresh_randomness
pub trait BattleSimulator {
    /// Whether the battle has reached a terminal state
    fn ended(&self) -> bool;

    /// Ordered list of currently legal actions
    fn legal_actions(&self) -> Vec<GameAction>;

    /// Apply an action, mutating the battle in place
    fn apply(&mut self, action: &GameAction);

    /// Independent deep copy with its own random stream
    fn clone_with_fresh_randomness(&self) -> Self
    where
        Self: Sized;

    /// Progress toward victory in `[0, 1]`; exactly `1.0` means the enemy is
    /// defeated.
    fn score(&self) -> f64;

    /// Player health as a fraction of maximum, in `[0, 1]`
    fn health_fraction(&self) -> f64;

    /// Player maximum health in raw points
    fn max_health(&self) -> i32;

    /// Full deck composition, used for rollout scenario classification
    fn deck(&self) -> &[CardKind];

    /// Cards currently in hand, in hand order
    fn hand(&self) -> &[CardKind];

    /// Whether a card of this kind could be played right now
    fn is_playable(&self, card: CardKind) -> bool;
}

use serde::{Deserialize, Serialize};

use crate::battle::card::CardKind;
use crate::battle::simulator::BattleSimulator;

/// An action in the search space: end the turn, or play some card of a given
/// kind.
///
/// Search actions reference a card by kind rather than by hand position so a
/// node expanded under one randomized clone stays meaningful under another
/// clone where the same cards sit at different indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    EndTurn,
    Play(CardKind),
}

/// A concrete move in the host's representation: end the turn, or play the
/// card at a specific hand index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    EndTurn,
    PlayCard(usize),
}

impl GameAction {
    /// Resolve this action against a live battle state.
    ///
    /// Picks the first playable hand card matching the referenced kind; if no
    /// such card exists the action degrades to ending the turn.
    pub fn to_move<S: BattleSimulator>(&self, battle: &S) -> Move {
        match self {
            GameAction::EndTurn => Move::EndTurn,
            GameAction::Play(kind) => {
                for (index, card) in battle.hand().iter().enumerate() {
                    if card == kind && battle.is_playable(*card) {
                        return Move::PlayCard(index);
                    }
                }
                Move::EndTurn
            }
        }
    }

    /// Card kind referenced by this action, if any
    pub fn card(&self) -> Option<CardKind> {
        match self {
            GameAction::EndTurn => None,
            GameAction::Play(kind) => Some(*kind),
        }
    }
}

impl std::fmt::Display for GameAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameAction::EndTurn => f.write_str("EndTurn"),
            GameAction::Play(kind) => write!(f, "Play({})", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::test_util::ScriptedBattle;

    #[test]
    fn test_end_turn_converts_directly() {
        let battle = ScriptedBattle::with_hand(vec![CardKind::Strike]);
        assert_eq!(GameAction::EndTurn.to_move(&battle), Move::EndTurn);
    }

    #[test]
    fn test_resolves_first_matching_playable_card() {
        let battle = ScriptedBattle::with_hand(vec![
            CardKind::Defend,
            CardKind::Strike,
            CardKind::Strike,
        ]);
        let action = GameAction::Play(CardKind::Strike);
        assert_eq!(action.to_move(&battle), Move::PlayCard(1));
    }

    #[test]
    fn test_unmatched_card_falls_back_to_end_turn() {
        let battle = ScriptedBattle::with_hand(vec![CardKind::Defend]);
        let action = GameAction::Play(CardKind::Bludgeon);
        assert_eq!(action.to_move(&battle), Move::EndTurn);
    }

    #[test]
    fn test_unplayable_card_falls_back_to_end_turn() {
        let mut battle = ScriptedBattle::with_hand(vec![CardKind::Bludgeon]);
        battle.playable = false;
        let action = GameAction::Play(CardKind::Bludgeon);
        assert_eq!(action.to_move(&battle), Move::EndTurn);
    }
}

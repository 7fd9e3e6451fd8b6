use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::battle::action::{GameAction, Move};
use crate::battle::card::CardKind;
use crate::battle::simulator::BattleSimulator;

const HAND_SIZE: usize = 5;
const ENERGY_PER_TURN: i32 = 3;

/// A small self-contained card battle implementing [`BattleSimulator`].
///
/// One player with hand/draw/discard piles against a single enemy with a
/// fixed attack. The battle ends when either side dies or the turn limit is
/// reached. Deliberately minimal: it exists so the decision engine can be
/// exercised end to end without the full host game.
#[derive(Debug, Clone)]
pub struct Duel {
    rng: StdRng,
    player_hp: i32,
    player_max_hp: i32,
    block: i32,
    energy: i32,
    enemy_hp: i32,
    enemy_max_hp: i32,
    enemy_attack: i32,
    hand: Vec<CardKind>,
    draw_pile: Vec<CardKind>,
    discard_pile: Vec<CardKind>,
    master_deck: Vec<CardKind>,
    turn: usize,
    turn_limit: usize,
}

impl Duel {
    /// Creates a battle with an explicit deck and stat line.
    pub fn new(deck: Vec<CardKind>, player_max_hp: i32, enemy_hp: i32, seed: u64) -> Self {
        let mut duel = Duel {
            rng: StdRng::seed_from_u64(seed),
            player_hp: player_max_hp,
            player_max_hp,
            block: 0,
            energy: ENERGY_PER_TURN,
            enemy_hp,
            enemy_max_hp: enemy_hp,
            enemy_attack: 10,
            hand: Vec::new(),
            draw_pile: deck.clone(),
            discard_pile: Vec::new(),
            master_deck: deck,
            turn: 0,
            turn_limit: 20,
        };
        duel.draw_pile.shuffle(&mut duel.rng);
        duel.draw(HAND_SIZE);
        duel
    }

    /// Creates a battle with the default starter deck.
    pub fn with_seed(seed: u64) -> Self {
        let mut deck = vec![CardKind::Strike; 5];
        deck.extend(vec![CardKind::Defend; 4]);
        deck.push(CardKind::Bash);
        deck.push(CardKind::Offering);
        Duel::new(deck, 70, 48, seed)
    }

    /// Applies a resolved host move to the live battle.
    pub fn play(&mut self, mv: &Move) {
        match mv {
            Move::EndTurn => self.end_turn(),
            Move::PlayCard(index) => {
                if *index < self.hand.len() && self.is_playable(self.hand[*index]) {
                    self.play_card_at(*index);
                } else {
                    debug!("ignoring unplayable move {:?}", mv);
                }
            }
        }
    }

    pub fn player_hp(&self) -> i32 {
        self.player_hp
    }

    pub fn enemy_hp(&self) -> i32 {
        self.enemy_hp
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    fn draw(&mut self, count: usize) {
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    return;
                }
                self.draw_pile.append(&mut self.discard_pile);
                self.draw_pile.shuffle(&mut self.rng);
            }
            if let Some(card) = self.draw_pile.pop() {
                self.hand.push(card);
            }
        }
    }

    fn play_card_at(&mut self, index: usize) {
        let card = self.hand.remove(index);
        self.energy -= card.cost();
        match card {
            CardKind::Strike => self.enemy_hp -= 6,
            CardKind::Defend => self.block += 5,
            CardKind::Bash => self.enemy_hp -= 8,
            CardKind::PommelStrike => {
                self.enemy_hp -= 9;
                self.draw(1);
            }
            CardKind::SearingBlow => self.enemy_hp -= 12,
            CardKind::Bludgeon => self.enemy_hp -= 32,
            CardKind::Thunderclap => self.enemy_hp -= 4,
            CardKind::Anger => {
                self.enemy_hp -= 6;
                self.discard_pile.push(CardKind::Anger);
            }
            CardKind::Offering => {
                self.player_hp -= 6;
                self.energy += 2;
                self.draw(3);
            }
            CardKind::Other => {}
        }
        self.discard_pile.push(card);
    }

    fn end_turn(&mut self) {
        let damage = (self.enemy_attack - self.block).max(0);
        self.player_hp -= damage;
        self.turn += 1;
        if self.ended() {
            return;
        }
        self.block = 0;
        self.energy = ENERGY_PER_TURN;
        self.discard_pile.append(&mut self.hand);
        self.draw(HAND_SIZE);
    }
}

impl BattleSimulator for Duel {
    fn ended(&self) -> bool {
        self.player_hp <= 0 || self.enemy_hp <= 0 || self.turn >= self.turn_limit
    }

    fn legal_actions(&self) -> Vec<GameAction> {
        let mut actions: Vec<GameAction> = self
            .hand
            .iter()
            .filter(|card| self.is_playable(**card))
            .map(|card| GameAction::Play(*card))
            .collect();
        actions.push(GameAction::EndTurn);
        actions
    }

    fn apply(&mut self, action: &GameAction) {
        match action {
            GameAction::EndTurn => self.end_turn(),
            GameAction::Play(kind) => {
                let found = self
                    .hand
                    .iter()
                    .position(|card| card == kind && self.is_playable(*card));
                match found {
                    Some(index) => self.play_card_at(index),
                    None => debug!("ignoring unplayable action {}", action),
                }
            }
        }
    }

    fn clone_with_fresh_randomness(&self) -> Self {
        let mut clone = self.clone();
        clone.rng = StdRng::from_os_rng();
        // Hidden information: the draw order is re-randomized per clone
        clone.draw_pile.shuffle(&mut clone.rng);
        clone
    }

    fn score(&self) -> f64 {
        let dealt = (self.enemy_max_hp - self.enemy_hp) as f64;
        (dealt / self.enemy_max_hp as f64).clamp(0.0, 1.0)
    }

    fn health_fraction(&self) -> f64 {
        (self.player_hp as f64 / self.player_max_hp as f64).clamp(0.0, 1.0)
    }

    fn max_health(&self) -> i32 {
        self.player_max_hp
    }

    fn deck(&self) -> &[CardKind] {
        &self.master_deck
    }

    fn hand(&self) -> &[CardKind] {
        &self.hand
    }

    fn is_playable(&self, card: CardKind) -> bool {
        card.cost() <= self.energy
    }
}

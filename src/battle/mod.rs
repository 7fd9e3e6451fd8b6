pub mod action;
pub mod card;
pub mod duel;
pub mod simulator;

//! The single token's state.
//!
//! This module contains:
//! - PlayerState with position, jail counters, doubles streak and lap count
//! - HeldCard, an escape card remembered with the deck it came from
//! - Roll history for distribution statistics

use crate::card::Card;
use crate::deck::DeckKind;
use serde::{Deserialize, Serialize};

/// Non-double attempts a jailed player may spend before being forced out
pub const JAIL_PATIENCE: u8 = 3;

/// Consecutive doubles that send a free player to jail
pub const MAX_DOUBLES: u8 = 3;

/// An escape card in the player's hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldCard {
    pub card: Card,
    /// Deck the card goes back to when used
    pub deck: DeckKind,
}

/// State of the token, mutated only by the turn engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current tile index
    pub position: usize,
    /// Doubles rolled in a row while free
    pub doubles_streak: u8,
    /// Remaining non-double turns before a forced release
    pub jail_patience: u8,
    /// Times the token has passed the start tile
    pub laps_completed: u32,
    /// Escape cards, newest last
    pub held_cards: Vec<HeldCard>,
    /// Sum of every recorded roll
    pub roll_history: Vec<u8>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    /// A fresh player on the start tile
    pub fn new() -> Self {
        Self {
            position: 0,
            doubles_streak: 0,
            jail_patience: JAIL_PATIENCE,
            laps_completed: 0,
            held_cards: Vec::new(),
            roll_history: Vec::new(),
        }
    }

    /// Whether the token sits on the jail cell
    pub fn is_jailed(&self, jail_index: usize) -> bool {
        self.position == jail_index
    }

    /// Number of escape cards held that came from `deck`
    pub fn held_from(&self, deck: DeckKind) -> usize {
        self.held_cards.iter().filter(|held| held.deck == deck).count()
    }

    /// Keep an escape card for later
    pub fn hold(&mut self, card: Card, deck: DeckKind) {
        self.held_cards.push(HeldCard { card, deck });
    }

    /// Give up the most recently kept escape card
    pub fn take_escape_card(&mut self) -> Option<HeldCard> {
        self.held_cards.pop()
    }
}

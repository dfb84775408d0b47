//! Card decks with a draw pile and a discard pile.
//!
//! Cards never leave the system: each one sits in the draw pile, the
//! discard pile, or the player's hand. When the last card is drawn the
//! discard pile is shuffled back in before `draw` returns.

use crate::board::Board;
use crate::card::{Card, CardKind, Destination};
use crate::error::{LookupError, ParseError, SimError};
use crate::tile::TileCategory;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which of the two decks a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Chance,
    CommunityChest,
}

impl DeckKind {
    /// The deck drawn from when landing on a tile of this category
    pub fn for_tile(category: TileCategory) -> Option<Self> {
        match category {
            TileCategory::Chance => Some(DeckKind::Chance),
            TileCategory::CommunityChest => Some(DeckKind::CommunityChest),
            _ => None,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            DeckKind::Chance => "Chance",
            DeckKind::CommunityChest => "Community Chest",
        }
    }
}

/// A deck of cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    kind: DeckKind,
    draw_pile: VecDeque<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    /// Create an unshuffled deck with every card in the draw pile
    pub fn new(kind: DeckKind, cards: Vec<Card>) -> Self {
        Self {
            kind,
            draw_pile: cards.into(),
            discard_pile: Vec::new(),
        }
    }

    /// Parse a deck from its line-oriented text form
    pub fn parse(kind: DeckKind, source: &str) -> Result<Self, ParseError> {
        let cards = source
            .lines()
            .enumerate()
            .filter(|(_, raw)| !raw.trim().is_empty())
            .map(|(index, raw)| Card::parse(index + 1, raw.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        if cards.is_empty() {
            return Err(ParseError::EmptyDeck);
        }

        Ok(Self::new(kind, cards))
    }

    /// The deck shipped in `data/`, unshuffled
    pub fn reference(kind: DeckKind) -> Self {
        let source = match kind {
            DeckKind::Chance => crate::reference::CHANCE,
            DeckKind::CommunityChest => crate::reference::COMMUNITY_CHEST,
        };
        Self::parse(kind, source).expect("reference deck data is valid")
    }

    /// Gather both piles into the draw pile and shuffle it
    pub fn setup<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reshuffle(rng);
    }

    /// Take the top card.
    ///
    /// If that empties the draw pile, the discard pile is shuffled back in
    /// before returning. Fails only when both piles are empty, meaning every
    /// card is held by the player.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, SimError> {
        if self.draw_pile.is_empty() {
            self.reshuffle(rng);
        }

        let card = self
            .draw_pile
            .pop_front()
            .ok_or(SimError::EmptyDeck(self.kind))?;

        if self.draw_pile.is_empty() {
            self.reshuffle(rng);
        }

        Ok(card)
    }

    /// Put a card on the discard pile
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.draw_pile.extend(self.discard_pile.drain(..));
        self.draw_pile.make_contiguous().shuffle(rng);
    }

    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    /// Cards waiting to be drawn
    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// Cards on the discard pile
    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards currently in either pile
    pub fn len(&self) -> usize {
        self.draw_len() + self.discard_len()
    }

    /// Whether both piles are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Peek at the draw pile, top first
    pub fn draw_pile(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile.iter()
    }

    /// Peek at the discard pile, oldest first
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Check every travel card against the board
    pub fn validate(&self, board: &Board) -> Result<(), LookupError> {
        for card in self.draw_pile.iter().chain(&self.discard_pile) {
            match &card.kind {
                CardKind::Travel(Destination::Named(name)) => {
                    board
                        .index_of(name)
                        .ok_or_else(|| LookupError::UnknownDestination(name.clone()))?;
                }
                CardKind::Travel(Destination::Nearest(category)) => {
                    board
                        .nearest(*category, 0)
                        .ok_or(LookupError::NoTilesOfCategory(*category))?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// The Chance and Community Chest decks together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decks {
    pub chance: Deck,
    pub community_chest: Deck,
}

impl Decks {
    pub fn new(chance: Deck, community_chest: Deck) -> Self {
        Self {
            chance,
            community_chest,
        }
    }

    /// Both reference decks, unshuffled
    pub fn reference() -> Self {
        Self::new(
            Deck::reference(DeckKind::Chance),
            Deck::reference(DeckKind::CommunityChest),
        )
    }

    pub fn get(&self, kind: DeckKind) -> &Deck {
        match kind {
            DeckKind::Chance => &self.chance,
            DeckKind::CommunityChest => &self.community_chest,
        }
    }

    pub fn get_mut(&mut self, kind: DeckKind) -> &mut Deck {
        match kind {
            DeckKind::Chance => &mut self.chance,
            DeckKind::CommunityChest => &mut self.community_chest,
        }
    }

    /// Shuffle both decks
    pub fn setup<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.chance.setup(rng);
        self.community_chest.setup(rng);
    }

    /// Check both decks against the board
    pub fn validate(&self, board: &Board) -> Result<(), LookupError> {
        self.chance.validate(board)?;
        self.community_chest.validate(board)
    }
}

//! Error taxonomy for loading data files and resolving turns.
//!
//! - [`ParseError`]: a malformed board or deck record. Fatal at startup.
//! - [`LookupError`]: a card references a tile the board doesn't have.
//! - [`SimError`]: an engine invariant was broken mid-run.

use crate::deck::DeckKind;
use crate::tile::TileCategory;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing board or card records
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseError {
    #[error("line {line}: tile record has {found} fields, expected 1, 3 or 12")]
    TileFieldCount { line: usize, found: usize },

    #[error("line {line}: card record has {found} fields, expected 2, 3 or at least 5")]
    CardFieldCount { line: usize, found: usize },

    #[error("line {line}: unknown tile category `{name}`")]
    UnknownCategory { line: usize, name: String },

    #[error("line {line}: `{value}` is not a valid number")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: duplicate tile label `{label}`")]
    DuplicateLabel { line: usize, label: String },

    #[error("board has {found} `{category:?}` tiles, expected exactly one")]
    SpecialTileCount { category: TileCategory, found: usize },

    #[error("board source contains no tiles")]
    EmptyBoard,

    #[error("deck source contains no cards")]
    EmptyDeck,
}

/// A card refers to something the board doesn't contain
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LookupError {
    #[error("no tile named `{0}` on the board")]
    UnknownDestination(String),

    #[error("board has no `{0:?}` tiles to travel to")]
    NoTilesOfCategory(TileCategory),
}

/// Invariant violations during a run. None of these are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SimError {
    #[error("{0:?} deck has no cards left in either pile")]
    EmptyDeck(DeckKind),

    #[error("position {position} is outside a board of {len} tiles")]
    PositionOutOfBounds { position: usize, len: usize },

    #[error("visit counter missing for tile `{0}`")]
    UnknownLabel(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

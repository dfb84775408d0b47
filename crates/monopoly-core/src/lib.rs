//! Monopoly visitation statistics engine
//!
//! This crate simulates a single token going round a Monopoly board, and
//! counts how often each tile is landed on:
//! - Tile catalog parsed from the comma-separated board format
//! - Chance and Community Chest decks with draw and discard piles
//! - Dice, player state and the per-turn state machine
//! - Visit counters with a snapshot at every lap boundary
//!
//! # Architecture
//!
//! The engine does no I/O and no logging. Sources are parsed from strings,
//! every random decision goes through a caller-supplied [`rand::Rng`], and
//! turns report what happened as [`TurnEvent`] values. A fixed seed always
//! reproduces the same run.
//!
//! # Modules
//!
//! - [`board`]: Tile catalog and lookups
//! - [`card`] / [`deck`]: Card parsing and the two decks
//! - [`dice`]: Two-die rolls and scripted dice for tests
//! - [`turn`]: The turn engine
//! - [`simulation`]: Driver loop and plain result data

pub mod board;
pub mod card;
pub mod deck;
pub mod dice;
pub mod error;
pub mod events;
pub mod player;
pub mod reference;
pub mod simulation;
pub mod stats;
pub mod tile;
pub mod turn;

// Re-export commonly used types
pub use board::Board;
pub use card::{Card, CardKind, Destination, Payment};
pub use deck::{Deck, DeckKind, Decks};
pub use dice::{DiceSource, FairDice, LoadedDice, Roll};
pub use error::{LookupError, ParseError, SimError};
pub use events::{JailReason, JailRelease, TurnEvent, TurnOutcome};
pub use player::{HeldCard, PlayerState, JAIL_PATIENCE, MAX_DOUBLES};
pub use simulation::{Simulation, SimulationResult};
pub use stats::{roll_distribution, LapSnapshot, TileVisits, VisitStats};
pub use tile::{PropertyDetails, Tile, TileCategory, TileKind};
pub use turn::execute_turn;

//! Events reported by the turn engine.
//!
//! The engine never prints; callers log or aggregate these instead.

use crate::deck::DeckKind;
use crate::dice::Roll;
use crate::stats::LapSnapshot;
use serde::{Deserialize, Serialize};

/// Why the token went to jail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailReason {
    /// Third double in a row
    ThreeDoubles,
    /// Landed on the go-to-jail tile
    GoToJailTile,
    /// A travel card named the jail
    Card,
}

/// How the token got out of jail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailRelease {
    /// Used an escape card from this deck
    Card(DeckKind),
    /// Rolled a double
    Doubles,
    /// Ran out of patience and was forced out
    PatienceExhausted,
}

/// Something that happened during a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A double was rolled while free
    DoublesRolled { streak: u8 },

    /// Token was sent to the jail cell
    SentToJail { reason: JailReason },

    /// Stayed in jail, spending one unit of patience
    StayedInJail { patience_left: u8 },

    /// Left jail this turn
    LeftJail { via: JailRelease },

    /// Token moved between tiles
    Moved { from: usize, to: usize },

    /// Crossed the start tile
    PassedStart { laps_completed: u32 },

    /// A card was drawn
    CardDrawn { deck: DeckKind, text: String },

    /// The drawn card is an escape card and was kept
    EscapeCardKept { deck: DeckKind },
}

/// Everything a single turn produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub roll: Roll,
    pub events: Vec<TurnEvent>,
    /// One snapshot per lap boundary crossed this turn, oldest first
    pub snapshots: Vec<LapSnapshot>,
}

impl TurnOutcome {
    /// Whether at least one lap boundary was crossed
    pub fn completed_lap(&self) -> bool {
        !self.snapshots.is_empty()
    }

    /// Whether the token was sent to jail this turn
    pub fn went_to_jail(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, TurnEvent::SentToJail { .. }))
    }
}

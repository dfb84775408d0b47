//! Simulation driver.
//!
//! Owns every piece of mutable state for one run and calls the turn engine
//! until the token has completed the requested number of laps. Each
//! simulation has its own RNG and decks; only the board is shared.

use crate::board::Board;
use crate::deck::Decks;
use crate::dice::{DiceSource, FairDice};
use crate::error::{LookupError, SimError};
use crate::events::TurnOutcome;
use crate::player::PlayerState;
use crate::stats::{roll_distribution, LapSnapshot, TileVisits, VisitStats};
use crate::turn::execute_turn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One run of the single-token simulation
#[derive(Debug)]
pub struct Simulation<R, D = FairDice> {
    board: Arc<Board>,
    decks: Decks,
    player: PlayerState,
    stats: VisitStats,
    snapshots: Vec<LapSnapshot>,
    turns: u64,
    dice: D,
    rng: R,
}

impl<R: Rng> Simulation<R, FairDice> {
    /// Set up a run with fair dice.
    ///
    /// Travel cards are checked against the board and both decks are
    /// shuffled before the first turn.
    pub fn new(board: Arc<Board>, decks: Decks, rng: R) -> Result<Self, LookupError> {
        Self::with_dice(board, decks, FairDice, rng)
    }
}

impl<R: Rng, D: DiceSource> Simulation<R, D> {
    /// Set up a run with a custom dice source
    pub fn with_dice(
        board: Arc<Board>,
        mut decks: Decks,
        dice: D,
        mut rng: R,
    ) -> Result<Self, LookupError> {
        decks.validate(&board)?;
        decks.setup(&mut rng);
        let stats = VisitStats::new(&board);

        Ok(Self {
            board,
            decks,
            player: PlayerState::new(),
            stats,
            snapshots: Vec::new(),
            turns: 0,
            dice,
            rng,
        })
    }

    /// Resolve a single turn
    pub fn step(&mut self) -> Result<TurnOutcome, SimError> {
        let outcome = execute_turn(
            &mut self.player,
            &self.board,
            &mut self.decks,
            &mut self.stats,
            &mut self.dice,
            &mut self.rng,
        )?;
        self.turns += 1;
        self.snapshots.extend(outcome.snapshots.iter().cloned());
        Ok(outcome)
    }

    /// Play turns until `target_laps` laps are complete
    pub fn run(&mut self, target_laps: u32) -> Result<(), SimError> {
        self.run_with(target_laps, |_| {})
    }

    /// Like [`Simulation::run`], handing every turn's outcome to `observe`
    pub fn run_with<F>(&mut self, target_laps: u32, mut observe: F) -> Result<(), SimError>
    where
        F: FnMut(&TurnOutcome),
    {
        while self.player.laps_completed < target_laps {
            let outcome = self.step()?;
            observe(&outcome);
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn decks(&self) -> &Decks {
        &self.decks
    }

    pub fn stats(&self) -> &VisitStats {
        &self.stats
    }

    /// Lap snapshots so far, oldest first
    pub fn snapshots(&self) -> &[LapSnapshot] {
        &self.snapshots
    }

    /// Turns resolved so far
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Plain data for the reporting stage
    pub fn result(&self) -> SimulationResult {
        SimulationResult {
            laps: self.player.laps_completed,
            turns: self.turns,
            visits: self.stats.as_map().clone(),
            top_tiles: self.stats.top_tiles(&self.board),
            roll_history: self.player.roll_history.clone(),
            roll_distribution: roll_distribution(&self.player.roll_history),
            snapshots: self.snapshots.clone(),
        }
    }

    /// Consume the simulation and return its results
    pub fn finish(self) -> SimulationResult {
        self.result()
    }
}

/// Everything a finished run produced, with no engine types inside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub laps: u32,
    pub turns: u64,
    /// Tile label -> visits
    pub visits: BTreeMap<String, u64>,
    /// Tiles sorted by visits, descending
    pub top_tiles: Vec<TileVisits>,
    pub roll_history: Vec<u8>,
    /// Roll total -> occurrences
    pub roll_distribution: BTreeMap<u8, u64>,
    pub snapshots: Vec<LapSnapshot>,
}

impl SimulationResult {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a result previously written by [`SimulationResult::to_json`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Visits made during each lap, oldest first
    pub fn lap_deltas(&self) -> Vec<BTreeMap<String, u64>> {
        let mut previous = None;
        self.snapshots
            .iter()
            .map(|snapshot| {
                let delta = snapshot.delta(previous);
                previous = Some(snapshot);
                delta
            })
            .collect()
    }
}

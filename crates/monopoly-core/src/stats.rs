//! Visit counters and per-lap snapshots.

use crate::board::Board;
use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tile label -> number of times the token landed there
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitStats {
    visits: BTreeMap<String, u64>,
}

impl VisitStats {
    /// Zeroed counters for every tile on the board
    pub fn new(board: &Board) -> Self {
        Self {
            visits: board
                .tiles()
                .iter()
                .map(|tile| (tile.label.clone(), 0))
                .collect(),
        }
    }

    /// Count one landing on `label`
    pub fn record(&mut self, label: &str) -> Result<(), SimError> {
        let count = self
            .visits
            .get_mut(label)
            .ok_or_else(|| SimError::UnknownLabel(label.to_string()))?;
        *count += 1;
        Ok(())
    }

    /// Visits for one tile
    pub fn get(&self, label: &str) -> u64 {
        self.visits.get(label).copied().unwrap_or(0)
    }

    /// Sum over all tiles
    pub fn total(&self) -> u64 {
        self.visits.values().sum()
    }

    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.visits
    }

    /// Copy of the current counts, tagged with the lap they close
    pub fn snapshot(&self, lap: u32) -> LapSnapshot {
        LapSnapshot {
            lap,
            visits: self.visits.clone(),
        }
    }

    /// Tiles sorted by visits, most visited first. Ties keep board order.
    pub fn top_tiles(&self, board: &Board) -> Vec<TileVisits> {
        let mut ranked: Vec<TileVisits> = board
            .tiles()
            .iter()
            .map(|tile| TileVisits {
                label: tile.label.clone(),
                name: tile.name.clone(),
                visits: self.get(&tile.label),
            })
            .collect();
        ranked.sort_by(|a, b| b.visits.cmp(&a.visits));
        ranked
    }
}

/// One row of the ranked visit table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileVisits {
    pub label: String,
    pub name: String,
    pub visits: u64,
}

/// Visit counts as they stood when a lap was completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapSnapshot {
    /// Laps completed before this boundary ("Round N")
    pub lap: u32,
    pub visits: BTreeMap<String, u64>,
}

impl LapSnapshot {
    /// Visits made since `previous` (or since the start of the run)
    pub fn delta(&self, previous: Option<&LapSnapshot>) -> BTreeMap<String, u64> {
        self.visits
            .iter()
            .map(|(label, &count)| {
                let before = previous
                    .and_then(|p| p.visits.get(label))
                    .copied()
                    .unwrap_or(0);
                (label.clone(), count.saturating_sub(before))
            })
            .collect()
    }
}

/// Roll total -> how often it came up
pub fn roll_distribution(history: &[u8]) -> BTreeMap<u8, u64> {
    let mut distribution = BTreeMap::new();
    for &total in history {
        *distribution.entry(total).or_insert(0) += 1;
    }
    distribution
}

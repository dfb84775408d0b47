//! Report artifacts built from a finished run.
//!
//! The engine hands over a plain `SimulationResult`; everything here is
//! post-run reshaping: color-group series, text tables and a JSON dump.

use anyhow::Context;
use monopoly_core::{Board, LapSnapshot, SimulationResult, Tile, TileCategory};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Rows shown in the "top tiles" table
const TOP_TILES: usize = 10;

/// Cumulative visits for one color group, one entry per lap snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupVisits {
    pub group: String,
    pub visits_per_lap: Vec<u64>,
}

/// The JSON report: raw results plus the derived group series
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub seed: Option<u64>,
    pub result: &'a SimulationResult,
    pub groups: Vec<GroupVisits>,
}

/// Files written by [`write_reports`]
#[derive(Debug)]
pub struct ReportPaths {
    pub text: PathBuf,
    pub json: PathBuf,
}

/// Group a tile belongs to: its label without trailing digits.
///
/// Corner tiles (start, jail, parking) belong to no group.
pub fn group_of(tile: &Tile) -> Option<&str> {
    match tile.category {
        TileCategory::Start
        | TileCategory::Jail
        | TileCategory::VisitingJail
        | TileCategory::FreeParking
        | TileCategory::GoToJail => None,
        _ => Some(tile.label.trim_end_matches(|c: char| c.is_ascii_digit())),
    }
}

/// Cumulative visits per group at every lap boundary
pub fn group_series(board: &Board, snapshots: &[LapSnapshot]) -> Vec<GroupVisits> {
    let mut members: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for tile in board.tiles() {
        if let Some(group) = group_of(tile) {
            members.entry(group).or_default().push(&tile.label);
        }
    }

    members
        .into_iter()
        .map(|(group, labels)| GroupVisits {
            group: group.to_string(),
            visits_per_lap: snapshots
                .iter()
                .map(|snapshot| {
                    labels
                        .iter()
                        .filter_map(|label| snapshot.visits.get(*label))
                        .sum()
                })
                .collect(),
        })
        .collect()
}

/// Human-readable report
pub fn render_text(result: &SimulationResult, groups: &[GroupVisits]) -> String {
    let mut out = String::new();

    // writing to a String cannot fail
    let _ = writeln!(out, "Laps: {}  Turns: {}", result.laps, result.turns);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<20} {:<8}", "Name", "Number");
    for row in &result.top_tiles {
        let _ = writeln!(out, "{:<20} {:<8}", row.label, row.visits);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top {TOP_TILES} tiles");
    for row in result.top_tiles.iter().take(TOP_TILES) {
        let _ = writeln!(out, "{:<24} {:<8}", row.name, row.visits);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<6} {:<8}", "Roll", "Count");
    for (total, count) in &result.roll_distribution {
        let _ = writeln!(out, "{:<6} {:<8}", total, count);
    }

    if !groups.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<8} {:<8}", "Group", "Visits");
        for group in groups {
            let last = group.visits_per_lap.last().copied().unwrap_or(0);
            let _ = writeln!(out, "{:<8} {:<8}", group.group, last);
        }
    }

    out
}

/// Write the text and JSON reports into `dir`
pub fn write_reports(
    result: &SimulationResult,
    board: &Board,
    seed: Option<u64>,
    dir: &Path,
) -> anyhow::Result<ReportPaths> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    let stem = format!("output_{}_laps_{}", result.laps, stamp);

    let groups = group_series(board, &result.snapshots);

    let text = dir.join(format!("{stem}.txt"));
    fs::write(&text, render_text(result, &groups))
        .with_context(|| format!("failed to write {}", text.display()))?;

    let report = Report {
        seed,
        result,
        groups,
    };
    let json = dir.join(format!("{stem}.json"));
    fs::write(&json, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("failed to write {}", json.display()))?;

    Ok(ReportPaths { text, json })
}

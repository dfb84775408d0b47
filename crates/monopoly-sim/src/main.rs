//! Monopoly visitation simulator.

use anyhow::Context;
use monopoly_core::{Board, Deck, DeckKind, Decks, Simulation, TurnEvent, TurnOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod report;

use config::SimConfig;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimConfig::from_env()?;

    let board = Arc::new(load_board(&config.board_path)?);
    let decks = Decks::new(
        load_deck(DeckKind::Chance, &config.chance_path)?,
        load_deck(DeckKind::CommunityChest, &config.community_chest_path)?,
    );
    info!(
        tiles = board.len(),
        chance = decks.get(DeckKind::Chance).len(),
        community_chest = decks.get(DeckKind::CommunityChest).len(),
        "Loaded board and decks"
    );

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut sim = Simulation::new(board.clone(), decks, rng)
        .context("card decks do not match the board")?;

    info!(laps = config.laps, seed = ?config.seed, "Starting simulation...");
    sim.run_with(config.laps, log_turn)?;

    let result = sim.finish();
    info!(laps = result.laps, turns = result.turns, "Simulation finished");

    let paths = report::write_reports(&result, &board, config.seed, &config.output_dir)?;
    info!(text = %paths.text.display(), json = %paths.json.display(), "Reports written");

    Ok(())
}

fn load_board(path: &Path) -> anyhow::Result<Board> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    Board::parse(&source).with_context(|| format!("invalid board file {}", path.display()))
}

fn load_deck(kind: DeckKind, path: &Path) -> anyhow::Result<Deck> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {} file {}", kind.name(), path.display()))?;
    Deck::parse(kind, &source)
        .with_context(|| format!("invalid {} file {}", kind.name(), path.display()))
}

fn log_turn(outcome: &TurnOutcome) {
    trace!(roll = ?outcome.roll, "Turn");
    for event in &outcome.events {
        match event {
            TurnEvent::PassedStart { laps_completed } => {
                debug!(laps_completed, "Lap completed");
            }
            TurnEvent::SentToJail { reason } => debug!(?reason, "Sent to jail"),
            TurnEvent::LeftJail { via } => debug!(?via, "Left jail"),
            TurnEvent::CardDrawn { deck, text } => {
                debug!(deck = deck.name(), card = %text, "Card drawn");
            }
            other => trace!(event = ?other),
        }
    }
}

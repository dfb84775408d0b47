//! Tile catalog: the ordered, read-only board.
//!
//! This module contains:
//! - Parsing of the comma-separated board data format
//! - Name lookup used by travel cards
//! - Railroad/utility index lists for "advance to nearest" cards
//! - Jail and go-to-jail locations

use crate::error::ParseError;
use crate::tile::{PropertyDetails, Tile, TileCategory};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Field separator for board records
pub const BOARD_SEPARATOR: char = ',';

/// The board, built once and shared read-only for a whole simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    /// Travel destination name -> tile index
    names: HashMap<String, usize>,
    railroads: Vec<usize>,
    utilities: Vec<usize>,
    jail: usize,
    go_to_jail: usize,
}

impl Board {
    /// Parse a board from its line-oriented text form.
    ///
    /// A record with 1 field is a fixed tile named after its own label,
    /// 3 fields is `label,name,category`, and 12 fields is a full property
    /// record (`label,name,category,price,house,rent x6,mortgage`).
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut tiles = Vec::new();
        let mut names = HashMap::new();
        let mut labels = HashSet::new();
        let mut railroads = Vec::new();
        let mut utilities = Vec::new();

        for (line_index, raw) in source.lines().enumerate() {
            let record = raw.trim();
            if record.is_empty() {
                continue;
            }
            let line = line_index + 1;
            let fields: Vec<&str> = record.split(BOARD_SEPARATOR).collect();
            let tile = parse_tile(line, &fields)?;
            let index = tiles.len();

            if !labels.insert(tile.label.clone()) {
                return Err(ParseError::DuplicateLabel {
                    line,
                    label: tile.label,
                });
            }

            // Chance and Community Chest share a name, so they are keyed by label
            let key = if tile.category.is_card_tile() {
                &tile.label
            } else {
                &tile.name
            };
            names.insert(key.clone(), index);

            match tile.category {
                TileCategory::Railroad => railroads.push(index),
                TileCategory::Utility => utilities.push(index),
                _ => {}
            }

            tiles.push(tile);
        }

        if tiles.is_empty() {
            return Err(ParseError::EmptyBoard);
        }

        let jail = single_index(&tiles, TileCategory::Jail)?;
        let go_to_jail = single_index(&tiles, TileCategory::GoToJail)?;

        Ok(Self {
            tiles,
            names,
            railroads,
            utilities,
            jail,
            go_to_jail,
        })
    }

    /// The board shipped in `data/board_data.txt`
    pub fn reference() -> Self {
        Self::parse(crate::reference::BOARD).expect("reference board data is valid")
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a parsed board
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in board order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get the tile at an index
    pub fn tile_at(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Look up a travel destination by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Railroad indices in board order
    pub fn railroad_indices(&self) -> &[usize] {
        &self.railroads
    }

    /// Utility indices in board order
    pub fn utility_indices(&self) -> &[usize] {
        &self.utilities
    }

    /// Index of the jail cell
    pub fn jail_index(&self) -> usize {
        self.jail
    }

    /// Index of the go-to-jail tile
    pub fn go_to_jail_index(&self) -> usize {
        self.go_to_jail
    }

    /// Indices of every tile in a category, in board order
    pub fn indices_of(&self, category: TileCategory) -> Cow<'_, [usize]> {
        match category {
            TileCategory::Railroad => Cow::Borrowed(&self.railroads),
            TileCategory::Utility => Cow::Borrowed(&self.utilities),
            _ => Cow::Owned(
                self.tiles
                    .iter()
                    .enumerate()
                    .filter(|(_, tile)| tile.category == category)
                    .map(|(index, _)| index)
                    .collect(),
            ),
        }
    }

    /// First tile of `category` strictly after `from`, wrapping to the first
    /// one on the board when none is ahead.
    pub fn nearest(&self, category: TileCategory, from: usize) -> Option<usize> {
        let indices = self.indices_of(category);
        indices
            .iter()
            .copied()
            .find(|&index| index > from)
            .or_else(|| indices.first().copied())
    }
}

fn parse_tile(line: usize, fields: &[&str]) -> Result<Tile, ParseError> {
    match fields.len() {
        1 => {
            let category = parse_category(line, fields[0])?;
            Ok(Tile::plain(fields[0], fields[0], category))
        }
        3 => {
            let category = parse_category(line, fields[2])?;
            Ok(Tile::plain(fields[0], fields[1], category))
        }
        12 => {
            let category = parse_category(line, fields[2])?;
            let mut rents = [0u32; 6];
            for (rent, field) in rents.iter_mut().zip(&fields[5..11]) {
                *rent = parse_number(line, field)?;
            }
            let details = PropertyDetails {
                price: parse_number(line, fields[3])?,
                price_per_house: parse_number(line, fields[4])?,
                rents,
                mortgage: parse_number(line, fields[11])?,
            };
            Ok(Tile::property(fields[0], fields[1], category, details))
        }
        found => Err(ParseError::TileFieldCount { line, found }),
    }
}

fn parse_category(line: usize, name: &str) -> Result<TileCategory, ParseError> {
    TileCategory::from_data_name(name).ok_or_else(|| ParseError::UnknownCategory {
        line,
        name: name.to_string(),
    })
}

pub(crate) fn parse_number(line: usize, value: &str) -> Result<u32, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

fn single_index(tiles: &[Tile], category: TileCategory) -> Result<usize, ParseError> {
    let mut matching = tiles
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.category == category)
        .map(|(index, _)| index);

    match (matching.next(), matching.count()) {
        (Some(index), 0) => Ok(index),
        (None, _) => Err(ParseError::SpecialTileCount { category, found: 0 }),
        (Some(_), rest) => Err(ParseError::SpecialTileCount {
            category,
            found: rest + 1,
        }),
    }
}

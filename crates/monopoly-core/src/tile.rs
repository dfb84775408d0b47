//! Board tiles and their categories.

use serde::{Deserialize, Serialize};

/// What kind of square a tile is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCategory {
    /// The starting tile ("Go")
    Start,
    Property,
    CommunityChest,
    Tax,
    Railroad,
    Chance,
    /// Pass-through square next to the jail cell
    VisitingJail,
    /// The jail cell itself
    Jail,
    Utility,
    FreeParking,
    GoToJail,
}

impl TileCategory {
    /// Every category, in board-file order of first appearance
    pub const ALL: [TileCategory; 11] = [
        TileCategory::Start,
        TileCategory::Property,
        TileCategory::CommunityChest,
        TileCategory::Tax,
        TileCategory::Railroad,
        TileCategory::Chance,
        TileCategory::VisitingJail,
        TileCategory::Jail,
        TileCategory::Utility,
        TileCategory::FreeParking,
        TileCategory::GoToJail,
    ];

    /// Parse the category string used by board data files
    pub fn from_data_name(name: &str) -> Option<Self> {
        let category = match name {
            "Go" => TileCategory::Start,
            "Property" => TileCategory::Property,
            "Community_Chest" => TileCategory::CommunityChest,
            "Tax" => TileCategory::Tax,
            "Railroad" => TileCategory::Railroad,
            "Chance" => TileCategory::Chance,
            "Visiting Jail" => TileCategory::VisitingJail,
            "Jail" => TileCategory::Jail,
            "Utility" => TileCategory::Utility,
            "Free Parking" => TileCategory::FreeParking,
            "Go To Jail" => TileCategory::GoToJail,
            _ => return None,
        };
        Some(category)
    }

    /// The string board data files use for this category
    pub fn data_name(&self) -> &'static str {
        match self {
            TileCategory::Start => "Go",
            TileCategory::Property => "Property",
            TileCategory::CommunityChest => "Community_Chest",
            TileCategory::Tax => "Tax",
            TileCategory::Railroad => "Railroad",
            TileCategory::Chance => "Chance",
            TileCategory::VisitingJail => "Visiting Jail",
            TileCategory::Jail => "Jail",
            TileCategory::Utility => "Utility",
            TileCategory::FreeParking => "Free Parking",
            TileCategory::GoToJail => "Go To Jail",
        }
    }

    /// Whether landing here draws a card
    pub fn is_card_tile(&self) -> bool {
        matches!(self, TileCategory::Chance | TileCategory::CommunityChest)
    }
}

/// Purchase details carried by property records.
///
/// Parsed for completeness; turn resolution never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub price: u32,
    pub price_per_house: u32,
    /// Rent with 0..=4 houses, then with a hotel
    pub rents: [u32; 6],
    pub mortgage: u32,
}

/// Plain tiles versus full property records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Plain,
    Property(PropertyDetails),
}

/// A single square on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique short label, also the key for visit statistics
    pub label: String,
    /// Display name, the key travel cards refer to
    pub name: String,
    pub category: TileCategory,
    pub kind: TileKind,
}

impl Tile {
    /// Create a tile without property details
    pub fn plain(label: impl Into<String>, name: impl Into<String>, category: TileCategory) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            category,
            kind: TileKind::Plain,
        }
    }

    /// Create a property tile
    pub fn property(
        label: impl Into<String>,
        name: impl Into<String>,
        category: TileCategory,
        details: PropertyDetails,
    ) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            category,
            kind: TileKind::Property(details),
        }
    }

    /// Property details, if this tile has them
    pub fn details(&self) -> Option<&PropertyDetails> {
        match &self.kind {
            TileKind::Property(details) => Some(details),
            TileKind::Plain => None,
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] - {}", self.label, self.name)
    }
}

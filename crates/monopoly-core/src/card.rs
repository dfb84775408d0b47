//! Chance and Community Chest cards.

use crate::board::parse_number;
use crate::error::ParseError;
use crate::tile::TileCategory;
use serde::{Deserialize, Serialize};

/// Field separator for card records
pub const CARD_SEPARATOR: char = ';';

/// Where a travel card sends the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// Move back this many tiles ("3 Spaces")
    StepsBack(usize),
    /// Advance to the next tile of a category (railroad or utility)
    Nearest(TileCategory),
    /// Jump to the tile with this name
    Named(String),
}

impl Destination {
    /// Parse the destination field of a travel card
    pub fn parse(field: &str) -> Self {
        if let Some(steps) = field
            .strip_suffix(" Spaces")
            .and_then(|count| count.trim().parse().ok())
        {
            return Destination::StepsBack(steps);
        }

        match field {
            "Railroad" => Destination::Nearest(TileCategory::Railroad),
            "Utility" => Destination::Nearest(TileCategory::Utility),
            name => Destination::Named(name.to_string()),
        }
    }
}

/// Money transfer described by a card. No ledger is modelled, so these
/// only ever get drawn and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub payer: String,
    pub receiver: String,
    pub amounts: Vec<u32>,
}

/// What a card does when drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    /// Get out of jail free; kept until used
    Basic,
    Travel(Destination),
    Money(Payment),
}

/// A single card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub text: String,
    pub kind: CardKind,
}

impl Card {
    /// Parse one `;`-separated record.
    ///
    /// 2 fields is a get-out-of-jail card, 3 is `text;action;destination`,
    /// 5 or more is `text;action;payer;receiver;amount...`.
    pub fn parse(line: usize, record: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = record.split(CARD_SEPARATOR).collect();
        let text = fields[0].to_string();

        let kind = match fields.len() {
            2 => CardKind::Basic,
            3 => CardKind::Travel(Destination::parse(fields[2])),
            n if n >= 5 => CardKind::Money(Payment {
                payer: fields[2].to_string(),
                receiver: fields[3].to_string(),
                amounts: fields[4..]
                    .iter()
                    .map(|amount| parse_number(line, amount))
                    .collect::<Result<_, _>>()?,
            }),
            found => return Err(ParseError::CardFieldCount { line, found }),
        };

        Ok(Self { text, kind })
    }

    /// Whether this card is kept to leave jail later
    pub fn is_escape(&self) -> bool {
        matches!(self.kind, CardKind::Basic)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

//! The reference board and decks shipped in `data/`, embedded at compile time.

/// 41-tile board: Jail at 10, Visiting Jail at 11, Go To Jail at 31
pub const BOARD: &str = include_str!("../../../data/board_data.txt");

/// 16 Chance cards
pub const CHANCE: &str = include_str!("../../../data/chances_data.txt");

/// 17 Community Chest cards
pub const COMMUNITY_CHEST: &str = include_str!("../../../data/community_chest_data.txt");

//! Move classification and the filter bar.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{MoveRecord, SheetRecord};

/// Category a move is sorted under by its Level text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelKey {
    Attack,
    Cantrip,
    /// Spell level, always 1..=9.
    Level(u8),
    Unclassified,
}

impl LevelKey {
    /// The filter key string: "attack", "cantrip", "1".."9" or "".
    pub fn as_key(&self) -> String {
        match self {
            LevelKey::Attack => "attack".to_string(),
            LevelKey::Cantrip => "cantrip".to_string(),
            LevelKey::Level(level) => level.to_string(),
            LevelKey::Unclassified => String::new(),
        }
    }
}

fn is_attack_level(level: &str) -> bool {
    let level = level.trim().to_lowercase();
    level.is_empty() || level == "-" || level == "attack"
}

pub fn classify(level: &str) -> LevelKey {
    if is_attack_level(level) {
        return LevelKey::Attack;
    }
    let level = level.trim().to_lowercase();
    if level == "cantrip" {
        return LevelKey::Cantrip;
    }
    level
        .chars()
        .find_map(|ch| match ch {
            '1'..='9' => ch.to_digit(10).map(|digit| LevelKey::Level(digit as u8)),
            _ => None,
        })
        .unwrap_or(LevelKey::Unclassified)
}

pub fn classify_move(record: &MoveRecord) -> LevelKey {
    classify(&record.level)
}

/// Level text for the list column: `-` for attacks, the sheet's own
/// wording otherwise.
pub fn level_for_list(record: &MoveRecord) -> String {
    if is_attack_level(&record.level) {
        return "-".to_string();
    }
    record.level.trim().to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveFilter {
    #[default]
    All,
    Attack,
    Cantrip,
    Level(u8),
}

impl MoveFilter {
    /// Filter bar order.
    pub const ALL: [MoveFilter; 12] = [
        MoveFilter::All,
        MoveFilter::Attack,
        MoveFilter::Cantrip,
        MoveFilter::Level(1),
        MoveFilter::Level(2),
        MoveFilter::Level(3),
        MoveFilter::Level(4),
        MoveFilter::Level(5),
        MoveFilter::Level(6),
        MoveFilter::Level(7),
        MoveFilter::Level(8),
        MoveFilter::Level(9),
    ];

    /// Parses a filter key as used by the filter buttons.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "all" => Some(MoveFilter::All),
            "attack" => Some(MoveFilter::Attack),
            "cantrip" => Some(MoveFilter::Cantrip),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch @ '1'..='9'), None) => {
                        ch.to_digit(10).map(|digit| MoveFilter::Level(digit as u8))
                    }
                    _ => None,
                }
            }
        }
    }

    pub fn key(&self) -> String {
        match self {
            MoveFilter::All => "all".to_string(),
            MoveFilter::Attack => "attack".to_string(),
            MoveFilter::Cantrip => "cantrip".to_string(),
            MoveFilter::Level(level) => level.to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            MoveFilter::All => "ALL".to_string(),
            MoveFilter::Attack => "ATTACK".to_string(),
            MoveFilter::Cantrip => "CANTRIP".to_string(),
            MoveFilter::Level(level) => format!("LV {level}"),
        }
    }

    pub fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|filter| filter == self)
            .unwrap_or(0)
    }

    /// Steps through the filter bar, wrapping at both ends.
    pub fn cycle(&self, step: i16) -> Self {
        let len = Self::ALL.len() as i16;
        let next = (self.position() as i16 + step).rem_euclid(len);
        Self::ALL[next as usize]
    }

    pub fn matches(&self, key: LevelKey) -> bool {
        match self {
            MoveFilter::All => true,
            MoveFilter::Attack => key == LevelKey::Attack,
            MoveFilter::Cantrip => key == LevelKey::Cantrip,
            MoveFilter::Level(level) => key == LevelKey::Level(*level),
        }
    }
}

impl fmt::Display for MoveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Indices of the moves visible under `filter`, in table order.
///
/// Moves with a blank name are never visible.
pub fn filter_moves(moves: &[MoveRecord], filter: MoveFilter) -> Vec<usize> {
    moves
        .iter()
        .enumerate()
        .filter(|(_, record)| record.has_name() && filter.matches(classify_move(record)))
        .map(|(idx, _)| idx)
        .collect()
}

//! Fixed sheet schemas and header alias resolution.

use serde::{Deserialize, Serialize};

use crate::csv::Record;

/// Returns the value of the first alias present in `record`, or `""`.
///
/// A present-but-empty alias still wins over later aliases.
pub fn lookup(record: &Record, aliases: &[&str]) -> String {
    aliases
        .iter()
        .find_map(|alias| record.get(alias))
        .unwrap_or_default()
        .to_string()
}

/// A record type with a declarative alias table.
pub trait SheetRecord: Clone + Sized {
    /// Label used for empty-state and error text ("MOVES", "ABILITIES").
    const PLURAL: &'static str;

    fn from_record(record: &Record) -> Self;

    /// The list name; blank names are never shown.
    fn name(&self) -> &str;

    fn has_name(&self) -> bool {
        !self.name().trim().is_empty()
    }
}

/// Normalizes every parsed record and drops the ones without a name.
pub fn normalize_all<T: SheetRecord>(records: &[Record]) -> Vec<T> {
    records
        .iter()
        .map(T::from_record)
        .filter(T::has_name)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveField {
    Attack,
    Type,
    Category,
    Level,
    CastingTime,
    MiniDescription,
    Range,
    Duration,
    Description,
}

pub const MOVE_SCHEMA: &[(MoveField, &[&str])] = &[
    (MoveField::Attack, &["Attack", "attack"]),
    (MoveField::Type, &["Type", "type"]),
    (MoveField::Category, &["Category", "category"]),
    (MoveField::Level, &["Level", "level"]),
    (MoveField::CastingTime, &["Casting Time", "castingTime"]),
    (
        MoveField::MiniDescription,
        &["Mini description", "Mini Description", "miniDescription", "mini"],
    ),
    (MoveField::Range, &["Range", "range"]),
    (MoveField::Duration, &["Duration", "duration"]),
    (MoveField::Description, &["Description", "description"]),
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub attack: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub level: String,
    pub casting_time: String,
    pub mini_description: String,
    pub range: String,
    pub duration: String,
    pub description: String,
}

impl MoveRecord {
    pub fn field(&self, field: MoveField) -> &str {
        match field {
            MoveField::Attack => &self.attack,
            MoveField::Type => &self.kind,
            MoveField::Category => &self.category,
            MoveField::Level => &self.level,
            MoveField::CastingTime => &self.casting_time,
            MoveField::MiniDescription => &self.mini_description,
            MoveField::Range => &self.range,
            MoveField::Duration => &self.duration,
            MoveField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: MoveField) -> &mut String {
        match field {
            MoveField::Attack => &mut self.attack,
            MoveField::Type => &mut self.kind,
            MoveField::Category => &mut self.category,
            MoveField::Level => &mut self.level,
            MoveField::CastingTime => &mut self.casting_time,
            MoveField::MiniDescription => &mut self.mini_description,
            MoveField::Range => &mut self.range,
            MoveField::Duration => &mut self.duration,
            MoveField::Description => &mut self.description,
        }
    }
}

impl SheetRecord for MoveRecord {
    const PLURAL: &'static str = "MOVES";

    fn from_record(record: &Record) -> Self {
        let mut normalized = MoveRecord::default();
        for (field, aliases) in MOVE_SCHEMA {
            *normalized.field_mut(*field) = lookup(record, aliases);
        }
        normalized
    }

    fn name(&self) -> &str {
        &self.attack
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityField {
    Ability,
    Description,
}

pub const ABILITY_SCHEMA: &[(AbilityField, &[&str])] = &[
    (AbilityField::Ability, &["Ability", "ability", "Name", "name"]),
    (
        AbilityField::Description,
        &["Description", "description", "Effect", "effect"],
    ),
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub ability: String,
    pub description: String,
}

impl SheetRecord for AbilityRecord {
    const PLURAL: &'static str = "ABILITIES";

    fn from_record(record: &Record) -> Self {
        let mut normalized = AbilityRecord::default();
        for (field, aliases) in ABILITY_SCHEMA {
            let value = lookup(record, aliases);
            match field {
                AbilityField::Ability => normalized.ability = value,
                AbilityField::Description => normalized.description = value,
            }
        }
        normalized
    }

    fn name(&self) -> &str {
        &self.ability
    }
}

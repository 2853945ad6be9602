//! Normalized creature records and the metrics derived from them.

use serde::{Deserialize, Serialize};

/// Type label used when a source record carries no type information
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Name used when a local record has no name
pub const UNKNOWN_NAME: &str = "Unknown";

/// Base stats carried by every record. Missing values are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

/// The stat columns a record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Hp,
    Attack,
    Defense,
    Speed,
}

impl StatField {
    pub const ALL: &'static [StatField] = &[
        StatField::Hp,
        StatField::Attack,
        StatField::Defense,
        StatField::Speed,
    ];

    /// Column name in local datasets and artifacts, and the stat name the
    /// remote catalog uses
    pub fn column(&self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::Speed => "speed",
        }
    }

    pub fn get(&self, stats: &Stats) -> u32 {
        match self {
            Self::Hp => stats.hp,
            Self::Attack => stats.attack,
            Self::Defense => stats.defense,
            Self::Speed => stats.speed,
        }
    }

    pub fn set(&self, stats: &mut Stats, value: u32) {
        match self {
            Self::Hp => stats.hp = value,
            Self::Attack => stats.attack = value,
            Self::Defense => stats.defense = value,
            Self::Speed => stats.speed = value,
        }
    }
}

impl std::fmt::Display for StatField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// One creature after normalization.
///
/// Serializes in the fetch-artifact shape: `main_type` is written as
/// `type_1`, stats are flattened and no derived metric is included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    #[serde(rename = "type_1")]
    pub main_type: String,
    #[serde(default)]
    pub type_2: Option<String>,
    #[serde(flatten)]
    pub stats: Stats,
}

impl Record {
    /// hp + attack + defense, widened so saturated stats cannot overflow
    pub fn power_score(&self) -> u64 {
        u64::from(self.stats.hp) + u64::from(self.stats.attack) + u64::from(self.stats.defense)
    }

    /// hp + attack + defense + speed
    pub fn total_power(&self) -> u64 {
        self.power_score() + u64::from(self.stats.speed)
    }
}

/// Which derived power metric a query or aggregation ranks by.
///
/// The local-dataset pipeline uses [`Metric::PowerScore`], which leaves speed
/// out because shipped datasets frequently lack a speed column. The fetch
/// pipeline always has all four stats and uses [`Metric::TotalPower`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    PowerScore,
    TotalPower,
}

impl Metric {
    pub fn value(&self, record: &Record) -> u64 {
        match self {
            Self::PowerScore => record.power_score(),
            Self::TotalPower => record.total_power(),
        }
    }

    /// Column heading for tables and reports
    pub fn column(&self) -> &'static str {
        match self {
            Self::PowerScore => "power_score",
            Self::TotalPower => "total_power",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Capitalize a display name: first character upper case, the rest lower case
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

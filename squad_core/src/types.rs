//! Core types shared by the combat engine and the build searches

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stat categories that receive points, in build order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    Power,
    Precision,
    Evasion,
    Hull,
}

impl StatCategory {
    /// Get all categories in build order
    pub fn all() -> &'static [StatCategory] {
        &[
            StatCategory::Power,
            StatCategory::Precision,
            StatCategory::Evasion,
            StatCategory::Hull,
        ]
    }

    /// Position of this category inside a [`Build`]
    pub fn index(self) -> usize {
        match self {
            StatCategory::Power => 0,
            StatCategory::Precision => 1,
            StatCategory::Evasion => 2,
            StatCategory::Hull => 3,
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatCategory::Power => "power",
            StatCategory::Precision => "precision",
            StatCategory::Evasion => "evasion",
            StatCategory::Hull => "hull",
        };
        write!(f, "{}", name)
    }
}

/// A stat point allocation: power, precision, evasion, hull
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Build(pub [u32; 4]);

impl Build {
    pub fn new(power: u32, precision: u32, evasion: u32, hull: u32) -> Self {
        Build([power, precision, evasion, hull])
    }

    /// The all-zero build, reported by searches that found nothing feasible
    pub fn zero() -> Self {
        Build::default()
    }

    pub fn power(&self) -> u32 {
        self.0[0]
    }

    pub fn precision(&self) -> u32 {
        self.0[1]
    }

    pub fn evasion(&self) -> u32 {
        self.0[2]
    }

    pub fn hull(&self) -> u32 {
        self.0[3]
    }

    pub fn get(&self, category: StatCategory) -> u32 {
        self.0[category.index()]
    }

    /// Total points spent
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }
}

impl From<[u32; 4]> for Build {
    fn from(values: [u32; 4]) -> Self {
        Build(values)
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [power, precision, evasion, hull] = self.0;
        write!(f, "[{}, {}, {}, {}]", power, precision, evasion, hull)
    }
}

//! Career catalog: immutable reference data shared read-only by every stage.
//!
//! The catalog is built once at startup and carried as `Arc<CareerCatalog>`.
//! Insertion order is significant: the scorer uses it to break ties.

use std::fmt;

use serde::{Deserialize, Serialize};

mod data;

pub use data::builtin_catalog;

/// The fixed classification carried by every `CareerRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Healthcare,
    Technology,
    Engineering,
    Business,
    Finance,
    Education,
    Creative,
    Media,
    SkilledTrades,
    Manufacturing,
    Environmental,
    Science,
    Legal,
    PublicService,
    Hospitality,
}

impl Sector {
    pub const ALL: [Sector; 15] = [
        Sector::Healthcare,
        Sector::Technology,
        Sector::Engineering,
        Sector::Business,
        Sector::Finance,
        Sector::Education,
        Sector::Creative,
        Sector::Media,
        Sector::SkilledTrades,
        Sector::Manufacturing,
        Sector::Environmental,
        Sector::Science,
        Sector::Legal,
        Sector::PublicService,
        Sector::Hospitality,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Sector::Healthcare => "Healthcare",
            Sector::Technology => "Technology",
            Sector::Engineering => "Engineering",
            Sector::Business => "Business",
            Sector::Finance => "Finance",
            Sector::Education => "Education",
            Sector::Creative => "Arts & Design",
            Sector::Media => "Media & Communications",
            Sector::SkilledTrades => "Skilled Trades",
            Sector::Manufacturing => "Manufacturing",
            Sector::Environmental => "Environment & Agriculture",
            Sector::Science => "Science & Research",
            Sector::Legal => "Law",
            Sector::PublicService => "Public Service",
            Sector::Hospitality => "Hospitality",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordinal education scale shared by careers (requirement) and students (willingness).
/// Variant order is the ordinal order; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Certificate,
    Associate,
    Bachelor,
    Advanced,
}

impl EducationLevel {
    pub fn ordinal(&self) -> i8 {
        match self {
            EducationLevel::Certificate => 0,
            EducationLevel::Associate => 1,
            EducationLevel::Bachelor => 2,
            EducationLevel::Advanced => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EducationLevel::Certificate => "certificate or apprenticeship",
            EducationLevel::Associate => "associate degree",
            EducationLevel::Bachelor => "bachelor's degree",
            EducationLevel::Advanced => "graduate or professional degree",
        }
    }

    /// Accepts the snake_case tag plus the common spellings students pick from.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "certificate" | "trade_school" | "apprenticeship" | "high_school" => {
                Some(EducationLevel::Certificate)
            }
            "associate" | "associates" | "two_year" => Some(EducationLevel::Associate),
            "bachelor" | "bachelors" | "four_year" => Some(EducationLevel::Bachelor),
            "advanced" | "masters" | "doctorate" | "graduate" => Some(EducationLevel::Advanced),
            _ => None,
        }
    }
}

/// A single career in the catalog. Read-only outside this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub id: String,
    pub title: String,
    pub sector: Sector,
    pub required_education: EducationLevel,
    pub average_salary: u32,
    pub description: String,
    pub skill_tags: Vec<String>,
}

/// Ordered, read-only collection of careers.
#[derive(Debug, Clone, Default)]
pub struct CareerCatalog {
    careers: Vec<CareerRecord>,
}

impl CareerCatalog {
    pub fn new(careers: Vec<CareerRecord>) -> Self {
        Self { careers }
    }

    /// All careers in insertion order.
    pub fn all(&self) -> &[CareerRecord] {
        &self.careers
    }

    pub fn by_sector(&self, sector: Sector) -> impl Iterator<Item = &CareerRecord> {
        self.careers.iter().filter(move |c| c.sector == sector)
    }

    pub fn get(&self, id: &str) -> Option<&CareerRecord> {
        self.careers.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.careers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.careers.is_empty()
    }
}

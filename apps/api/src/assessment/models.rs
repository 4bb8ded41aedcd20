use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::assessment::path::AssessmentPath;
use crate::catalog::EducationLevel;

/// The fixed subject list every student rates 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    Science,
    English,
    SocialStudies,
    Arts,
    Technology,
}

impl Subject {
    pub const ALL: [Subject; 6] = [
        Subject::Math,
        Subject::Science,
        Subject::English,
        Subject::SocialStudies,
        Subject::Arts,
        Subject::Technology,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Science => "Science",
            Subject::English => "English",
            Subject::SocialStudies => "Social Studies",
            Subject::Arts => "Arts",
            Subject::Technology => "Technology",
        }
    }
}

/// Coarse, student-facing work-type bucket. Maps to one or more sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerCategory {
    HandsOnBuilding,
    Healthcare,
    Technology,
    CreativeArts,
    Business,
    HelpingPeople,
    ScienceResearch,
    NatureEnvironment,
    LawGovernment,
    Communication,
    FoodHospitality,
}

impl CareerCategory {
    pub const ALL: [CareerCategory; 11] = [
        CareerCategory::HandsOnBuilding,
        CareerCategory::Healthcare,
        CareerCategory::Technology,
        CareerCategory::CreativeArts,
        CareerCategory::Business,
        CareerCategory::HelpingPeople,
        CareerCategory::ScienceResearch,
        CareerCategory::NatureEnvironment,
        CareerCategory::LawGovernment,
        CareerCategory::Communication,
        CareerCategory::FoodHospitality,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CareerCategory::HandsOnBuilding => "hands-on building",
            CareerCategory::Healthcare => "healthcare",
            CareerCategory::Technology => "technology",
            CareerCategory::CreativeArts => "creative arts",
            CareerCategory::Business => "business",
            CareerCategory::HelpingPeople => "helping people",
            CareerCategory::ScienceResearch => "science and research",
            CareerCategory::NatureEnvironment => "nature and the environment",
            CareerCategory::LawGovernment => "law and government",
            CareerCategory::Communication => "communication",
            CareerCategory::FoodHospitality => "food and hospitality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalTrait {
    Analytical,
    Creative,
    Empathetic,
    Leader,
    Organized,
    Outgoing,
    HandsOn,
    Curious,
    Patient,
    DetailOriented,
    Adventurous,
    Persuasive,
}

impl PersonalTrait {
    pub const ALL: [PersonalTrait; 12] = [
        PersonalTrait::Analytical,
        PersonalTrait::Creative,
        PersonalTrait::Empathetic,
        PersonalTrait::Leader,
        PersonalTrait::Organized,
        PersonalTrait::Outgoing,
        PersonalTrait::HandsOn,
        PersonalTrait::Curious,
        PersonalTrait::Patient,
        PersonalTrait::DetailOriented,
        PersonalTrait::Adventurous,
        PersonalTrait::Persuasive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PersonalTrait::Analytical => "analytical",
            PersonalTrait::Creative => "creative",
            PersonalTrait::Empathetic => "empathetic",
            PersonalTrait::Leader => "a leader",
            PersonalTrait::Organized => "organized",
            PersonalTrait::Outgoing => "outgoing",
            PersonalTrait::HandsOn => "hands-on",
            PersonalTrait::Curious => "curious",
            PersonalTrait::Patient => "patient",
            PersonalTrait::DetailOriented => "detail-oriented",
            PersonalTrait::Adventurous => "adventurous",
            PersonalTrait::Persuasive => "persuasive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    StayCloseHome,
    OpenRelocating,
    EarnWhileLearning,
    LimitedBudget,
    FamilyObligations,
}

/// Unbounded free-text answers. Never validated beyond presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeText {
    pub interests: Option<String>,
    pub experience: Option<String>,
    pub inspiration: Option<String>,
}

/// Normalized, validated student profile. Built once per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub grade: u8,
    pub zip_code: String,
    pub career_clarity: AssessmentPath,
    /// Selected category; always present on the decided path.
    pub career_category: Option<CareerCategory>,
    pub specific_career_id: Option<String>,
    /// Ordered interest areas. On the undecided path the first entry is primary.
    pub interest_areas: Vec<CareerCategory>,
    pub education_willingness: EducationLevel,
    pub subject_ratings: BTreeMap<Subject, u8>,
    pub personal_traits: BTreeSet<PersonalTrait>,
    pub constraints: BTreeSet<Constraint>,
    pub free_text: FreeText,
}

impl StudentProfile {
    /// The category that drives the primary sector match.
    pub fn primary_category(&self) -> Option<CareerCategory> {
        match self.career_clarity {
            AssessmentPath::Decided => self.career_category,
            AssessmentPath::Undecided => self.interest_areas.first().copied(),
        }
    }

    /// Interest areas other than the primary category, in submission order.
    pub fn secondary_categories(&self) -> Vec<CareerCategory> {
        let primary = self.primary_category();
        let skip = match self.career_clarity {
            AssessmentPath::Decided => 0,
            AssessmentPath::Undecided => 1,
        };
        self.interest_areas
            .iter()
            .skip(skip)
            .copied()
            .filter(|c| Some(*c) != primary)
            .collect()
    }

    pub fn rating(&self, subject: Subject) -> u8 {
        self.subject_ratings.get(&subject).copied().unwrap_or(0)
    }

    pub fn has_constraint(&self, constraint: Constraint) -> bool {
        self.constraints.contains(&constraint)
    }
}

/// Parses a loosely-typed tag ("Hands On", "hands-on", "HANDS_ON") into a snake_case enum.
pub fn parse_tag<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let normalized: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect();
    serde_json::from_value(serde_json::Value::String(normalized)).ok()
}

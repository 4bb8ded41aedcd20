//! Lookup tables for scoring and skill resolution.
//!
//! Every table is an exhaustive `match` over its key enum, so adding a sector,
//! category, or trait fails to compile until each table covers it. The
//! compatibility table is a pair list and is checked by tests instead.

use crate::assessment::{CareerCategory, PersonalTrait, Subject};
use crate::catalog::Sector;

/// Sectors a category maps to. The first entry is the category's core sector.
pub fn category_sectors(category: CareerCategory) -> &'static [Sector] {
    use Sector::*;
    match category {
        CareerCategory::HandsOnBuilding => &[SkilledTrades, Manufacturing, Engineering],
        CareerCategory::Healthcare => &[Healthcare, Science],
        CareerCategory::Technology => &[Technology, Engineering],
        CareerCategory::CreativeArts => &[Creative, Media],
        CareerCategory::Business => &[Business, Finance],
        CareerCategory::HelpingPeople => &[PublicService, Education, Healthcare],
        CareerCategory::ScienceResearch => &[Science, Environmental, Healthcare],
        CareerCategory::NatureEnvironment => &[Environmental, Science],
        CareerCategory::LawGovernment => &[Legal, PublicService],
        CareerCategory::Communication => &[Media, Business, Education],
        CareerCategory::FoodHospitality => &[Hospitality, Business],
    }
}

/// School subjects that prepare a student for work in the sector.
pub fn sector_subjects(sector: Sector) -> &'static [Subject] {
    use Subject::*;
    match sector {
        Sector::Healthcare => &[Science, Math],
        Sector::Technology => &[Technology, Math],
        Sector::Engineering => &[Math, Science, Technology],
        Sector::Business => &[Math, English, SocialStudies],
        Sector::Finance => &[Math],
        Sector::Education => &[English, SocialStudies],
        Sector::Creative => &[Arts, Technology],
        Sector::Media => &[English, Arts],
        Sector::SkilledTrades => &[Math, Technology],
        Sector::Manufacturing => &[Math, Technology],
        Sector::Environmental => &[Science],
        Sector::Science => &[Science, Math],
        Sector::Legal => &[English, SocialStudies],
        Sector::PublicService => &[SocialStudies, English],
        Sector::Hospitality => &[Arts, English],
    }
}

/// Sectors where a personality trait is an asset.
pub fn trait_sectors(personal_trait: PersonalTrait) -> &'static [Sector] {
    use Sector::*;
    match personal_trait {
        PersonalTrait::Analytical => &[Technology, Finance, Science, Engineering],
        PersonalTrait::Creative => &[Creative, Media, Hospitality],
        PersonalTrait::Empathetic => &[Healthcare, PublicService, Education],
        PersonalTrait::Leader => &[Business, PublicService, Legal],
        PersonalTrait::Organized => &[Finance, Business, Legal, Healthcare],
        PersonalTrait::Outgoing => &[Media, Business, Hospitality, Education],
        PersonalTrait::HandsOn => &[SkilledTrades, Manufacturing, Engineering, Environmental],
        PersonalTrait::Curious => &[Science, Technology, Environmental],
        PersonalTrait::Patient => &[Education, Healthcare],
        PersonalTrait::DetailOriented => &[Finance, Engineering, Manufacturing, Legal],
        PersonalTrait::Adventurous => &[Environmental, PublicService],
        PersonalTrait::Persuasive => &[Business, Legal, Media],
    }
}

/// A curated skill with the reason it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillEntry {
    pub name: &'static str,
    pub why: &'static str,
}

const fn skill(name: &'static str, why: &'static str) -> SkillEntry {
    SkillEntry { name, why }
}

pub const COMMUNICATION_SKILL: SkillEntry = skill(
    "Communication",
    "Every career rewards explaining ideas clearly and listening well.",
);

/// The two core skills for each sector.
pub fn sector_skills(sector: Sector) -> [SkillEntry; 2] {
    match sector {
        Sector::Healthcare => [
            skill("Patient care fundamentals", "Safe, compassionate care is the core of clinical work."),
            skill("Medical terminology", "Accurate language prevents errors between care teams."),
        ],
        Sector::Technology => [
            skill("Programming fundamentals", "Most technology roles build or automate with code."),
            skill("Systems troubleshooting", "Diagnosing problems methodically keeps systems running."),
        ],
        Sector::Engineering => [
            skill("Technical drawing and CAD", "Designs are communicated and reviewed as drawings."),
            skill("Applied physics", "Engineering decisions rest on forces, energy, and materials."),
        ],
        Sector::Business => [
            skill("Project management", "Business work is delivered as coordinated projects."),
            skill("Data-driven decision making", "Decisions are justified with numbers and evidence."),
        ],
        Sector::Finance => [
            skill("Financial analysis", "Reading statements and forecasts is daily work."),
            skill("Spreadsheet modeling", "Spreadsheets are the primary tool of financial roles."),
        ],
        Sector::Education => [
            skill("Lesson planning", "Good instruction starts with clear goals and structure."),
            skill("Classroom management", "Learning happens when the room is focused and safe."),
        ],
        Sector::Creative => [
            skill("Visual design principles", "Composition, color, and type drive creative quality."),
            skill("Portfolio development", "Creative work is hired on the strength of a portfolio."),
        ],
        Sector::Media => [
            skill("Writing and editing", "Clear copy is the backbone of media work."),
            skill("Digital content production", "Audiences are reached through produced audio, video, and web."),
        ],
        Sector::SkilledTrades => [
            skill("Blueprint reading", "Trade work follows plans and code requirements."),
            skill("Tool and safety certification", "Job sites require safe, certified tool use."),
        ],
        Sector::Manufacturing => [
            skill("Precision measurement", "Parts must meet tight tolerances."),
            skill("Quality control", "Catching defects early saves time and material."),
        ],
        Sector::Environmental => [
            skill("Field data collection", "Environmental work starts with careful sampling."),
            skill("Environmental regulations", "Projects must satisfy local and federal rules."),
        ],
        Sector::Science => [
            skill("Laboratory techniques", "Reliable results depend on sound lab practice."),
            skill("Statistical analysis", "Findings must be tested against chance."),
        ],
        Sector::Legal => [
            skill("Legal research", "Arguments rest on statutes and precedent."),
            skill("Persuasive writing", "Briefs and memos must convince a reader."),
        ],
        Sector::PublicService => [
            skill("Conflict resolution", "Public-facing roles defuse tense situations."),
            skill("Community resource knowledge", "Helping people means knowing where to send them."),
        ],
        Sector::Hospitality => [
            skill("Customer service", "Guest experience defines hospitality success."),
            skill("Food safety and operations", "Kitchens and hotels run on safe, repeatable processes."),
        ],
    }
}

/// The one skill a compatible secondary interest may contribute.
pub fn complementary_skill(sector: Sector) -> SkillEntry {
    match sector {
        Sector::Healthcare => skill("First aid and CPR", "Basic emergency care is valued across people-facing fields."),
        Sector::Technology => skill("Data literacy", "Working comfortably with data helps in any technical field."),
        Sector::Engineering => skill("Design thinking", "Structured problem solving transfers to adjacent fields."),
        Sector::Business => skill("Budgeting basics", "Understanding costs helps every project succeed."),
        Sector::Finance => skill("Financial literacy", "Reading numbers well supports planning and decisions."),
        Sector::Education => skill("Mentoring", "Teaching others deepens your own expertise."),
        Sector::Creative => skill("Visual storytelling", "Presenting ideas visually makes them memorable."),
        Sector::Media => skill("Social media communication", "Reaching audiences online is a widely useful skill."),
        Sector::SkilledTrades => skill("Hands-on fabrication", "Building things yourself grounds technical knowledge."),
        Sector::Manufacturing => skill("Process improvement", "Finding waste and fixing it applies everywhere."),
        Sector::Environmental => skill("Sustainability practices", "Resource-aware decisions are increasingly expected."),
        Sector::Science => skill("Scientific method", "Testing ideas carefully supports evidence-based work."),
        Sector::Legal => skill("Ethics and compliance", "Knowing the rules protects people and organizations."),
        Sector::PublicService => skill("Community outreach", "Connecting with the public builds trust."),
        Sector::Hospitality => skill("Event coordination", "Planning experiences for people is a flexible skill."),
    }
}

/// Unordered pairs of sectors whose skills transfer. Symmetric by construction.
const COMPATIBLE_PAIRS: &[(Sector, Sector)] = &[
    (Sector::Healthcare, Sector::Science),
    (Sector::Healthcare, Sector::PublicService),
    (Sector::Healthcare, Sector::Education),
    (Sector::Technology, Sector::Engineering),
    (Sector::Technology, Sector::Science),
    (Sector::Technology, Sector::Business),
    (Sector::Technology, Sector::Finance),
    (Sector::Technology, Sector::Manufacturing),
    (Sector::Engineering, Sector::Manufacturing),
    (Sector::Engineering, Sector::SkilledTrades),
    (Sector::Engineering, Sector::Science),
    (Sector::Engineering, Sector::Environmental),
    (Sector::Business, Sector::Finance),
    (Sector::Business, Sector::Hospitality),
    (Sector::Business, Sector::Media),
    (Sector::Business, Sector::Creative),
    (Sector::Business, Sector::Legal),
    (Sector::Education, Sector::PublicService),
    (Sector::Education, Sector::Science),
    (Sector::Education, Sector::Media),
    (Sector::Creative, Sector::Media),
    (Sector::Creative, Sector::Hospitality),
    (Sector::SkilledTrades, Sector::Manufacturing),
    (Sector::Environmental, Sector::Science),
    (Sector::Legal, Sector::PublicService),
    (Sector::Legal, Sector::Finance),
];

pub fn are_compatible(a: Sector, b: Sector) -> bool {
    a == b
        || COMPATIBLE_PAIRS
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_category_maps_to_a_sector() {
        for category in CareerCategory::ALL {
            assert!(!category_sectors(category).is_empty(), "{category:?}");
        }
    }

    #[test]
    fn test_every_sector_reachable_from_some_category() {
        let reachable: HashSet<Sector> = CareerCategory::ALL
            .iter()
            .flat_map(|c| category_sectors(*c).iter().copied())
            .collect();
        for sector in Sector::ALL {
            assert!(reachable.contains(&sector), "{sector:?} unreachable");
        }
    }

    #[test]
    fn test_every_sector_has_subjects_and_distinct_skills() {
        for sector in Sector::ALL {
            assert!(!sector_subjects(sector).is_empty(), "{sector:?}");
            let [a, b] = sector_skills(sector);
            assert_ne!(a.name, b.name, "{sector:?}");
            assert_ne!(a.name, COMMUNICATION_SKILL.name);
            assert_ne!(complementary_skill(sector).name, COMMUNICATION_SKILL.name);
        }
    }

    #[test]
    fn test_every_trait_has_affinity() {
        for t in PersonalTrait::ALL {
            assert!(!trait_sectors(t).is_empty(), "{t:?}");
        }
    }

    #[test]
    fn test_compatibility_is_symmetric_and_reflexive() {
        for a in Sector::ALL {
            assert!(are_compatible(a, a));
            for b in Sector::ALL {
                assert_eq!(are_compatible(a, b), are_compatible(b, a), "{a:?}/{b:?}");
            }
        }
    }

    #[test]
    fn test_every_sector_has_a_compatible_partner() {
        for a in Sector::ALL {
            assert!(
                Sector::ALL.iter().any(|&b| b != a && are_compatible(a, b)),
                "{a:?} has no partner"
            );
        }
    }

    #[test]
    fn test_creative_and_technology_are_not_compatible() {
        assert!(!are_compatible(Sector::Creative, Sector::Technology));
    }
}

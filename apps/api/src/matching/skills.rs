//! Sector skill resolution.
//!
//! Skill gaps for a career come only from its own sector, plus the generic
//! communication skill and at most one complementary skill from a compatible
//! secondary interest. A Technology match never lists a design skill.

use crate::assessment::StudentProfile;
use crate::catalog::Sector;
use crate::matching::tables::{
    are_compatible, category_sectors, complementary_skill, sector_skills, SkillEntry,
    COMMUNICATION_SKILL,
};
use crate::models::guidance::SkillGap;

/// Core sectors of the student's secondary interests, deduplicated, in order.
pub fn interest_sectors(profile: &StudentProfile) -> Vec<Sector> {
    let mut sectors = Vec::new();
    for category in profile.secondary_categories() {
        if let Some(core) = category_sectors(category).first() {
            if !sectors.contains(core) {
                sectors.push(*core);
            }
        }
    }
    sectors
}

/// Skills the student should build for a match in `top_sector`.
pub fn skill_gaps_for(top_sector: Sector, interest_sectors: &[Sector]) -> Vec<SkillGap> {
    let mut gaps = Vec::with_capacity(4);
    gaps.push(gap(COMMUNICATION_SKILL, None));
    gaps.extend(
        sector_skills(top_sector)
            .into_iter()
            .map(|entry| gap(entry, Some(top_sector))),
    );

    if let Some(partner) = interest_sectors
        .iter()
        .copied()
        .find(|s| *s != top_sector && are_compatible(top_sector, *s))
    {
        gaps.push(gap(complementary_skill(partner), Some(partner)));
    }

    gaps
}

fn gap(entry: SkillEntry, sector: Option<Sector>) -> SkillGap {
    SkillGap {
        skill: entry.name.to_string(),
        sector,
        why_it_matters: entry.why.to_string(),
        how_to_build: None,
    }
}

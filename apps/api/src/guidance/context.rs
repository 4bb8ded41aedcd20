//! Context document sent with every guidance request.
//!
//! The document embeds the whole profile plus contradiction flags: tensions in
//! the student's own answers that the model (and the counselor) should address.

use serde_json::{json, Value};

use crate::assessment::{Constraint, StudentProfile};
use crate::catalog::{CareerCatalog, CareerRecord};
use crate::matching::tables::{category_sectors, sector_subjects};
use crate::models::guidance::{Contradiction, ContradictionKind};
use crate::models::recommendation::MatchResult;

const MIN_ANSWER_WORDS: usize = 3;
const LOW_RATING: u8 = 2;

const NON_ANSWERS: &[&str] = &[
    "idk",
    "i dont know",
    "i don't know",
    "dunno",
    "n/a",
    "na",
    "none",
    "nothing",
    "no idea",
    "not sure",
];

/// Profile facts shared by every per-career request.
#[derive(Debug, Clone)]
pub struct GuidanceContext {
    student: Value,
    contradictions: Vec<Contradiction>,
}

impl GuidanceContext {
    pub fn new(
        profile: &StudentProfile,
        matches: &[MatchResult],
        catalog: &CareerCatalog,
    ) -> Self {
        Self {
            student: student_document(profile),
            contradictions: detect_contradictions(profile, matches, catalog),
        }
    }

    pub fn contradictions(&self) -> &[Contradiction] {
        &self.contradictions
    }

    /// The full document for one career.
    pub fn document_for(&self, career: &MatchResult) -> Value {
        json!({
            "student": self.student,
            "contradictions": self.contradictions,
            "career": {
                "id": career.career_id,
                "title": career.title,
                "sector": career.sector.label(),
                "required_education": career.required_education.label(),
                "average_salary": career.average_salary,
                "match_score": career.match_score,
                "reasoning": career.reasoning,
                "skill_gaps": career
                    .skill_gaps
                    .iter()
                    .map(|g| g.skill.as_str())
                    .collect::<Vec<_>>(),
            },
        })
    }
}

fn student_document(profile: &StudentProfile) -> Value {
    let ratings: serde_json::Map<String, Value> = profile
        .subject_ratings
        .iter()
        .map(|(subject, rating)| (subject.label().to_string(), json!(rating)))
        .collect();

    json!({
        "grade": profile.grade,
        "path": profile.career_clarity,
        "career_category": profile.career_category.map(|c| c.label()),
        "specific_career_id": profile.specific_career_id,
        "interest_areas": profile.interest_areas.iter().map(|c| c.label()).collect::<Vec<_>>(),
        "education_willingness": profile.education_willingness.label(),
        "subject_ratings": ratings,
        "personal_traits": profile.personal_traits.iter().map(|t| t.label()).collect::<Vec<_>>(),
        "constraints": profile.constraints,
        "free_text": profile.free_text,
    })
}

/// Flags contradictions in the profile. `matches` must be ranked best first.
pub fn detect_contradictions(
    profile: &StudentProfile,
    matches: &[MatchResult],
    catalog: &CareerCatalog,
) -> Vec<Contradiction> {
    let mut flags = Vec::new();

    if let Some(career) = education_target(profile, catalog) {
        if career.required_education > profile.education_willingness {
            flags.push(Contradiction {
                kind: ContradictionKind::EducationGap,
                detail: format!(
                    "{} requires a {}, but the student plans to pursue a {}",
                    career.title,
                    career.required_education.label(),
                    profile.education_willingness.label()
                ),
            });
        }
    }

    let free_text = [
        ("interests", &profile.free_text.interests),
        ("experience", &profile.free_text.experience),
        ("inspiration", &profile.free_text.inspiration),
    ];
    for (field, answer) in free_text {
        if let Some(answer) = answer.as_deref().filter(|a| is_minimal_answer(a)) {
            flags.push(Contradiction {
                kind: ContradictionKind::MinimalAnswer,
                detail: format!("The {field} answer \"{}\" gives little to work with", answer.trim()),
            });
        }
    }

    if profile.has_constraint(Constraint::StayCloseHome)
        && profile.has_constraint(Constraint::OpenRelocating)
    {
        flags.push(Contradiction {
            kind: ContradictionKind::ConstraintConflict,
            detail: "The student wants to stay close to home but is also open to relocating"
                .to_string(),
        });
    }

    if let Some(top) = matches.first() {
        let subjects = sector_subjects(top.sector);
        if subjects.iter().all(|s| profile.rating(*s) <= LOW_RATING) {
            let names: Vec<&str> = subjects.iter().map(|s| s.label()).collect();
            flags.push(Contradiction {
                kind: ContradictionKind::LowSubjectAlignment,
                detail: format!(
                    "The top match, {}, leans on {}, which the student rated {LOW_RATING} or lower",
                    top.title,
                    names.join(" and ")
                ),
            });
        }
    }

    flags
}

/// The career whose education requirement is compared with the student's
/// willingness: the named career, else the best-paid career in the primary
/// category's core sector.
fn education_target<'a>(
    profile: &StudentProfile,
    catalog: &'a CareerCatalog,
) -> Option<&'a CareerRecord> {
    if let Some(career) = profile
        .specific_career_id
        .as_deref()
        .and_then(|id| catalog.get(id))
    {
        return Some(career);
    }

    let core = *category_sectors(profile.primary_category()?).first()?;
    catalog.by_sector(core).max_by_key(|c| c.average_salary)
}

pub fn is_minimal_answer(answer: &str) -> bool {
    let normalized = answer
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '/')
        .to_ascii_lowercase();
    normalized.split_whitespace().count() < MIN_ANSWER_WORDS
        || NON_ANSWERS.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentPath, CareerCategory, FreeText, Subject};
    use crate::catalog::{builtin_catalog, EducationLevel, Sector};
    use std::collections::{BTreeMap, BTreeSet};

    fn profile() -> StudentProfile {
        StudentProfile {
            grade: 11,
            zip_code: "30301".to_string(),
            career_clarity: AssessmentPath::Decided,
            career_category: Some(CareerCategory::Technology),
            specific_career_id: Some("software-developer".to_string()),
            interest_areas: vec![],
            education_willingness: EducationLevel::Bachelor,
            subject_ratings: Subject::ALL.iter().map(|s| (*s, 4)).collect::<BTreeMap<_, _>>(),
            personal_traits: BTreeSet::new(),
            constraints: BTreeSet::new(),
            free_text: FreeText {
                interests: Some("I like building apps with my friends".to_string()),
                experience: None,
                inspiration: None,
            },
        }
    }

    fn top_match(id: &str) -> MatchResult {
        let catalog = builtin_catalog();
        let record = catalog.get(id).unwrap();
        MatchResult::new(record, 92, vec![])
    }

    fn kinds(flags: &[Contradiction]) -> Vec<ContradictionKind> {
        flags.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn test_consistent_profile_has_no_flags() {
        let flags = detect_contradictions(
            &profile(),
            &[top_match("software-developer")],
            &builtin_catalog(),
        );
        assert!(flags.is_empty(), "{flags:?}");
    }

    #[test]
    fn test_education_gap_for_named_career() {
        let mut p = profile();
        p.career_category = Some(CareerCategory::Healthcare);
        p.specific_career_id = Some("physician".to_string());
        p.education_willingness = EducationLevel::Associate;
        let flags = detect_contradictions(&p, &[], &builtin_catalog());
        assert_eq!(kinds(&flags), vec![ContradictionKind::EducationGap]);
        assert!(flags[0].detail.contains("Physician"));
    }

    #[test]
    fn test_education_gap_from_category_flagship() {
        let mut p = profile();
        p.career_category = Some(CareerCategory::Healthcare);
        p.specific_career_id = None;
        p.education_willingness = EducationLevel::Associate;
        let flags = detect_contradictions(&p, &[], &builtin_catalog());
        assert_eq!(kinds(&flags), vec![ContradictionKind::EducationGap]);
    }

    #[test]
    fn test_minimal_answers() {
        assert!(is_minimal_answer("idk"));
        assert!(is_minimal_answer("  N/A. "));
        assert!(is_minimal_answer("video games"));
        assert!(is_minimal_answer("I don't know"));
        assert!(!is_minimal_answer("I like fixing cars with my dad"));

        let mut p = profile();
        p.free_text.experience = Some("nothing".to_string());
        let flags = detect_contradictions(&p, &[], &builtin_catalog());
        assert_eq!(kinds(&flags), vec![ContradictionKind::MinimalAnswer]);
        assert!(flags[0].detail.contains("experience"));
    }

    #[test]
    fn test_constraint_conflict() {
        let mut p = profile();
        p.constraints = [Constraint::StayCloseHome, Constraint::OpenRelocating]
            .into_iter()
            .collect();
        let flags = detect_contradictions(&p, &[], &builtin_catalog());
        assert_eq!(kinds(&flags), vec![ContradictionKind::ConstraintConflict]);
    }

    #[test]
    fn test_low_subject_alignment_uses_top_match_sector() {
        let mut p = profile();
        p.subject_ratings.insert(Subject::Technology, 1);
        p.subject_ratings.insert(Subject::Math, 2);
        let flags = detect_contradictions(
            &p,
            &[top_match("software-developer")],
            &builtin_catalog(),
        );
        assert_eq!(kinds(&flags), vec![ContradictionKind::LowSubjectAlignment]);
    }

    #[test]
    fn test_document_embeds_profile_career_and_flags() {
        let mut p = profile();
        p.free_text.inspiration = Some("idk".to_string());
        let matches = vec![top_match("software-developer")];
        let context = GuidanceContext::new(&p, &matches, &builtin_catalog());
        let doc = context.document_for(&matches[0]);
        assert_eq!(doc["student"]["grade"], 11);
        assert_eq!(doc["student"]["subject_ratings"]["Math"], 4);
        assert_eq!(doc["career"]["sector"], Sector::Technology.label());
        assert_eq!(doc["contradictions"][0]["kind"], "minimal_answer");
    }
}

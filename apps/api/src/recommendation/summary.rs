//! Parent- and counselor-facing digests of a recommendation bundle.
//! Deterministic: built from scored matches and flags, never from the model.

use std::cmp::Ordering;

use crate::assessment::{Constraint, StudentProfile};
use crate::guidance::fallback::format_salary;
use crate::models::guidance::Contradiction;
use crate::models::recommendation::{
    CareerHighlight, CounselorNotes, MatchResult, ParentSummary, Provenance,
};

pub fn parent_summary(profile: &StudentProfile, matches: &[MatchResult]) -> ParentSummary {
    let headline = match matches.first() {
        Some(top) => format!(
            "{} career match{} for your grade {} student, led by {} ({}/100)",
            matches.len(),
            if matches.len() == 1 { "" } else { "es" },
            profile.grade,
            top.title,
            top.match_score
        ),
        None => format!("No career matches yet for your grade {} student", profile.grade),
    };

    let top_careers = matches
        .iter()
        .map(|m| CareerHighlight {
            title: m.title.clone(),
            match_score: m.match_score,
            average_salary: m.average_salary,
            local_jobs: m.local_opportunities.as_ref().map(|l| l.estimated_jobs),
        })
        .collect();

    ParentSummary {
        headline,
        top_careers,
        education_outlook: education_outlook(profile, matches.first()),
        next_steps: next_steps(profile, matches.first()),
    }
}

fn education_outlook(profile: &StudentProfile, top: Option<&MatchResult>) -> String {
    let willing = profile.education_willingness;
    let Some(top) = top else {
        return format!("Your student plans to pursue a {}.", willing.label());
    };

    match willing.cmp(&top.required_education) {
        Ordering::Equal => format!(
            "Your student's plan to pursue a {} lines up with what {} requires.",
            willing.label(),
            top.title
        ),
        Ordering::Greater => format!(
            "{} requires a {}, less than the {} your student plans, so they could start working sooner or keep studying.",
            top.title,
            top.required_education.label(),
            willing.label()
        ),
        Ordering::Less => format!(
            "{} requires a {}, more than the {} your student plans. This is worth discussing together.",
            top.title,
            top.required_education.label(),
            willing.label()
        ),
    }
}

fn next_steps(profile: &StudentProfile, top: Option<&MatchResult>) -> Vec<String> {
    let mut steps = Vec::new();
    if let Some(top) = top {
        steps.push(format!(
            "Review the course plan for {} with your student before next year's registration.",
            top.title
        ));
        steps.push(format!(
            "Look for a job shadow or volunteer opportunity in {}.",
            top.sector.label()
        ));
    }
    if profile.has_constraint(Constraint::EarnWhileLearning) {
        steps.push("Ask about paid apprenticeships and work-study programs.".to_string());
    }
    if profile.has_constraint(Constraint::LimitedBudget) {
        steps.push(
            "Explore dual enrollment, community college transfer paths, and scholarships."
                .to_string(),
        );
    }
    steps.push("Meet with the school counselor to talk through these results.".to_string());
    steps
}

pub fn counselor_notes(
    profile: &StudentProfile,
    matches: &[MatchResult],
    flags: Vec<Contradiction>,
    scoring_summary: String,
    provenance: Provenance,
) -> CounselorNotes {
    let talking_points = matches
        .iter()
        .map(|m| {
            let local = m
                .local_opportunities
                .as_ref()
                .map(|l| {
                    let salary = l
                        .average_local_salary
                        .map(|s| format!(", local average {}", format_salary(s)))
                        .unwrap_or_default();
                    format!(
                        "; {} openings within {} miles{salary}",
                        l.estimated_jobs, l.distance_from_student_miles
                    )
                })
                .unwrap_or_default();
            let strongest = m
                .strongest_factor()
                .map(|f| f.note.as_str())
                .unwrap_or("no single factor dominated");
            format!("{} ({}/100): {strongest}{local}", m.title, m.match_score)
        })
        .collect();

    CounselorNotes {
        path: profile.career_clarity,
        flags,
        talking_points,
        scoring_summary,
        provenance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentPath, FreeText};
    use crate::catalog::{builtin_catalog, EducationLevel};
    use crate::models::guidance::ContradictionKind;
    use crate::models::recommendation::{FactorKind, LocalOpportunities, MatchFactor};
    use std::collections::{BTreeMap, BTreeSet};

    fn profile(willingness: EducationLevel) -> StudentProfile {
        StudentProfile {
            grade: 10,
            zip_code: "94110".to_string(),
            career_clarity: AssessmentPath::Decided,
            career_category: None,
            specific_career_id: None,
            interest_areas: vec![],
            education_willingness: willingness,
            subject_ratings: BTreeMap::new(),
            personal_traits: BTreeSet::new(),
            constraints: [Constraint::LimitedBudget].into_iter().collect(),
            free_text: FreeText::default(),
        }
    }

    fn nurse() -> MatchResult {
        let catalog = builtin_catalog();
        MatchResult::new(
            catalog.get("registered-nurse").unwrap(),
            97,
            vec![MatchFactor {
                factor: FactorKind::Interest,
                points: 50.0,
                note: "Healthcare is the heart of your healthcare interest".to_string(),
            }],
        )
        .with_local_opportunities(LocalOpportunities {
            estimated_jobs: 340,
            average_local_salary: Some(88_500),
            distance_from_student_miles: 25,
        })
    }

    #[test]
    fn test_parent_summary_lists_matches_and_outlook() {
        let summary = parent_summary(&profile(EducationLevel::Associate), &[nurse()]);
        assert!(summary.headline.starts_with("1 career match for your grade 10 student"));
        assert_eq!(summary.top_careers[0].local_jobs, Some(340));
        assert!(summary.education_outlook.contains("lines up"));
        assert!(summary.next_steps.iter().any(|s| s.contains("dual enrollment")));
    }

    #[test]
    fn test_outlook_flags_shortfall() {
        let summary = parent_summary(&profile(EducationLevel::Certificate), &[nurse()]);
        assert!(summary.education_outlook.contains("worth discussing"));
    }

    #[test]
    fn test_counselor_notes_carry_flags_and_talking_points() {
        let flags = vec![Contradiction {
            kind: ContradictionKind::ConstraintConflict,
            detail: "conflict".to_string(),
        }];
        let notes = counselor_notes(
            &profile(EducationLevel::Associate),
            &[nurse()],
            flags.clone(),
            "weighted".to_string(),
            Provenance::Fallback,
        );
        assert_eq!(notes.flags, flags);
        assert_eq!(notes.path, AssessmentPath::Decided);
        assert_eq!(
            notes.talking_points[0],
            "Registered Nurse (97/100): Healthcare is the heart of your healthcare interest; \
             340 openings within 25 miles, local average $88,500"
        );
    }
}

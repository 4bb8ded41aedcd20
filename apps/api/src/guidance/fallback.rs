//! Deterministic guidance used whenever the model is unavailable or its output
//! cannot be used. Built only from catalog facts and the profile.

use crate::assessment::{Constraint, StudentProfile, Subject};
use crate::catalog::{EducationLevel, Sector};
use crate::matching::tables::sector_subjects;
use crate::models::guidance::{
    AcademicPlan, AcademicYear, CareerGuidance, GuidanceSource, PathwayStep,
};
use crate::models::recommendation::MatchResult;

const FIRST_GRADE: u8 = 9;
pub(crate) const LAST_GRADE: u8 = 12;

pub fn fallback_guidance(profile: &StudentProfile, career: &MatchResult) -> CareerGuidance {
    CareerGuidance {
        career_id: career.career_id.clone(),
        explanation: explanation(career),
        career_pathway: pathway_steps(career.required_education),
        academic_plan: academic_plan(profile, career.sector),
        skill_gaps: career.skill_gaps.clone(),
        source: GuidanceSource::Fallback,
    }
}

fn explanation(career: &MatchResult) -> String {
    let reason = career
        .strongest_factor()
        .map(|f| format!(" {}.", f.note))
        .unwrap_or_default();
    format!(
        "{} is a {}/100 match for you.{reason} It typically requires a {} and pays about {} a year nationally.",
        career.title,
        career.match_score,
        career.required_education.label(),
        format_salary(career.average_salary)
    )
}

/// Formats whole dollars with thousands separators: `$81,220`.
pub fn format_salary(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + 4);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn pathway_steps(required: EducationLevel) -> Vec<PathwayStep> {
    let mut steps = vec![step(
        "High school",
        "Take the recommended courses and explore the field through clubs, volunteering, or job shadowing.",
        "now - grade 12",
    )];

    match required {
        EducationLevel::Certificate => {
            steps.push(step(
                "Certificate or apprenticeship",
                "Enroll in an accredited certificate program or registered apprenticeship.",
                "6 months - 2 years",
            ));
        }
        EducationLevel::Associate => {
            steps.push(step(
                "Associate degree",
                "Complete a two-year program at a community or technical college.",
                "2 years",
            ));
        }
        EducationLevel::Bachelor => {
            steps.push(step(
                "Bachelor's degree",
                "Earn a four-year degree in a related major; look for internships along the way.",
                "4 years",
            ));
        }
        EducationLevel::Advanced => {
            steps.push(step(
                "Bachelor's degree",
                "Earn a four-year degree with the prerequisites your graduate program requires.",
                "4 years",
            ));
            steps.push(step(
                "Graduate or professional school",
                "Complete a master's, doctoral, or professional program, including supervised practice.",
                "2 - 7 years",
            ));
        }
    }

    steps.push(step(
        "Licensing and first job",
        "Pass any required licensing exam and start in an entry-level role.",
        "after training",
    ));
    steps
}

fn step(stage: &str, description: &str, timeframe: &str) -> PathwayStep {
    PathwayStep {
        stage: stage.to_string(),
        description: description.to_string(),
        timeframe: timeframe.to_string(),
    }
}

/// Courses for the remaining grades, drawn from the sector's subjects.
pub fn academic_plan(profile: &StudentProfile, sector: Sector) -> AcademicPlan {
    let subjects = sector_subjects(sector);
    let years = (profile.grade.max(FIRST_GRADE)..=LAST_GRADE)
        .map(|grade| AcademicYear {
            grade,
            courses: subjects.iter().map(|s| course_for(*s, grade).to_string()).collect(),
            activities: activities_for(sector, grade),
        })
        .collect();

    let mut notes = Vec::new();
    if profile.has_constraint(Constraint::EarnWhileLearning) {
        notes.push(
            "Ask about paid apprenticeships, co-op programs, and employers that offer tuition assistance."
                .to_string(),
        );
    }
    if profile.has_constraint(Constraint::LimitedBudget) {
        notes.push(
            "Dual enrollment and community college credits can lower the cost of a degree."
                .to_string(),
        );
    }

    AcademicPlan { years, notes }
}

fn course_for(subject: Subject, grade: u8) -> &'static str {
    let ladder: [&str; 4] = match subject {
        Subject::Math => ["Algebra I", "Geometry", "Algebra II", "Pre-Calculus or Statistics"],
        Subject::Science => ["Biology", "Chemistry", "Physics", "AP Biology or Anatomy"],
        Subject::English => ["English 9", "English 10", "AP Language", "AP Literature"],
        Subject::SocialStudies => ["World History", "US History", "Economics", "Government"],
        Subject::Arts => ["Intro to Art", "Digital Design", "Studio Art", "AP Art and Design"],
        Subject::Technology => [
            "Intro to Computing",
            "Programming I",
            "AP Computer Science Principles",
            "AP Computer Science A",
        ],
    };
    ladder[usize::from(grade.clamp(FIRST_GRADE, LAST_GRADE) - FIRST_GRADE)]
}

fn activities_for(sector: Sector, grade: u8) -> Vec<String> {
    let mut activities = vec![format!("Join a club or volunteer in {}", sector.label())];
    if grade >= 11 {
        activities.push(format!("Job shadow a {} professional", sector.label()));
    }
    activities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentPath, FreeText};
    use crate::catalog::builtin_catalog;
    use crate::models::recommendation::{FactorKind, MatchFactor};
    use std::collections::{BTreeMap, BTreeSet};

    fn profile(grade: u8) -> StudentProfile {
        StudentProfile {
            grade,
            zip_code: "73301".to_string(),
            career_clarity: AssessmentPath::Undecided,
            career_category: None,
            specific_career_id: None,
            interest_areas: vec![],
            education_willingness: EducationLevel::Associate,
            subject_ratings: BTreeMap::new(),
            personal_traits: BTreeSet::new(),
            constraints: [Constraint::EarnWhileLearning].into_iter().collect(),
            free_text: FreeText::default(),
        }
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(0), "$0");
        assert_eq!(format_salary(950), "$950");
        assert_eq!(format_salary(81_220), "$81,220");
        assert_eq!(format_salary(1_229_300), "$1,229,300");
    }

    #[test]
    fn test_plan_covers_remaining_grades_with_sector_subjects() {
        let plan = academic_plan(&profile(10), Sector::Healthcare);
        let grades: Vec<u8> = plan.years.iter().map(|y| y.grade).collect();
        assert_eq!(grades, vec![10, 11, 12]);
        assert_eq!(plan.years[0].courses, vec!["Chemistry", "Geometry"]);
        assert_eq!(plan.years[2].activities.len(), 2);
        assert_eq!(plan.notes.len(), 1);
    }

    #[test]
    fn test_advanced_pathway_includes_graduate_school() {
        let stages: Vec<String> = pathway_steps(EducationLevel::Advanced)
            .into_iter()
            .map(|s| s.stage)
            .collect();
        assert!(stages.contains(&"Graduate or professional school".to_string()));
        assert_eq!(stages.len(), 4);
        assert_eq!(pathway_steps(EducationLevel::Certificate).len(), 3);
    }

    #[test]
    fn test_fallback_keeps_resolver_skills_and_cites_reason() {
        let catalog = builtin_catalog();
        let record = catalog.get("registered-nurse").unwrap();
        let factor = MatchFactor {
            factor: FactorKind::Interest,
            points: 50.0,
            note: "Healthcare is the heart of your healthcare interest".to_string(),
        };
        let career = MatchResult::new(record, 96, vec![factor]).with_skill_gaps(
            crate::matching::skill_gaps_for(Sector::Healthcare, &[]),
        );
        let guidance = fallback_guidance(&profile(12), &career);
        assert_eq!(guidance.source, GuidanceSource::Fallback);
        assert_eq!(guidance.skill_gaps, career.skill_gaps);
        assert!(guidance.explanation.contains("96/100"));
        assert!(guidance.explanation.contains("heart of your healthcare interest"));
        assert!(guidance.explanation.contains("$81,220"));
        assert_eq!(guidance.academic_plan.years.len(), 1);
    }
}

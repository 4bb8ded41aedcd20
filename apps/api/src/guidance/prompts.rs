// Prompt constants for per-career guidance.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::Value;

use crate::llm_client::prompts::{AUDIENCE_INSTRUCTION, GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};

pub const GUIDANCE_SYSTEM_PREAMBLE: &str =
    "You are an experienced high-school career counselor. ";

/// Guidance prompt template. Replace `{context_json}` and the instruction slots before sending.
pub const GUIDANCE_PROMPT_TEMPLATE: &str = r#"Write personalized guidance for ONE career match.

{grounding_instruction}

{audience_instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "explanation": "2-4 sentences on why this career fits THIS student, citing their answers",
  "career_pathway": [
    {"stage": "High school", "description": "...", "timeframe": "now - grade 12"}
  ],
  "academic_plan": {
    "years": [
      {"grade": 11, "courses": ["Chemistry"], "activities": ["Hospital volunteer program"]}
    ],
    "notes": ["..."]
  },
  "skill_gaps": [
    {"skill": "<one of career.skill_gaps, verbatim>", "how_to_build": "one concrete step"}
  ]
}

Rules:
- academic_plan.years covers only the student's current grade through grade 12.
- skill_gaps may only use skill names listed in career.skill_gaps. Do not add new skills.
- If "contradictions" is non-empty, address each one briefly in the explanation or notes.

CONTEXT:
{context_json}"#;

pub fn guidance_system() -> String {
    format!("{GUIDANCE_SYSTEM_PREAMBLE}{JSON_ONLY_SYSTEM}")
}

pub fn build_guidance_prompt(document: &Value) -> String {
    GUIDANCE_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{audience_instruction}", AUDIENCE_INSTRUCTION)
        .replace("{context_json}", &format!("{document:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_fills_every_slot() {
        let prompt = build_guidance_prompt(&json!({"career": {"title": "Electrician"}}));
        assert!(prompt.contains("Electrician"));
        assert!(!prompt.contains("{context_json}"));
        assert!(!prompt.contains("{grounding_instruction}"));
        assert!(!prompt.contains("{audience_instruction}"));
    }

    #[test]
    fn test_system_demands_json() {
        assert!(guidance_system().contains("valid JSON only"));
    }
}

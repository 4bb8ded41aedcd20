// Shared prompt fragments. Feature prompts live alongside their module
// (see guidance/prompts.rs) and compose these.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps guidance anchored to the facts we send.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Base every statement on the student profile and career facts provided. \
    Do NOT invent salaries, programs, schools, or requirements. \
    If the context does not support a claim, omit it.";

/// Audience and register for student-facing text.
pub const AUDIENCE_INSTRUCTION: &str = "\
    Write for a high-school student and their family: plain language, second person, \
    encouraging but honest. Where the student's answers conflict, name the tension gently \
    and suggest how to resolve it.";

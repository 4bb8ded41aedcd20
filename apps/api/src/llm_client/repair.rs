//! Bounded JSON repair for model output.
//!
//! Parse, and on failure classify the serde_json error, apply one named
//! transform, and parse again. Each transform runs at most once and the loop
//! stops after `MAX_REPAIR_ATTEMPTS`. Input that already parses is returned
//! unchanged.
//!
//! Every transform is a string-aware scanner: characters inside JSON string
//! literals are copied verbatim.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const MAX_REPAIR_ATTEMPTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStep {
    StripCodeFences,
    ExtractJsonSpan,
    NormalizeCommas,
    QuoteBareKeys,
    StripAmbiguousCommas,
}

impl RepairStep {
    fn apply(self, text: &str) -> String {
        match self {
            RepairStep::StripCodeFences => strip_json_fences(text).to_string(),
            RepairStep::ExtractJsonSpan => extract_json_span(text).to_string(),
            RepairStep::NormalizeCommas => normalize_commas(text),
            RepairStep::QuoteBareKeys => quote_bare_keys(text),
            RepairStep::StripAmbiguousCommas => strip_ambiguous_commas(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepairError {
    #[error("response contains no JSON")]
    NoJson,

    #[error("JSON still invalid after {attempts} repair attempts: {last_error}")]
    Exhausted { attempts: usize, last_error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepairOutcome {
    pub value: Value,
    /// The text that finally parsed.
    pub text: String,
    pub applied: Vec<RepairStep>,
}

impl RepairOutcome {
    pub fn attempts(&self) -> usize {
        self.applied.len()
    }

    pub fn was_repaired(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Coarse serde_json error classes that pick the next transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorClass {
    /// "key must be a string": stray comma or bare key where a property name belongs.
    PropertyName,
    /// "trailing comma" or "expected value".
    CommaOrValue,
    /// Valid JSON followed by prose.
    TrailingCharacters,
    Other,
}

fn classify(err: &serde_json::Error) -> ErrorClass {
    let message = err.to_string();
    if message.contains("key must be a string") {
        ErrorClass::PropertyName
    } else if message.contains("trailing comma") || message.contains("expected value") {
        ErrorClass::CommaOrValue
    } else if message.contains("trailing characters") {
        ErrorClass::TrailingCharacters
    } else {
        ErrorClass::Other
    }
}

fn candidates(text: &str, class: ErrorClass) -> Vec<RepairStep> {
    use RepairStep::*;

    let trimmed = text.trim_start();
    let mut steps = Vec::with_capacity(5);
    if trimmed.starts_with("```") {
        steps.push(StripCodeFences);
    }
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        steps.push(ExtractJsonSpan);
    }
    steps.extend_from_slice(match class {
        ErrorClass::PropertyName => &[NormalizeCommas, QuoteBareKeys, StripAmbiguousCommas][..],
        ErrorClass::CommaOrValue => &[NormalizeCommas, StripAmbiguousCommas][..],
        ErrorClass::TrailingCharacters => &[ExtractJsonSpan][..],
        ErrorClass::Other => &[
            ExtractJsonSpan,
            NormalizeCommas,
            QuoteBareKeys,
            StripAmbiguousCommas,
        ][..],
    });
    steps
}

/// Parses model output into JSON, repairing it if needed.
pub fn repair_json(raw: &str) -> Result<RepairOutcome, RepairError> {
    let mut text = raw.to_string();
    let mut applied: Vec<RepairStep> = Vec::new();

    loop {
        let err = match serde_json::from_str::<Value>(&text) {
            Ok(value) => return Ok(RepairOutcome { value, text, applied }),
            Err(err) => err,
        };

        if !text.contains('{') && !text.contains('[') {
            return Err(RepairError::NoJson);
        }

        let next = if applied.len() < MAX_REPAIR_ATTEMPTS {
            candidates(&text, classify(&err))
                .into_iter()
                .find(|step| !applied.contains(step))
        } else {
            None
        };

        let Some(step) = next else {
            return Err(RepairError::Exhausted {
                attempts: applied.len(),
                last_error: err.to_string(),
            });
        };

        text = step.apply(&text);
        applied.push(step);
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// The first balanced object or array, dropping any preamble and suffix.
/// An unbalanced span runs to the last closing bracket.
fn extract_json_span(text: &str) -> &str {
    let Some(start) = text.find(|c: char| c == '{' || c == '[') else {
        return text;
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return &text[start..start + offset + c.len_utf8()];
                }
            }
            _ => {}
        }
    }

    match text.rfind(|c: char| c == '}' || c == ']') {
        Some(end) if end > start => &text[start..=end],
        _ => &text[start..],
    }
}

/// Drops commas directly after `{`/`[`, repeated commas, and commas before `}`/`]`.
fn normalize_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '"' => i = copy_string(&chars, i, &mut out),
            ',' => {
                let after_open_or_comma = matches!(last_significant(&out), Some('{' | '[' | ','));
                let before_close = matches!(next_significant(&chars, i + 1, true), Some('}' | ']'));
                if !after_open_or_comma && !before_close {
                    out.push(',');
                }
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Quotes identifiers used as object keys: `{name: 1}` becomes `{"name": 1}`.
fn quote_bare_keys(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            i = copy_string(&chars, i, &mut out);
            continue;
        }
        if is_ident_start(c) && matches!(last_significant(&out), Some('{' | ',')) {
            let mut end = i;
            while end < chars.len() && is_ident_char(chars[end]) {
                end += 1;
            }
            if next_significant(&chars, end, false) == Some(':') {
                out.push('"');
                out.extend(&chars[i..end]);
                out.push('"');
            } else {
                out.extend(&chars[i..end]);
            }
            i = end;
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

/// Keeps a comma only when a complete value precedes it and a value or key follows.
fn strip_ambiguous_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '"' => i = copy_string(&chars, i, &mut out),
            ',' => {
                let ends_value = last_significant(&out).is_some_and(ends_value);
                let starts_value = next_significant(&chars, i + 1, false).is_some_and(starts_value);
                if ends_value && starts_value {
                    out.push(',');
                }
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn ends_value(c: char) -> bool {
    // 'e' closes true/false, 'l' closes null.
    matches!(c, '"' | '}' | ']' | 'e' | 'l') || c.is_ascii_digit()
}

fn starts_value(c: char) -> bool {
    matches!(c, '"' | '-' | '{' | '[' | 't' | 'f' | 'n') || c.is_ascii_digit()
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-')
}

/// Copies the string literal starting at `start` (a `"`) and returns the
/// index just past its closing quote.
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push(chars[start]);
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        match c {
            '\\' => {
                if let Some(&escaped) = chars.get(i) {
                    out.push(escaped);
                    i += 1;
                }
            }
            '"' => break,
            _ => {}
        }
    }
    i
}

fn last_significant(out: &str) -> Option<char> {
    out.chars().rev().find(|c| !c.is_whitespace())
}

fn next_significant(chars: &[char], from: usize, skip_commas: bool) -> Option<char> {
    chars[from.min(chars.len())..]
        .iter()
        .copied()
        .find(|c| !c.is_whitespace() && !(skip_commas && *c == ','))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_valid_input_is_untouched() {
        let raw = "{\"explanation\": \"Nursing, fits\", \"steps\": [1, 2]}";
        let outcome = repair_json(raw).unwrap();
        assert_eq!(outcome.text, raw);
        assert!(!outcome.was_repaired());
    }

    #[test]
    fn test_fenced_output() {
        let outcome = repair_json("```json\n{\"a\": 1}\n```").unwrap();
        assert_eq!(outcome.value, json!({"a": 1}));
        assert_eq!(outcome.applied, vec![RepairStep::StripCodeFences]);
    }

    #[test]
    fn test_preamble_and_suffix() {
        let raw = "Sure! Here is the plan:\n{\"a\": {\"b\": [1, 2]}}\nLet me know if you need more.";
        let outcome = repair_json(raw).unwrap();
        assert_eq!(outcome.value, json!({"a": {"b": [1, 2]}}));
        assert_eq!(outcome.applied, vec![RepairStep::ExtractJsonSpan]);
    }

    #[test]
    fn test_trailing_prose_after_object() {
        let outcome = repair_json("{\"a\": 1} hope this helps").unwrap();
        assert_eq!(outcome.value, json!({"a": 1}));
    }

    #[test]
    fn test_trailing_commas() {
        let outcome = repair_json("{\"a\": [1, 2,], \"b\": 3,}").unwrap();
        assert_eq!(outcome.value, json!({"a": [1, 2], "b": 3}));
        assert_eq!(outcome.applied, vec![RepairStep::NormalizeCommas]);
    }

    #[test]
    fn test_leading_and_duplicate_commas() {
        let outcome = repair_json("{, \"a\": 1,, \"b\": [, 2]}").unwrap();
        assert_eq!(outcome.value, json!({"a": 1, "b": [2]}));
    }

    #[test]
    fn test_double_leading_commas() {
        let object = repair_json("{,, \"a\": 1}").unwrap();
        assert_eq!(object.value, json!({"a": 1}));

        let array = repair_json("[,, 1, 2]").unwrap();
        assert_eq!(array.value, json!([1, 2]));

        let nested = repair_json("{\"a\": [,,1]}").unwrap();
        assert_eq!(nested.value, json!({"a": [1]}));
    }

    #[test]
    fn test_valid_nested_document_is_returned_verbatim() {
        let raw = r#"{"explanation": "Labs, clinics {and} [wards], too", "academic_plan": {"years": [{"grade": 11, "courses": ["Biology, honors", "}{"]}]}, "skill_gaps": []}"#;
        let outcome = repair_json(raw).unwrap();
        assert_eq!(outcome.text, raw);
        assert!(!outcome.was_repaired());
        assert_eq!(outcome.attempts(), 0);
    }

    #[test]
    fn test_bare_keys() {
        let outcome = repair_json("{explanation: \"ok\", career_pathway: [], flag: true}").unwrap();
        assert_eq!(
            outcome.value,
            json!({"explanation": "ok", "career_pathway": [], "flag": true})
        );
        assert!(outcome.applied.contains(&RepairStep::QuoteBareKeys));
    }

    #[test]
    fn test_commas_inside_strings_survive() {
        let outcome = repair_json("{\"a\": \"x,, y,}\",}").unwrap();
        assert_eq!(outcome.value, json!({"a": "x,, y,}"}));
    }

    #[test]
    fn test_strip_ambiguous_commas_keeps_separators() {
        assert_eq!(
            strip_ambiguous_commas("{\"a\": 1, , \"b\": null,}"),
            "{\"a\": 1 , \"b\": null}"
        );
    }

    #[test]
    fn test_no_json() {
        assert_eq!(
            repair_json("I'm sorry, I can't help with that."),
            Err(RepairError::NoJson)
        );
    }

    #[test]
    fn test_exhausted_reports_attempts() {
        let err = repair_json("{\"explanation\": \"cut off").unwrap_err();
        match err {
            RepairError::Exhausted { attempts, .. } => {
                assert!(attempts > 0 && attempts <= MAX_REPAIR_ATTEMPTS)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_fence_then_comma_repair() {
        let outcome = repair_json("```json\n{\"a\": [1,],}\n```").unwrap();
        assert_eq!(outcome.value, json!({"a": [1]}));
        assert_eq!(
            outcome.applied,
            vec![RepairStep::StripCodeFences, RepairStep::NormalizeCommas]
        );
    }
}

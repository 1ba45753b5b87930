//! Response normalization
//!
//! Model output is unreliable free text: sometimes clean JSON, sometimes
//! JSON wrapped in a markdown fence, sometimes JSON buried in prose,
//! sometimes just a list of lines. Strategies are tried in order and the
//! first that recovers a step list wins.

use tracing::debug;

use super::LlmError;
use crate::domain::{BreakdownResult, Importance};

/// Normalize raw model text into a typed breakdown result
///
/// Fails with `MalformedResponse` only when no strategy recovers anything.
/// A parsed object with a missing or non-array `steps` field still succeeds
/// here with empty steps; the failover layer treats that as an attempt
/// failure rather than a crash.
pub fn normalize(raw: &str, default_priority: Importance) -> Result<BreakdownResult, LlmError> {
    let cleaned = strip_code_fence(raw.trim());

    // Strategy 1: the whole (fence-stripped) text is a JSON object
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(cleaned) {
        if value.is_object() {
            debug!("normalize: direct JSON parse");
            return Ok(coerce(&value, default_priority));
        }
    }

    // Strategy 2: first balanced {...} substring buried in the text
    if let Some(candidate) = balanced_object(raw) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(candidate) {
            if value.is_object() {
                debug!("normalize: embedded JSON object");
                return Ok(coerce(&value, default_priority));
            }
        }
    }

    // Strategy 3: treat each non-empty line as one step
    let lines: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    if lines.is_empty() {
        debug!("normalize: no strategy recovered a step list");
        return Err(LlmError::MalformedResponse(
            "no JSON object and no non-empty lines".to_string(),
        ));
    }

    debug!(line_count = lines.len(), "normalize: line-split fallback");
    Ok(BreakdownResult::from_steps(lines, String::new(), default_priority))
}

/// Strip a single leading/trailing fenced code-block marker, with or
/// without a language tag
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the rest of the fence line (```json, ```, ...)
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Find the first balanced `{...}` substring
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
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
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Coerce a parsed JSON object into a breakdown result
///
/// `steps` entries that are not strings are stringified; a missing or
/// non-array `steps` becomes an empty sequence. Absent motivation/priority
/// fall back to empty text and the caller-supplied importance.
fn coerce(value: &serde_json::Value, default_priority: Importance) -> BreakdownResult {
    let steps = value["steps"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|entry| match entry {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    let motivation = value["motivation"].as_str().unwrap_or("").to_string();

    let priority = value["priority"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default_priority);

    BreakdownResult::from_steps(steps, motivation, priority)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_with_language_tag() {
        let raw = "```json\n{\"steps\":[\"a\",\"b\"]}\n```";
        let result = normalize(raw, Importance::Medium).unwrap();
        assert_eq!(result.steps, vec!["a", "b"]);
    }

    #[test]
    fn test_fenced_json_without_language_tag() {
        let raw = "```\n{\"steps\":[\"only\"]}\n```";
        let result = normalize(raw, Importance::Medium).unwrap();
        assert_eq!(result.steps, vec!["only"]);
    }

    #[test]
    fn test_plain_json() {
        let raw = r#"{"steps": ["x", "y"], "motivation": "you got this", "priority": "high"}"#;
        let result = normalize(raw, Importance::Low).unwrap();
        assert_eq!(result.steps, vec!["x", "y"]);
        assert_eq!(result.motivation, "you got this");
        assert_eq!(result.priority, Importance::High);
    }

    #[test]
    fn test_embedded_json_with_noise() {
        let raw = "random preamble {\"steps\":[\"x\"]} trailing";
        let result = normalize(raw, Importance::Medium).unwrap();
        assert_eq!(result.steps, vec!["x"]);
    }

    #[test]
    fn test_line_split_fallback() {
        let raw = "line one\nline two\n";
        let result = normalize(raw, Importance::High).unwrap();
        assert_eq!(result.steps, vec!["line one", "line two"]);
        assert_eq!(result.motivation, "");
        assert_eq!(result.priority, Importance::High);
    }

    #[test]
    fn test_blank_input_is_malformed() {
        let err = normalize("   \n  \n", Importance::Medium).unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_string_steps_are_stringified() {
        let raw = r#"{"steps": [1, "two", {"text": "three"}]}"#;
        let result = normalize(raw, Importance::Medium).unwrap();
        assert_eq!(result.steps[0], "1");
        assert_eq!(result.steps[1], "two");
        assert!(result.steps[2].contains("three"));
    }

    #[test]
    fn test_missing_steps_field_yields_empty() {
        let raw = r#"{"motivation": "hmm"}"#;
        let result = normalize(raw, Importance::Medium).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.motivation, "hmm");
    }

    #[test]
    fn test_non_array_steps_yields_empty() {
        let raw = r#"{"steps": "not a list"}"#;
        let result = normalize(raw, Importance::Medium).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_bare_json_string_falls_through_to_lines() {
        // A bare JSON string parses, but is not an object
        let raw = "\"just a quoted sentence\"";
        let result = normalize(raw, Importance::Medium).unwrap();
        assert_eq!(result.steps, vec!["\"just a quoted sentence\""]);
    }

    #[test]
    fn test_invalid_priority_uses_default() {
        let raw = r#"{"steps": ["a"], "priority": "urgent"}"#;
        let result = normalize(raw, Importance::Low).unwrap();
        assert_eq!(result.priority, Importance::Low);
    }

    #[test]
    fn test_balanced_object_respects_nesting_and_strings() {
        let text = r#"pre {"a": {"b": "} not the end"}} post"#;
        assert_eq!(balanced_object(text).unwrap(), r#"{"a": {"b": "} not the end"}}"#);
    }

    #[test]
    fn test_balanced_object_unterminated() {
        assert!(balanced_object("{\"steps\": [").is_none());
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("no fence here"), "no fence here");
    }
}

//! JSON extraction for LLM responses
//!
//! Models often wrap the analysis object in markdown fences, surround it
//! with prose, or leave trailing commas. Candidates are tried from least to
//! most invasive and the first one that parses wins.

use serde_json::Value;
use tracing::debug;

use crate::types::{Result, TowerError, truncate_chars};

/// Parse the JSON object contained in an LLM response
pub fn extract_json_from_response(content: &str) -> Result<Value> {
    JsonRepairer::new()
        .parse_or_repair(content)
        .map(|(value, _)| value)
}

/// Candidate rewrites of a raw response, in the order they are attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repair {
    None,
    EmbeddedObject,
    TrailingCommas,
}

const REPAIRS: [Repair; 3] = [Repair::None, Repair::EmbeddedObject, Repair::TrailingCommas];

#[derive(Debug, Default)]
pub struct JsonRepairer;

impl JsonRepairer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the parsed value and whether any repair was needed
    pub fn parse_or_repair(&self, raw: &str) -> Result<(Value, bool)> {
        let cleaned = strip_code_fences(raw.trim().trim_start_matches('\u{feff}'));

        for repair in REPAIRS {
            let Some(candidate) = apply(repair, cleaned) else {
                continue;
            };
            if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
                if repair != Repair::None {
                    debug!(?repair, "Recovered JSON from model response");
                }
                return Ok((value, repair != Repair::None));
            }
        }

        Err(TowerError::LlmApi(format!(
            "Model response is not valid JSON. Content preview: {}...",
            truncate_chars(cleaned, 200)
        )))
    }
}

fn apply(repair: Repair, text: &str) -> Option<String> {
    match repair {
        Repair::None => Some(text.to_string()),
        Repair::EmbeddedObject => outermost_object(text).map(str::to_string),
        Repair::TrailingCommas => {
            let body = outermost_object(text).unwrap_or(text);
            Some(remove_trailing_commas(body))
        }
    }
}

/// Drop a surrounding ```json fence if present
fn strip_code_fences(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Slice from the first `{` to its matching `}`, ignoring braces inside strings
fn outermost_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in s[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Remove commas directly followed (modulo whitespace) by `}` or `]`
fn remove_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &ch) in chars.iter().enumerate() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            out.push(ch);
            continue;
        }
        if ch == '"' {
            in_string = true;
        }
        if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let (value, repaired) = JsonRepairer::new()
            .parse_or_repair(r#"{"complexity_level": "simple"}"#)
            .unwrap();
        assert_eq!(value["complexity_level"], "simple");
        assert!(!repaired);
    }

    #[test]
    fn test_code_fence() {
        let raw = "```json\n{\"domain_type\": \"stable\"}\n```";
        let value = extract_json_from_response(raw).unwrap();
        assert_eq!(value["domain_type"], "stable");
    }

    #[test]
    fn test_object_inside_prose() {
        let raw = "Here is the analysis:\n{\"targets\": {\"fcr\": \"75%\"}, \"note\": \"a } in text\"}\nHope this helps!";
        let (value, repaired) = JsonRepairer::new().parse_or_repair(raw).unwrap();
        assert_eq!(value["targets"]["fcr"], "75%");
        assert_eq!(value["note"], "a } in text");
        assert!(repaired);
    }

    #[test]
    fn test_trailing_commas() {
        let raw = r#"{"agent_capabilities": ["triage", "refunds",], "task_complexity": "novel",}"#;
        let value = extract_json_from_response(raw).unwrap();
        assert_eq!(value["agent_capabilities"][1], "refunds");
        assert_eq!(value["task_complexity"], "novel");
    }

    #[test]
    fn test_commas_inside_strings_survive() {
        assert_eq!(remove_trailing_commas(r#"{"a": "x,}",}"#), r#"{"a": "x,}"}"#);
    }

    #[test]
    fn test_unparseable() {
        let err = extract_json_from_response("I cannot analyze this document.").unwrap_err();
        assert!(matches!(err, TowerError::LlmApi(_)));
    }
}

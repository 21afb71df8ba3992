//! Appends JSON schema instructions to analysis prompts.

use serde_json::Value;

/// Prompt followed by the schema the response must satisfy.
///
/// Returns the prompt unchanged when `schema` is null.
pub fn build_schema_prompt(user_prompt: &str, schema: &Value) -> String {
    if schema.is_null() {
        return user_prompt.to_string();
    }

    let schema_str = serde_json::to_string_pretty(schema).unwrap_or_default();
    format!(
        "{}\n\n---\n\nReturn a JSON object matching this schema:\n```json\n{}\n```\n\nRespond ONLY with the JSON object, no explanation.",
        user_prompt, schema_str
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_schema_leaves_prompt() {
        assert_eq!(build_schema_prompt("Analyze", &Value::Null), "Analyze");
    }

    #[test]
    fn test_schema_is_appended() {
        let schema = json!({"type": "object", "required": ["complexity_level"]});
        let result = build_schema_prompt("Analyze this agent", &schema);

        assert!(result.starts_with("Analyze this agent"));
        assert!(result.contains("complexity_level"));
        assert!(result.contains("schema"));
    }
}

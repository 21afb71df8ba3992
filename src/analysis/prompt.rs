//! Prompt and response schema for document analysis.

use serde_json::{Value, json};

/// Instructions for turning agent documentation into an [`AnalysisRecord`](super::AnalysisRecord)
pub fn analysis_prompt(user_query: &str, document: &str) -> String {
    format!(
        r#"Analyze the following agent documentation and extract key information.

<document>
{document}
</document>

User query: "{user_query}"

Carefully analyze the document for:
1. Agent capabilities and limitations
2. Expected performance targets (look for specific numbers such as percentages, rates, ROI multiples)
3. Technical constraints and requirements
4. Business objectives and success criteria
5. Use case complexity
6. Domain maturity
7. Tool ecosystem maturity
8. Complexity of individual tasks or inquiries
9. How strictly safety guardrails must be enforced

Copy numerical performance targets exactly as written, keeping operators such as "<" and ">" and units such as "%".
Key them by metric, e.g. {{"first_contact_resolution": "75%", "escalation_rate": "<15%", "customer_satisfaction": ">70%"}}."#
    )
}

/// JSON Schema the model response must follow
pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "agent_capabilities": { "type": "array", "items": { "type": "string" } },
            "performance_targets": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            },
            "technical_constraints": { "type": "array", "items": { "type": "string" } },
            "business_objectives": { "type": "array", "items": { "type": "string" } },
            "complexity_level": { "enum": ["simple", "complex", "highly_specialized"] },
            "domain_type": { "enum": ["stable", "evolving", "new"] },
            "tool_maturity": { "enum": ["well_defined", "experimental", "unstable"] },
            "task_complexity": { "enum": ["simple", "complex", "novel"] },
            "automation_potential": { "enum": ["high", "medium", "low"] },
            "scenario_type": { "enum": ["replacement", "enhancement", "new_capability"] },
            "safety_requirements": { "enum": ["strict", "moderate", "lenient"] }
        },
        "required": [
            "performance_targets",
            "complexity_level",
            "domain_type",
            "tool_maturity",
            "task_complexity",
            "automation_potential",
            "scenario_type"
        ]
    })
}

/// Categorical keys a response must carry at least one of to count as a record
pub const DIMENSION_KEYS: [&str; 6] = [
    "complexity_level",
    "domain_type",
    "tool_maturity",
    "task_complexity",
    "automation_potential",
    "scenario_type",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs() {
        let prompt = analysis_prompt("billing bot", "Resolves 80% of tickets.");
        assert!(prompt.contains("billing bot"));
        assert!(prompt.contains("Resolves 80% of tickets."));
        assert!(prompt.contains(r#""escalation_rate": "<15%""#));
    }

    #[test]
    fn test_schema_requires_every_dimension() {
        let schema = analysis_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        for key in DIMENSION_KEYS {
            assert!(required.contains(&key), "{key} missing from schema");
        }
    }
}

//! LLM response validation
//!
//! Recovers the JSON object from free-form model output.

mod json_repair;

pub use json_repair::{JsonRepairer, extract_json_from_response};

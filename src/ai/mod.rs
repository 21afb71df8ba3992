//! AI Integration Layer
//!
//! LLM plumbing used by the document analyzer.

pub mod provider;
pub mod timeout;
pub mod validation;

pub use provider::{
    ErrorCategory, ErrorClassifier, LlmError, LlmProvider, LlmResponse, OllamaProvider,
    OpenAiProvider, ProviderConfig, ResponseMetadata, ResponseTiming, SharedProvider, TokenUsage,
    create_provider,
};
pub use timeout::{TimeoutConfig, with_timeout};
pub use validation::{JsonRepairer, extract_json_from_response};

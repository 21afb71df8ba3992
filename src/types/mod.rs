pub mod error;
pub mod utils;

pub use error::{ErrorCategory, ErrorClassifier, LlmError, Result, TowerError};
pub use utils::{capitalize_first, humanize, title_case, truncate_chars};

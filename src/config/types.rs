//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/controltower/) and project (.controltower/) configuration.

use serde::{Deserialize, Serialize};

use crate::analysis::record::{Categorical, SafetyRequirements};
use crate::constants::{document, network};
use crate::types::{Result, TowerError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// LLM provider settings for document analysis
    pub llm: LlmConfig,

    /// Analysis behaviour
    pub analysis: AnalysisConfig,

    /// Report output
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            analysis: AnalysisConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `TowerError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(TowerError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(TowerError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(TowerError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.analysis.max_document_chars == 0 {
            return Err(TowerError::Config(
                "Analysis max_document_chars must be greater than 0".to_string(),
            ));
        }

        if self.analysis.safety_requirements().is_unrecognized() {
            return Err(TowerError::Config(format!(
                "Analysis default_safety_requirements must be strict, moderate or lenient, got {}",
                self.analysis.default_safety_requirements
            )));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider: "openrouter", "openai" or "ollama"
    pub provider: String,

    /// Model name; each provider has its own default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Custom endpoint (OpenAI-compatible gateways, remote Ollama)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// 0.0 keeps classification as repeatable as the model allows
    pub temperature: f32,

    pub max_tokens: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openrouter".to_string(),
            model: None,
            api_base: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.0,
            max_tokens: network::DEFAULT_MAX_TOKENS,
        }
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Substitute a conservative record when the analyzer fails instead of aborting
    pub degrade_on_failure: bool,

    /// Documents are truncated to this many characters before analysis
    pub max_document_chars: usize,

    /// Guardrail strictness assumed when the analysis does not state one
    pub default_safety_requirements: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            degrade_on_failure: true,
            max_document_chars: document::DEFAULT_MAX_CHARS,
            default_safety_requirements: "moderate".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn safety_requirements(&self) -> Categorical<SafetyRequirements> {
        Categorical::parse(&self.default_safety_requirements)
    }
}

// =============================================================================
// Report Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format used when `--format` is not given
    pub format: ReportFormat,

    /// Include insights and readiness in reports
    pub include_insights: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            include_insights: true,
        }
    }
}

/// Output format for reports and listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human readable, grouped by category
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            _ => Err(format!(
                "Unknown report format: {}. Valid values: text, json, yaml",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.provider, "openrouter");
        assert!(config.analysis.degrade_on_failure);
        assert_eq!(config.report.format, ReportFormat::Text);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.llm.temperature = 3.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analysis.max_document_chars = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analysis.default_safety_requirements = "paranoid".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("paranoid"));
    }

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!("yml".parse::<ReportFormat>(), Ok(ReportFormat::Yaml));
        assert!("xml".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Yaml.to_string(), "yaml");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[analysis]\ndegrade_on_failure = false\n").unwrap();
        assert!(!config.analysis.degrade_on_failure);
        assert_eq!(config.analysis.max_document_chars, document::DEFAULT_MAX_CHARS);
        assert_eq!(config.llm.timeout_secs, network::DEFAULT_TIMEOUT_SECS);
    }
}

//! Document analyzers: produce an [`AnalysisRecord`] from agent documentation.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use super::prompt::{DIMENSION_KEYS, analysis_prompt, analysis_schema};
use super::record::AnalysisRecord;
use crate::ai::provider::SharedProvider;
use crate::types::{ErrorClassifier, Result, TowerError};

/// Turns documentation into a categorical record
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, user_query: &str, document: &str) -> Result<AnalysisRecord>;

    /// Analyzer name for logging and reports
    fn name(&self) -> &str;
}

// =============================================================================
// LLM-backed analyzer
// =============================================================================

/// Classifies documentation through an [`LlmProvider`](crate::ai::LlmProvider)
pub struct LlmDocumentAnalyzer {
    provider: SharedProvider,
}

impl LlmDocumentAnalyzer {
    pub fn new(provider: SharedProvider) -> Self {
        Self { provider }
    }

    fn describes_record(content: &Value) -> bool {
        content
            .as_object()
            .is_some_and(|obj| DIMENSION_KEYS.iter().any(|key| obj.contains_key(*key)))
    }
}

#[async_trait]
impl DocumentAnalyzer for LlmDocumentAnalyzer {
    async fn analyze(&self, user_query: &str, document: &str) -> Result<AnalysisRecord> {
        let prompt = analysis_prompt(user_query, document);
        let schema = analysis_schema();

        let response = self
            .provider
            .generate(&prompt, &schema)
            .await
            .map_err(|e| {
                let classified = ErrorClassifier::classify_tower_error(&e, self.provider.name());
                if classified.category.is_environmental() {
                    warn!(category = %classified.category, "Provider call failed: {}", classified.message);
                } else {
                    warn!(
                        category = %classified.category,
                        "Provider rejected the request, check provider settings: {}",
                        classified.message
                    );
                }
                TowerError::upstream(classified)
            })?;

        info!(
            provider = %response.metadata.provider,
            tokens = response.usage.total(),
            elapsed_ms = response.timing.total_ms,
            "Document analysis complete"
        );

        if !Self::describes_record(&response.content) {
            warn!("Analysis response has no categorical fields, using conservative defaults");
            return Ok(AnalysisRecord::degraded(user_query));
        }

        match serde_json::from_value::<AnalysisRecord>(response.content) {
            Ok(mut record) => {
                record.source_query = user_query.to_string();
                record.degraded = false;
                Ok(record)
            }
            Err(e) => {
                warn!("Analysis response does not match the record shape: {}", e);
                Ok(AnalysisRecord::degraded(user_query))
            }
        }
    }

    fn name(&self) -> &str {
        self.provider.name()
    }
}

// =============================================================================
// Pre-computed record
// =============================================================================

/// Serves a record produced elsewhere, e.g. a saved analyzer run
pub struct RecordAnalyzer {
    record: AnalysisRecord,
}

impl RecordAnalyzer {
    pub fn new(record: AnalysisRecord) -> Self {
        Self { record }
    }

    /// Read a JSON or YAML record file
    pub fn from_path(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| TowerError::document(&display, e.to_string()))?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e, "yaml" | "yml"));

        let record = if is_yaml {
            serde_yaml::from_str(&raw)?
        } else {
            serde_json::from_str(&raw)?
        };

        Ok(Self::new(record))
    }
}

#[async_trait]
impl DocumentAnalyzer for RecordAnalyzer {
    async fn analyze(&self, user_query: &str, _document: &str) -> Result<AnalysisRecord> {
        let mut record = self.record.clone();
        if record.source_query.is_empty() {
            record.source_query = user_query.to_string();
        }
        Ok(record)
    }

    fn name(&self) -> &str {
        "record"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ai::provider::{LlmProvider, LlmResponse};
    use crate::analysis::record::{ComplexityLevel, TaskComplexity};
    use crate::baseline::Metric;
    use crate::types::{ErrorCategory, LlmError};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Provider that replays scripted outcomes
    pub(crate) struct ScriptedProvider {
        outcomes: Mutex<Vec<Result<Value>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        pub(crate) fn new(outcomes: Vec<Result<Value>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn generate(&self, prompt: &str, _schema: &Value) -> Result<LlmResponse> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let outcome = self.outcomes.lock().unwrap().remove(0);
            outcome.map(LlmResponse::content_only)
        }

        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_llm_analyzer_parses_record() {
        let provider = ScriptedProvider::new(vec![Ok(json!({
            "complexity_level": "simple",
            "task_complexity": "novel",
            "performance_targets": {"fcr": "75%", "roi": 4},
            "agent_capabilities": ["refunds"]
        }))]);
        let analyzer = LlmDocumentAnalyzer::new(provider.clone());

        let record = analyzer.analyze("refund agent", "doc text").await.unwrap();
        assert_eq!(record.complexity_level.known(), Some(ComplexityLevel::Simple));
        assert_eq!(record.task_complexity.known(), Some(TaskComplexity::Novel));
        assert_eq!(record.source_query, "refund agent");
        assert_eq!(record.target_for(Metric::CostSavingsRoi), Some("4"));
        assert!(!record.degraded);
        assert!(provider.prompts.lock().unwrap()[0].contains("doc text"));
    }

    #[tokio::test]
    async fn test_llm_analyzer_degrades_on_shapeless_json() {
        let provider = ScriptedProvider::new(vec![Ok(json!({"analysis_text": "looks fine"}))]);
        let analyzer = LlmDocumentAnalyzer::new(provider);

        let record = analyzer.analyze("q", "doc").await.unwrap();
        assert!(record.degraded);
        assert_eq!(record.source_query, "q");
    }

    #[tokio::test]
    async fn test_llm_analyzer_keeps_targets_on_wrong_types() {
        let provider = ScriptedProvider::new(vec![Ok(json!({
            "complexity_level": 3,
            "performance_targets": {"fcr": "75%"}
        }))]);
        let analyzer = LlmDocumentAnalyzer::new(provider);

        let record = analyzer.analyze("q", "doc").await.unwrap();
        assert!(!record.degraded);
        assert!(record.complexity_level.is_unrecognized());
        assert_eq!(record.target_for(Metric::FirstContactResolution), Some("75%"));
    }

    #[tokio::test]
    async fn test_llm_analyzer_degrades_on_wrong_record_shape() {
        let provider = ScriptedProvider::new(vec![Ok(json!({
            "complexity_level": "simple",
            "performance_targets": ["fcr", "75%"]
        }))]);
        let analyzer = LlmDocumentAnalyzer::new(provider);

        assert!(analyzer.analyze("q", "doc").await.unwrap().degraded);
    }

    #[tokio::test]
    async fn test_llm_analyzer_surfaces_provider_failure() {
        let provider = ScriptedProvider::new(vec![Err(LlmError::new(
            ErrorCategory::Auth,
            "invalid api key",
        )
        .into())]);
        let analyzer = LlmDocumentAnalyzer::new(provider);

        let err = analyzer.analyze("q", "doc").await.unwrap_err();
        assert!(matches!(err, TowerError::UpstreamAnalysis { .. }));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[tokio::test]
    async fn test_record_analyzer_from_yaml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("record.yaml");
        std::fs::write(
            &path,
            "complexity_level: highly_specialized\nperformance_targets:\n  csat: \">70%\"\n",
        )
        .unwrap();

        let analyzer = RecordAnalyzer::from_path(&path).unwrap();
        let record = analyzer.analyze("claims agent", "").await.unwrap();
        assert_eq!(
            record.complexity_level.known(),
            Some(ComplexityLevel::HighlySpecialized)
        );
        assert_eq!(record.source_query, "claims agent");
        assert_eq!(analyzer.name(), "record");
    }
}

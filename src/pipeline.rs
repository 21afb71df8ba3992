//! Baseline Pipeline
//!
//! analyze → degrade-or-fail → build baselines → insights → readiness → report.
//! Linear, one analyzer call per run.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::ai::timeout::{TimeoutConfig, with_timeout};
use crate::analysis::{AnalysisRecord, Categorical, DocumentAnalyzer, SafetyRequirements};
use crate::baseline::build_baselines;
use crate::config::Config;
use crate::insights::{self, ReadinessAssessment};
use crate::report::BaselineReport;
use crate::types::{Result, TowerError};

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub analysis_timeout: Duration,
    /// Use a conservative record when analysis fails instead of aborting
    pub degrade_on_failure: bool,
    /// Filled in when the analysis leaves safety requirements unset
    pub default_safety: Categorical<SafetyRequirements>,
    pub include_insights: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            analysis_timeout: TimeoutConfig::from_llm_config(&config.llm).analysis,
            degrade_on_failure: config.analysis.degrade_on_failure,
            default_safety: config.analysis.safety_requirements(),
            include_insights: config.report.include_insights,
        }
    }
}

pub struct BaselinePipeline {
    analyzer: Arc<dyn DocumentAnalyzer>,
    settings: PipelineSettings,
}

impl BaselinePipeline {
    pub fn new(analyzer: Arc<dyn DocumentAnalyzer>, settings: PipelineSettings) -> Self {
        Self { analyzer, settings }
    }

    pub async fn run(&self, user_query: &str, document: &str) -> Result<BaselineReport> {
        info!(analyzer = self.analyzer.name(), "Analyzing agent documentation");

        let mut record = self.analyze(user_query, document).await?;
        if record.safety_requirements.is_none() {
            record.safety_requirements = Some(self.settings.default_safety.clone());
        }

        let baselines = build_baselines(&record);
        info!(
            document_driven = baselines.document_driven_count(),
            framework_driven = baselines.framework_driven_count(),
            "Baselines derived"
        );

        let report = if self.settings.include_insights {
            let generated = insights::generate(&baselines, &record);
            let readiness = ReadinessAssessment::assess(&record);
            BaselineReport::new(user_query, record, baselines).with_insights(generated, readiness)
        } else {
            BaselineReport::new(user_query, record, baselines)
        };

        Ok(report)
    }

    async fn analyze(&self, user_query: &str, document: &str) -> Result<AnalysisRecord> {
        let outcome = with_timeout(
            self.settings.analysis_timeout,
            self.analyzer.analyze(user_query, document),
            "document analysis",
        )
        .await;

        match outcome {
            Ok(record) => Ok(record),
            Err(e) if self.settings.degrade_on_failure => {
                warn!("Document analysis failed, using conservative defaults: {}", e);
                Ok(AnalysisRecord::degraded(user_query))
            }
            Err(e @ TowerError::UpstreamAnalysis { .. }) => Err(e),
            Err(e) => Err(TowerError::upstream(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::tests::ScriptedProvider;
    use crate::analysis::{LlmDocumentAnalyzer, RecordAnalyzer};
    use crate::baseline::{BaselineSource, Metric};
    use crate::types::{ErrorCategory, LlmError};
    use async_trait::async_trait;
    use serde_json::json;

    fn llm_pipeline(provider: Arc<ScriptedProvider>, settings: PipelineSettings) -> BaselinePipeline {
        BaselinePipeline::new(Arc::new(LlmDocumentAnalyzer::new(provider)), settings)
    }

    fn auth_failure() -> Result<serde_json::Value> {
        Err(LlmError::new(ErrorCategory::Auth, "invalid api key").into())
    }

    #[tokio::test]
    async fn test_run_produces_document_driven_baselines() {
        let provider = ScriptedProvider::new(vec![Ok(json!({
            "complexity_level": "simple",
            "domain_type": "stable",
            "tool_maturity": "well_defined",
            "task_complexity": "simple",
            "automation_potential": "high",
            "scenario_type": "replacement",
            "performance_targets": {"first_contact_resolution": "75%"}
        }))]);
        let pipeline = llm_pipeline(provider, PipelineSettings::default());

        let report = pipeline.run("faq bot", "Resolves 75% on first contact").await.unwrap();
        let fcr = report.baselines.get(Metric::FirstContactResolution);
        assert_eq!((fcr.min, fcr.max, fcr.recommended), (65.0, 80.0, 75.0));
        assert_eq!(fcr.source, BaselineSource::DocumentDriven);
        assert_eq!(report.summary.document_driven, 1);
        assert_eq!(
            report.analysis.safety_requirements,
            Some(SafetyRequirements::Moderate.into())
        );
        assert!(report.insights.is_some());
    }

    #[tokio::test]
    async fn test_failure_degrades_by_default() {
        let pipeline = llm_pipeline(ScriptedProvider::new(vec![auth_failure()]), PipelineSettings::default());

        let report = pipeline.run("q", "doc").await.unwrap();
        assert!(report.summary.degraded);
        assert_eq!(report.summary.document_driven, 0);
        assert_eq!(report.summary.complexity_assessment, "complex");
    }

    #[tokio::test]
    async fn test_failure_surfaces_when_degrading_disabled() {
        let settings = PipelineSettings {
            degrade_on_failure: false,
            ..PipelineSettings::default()
        };
        let pipeline = llm_pipeline(ScriptedProvider::new(vec![auth_failure()]), settings);

        let err = pipeline.run("q", "doc").await.unwrap_err();
        assert!(matches!(err, TowerError::UpstreamAnalysis { .. }));
    }

    struct StalledAnalyzer;

    #[async_trait]
    impl DocumentAnalyzer for StalledAnalyzer {
        async fn analyze(&self, _user_query: &str, _document: &str) -> Result<AnalysisRecord> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(AnalysisRecord::default())
        }

        fn name(&self) -> &str {
            "stalled"
        }
    }

    #[tokio::test]
    async fn test_timeout_is_an_upstream_failure() {
        let settings = PipelineSettings {
            analysis_timeout: Duration::from_millis(20),
            degrade_on_failure: false,
            ..PipelineSettings::default()
        };
        let pipeline = BaselinePipeline::new(Arc::new(StalledAnalyzer), settings);

        match pipeline.run("q", "doc").await {
            Err(TowerError::UpstreamAnalysis { reason }) => assert!(reason.starts_with("Timeout after")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_record_analyzer_keeps_stated_safety_and_skips_insights() {
        let mut record = AnalysisRecord::for_query("claims");
        record.safety_requirements = Some(SafetyRequirements::Strict.into());
        let settings = PipelineSettings {
            include_insights: false,
            ..PipelineSettings::default()
        };
        let pipeline = BaselinePipeline::new(Arc::new(RecordAnalyzer::new(record)), settings);

        let report = pipeline.run("claims", "").await.unwrap();
        assert_eq!(
            report.analysis.safety_requirements,
            Some(SafetyRequirements::Strict.into())
        );
        assert!(report.insights.is_none());
        assert!(report.readiness.is_none());
    }
}

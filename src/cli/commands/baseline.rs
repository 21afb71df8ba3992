//! Baseline Command
//!
//! Derive performance baselines for an agent.
//!
//! Usage:
//!   controltower baseline --query "<q>" --document agent.md [--format json]
//!   controltower baseline --query "<q>" --record analysis.json

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::info;

use crate::ai::provider::{ProviderConfig, create_provider};
use crate::analysis::{DocumentAnalyzer, LlmDocumentAnalyzer, RecordAnalyzer};
use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader, ReportFormat};
use crate::document;
use crate::pipeline::{BaselinePipeline, PipelineSettings};
use crate::types::Result;

/// Where the analysis record comes from
#[derive(Debug, Clone)]
pub enum AnalysisSource {
    /// Agent documentation, classified by the configured LLM provider
    Document(PathBuf),
    /// Pre-computed analysis record (JSON or YAML)
    Record(PathBuf),
}

#[derive(Debug, Clone)]
pub struct BaselineOptions {
    pub query: String,
    pub source: AnalysisSource,
    pub format: Option<ReportFormat>,
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Write the rendered report here instead of stdout
    pub output: Option<PathBuf>,
}

pub fn run(options: BaselineOptions) -> Result<()> {
    let config = ConfigLoader::load()?;
    let out = Output::new();
    let format = options.format.unwrap_or(config.report.format);

    let rt = Runtime::new()?;

    let (analyzer, document): (Arc<dyn DocumentAnalyzer>, String) = match &options.source {
        AnalysisSource::Document(path) => {
            let loaded = document::load(path, config.analysis.max_document_chars)?;
            if loaded.metadata.truncated {
                out.warning(&format!(
                    "{} truncated to {} characters",
                    loaded.metadata.file_name, config.analysis.max_document_chars
                ));
            }

            let provider = create_provider(&provider_config(&config, &options))?;
            info!("Using LLM provider: {} ({})", provider.name(), provider.model());
            if !rt.block_on(provider.health_check()).unwrap_or(false) {
                out.warning(&format!("{} is not reachable", provider.name()));
            }

            (Arc::new(LlmDocumentAnalyzer::new(provider)), loaded.content)
        }
        AnalysisSource::Record(path) => {
            out.info(&format!("Using analysis record {}", path.display()));
            (Arc::new(RecordAnalyzer::from_path(path)?), String::new())
        }
    };

    let pipeline = BaselinePipeline::new(analyzer, PipelineSettings::from_config(&config));
    let report = rt.block_on(pipeline.run(&options.query, &document))?;

    if report.summary.degraded {
        out.warning("Document analysis failed; baselines use conservative defaults");
    }

    let rendered = report.render(format)?;
    match &options.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            out.success(&format!("Report written to {}", path.display()));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn provider_config(config: &Config, options: &BaselineOptions) -> ProviderConfig {
    let mut provider_config = ProviderConfig::from(&config.llm);
    if let Some(provider) = &options.provider {
        provider_config.provider = provider.clone();
        // A model configured for another provider rarely fits this one
        if options.model.is_none() && provider != &config.llm.provider {
            provider_config.model = None;
        }
    }
    if let Some(model) = &options.model {
        provider_config.model = Some(model.clone());
    }
    provider_config
}

//! Control Tower - Baseline Derivation for AI Agents
//!
//! Turns an agent's documentation into a recommended value and acceptable
//! range for every tracked performance metric. Targets the documentation
//! states explicitly win; everything else falls back to framework reference
//! ranges selected by the agent's categorical profile.
//!
//! ## Flow
//!
//! 1. [`document`] loads the agent documentation
//! 2. [`analysis`] classifies it into an [`AnalysisRecord`] (LLM-backed or pre-computed)
//! 3. [`baseline`] derives one [`Baseline`] per metric, pure and synchronous
//! 4. [`insights`] and [`report`] turn the baselines into readable output
//!
//! ## Quick Start
//!
//! ```ignore
//! use controltower::{AnalysisRecord, Metric, build_baselines};
//!
//! let record = AnalysisRecord::for_query("support agent").with_target("fcr", "75%");
//! let baselines = build_baselines(&record);
//! let fcr = baselines.get(Metric::FirstContactResolution);
//! assert_eq!((fcr.min, fcr.max, fcr.recommended), (65.0, 80.0, 75.0));
//! ```

pub mod ai;
pub mod analysis;
pub mod baseline;
pub mod cli;
pub mod config;
pub mod constants;
pub mod document;
pub mod insights;
pub mod pipeline;
pub mod report;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader, ReportFormat};
pub use types::error::{ErrorCategory, Result, TowerError};

// =============================================================================
// Engine Re-exports
// =============================================================================

pub use analysis::{AnalysisRecord, Categorical, DocumentAnalyzer};
pub use baseline::{
    Baseline, BaselineBuilder, BaselineSet, BaselineSource, Metric, RangeCatalog, build_baselines,
};
pub use insights::{Insights, ReadinessAssessment};
pub use pipeline::{BaselinePipeline, PipelineSettings};
pub use report::BaselineReport;

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{LlmProvider, LlmResponse, SharedProvider, TimeoutConfig, create_provider, with_timeout};

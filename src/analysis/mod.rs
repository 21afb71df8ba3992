//! Document analysis: the boundary between free text and the baseline engine.

pub mod analyzer;
pub mod prompt;
pub mod record;

pub use analyzer::{DocumentAnalyzer, LlmDocumentAnalyzer, RecordAnalyzer};
pub use record::{
    AnalysisRecord, AutomationPotential, Categorical, CategoryValue, ComplexityLevel, DomainType,
    SafetyRequirements, ScenarioType, TaskComplexity, ToolMaturity,
};

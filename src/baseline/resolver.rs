//! Baseline Resolver
//!
//! Resolves one metric to a [`Baseline`] by trying an ordered list of
//! strategies. The first strategy that yields a baseline wins, and the
//! result is repaired so that `min <= recommended <= max` always holds.
//!
//! Precedence:
//! 1. [`Strategy::DocumentTarget`] - a parseable documented target
//! 2. [`Strategy::TechnicalOverride`] - first contact resolution on technical inquiries
//! 3. [`Strategy::FrameworkBand`] - catalog band selected by the record's dimension
//! 4. [`Strategy::DefaultBand`] - middle band when the dimension value is unrecognized

use serde::Serialize;

use crate::analysis::record::{
    AnalysisRecord, Categorical, CategoryValue, SafetyRequirements, TaskComplexity,
};
use crate::constants::baseline as limits;

use super::catalog::{Band, RangeCatalog};
use super::metric::Metric;
use super::target::{ParsedTarget, TargetOperator, extract_target};

/// Where a baseline came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineSource {
    DocumentDriven,
    FrameworkDriven,
}

/// Recommended value and acceptable range for one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Baseline {
    #[serde(skip)]
    pub metric: Metric,
    pub min: f64,
    pub max: f64,
    pub recommended: f64,
    pub rationale: String,
    pub source: BaselineSource,
}

impl Baseline {
    fn from_band(metric: Metric, band: &Band, rationale: String) -> Self {
        Self {
            metric,
            min: band.low,
            max: band.high,
            recommended: band.midpoint(),
            rationale,
            source: BaselineSource::FrameworkDriven,
        }
    }

    /// Widen the range so it always contains the recommended value
    fn repaired(mut self) -> Self {
        if self.min > self.recommended {
            self.min = self.recommended;
        }
        if self.max < self.recommended {
            self.max = self.recommended;
        }
        self
    }

    pub fn is_document_driven(&self) -> bool {
        self.source == BaselineSource::DocumentDriven
    }
}

// =============================================================================
// Dimension Readings
// =============================================================================

/// The record's categorical value relevant to one metric
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionReading {
    pub dimension: &'static str,
    pub value: DimensionValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DimensionValue {
    /// Selects the named catalog band
    Band(&'static str),
    Unrecognized(String),
}

impl DimensionReading {
    fn of<T: CategoryValue>(value: &Categorical<T>) -> Self {
        Self::labeled(T::dimension(), value)
    }

    fn labeled<T: CategoryValue>(dimension: &'static str, value: &Categorical<T>) -> Self {
        let value = match value {
            Categorical::Known(v) => DimensionValue::Band(v.band_key()),
            Categorical::Unrecognized(raw) => DimensionValue::Unrecognized(raw.clone()),
        };
        Self { dimension, value }
    }
}

/// Which record field drives each metric's framework band
pub fn read_dimension(metric: Metric, record: &AnalysisRecord) -> DimensionReading {
    match metric {
        Metric::TrajectoryComplexity => DimensionReading::of(&record.complexity_level),
        Metric::ToolUtilization => DimensionReading::of(&record.tool_maturity),
        Metric::TaskEscalationRate => DimensionReading::of(&record.task_complexity),
        // First contact resolution has no novel band; novel inquiries count as complex
        Metric::FirstContactResolution => match record.task_complexity.known() {
            Some(TaskComplexity::Novel) => DimensionReading {
                dimension: "inquiry type",
                value: DimensionValue::Band(TaskComplexity::Complex.band_key()),
            },
            _ => DimensionReading::labeled("inquiry type", &record.task_complexity),
        },
        Metric::ImprovementVelocity => DimensionReading::of(&record.domain_type),
        Metric::GuardrailViolations => match &record.safety_requirements {
            Some(value) => DimensionReading::of(value),
            None => DimensionReading::of(&Categorical::Known(SafetyRequirements::default())),
        },
        Metric::CostSavingsRoi => DimensionReading::of(&record.automation_potential),
        Metric::CustomerSatisfactionImprovement => DimensionReading::of(&record.scenario_type),
    }
}

// =============================================================================
// Strategies
// =============================================================================

/// One way of producing a baseline, tried in [`STRATEGIES`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    DocumentTarget,
    TechnicalOverride,
    FrameworkBand,
    DefaultBand,
}

pub const STRATEGIES: [Strategy; 4] = [
    Strategy::DocumentTarget,
    Strategy::TechnicalOverride,
    Strategy::FrameworkBand,
    Strategy::DefaultBand,
];

impl Strategy {
    /// Attempt this strategy; `None` hands over to the next one
    pub fn attempt(
        &self,
        metric: Metric,
        record: &AnalysisRecord,
        catalog: &RangeCatalog,
    ) -> Option<Baseline> {
        match self {
            Self::DocumentTarget => record.target_candidates(metric).find_map(|raw| {
                let target = *extract_target(Some(raw), metric.as_str()).parsed()?;
                Some(document_baseline(metric, raw, target))
            }),
            Self::TechnicalOverride => {
                if metric != Metric::FirstContactResolution
                    || record.task_complexity.known() == Some(TaskComplexity::Simple)
                    || !record.mentions(limits::TECHNICAL_MARKER)
                {
                    return None;
                }
                let band = catalog.band(metric, "technical")?;
                Some(Baseline::from_band(
                    metric,
                    band,
                    format!("Based on {} inquiry type", band.name),
                ))
            }
            Self::FrameworkBand => {
                let reading = read_dimension(metric, record);
                let DimensionValue::Band(key) = reading.value else {
                    return None;
                };
                let band = catalog.band(metric, key)?;
                Some(Baseline::from_band(
                    metric,
                    band,
                    format!("Based on {} {}", band.name, reading.dimension),
                ))
            }
            Self::DefaultBand => {
                let reading = read_dimension(metric, record);
                let rationale = match reading.value {
                    DimensionValue::Unrecognized(_) => format!(
                        "Based on default assumptions (unrecognized {})",
                        reading.dimension
                    ),
                    DimensionValue::Band(_) => {
                        format!("Based on default assumptions ({})", reading.dimension)
                    }
                };
                Some(Baseline::from_band(
                    metric,
                    catalog.middle_band(metric),
                    rationale,
                ))
            }
        }
    }
}

/// Range around a documented target, clamped to the metric's scale
fn document_baseline(metric: Metric, raw: &str, target: ParsedTarget) -> Baseline {
    let scale = metric.scale();
    let v = target.value;

    let (min, max) = match target.operator {
        TargetOperator::Exact => (
            (v - limits::EXACT_MARGIN_BELOW).max(scale.floor()),
            cap(v + limits::EXACT_MARGIN_ABOVE, scale.ceiling()),
        ),
        TargetOperator::LessThan => (
            (v - limits::UPPER_BOUND_MARGIN_BELOW).max(limits::UPPER_BOUND_FLOOR),
            v + limits::UPPER_BOUND_MARGIN_ABOVE,
        ),
        TargetOperator::GreaterThan => (
            v,
            cap(v + limits::LOWER_BOUND_MARGIN_ABOVE, scale.ceiling()),
        ),
    };

    Baseline {
        metric,
        min,
        max,
        recommended: v,
        rationale: format!("Based on documented target of {}", raw.trim()),
        source: BaselineSource::DocumentDriven,
    }
}

fn cap(value: f64, ceiling: Option<f64>) -> f64 {
    ceiling.map_or(value, |c| value.min(c))
}

/// Resolve a single metric. Total: the last strategy always applies.
pub fn resolve(metric: Metric, record: &AnalysisRecord, catalog: &RangeCatalog) -> Baseline {
    STRATEGIES
        .iter()
        .find_map(|strategy| {
            let baseline = strategy.attempt(metric, record, catalog)?;
            tracing::debug!(metric = %metric, strategy = ?strategy, "Resolved baseline");
            Some(baseline)
        })
        .unwrap_or_else(|| {
            Baseline::from_band(
                metric,
                catalog.middle_band(metric),
                "Based on default assumptions".to_string(),
            )
        })
        .repaired()
}

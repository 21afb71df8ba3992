//! Tracked metrics and their numeric scales.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::baseline as limits;

/// Metric group, mirrors the top level of the range catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricCategory {
    Technical,
    Operational,
    Learning,
    Business,
}

impl MetricCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Operational => "operational",
            Self::Learning => "learning",
            Self::Business => "business",
        }
    }

    /// Report section a category is shown under; learning folds into operational
    pub fn report_group(&self) -> Self {
        match self {
            Self::Learning => Self::Operational,
            other => *other,
        }
    }
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric scale a metric is measured on; decides clamping of documented targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricScale {
    /// Step counts, no upper bound
    Count,
    /// Plain percentage in [0, 100]
    Percentage,
    /// First-contact-resolution style percentage in [40, 95]
    ResolutionRate,
    /// Multiplier such as ROI, no upper bound
    Ratio,
}

impl MetricScale {
    pub fn floor(&self) -> f64 {
        match self {
            Self::Count | Self::Ratio => 0.0,
            Self::Percentage => limits::PERCENT_FLOOR,
            Self::ResolutionRate => limits::FCR_FLOOR,
        }
    }

    pub fn ceiling(&self) -> Option<f64> {
        match self {
            Self::Count | Self::Ratio => None,
            Self::Percentage => Some(limits::PERCENT_CEILING),
            Self::ResolutionRate => Some(limits::FCR_CEILING),
        }
    }
}

/// One of the eight tracked agent metrics.
///
/// Declaration order is the canonical order used by [`Metric::ALL`] and by
/// every serialized baseline set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TrajectoryComplexity,
    ToolUtilization,
    TaskEscalationRate,
    FirstContactResolution,
    ImprovementVelocity,
    GuardrailViolations,
    CostSavingsRoi,
    CustomerSatisfactionImprovement,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::TrajectoryComplexity,
        Metric::ToolUtilization,
        Metric::TaskEscalationRate,
        Metric::FirstContactResolution,
        Metric::ImprovementVelocity,
        Metric::GuardrailViolations,
        Metric::CostSavingsRoi,
        Metric::CustomerSatisfactionImprovement,
    ];

    /// Position in the canonical ordering
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrajectoryComplexity => "trajectory_complexity",
            Self::ToolUtilization => "tool_utilization",
            Self::TaskEscalationRate => "task_escalation_rate",
            Self::FirstContactResolution => "first_contact_resolution",
            Self::ImprovementVelocity => "improvement_velocity",
            Self::GuardrailViolations => "guardrail_violations",
            Self::CostSavingsRoi => "cost_savings_roi",
            Self::CustomerSatisfactionImprovement => "customer_satisfaction_improvement",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TrajectoryComplexity => "Trajectory Complexity",
            Self::ToolUtilization => "Tool Utilization",
            Self::TaskEscalationRate => "Task Escalation Rate",
            Self::FirstContactResolution => "First Contact Resolution",
            Self::ImprovementVelocity => "Improvement Velocity",
            Self::GuardrailViolations => "Guardrail Violations",
            Self::CostSavingsRoi => "Cost Savings ROI",
            Self::CustomerSatisfactionImprovement => "Customer Satisfaction Improvement",
        }
    }

    pub fn category(&self) -> MetricCategory {
        match self {
            Self::TrajectoryComplexity | Self::ToolUtilization => MetricCategory::Technical,
            Self::TaskEscalationRate | Self::FirstContactResolution => {
                MetricCategory::Operational
            }
            Self::ImprovementVelocity | Self::GuardrailViolations => MetricCategory::Learning,
            Self::CostSavingsRoi | Self::CustomerSatisfactionImprovement => {
                MetricCategory::Business
            }
        }
    }

    pub fn scale(&self) -> MetricScale {
        match self {
            Self::TrajectoryComplexity => MetricScale::Count,
            Self::FirstContactResolution => MetricScale::ResolutionRate,
            Self::CostSavingsRoi => MetricScale::Ratio,
            Self::ToolUtilization
            | Self::TaskEscalationRate
            | Self::ImprovementVelocity
            | Self::GuardrailViolations
            | Self::CustomerSatisfactionImprovement => MetricScale::Percentage,
        }
    }

    /// Unit suffix used when rendering values
    pub fn unit(&self) -> &'static str {
        match self {
            Self::TrajectoryComplexity => "",
            Self::ImprovementVelocity => "% monthly",
            Self::CostSavingsRoi => "x ROI",
            _ => "%",
        }
    }

    /// Alternative `performance_targets` keys accepted for this metric
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Self::TrajectoryComplexity => &["trajectory", "trajectory_steps"],
            Self::ToolUtilization => &["tool_usage", "tool_success_rate"],
            Self::TaskEscalationRate => &["escalation_rate", "escalation"],
            Self::FirstContactResolution => &["fcr", "first_contact_resolution_rate"],
            Self::ImprovementVelocity => &["improvement_rate", "learning_velocity"],
            Self::GuardrailViolations => &["guardrail_violation_rate", "safety_violations"],
            Self::CostSavingsRoi => &["roi", "cost_savings"],
            Self::CustomerSatisfactionImprovement => &[
                "customer_satisfaction",
                "csat",
                "customer_satisfaction_score",
            ],
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase, trim, and fold spaces/hyphens into underscores
pub(crate) fn normalize_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

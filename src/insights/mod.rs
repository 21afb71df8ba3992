//! Insight and readiness generation.
//!
//! Read-only consumers of a [`BaselineSet`]: sentences per metric group,
//! recommendations derived from the analysis, and a coarse readiness rating.

use serde::Serialize;
use std::fmt;

use crate::analysis::record::{AnalysisRecord, AutomationPotential, ComplexityLevel, DomainType};
use crate::baseline::{Baseline, BaselineSet, Metric, MetricCategory};

const STANDING_RECOMMENDATIONS: [&str; 2] = [
    "Implement progressive escalation pathways for complex issues",
    "Monitor tool performance and adjust utilization targets accordingly",
];

// =============================================================================
// Insights
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    pub technical: Vec<String>,
    pub operational: Vec<String>,
    pub business: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Insights {
    pub fn total(&self) -> usize {
        self.technical.len() + self.operational.len() + self.business.len()
    }
}

/// Build insights for every metric plus recommendations for the analysis
pub fn generate(baselines: &BaselineSet, record: &AnalysisRecord) -> Insights {
    let mut insights = Insights::default();

    for baseline in baselines {
        let sentence = describe(baseline);
        match baseline.metric.category().report_group() {
            MetricCategory::Technical => insights.technical.push(sentence),
            MetricCategory::Business => insights.business.push(sentence),
            _ => insights.operational.push(sentence),
        }
    }

    insights.recommendations = recommendations(record);
    insights
}

/// One sentence stating target, range, and rationale
fn describe(baseline: &Baseline) -> String {
    let Baseline {
        metric,
        min,
        max,
        recommended,
        rationale,
        ..
    } = baseline;

    let lead = match metric {
        Metric::TrajectoryComplexity => format!(
            "Trajectory complexity should average {:.0} steps (range: {}-{})",
            recommended, min, max
        ),
        Metric::ToolUtilization => format!(
            "Tool utilization should target {:.0}% (range: {}-{}%)",
            recommended, min, max
        ),
        Metric::TaskEscalationRate => format!(
            "Task escalation rate should be {:.1}% (range: {}-{}%)",
            recommended, min, max
        ),
        Metric::FirstContactResolution => format!(
            "First contact resolution should achieve {:.0}% (range: {}-{}%)",
            recommended, min, max
        ),
        Metric::ImprovementVelocity => format!(
            "Performance should improve by about {:.1}% monthly (range: {}-{}%)",
            recommended, min, max
        ),
        Metric::GuardrailViolations => format!(
            "Guardrail violations should stay near {:.2}% (range: {}-{}%)",
            recommended, min, max
        ),
        Metric::CostSavingsRoi => format!(
            "Expected ROI should be {:.1}x (range: {}-{}x)",
            recommended, min, max
        ),
        Metric::CustomerSatisfactionImprovement => format!(
            "Customer satisfaction improvement should be {:.0}% (range: {}-{}%)",
            recommended, min, max
        ),
    };

    format!("{}. {}.", lead, rationale)
}

fn recommendations(record: &AnalysisRecord) -> Vec<String> {
    let by_complexity = match record.complexity_level.or_default() {
        ComplexityLevel::Simple => "Focus on high throughput and consistent performance metrics",
        ComplexityLevel::HighlySpecialized => {
            "Prioritize accuracy and expert-level reasoning capabilities"
        }
        ComplexityLevel::Complex => "Balance efficiency with comprehensive problem-solving",
    };

    let by_domain = match record.domain_type.or_default() {
        DomainType::New => "Plan for rapid learning and adaptation phases",
        DomainType::Stable => "Optimize for reliability and minimal variance",
        DomainType::Evolving => "Build flexibility for evolving requirements",
    };

    [by_complexity, by_domain]
        .into_iter()
        .chain(STANDING_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Readiness
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadinessAssessment {
    pub technical: ReadinessLevel,
    pub operational: ReadinessLevel,
    pub business: ReadinessLevel,
}

impl ReadinessAssessment {
    pub fn assess(record: &AnalysisRecord) -> Self {
        let technical = match record.complexity_level.known() {
            Some(ComplexityLevel::Simple) => ReadinessLevel::High,
            _ => ReadinessLevel::Medium,
        };

        let operational = match record.domain_type.known() {
            Some(DomainType::Stable) => ReadinessLevel::High,
            _ => ReadinessLevel::Medium,
        };

        let business = match record.automation_potential.known() {
            Some(AutomationPotential::High) => ReadinessLevel::High,
            Some(AutomationPotential::Low) => ReadinessLevel::Low,
            Some(AutomationPotential::Medium) | None => ReadinessLevel::Medium,
        };

        Self {
            technical,
            operational,
            business,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::record::Categorical;
    use crate::baseline::build_baselines;

    #[test]
    fn test_insights_cover_every_metric() {
        let record = AnalysisRecord::for_query("support agent").with_target("fcr", "75%");
        let insights = generate(&build_baselines(&record), &record);

        assert_eq!(insights.technical.len(), 2);
        assert_eq!(insights.operational.len(), 4);
        assert_eq!(insights.business.len(), 2);
        assert_eq!(insights.total(), 8);
        assert_eq!(
            insights.operational[1],
            "First contact resolution should achieve 75% (range: 65-80%). Based on documented target of 75%."
        );
    }

    #[test]
    fn test_recommendations_follow_analysis() {
        let mut record = AnalysisRecord::for_query("q");
        record.complexity_level = ComplexityLevel::HighlySpecialized.into();
        record.domain_type = DomainType::New.into();

        let recs = recommendations(&record);
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0], "Prioritize accuracy and expert-level reasoning capabilities");
        assert_eq!(recs[1], "Plan for rapid learning and adaptation phases");
        assert_eq!(recs[2], STANDING_RECOMMENDATIONS[0]);
    }

    #[test]
    fn test_unrecognized_values_use_middle_recommendations() {
        let mut record = AnalysisRecord::for_query("q");
        record.domain_type = Categorical::parse("volatile");
        let recs = recommendations(&record);
        assert_eq!(recs[1], "Build flexibility for evolving requirements");
    }

    #[test]
    fn test_readiness() {
        let mut record = AnalysisRecord::for_query("q");
        record.complexity_level = ComplexityLevel::Simple.into();
        record.domain_type = DomainType::Stable.into();
        record.automation_potential = AutomationPotential::Low.into();

        let readiness = ReadinessAssessment::assess(&record);
        assert_eq!(readiness.technical, ReadinessLevel::High);
        assert_eq!(readiness.operational, ReadinessLevel::High);
        assert_eq!(readiness.business, ReadinessLevel::Low);

        let defaults = ReadinessAssessment::assess(&AnalysisRecord::default());
        assert_eq!(defaults.technical, ReadinessLevel::Medium);
        assert_eq!(defaults.business, ReadinessLevel::Medium);
    }
}

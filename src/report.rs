//! Baseline report assembly and rendering.

use std::fmt::Write as _;

use chrono::Utc;
use console::style;
use serde::Serialize;

use crate::analysis::AnalysisRecord;
use crate::baseline::{Baseline, BaselineSet, MetricCategory};
use crate::config::ReportFormat;
use crate::insights::{Insights, ReadinessAssessment};
use crate::types::{Result, title_case};

const REPORT_GROUPS: [MetricCategory; 3] = [
    MetricCategory::Technical,
    MetricCategory::Operational,
    MetricCategory::Business,
];

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_metrics: usize,
    pub complexity_assessment: String,
    pub domain_maturity: String,
    pub automation_readiness: String,
    pub document_driven: usize,
    pub framework_driven: usize,
    /// Analysis fell back to conservative defaults
    pub degraded: bool,
}

impl ReportSummary {
    fn new(record: &AnalysisRecord, baselines: &BaselineSet) -> Self {
        Self {
            total_metrics: baselines.len(),
            complexity_assessment: record.complexity_level.to_string(),
            domain_maturity: record.domain_type.to_string(),
            automation_readiness: record.automation_potential.to_string(),
            document_driven: baselines.document_driven_count(),
            framework_driven: baselines.framework_driven_count(),
            degraded: record.degraded,
        }
    }
}

/// Everything produced by one baseline run
#[derive(Debug, Clone, Serialize)]
pub struct BaselineReport {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub user_query: String,
    pub analysis: AnalysisRecord,
    pub baselines: BaselineSet,
    pub summary: ReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness: Option<ReadinessAssessment>,
}

impl BaselineReport {
    pub fn new(user_query: impl Into<String>, analysis: AnalysisRecord, baselines: BaselineSet) -> Self {
        let summary = ReportSummary::new(&analysis, &baselines);
        Self {
            generated_at: Utc::now().to_rfc3339(),
            user_query: user_query.into(),
            analysis,
            baselines,
            summary,
            insights: None,
            readiness: None,
        }
    }

    pub fn with_insights(mut self, insights: Insights, readiness: ReadinessAssessment) -> Self {
        self.insights = Some(insights);
        self.readiness = Some(readiness);
        self
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            ReportFormat::Text => Ok(self.render_text()),
        }
    }

    // =========================================================================
    // Text rendering
    // =========================================================================

    fn render_text(&self) -> String {
        let mut out = String::new();
        let summary = &self.summary;

        let _ = writeln!(out, "{}", style("AI Control Tower Baselines").bold().underlined());
        let _ = writeln!(out, "Query: {}", self.user_query);
        let _ = writeln!(out, "Generated: {}", self.generated_at);
        let _ = writeln!(
            out,
            "Analysis: {} complexity, {} domain, {} automation potential",
            summary.complexity_assessment, summary.domain_maturity, summary.automation_readiness
        );
        let _ = writeln!(
            out,
            "Sources: {} document-driven, {} framework-driven",
            summary.document_driven, summary.framework_driven
        );
        if summary.degraded {
            let _ = writeln!(
                out,
                "{} Document analysis failed, baselines use conservative defaults",
                style("⚠").yellow()
            );
        }

        for group in REPORT_GROUPS {
            let _ = writeln!(out, "\n{}", style(title_case(group.as_str())).bold());
            let _ = writeln!(out, "{}", "─".repeat(40));
            self.baselines
                .iter()
                .filter(|b| b.metric.category().report_group() == group)
                .for_each(|b| write_baseline(&mut out, b));
        }

        if let Some(insights) = &self.insights {
            write_list(&mut out, "Recommendations", &insights.recommendations);
        }

        if let Some(readiness) = &self.readiness {
            let _ = writeln!(out, "\n{}", style("Readiness").bold());
            let _ = writeln!(out, "{}", "─".repeat(40));
            let _ = writeln!(out, "  Technical:   {}", readiness.technical);
            let _ = writeln!(out, "  Operational: {}", readiness.operational);
            let _ = writeln!(out, "  Business:    {}", readiness.business);
        }

        out
    }
}

fn write_baseline(out: &mut String, baseline: &Baseline) {
    let unit = baseline.metric.unit();
    let marker = if baseline.is_document_driven() {
        style("doc").cyan()
    } else {
        style("ref").dim()
    };

    let _ = writeln!(
        out,
        "  {:<36} {:>8}{}  [{}-{}{}] {}",
        baseline.metric.display_name(),
        baseline.recommended,
        unit,
        baseline.min,
        baseline.max,
        unit,
        marker
    );
    let _ = writeln!(out, "    {}", style(&baseline.rationale).dim());
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", style(title).bold());
    let _ = writeln!(out, "{}", "─".repeat(40));
    for item in items {
        let _ = writeln!(out, "  • {}", item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{Metric, build_baselines};
    use crate::insights;

    fn sample_report() -> BaselineReport {
        let record = AnalysisRecord::for_query("support agent")
            .with_target("first_contact_resolution", "75%")
            .with_target("escalation_rate", "<15%");
        let baselines = build_baselines(&record);
        let generated = insights::generate(&baselines, &record);
        let readiness = ReadinessAssessment::assess(&record);
        BaselineReport::new("support agent", record, baselines).with_insights(generated, readiness)
    }

    #[test]
    fn test_summary_counts_sources() {
        let report = sample_report();
        assert_eq!(report.summary.total_metrics, 8);
        assert_eq!(report.summary.document_driven, 2);
        assert_eq!(report.summary.framework_driven, 6);
        assert_eq!(report.summary.complexity_assessment, "complex");
        assert!(!report.summary.degraded);
    }

    #[test]
    fn test_json_keys_baselines_by_metric() {
        let rendered = sample_report().render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        let fcr = &value["baselines"]["first_contact_resolution"];
        assert_eq!(fcr["min"], 65.0);
        assert_eq!(fcr["max"], 80.0);
        assert_eq!(fcr["recommended"], 75.0);
        assert_eq!(fcr["source"], "document_driven");
        assert_eq!(value["readiness"]["business"], "medium");
        assert!(chrono::DateTime::parse_from_rfc3339(value["generated_at"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_insights_omitted_when_absent() {
        let record = AnalysisRecord::for_query("q");
        let report = BaselineReport::new("q", record.clone(), build_baselines(&record));

        let value: serde_json::Value =
            serde_json::from_str(&report.render(ReportFormat::Json).unwrap()).unwrap();
        assert!(value.get("insights").is_none());
        assert!(value.get("readiness").is_none());
    }

    #[test]
    fn test_yaml_render() {
        let rendered = sample_report().render(ReportFormat::Yaml).unwrap();
        assert!(rendered.contains("task_escalation_rate:"));
        assert!(rendered.contains("user_query: support agent"));
    }

    #[test]
    fn test_text_groups_metrics() {
        let report = sample_report();
        let text = report.render(ReportFormat::Text).unwrap();

        let technical = text.find("Technical").unwrap();
        let operational = text.find("Operational").unwrap();
        let business = text.find("Business").unwrap();
        assert!(technical < operational && operational < business);

        let velocity = text.find(Metric::ImprovementVelocity.display_name()).unwrap();
        assert!(operational < velocity && velocity < business);

        assert!(text.contains("[10-18%]"));
        assert!(text.contains("Based on documented target of 75%"));
        assert!(text.contains("Recommendations"));
    }
}

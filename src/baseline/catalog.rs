//! Range Catalog
//!
//! Static lookup table of reference bands: `category -> metric -> band -> (low, high)`.
//! Consulted by the framework-driven resolution path only.

use serde::Serialize;

use super::metric::{Metric, MetricCategory};

/// A named `(low, high)` pair for one metric under one categorical value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub name: &'static str,
    pub low: f64,
    pub high: f64,
}

impl Band {
    const fn new(name: &'static str, low: f64, high: f64) -> Self {
        Self { name, low, high }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// The three bands of one metric, ordered low-risk to high-risk.
/// The middle band doubles as the conservative default.
#[derive(Debug, Clone, Copy)]
pub struct MetricBands {
    pub metric: Metric,
    bands: [Band; 3],
}

impl MetricBands {
    const fn new(metric: Metric, bands: [Band; 3]) -> Self {
        Self { metric, bands }
    }

    pub fn get(&self, name: &str) -> Option<&Band> {
        self.bands.iter().find(|band| band.name == name)
    }

    pub fn middle(&self) -> &Band {
        &self.bands[1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }
}

/// Flattened catalog row, used for listings
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub category: MetricCategory,
    pub metric: Metric,
    pub band: Band,
}

/// Read-only table of bands for every tracked metric, in canonical metric order
#[derive(Debug)]
pub struct RangeCatalog {
    metrics: [MetricBands; 8],
}

static DEFAULT_CATALOG: RangeCatalog = RangeCatalog {
    metrics: [
        MetricBands::new(
            Metric::TrajectoryComplexity,
            [
                Band::new("simple", 20.0, 30.0),
                Band::new("complex", 40.0, 60.0),
                Band::new("specialized", 60.0, 80.0),
            ],
        ),
        MetricBands::new(
            Metric::ToolUtilization,
            [
                Band::new("well_defined", 80.0, 95.0),
                Band::new("experimental", 60.0, 80.0),
                Band::new("unstable", 40.0, 60.0),
            ],
        ),
        MetricBands::new(
            Metric::TaskEscalationRate,
            [
                Band::new("simple", 5.0, 10.0),
                Band::new("complex", 15.0, 25.0),
                Band::new("novel", 25.0, 40.0),
            ],
        ),
        MetricBands::new(
            Metric::FirstContactResolution,
            [
                Band::new("simple", 80.0, 90.0),
                Band::new("complex", 60.0, 75.0),
                Band::new("technical", 40.0, 60.0),
            ],
        ),
        MetricBands::new(
            Metric::ImprovementVelocity,
            [
                Band::new("stable", 3.0, 5.0),
                Band::new("evolving", 5.0, 10.0),
                Band::new("new", 10.0, 20.0),
            ],
        ),
        MetricBands::new(
            Metric::GuardrailViolations,
            [
                Band::new("strict", 0.0, 0.5),
                Band::new("moderate", 1.0, 2.0),
                Band::new("lenient", 2.0, 5.0),
            ],
        ),
        MetricBands::new(
            Metric::CostSavingsRoi,
            [
                Band::new("high_automation", 5.0, 10.0),
                Band::new("medium", 2.0, 5.0),
                Band::new("low", 1.0, 2.0),
            ],
        ),
        MetricBands::new(
            Metric::CustomerSatisfactionImprovement,
            [
                Band::new("replacement", 10.0, 20.0),
                Band::new("enhancement", 5.0, 15.0),
                Band::new("new_capability", 0.0, 10.0),
            ],
        ),
    ],
};

impl RangeCatalog {
    /// The process-wide catalog
    pub fn global() -> &'static RangeCatalog {
        &DEFAULT_CATALOG
    }

    pub fn bands(&self, metric: Metric) -> &MetricBands {
        &self.metrics[metric.index()]
    }

    pub fn band(&self, metric: Metric, name: &str) -> Option<&Band> {
        self.bands(metric).get(name)
    }

    pub fn middle_band(&self, metric: Metric) -> &Band {
        self.bands(metric).middle()
    }

    /// Every band in category/metric order
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry> + '_ {
        self.metrics.iter().flat_map(|bands| {
            bands.iter().map(move |band| CatalogEntry {
                category: bands.metric.category(),
                metric: bands.metric,
                band: *band,
            })
        })
    }
}

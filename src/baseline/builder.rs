//! Baseline Set Builder
//!
//! Runs the resolver once per tracked metric in canonical order.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::analysis::record::AnalysisRecord;

use super::catalog::RangeCatalog;
use super::metric::Metric;
use super::resolver::{Baseline, resolve};

/// Exactly one [`Baseline`] per tracked metric, in canonical order.
///
/// Serializes as an object keyed by metric name.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineSet {
    baselines: Vec<Baseline>,
}

impl BaselineSet {
    pub fn get(&self, metric: Metric) -> &Baseline {
        &self.baselines[metric.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Baseline> {
        self.baselines.iter()
    }

    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }

    pub fn document_driven_count(&self) -> usize {
        self.baselines
            .iter()
            .filter(|b| b.is_document_driven())
            .count()
    }

    pub fn framework_driven_count(&self) -> usize {
        self.len() - self.document_driven_count()
    }
}

impl<'a> IntoIterator for &'a BaselineSet {
    type Item = &'a Baseline;
    type IntoIter = std::slice::Iter<'a, Baseline>;

    fn into_iter(self) -> Self::IntoIter {
        self.baselines.iter()
    }
}

impl Serialize for BaselineSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.baselines.len()))?;
        for baseline in &self.baselines {
            map.serialize_entry(baseline.metric.as_str(), baseline)?;
        }
        map.end()
    }
}

/// Builds baseline sets against a range catalog
pub struct BaselineBuilder<'a> {
    catalog: &'a RangeCatalog,
}

impl Default for BaselineBuilder<'static> {
    fn default() -> Self {
        Self::new(RangeCatalog::global())
    }
}

impl<'a> BaselineBuilder<'a> {
    pub fn new(catalog: &'a RangeCatalog) -> Self {
        Self { catalog }
    }

    /// Pure and total: the same record always yields the same set.
    pub fn build(&self, record: &AnalysisRecord) -> BaselineSet {
        let baselines = Metric::ALL
            .iter()
            .map(|&metric| resolve(metric, record, self.catalog))
            .collect::<Vec<_>>();

        tracing::debug!(
            document_driven = baselines.iter().filter(|b| b.is_document_driven()).count(),
            "Built {} baselines",
            baselines.len()
        );

        BaselineSet { baselines }
    }
}

/// Build baselines against the global catalog
pub fn build_baselines(record: &AnalysisRecord) -> BaselineSet {
    BaselineBuilder::default().build(record)
}

//! Baseline derivation engine.
//!
//! Turns an [`AnalysisRecord`](crate::analysis::AnalysisRecord) into a
//! [`BaselineSet`]: one recommended value and acceptable range per tracked
//! metric. Pure and synchronous; safe to call from any number of threads.

pub mod builder;
pub mod catalog;
pub mod metric;
pub mod resolver;
pub mod target;

pub use builder::{BaselineBuilder, BaselineSet, build_baselines};
pub use catalog::{Band, CatalogEntry, RangeCatalog};
pub use metric::{Metric, MetricCategory, MetricScale};
pub use resolver::{Baseline, BaselineSource, Strategy, resolve};
pub use target::{ParsedTarget, Target, TargetOperator, TargetParseError, extract_target, parse_target};

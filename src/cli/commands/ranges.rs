//! Ranges Command
//!
//! List the reference bands used when documentation states no target.

use crate::baseline::{CatalogEntry, Metric, RangeCatalog};
use crate::cli::ui::Output;
use crate::config::ReportFormat;
use crate::types::{Result, TowerError, humanize};

pub fn run(format: ReportFormat) -> Result<()> {
    let entries: Vec<CatalogEntry> = RangeCatalog::global().entries().collect();

    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        ReportFormat::Yaml => println!("{}", serde_yaml::to_string(&entries)?),
        ReportFormat::Text => print_text(&entries)?,
    }

    Ok(())
}

fn print_text(entries: &[CatalogEntry]) -> Result<()> {
    let out = Output::new();
    out.header("Framework Reference Ranges");

    for metric in Metric::ALL {
        let rows: Vec<&CatalogEntry> = entries.iter().filter(|e| e.metric == metric).collect();
        let first = rows.first().ok_or_else(|| {
            TowerError::Config(format!("Range catalog has no bands for {}", metric))
        })?;

        out.section(&format!("{} ({})", metric.display_name(), first.category));
        for entry in rows {
            out.field(
                &humanize(entry.band.name),
                format!("{}-{}{}", entry.band.low, entry.band.high, metric.unit()),
            );
        }
    }

    Ok(())
}

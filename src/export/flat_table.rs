use crate::domain::bulk::BulkResultSet;
use crate::error::Result;
use std::io::Write;

pub const HEADERS: [&str; 8] = ["source", "target", "path", "backup_path", "cost", "hops", "bottleneck_capacity", "has_redundancy"];

/// Writes one row per analysed pair. Missing backup paths and bottlenecks are left empty.
pub fn write_flat_table<W: Write>(writer: W, results: &BulkResultSet) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b',').from_writer(writer);

    csv_wtr.write_record(HEADERS)?;

    for outcome in &results.outcomes {
        let row: Vec<String> = vec![
            outcome.source.to_string(),
            outcome.target.to_string(),
            outcome.primary.describe(),
            outcome.backup.as_ref().map(|backup| backup.describe()).unwrap_or_default(),
            outcome.primary.cost.to_string(),
            outcome.primary.hops.to_string(),
            outcome.primary.bottleneck_capacity().map(|capacity| capacity.to_string()).unwrap_or_default(),
            outcome.has_redundancy.to_string(),
        ];
        csv_wtr.write_record(&row)?;
    }

    csv_wtr.flush()?;
    log::debug!("Flat table written: {} rows", results.len());

    Ok(())
}

use crate::domain::report::RoutingTables;
use crate::error::Result;
use crate::export::PLACEHOLDER;
use std::io::Write;

pub const HEADERS: [&str; 6] = ["source", "destination", "next_hop", "cost", "interface", "path"];

/// Writes all routing tables into one CSV, grouped by source in id order.
pub fn write_routing_tables<W: Write>(writer: W, tables: &RoutingTables) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b',').from_writer(writer);

    csv_wtr.write_record(HEADERS)?;

    for (source, routes) in tables {
        for route in routes {
            csv_wtr.write_record([
                source.to_string(),
                route.destination.to_string(),
                route.next_hop.to_string(),
                route.cost.to_string(),
                route.interface.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
                route.describe_path(),
            ])?;
        }
    }

    csv_wtr.flush()?;

    Ok(())
}

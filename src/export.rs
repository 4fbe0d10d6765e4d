//! Renders results for the presentation layer. Bulk runs become a flat CSV table, a structured
//! JSON report or per-source routing tables; single-pair queries become a ranked path list.
//! Writers take any `io::Write`.

pub mod flat_table;
pub mod json_report;
pub mod path_list;
pub mod routing_csv;

/// Printed for values that do not exist, e.g. the interface of a route.
pub const PLACEHOLDER: &str = "-";

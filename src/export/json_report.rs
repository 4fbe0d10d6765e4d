use crate::domain::bulk::{BulkResultSet, PairOutcome};
use crate::domain::report::{Summary, summarize};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Structured report: summary statistics plus every pair's paths.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<'a> {
    pub generated_at: DateTime<Utc>,

    /// `null` when no pair had a path.
    pub summary: Option<Summary>,

    pub unreachable_pairs: usize,
    pub results: &'a [PairOutcome],
}

impl<'a> AnalysisReport<'a> {
    pub fn new(results: &'a BulkResultSet) -> Self {
        Self { generated_at: Utc::now(), summary: summarize(results), unreachable_pairs: results.unreachable_pairs, results: &results.outcomes }
    }
}

pub fn write_json_report<W: Write>(writer: W, results: &BulkResultSet) -> Result<()> {
    let report = AnalysisReport::new(results);
    serde_json::to_writer_pretty(writer, &report)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::PathResult;
    use crate::domain::utils::id::NodeId;
    use serde_json::Value;

    #[test]
    fn test_report_shape() {
        let primary = PathResult { nodes: vec![NodeId::new("A"), NodeId::new("B")], links: Vec::new(), cost: 7.0, hops: 1, bottleneck: None };
        let results = BulkResultSet { outcomes: vec![PairOutcome::new(NodeId::new("A"), NodeId::new("B"), primary, None)], unreachable_pairs: 2 };

        let mut buffer = Vec::new();
        write_json_report(&mut buffer, &results).unwrap();
        let value: Value = serde_json::from_slice(&buffer).unwrap();

        assert!(value["generatedAt"].is_string());
        assert_eq!(value["summary"]["pairsAnalyzed"], 1);
        assert_eq!(value["summary"]["withoutBackup"], 1);
        assert_eq!(value["unreachablePairs"], 2);
        assert_eq!(value["results"][0]["primary"]["nodes"], serde_json::json!(["A", "B"]));
        assert_eq!(value["results"][0]["hasRedundancy"], false);
        assert!(value["results"][0]["backup"].is_null());
    }

    #[test]
    fn test_empty_results_have_null_summary() {
        let mut buffer = Vec::new();
        write_json_report(&mut buffer, &BulkResultSet::default()).unwrap();
        let value: Value = serde_json::from_slice(&buffer).unwrap();

        assert!(value["summary"].is_null());
        assert_eq!(value["results"], serde_json::json!([]));
    }
}

use crate::domain::bulk::BulkResultSet;
use crate::domain::utils::id::NodeId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate statistics over the primary paths of a bulk run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub pairs_analyzed: usize,
    pub with_backup: usize,
    pub without_backup: usize,

    /// Share of analysed pairs that have a backup path, between 0 and 1.
    pub redundancy_coverage: f64,

    pub mean_cost: f64,
    pub mean_hops: f64,
    pub min_cost: f64,
    pub max_cost: f64,
}

/// One line of a per-source routing table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub destination: NodeId,
    pub next_hop: NodeId,
    pub cost: f64,
    pub hops: usize,

    /// Outgoing interface. The topology does not model interfaces, exporters print a placeholder.
    pub interface: Option<String>,

    pub path: Vec<NodeId>,
}

impl RouteEntry {
    pub fn describe_path(&self) -> String {
        self.path.iter().map(|node| node.as_str()).collect::<Vec<_>>().join(" -> ")
    }
}

pub type RoutingTables = BTreeMap<NodeId, Vec<RouteEntry>>;

/// Returns `None` for an empty result set instead of dividing by zero.
pub fn summarize(results: &BulkResultSet) -> Option<Summary> {
    if results.is_empty() {
        return None;
    }

    let pairs_analyzed = results.len();
    let with_backup = results.outcomes.iter().filter(|outcome| outcome.has_redundancy).count();

    let mut total_cost = 0.0;
    let mut total_hops = 0usize;
    let mut min_cost = f64::INFINITY;
    let mut max_cost = f64::NEG_INFINITY;

    for outcome in &results.outcomes {
        let cost = outcome.primary.cost;
        total_cost += cost;
        total_hops += outcome.primary.hops;
        min_cost = min_cost.min(cost);
        max_cost = max_cost.max(cost);
    }

    Some(Summary {
        pairs_analyzed,
        with_backup,
        without_backup: pairs_analyzed - with_backup,
        redundancy_coverage: with_backup as f64 / pairs_analyzed as f64,
        mean_cost: total_cost / pairs_analyzed as f64,
        mean_hops: total_hops as f64 / pairs_analyzed as f64,
        min_cost,
        max_cost,
    })
}

/// Groups primary paths by source node, cheapest route first.
///
/// Only the direction stored in the result set is used: a pair `(a, b)` adds a route to `a`'s
/// table, not to `b`'s.
pub fn to_routing_tables(results: &BulkResultSet) -> RoutingTables {
    let mut tables: RoutingTables = BTreeMap::new();

    for outcome in &results.outcomes {
        let path = &outcome.primary.nodes;
        let next_hop = if path.len() >= 2 { path[1].clone() } else { outcome.target.clone() };

        tables.entry(outcome.source.clone()).or_default().push(RouteEntry {
            destination: outcome.target.clone(),
            next_hop,
            cost: outcome.primary.cost,
            hops: outcome.primary.hops,
            interface: None,
            path: path.clone(),
        });
    }

    for routes in tables.values_mut() {
        routes.sort_by(|a, b| a.cost.total_cmp(&b.cost).then_with(|| a.destination.cmp(&b.destination)));
    }

    tables
}

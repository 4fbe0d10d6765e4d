//! K lowest-cost loop-free paths between two nodes.
//!
//! `PathPolicy::Shortest` runs Yen's algorithm: every further path deviates from the previous
//! best path at some spur node, with the arcs already used from that root banned and the root's
//! earlier nodes removed. Paths may share links.
//!
//! `PathPolicy::LinkDisjoint` removes every link of each accepted path (both directions) before
//! searching again, so the returned paths never share a physical link. It can return fewer and
//! more expensive paths than `Shortest`.
//!
//! Cost: each of the `k` rounds runs up to V spur searches of O((V + E) log V), i.e.
//! O(k * V * (V + E) log V) per pair. Fine for topologies of a few hundred nodes; the bulk
//! driver multiplies this by the number of pairs.

use crate::domain::graph::Graph;
use crate::domain::routing::dijkstra::{SearchExclusions, shortest_path};
use crate::domain::routing::path::{PathResult, RawPath};
use crate::domain::utils::id::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selects how alternative paths relate to the ones already found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PathPolicy {
    /// Next cheapest loop-free path, links may be shared with earlier paths.
    #[default]
    Shortest,

    /// Next cheapest path that shares no link with any earlier path.
    LinkDisjoint,
}

/// Computes up to `k` paths from `source` to `target`, best first.
///
/// Paths are ranked by cost, then hop count, then node-id sequence. An empty result means
/// there is no path: unknown nodes, `source == target` and `k == 0` all end up here.
pub fn k_shortest_paths(graph: &Graph, source: &NodeId, target: &NodeId, k: usize, policy: PathPolicy) -> Vec<PathResult> {
    let (Some(source_index), Some(target_index)) = (graph.node_index(source), graph.node_index(target)) else {
        log::debug!("NoPathFound: {} => {} (unknown node)", source, target);
        return Vec::new();
    };

    if source_index == target_index || k == 0 {
        return Vec::new();
    }

    let paths = match policy {
        PathPolicy::Shortest => yen(graph, source_index, target_index, k),
        PathPolicy::LinkDisjoint => link_disjoint(graph, source_index, target_index, k),
    };

    if paths.is_empty() {
        log::debug!("NoPathFound: {} => {}", source, target);
    } else {
        log::debug!("Paths found {} => {}: {} of {} requested ({:?})", source, target, paths.len(), k, policy);
    }

    paths.into_iter().map(|path| path.into_result(graph)).collect()
}

fn yen(graph: &Graph, source: usize, target: usize, k: usize) -> Vec<RawPath> {
    let node_count = graph.node_count();

    let Some(first) = shortest_path(graph, source, target, &SearchExclusions::new(node_count)) else {
        return Vec::new();
    };

    let mut accepted: Vec<RawPath> = vec![first];
    let mut candidates: BTreeSet<RawPath> = BTreeSet::new();

    while accepted.len() < k {
        let previous = accepted[accepted.len() - 1].clone();

        for spur_position in 0..previous.hops() {
            let spur_node = previous.nodes[spur_position];
            let root_nodes = &previous.nodes[..=spur_position];
            let root_arcs = &previous.arcs[..spur_position];

            let mut exclusions = SearchExclusions::new(node_count);

            // Block the deviation every accepted path with this root already took.
            for path in &accepted {
                if path.hops() > spur_position && path.arcs[..spur_position] == *root_arcs && path.nodes[..=spur_position] == *root_nodes {
                    exclusions.ban_arc(path.arcs[spur_position]);
                }
            }

            for &root_node in &root_nodes[..spur_position] {
                exclusions.ban_node(root_node);
            }

            if let Some(spur_path) = shortest_path(graph, spur_node, target, &exclusions) {
                let candidate = RawPath::join(graph, root_nodes, root_arcs, &spur_path);
                if !accepted.contains(&candidate) {
                    candidates.insert(candidate);
                }
            }
        }

        match candidates.pop_first() {
            Some(next) => accepted.push(next),
            None => break,
        }
    }

    accepted
}

fn link_disjoint(graph: &Graph, source: usize, target: usize, k: usize) -> Vec<RawPath> {
    let mut exclusions = SearchExclusions::new(graph.node_count());
    let mut accepted: Vec<RawPath> = Vec::new();

    while accepted.len() < k {
        let Some(path) = shortest_path(graph, source, target, &exclusions) else {
            break;
        };

        for &arc_index in &path.arcs {
            exclusions.ban_link(graph.arc(arc_index).link);
        }
        accepted.push(path);
    }

    accepted
}

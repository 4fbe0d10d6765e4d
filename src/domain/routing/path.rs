use crate::domain::graph::Graph;
use crate::domain::utils::cost::Cost;
use crate::domain::utils::id::{LinkId, NodeId};
use serde::Serialize;
use std::cmp::Ordering;

/// The link limiting a path's throughput.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bottleneck {
    pub link: LinkId,
    pub capacity: f64,
}

/// A loop-free route between two nodes together with its aggregate metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    /// Visited nodes, source and target inclusive.
    pub nodes: Vec<NodeId>,

    /// Traversed links, one per hop.
    pub links: Vec<LinkId>,

    /// Sum of the directed costs of the traversed arcs, resolved to six decimal places.
    pub cost: f64,

    pub hops: usize,

    /// Link with the smallest capacity; the first one along the path on ties. `None` for a zero hop path.
    pub bottleneck: Option<Bottleneck>,
}

impl PathResult {
    pub fn source(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn target(&self) -> Option<&NodeId> {
        self.nodes.last()
    }

    pub fn bottleneck_capacity(&self) -> Option<f64> {
        self.bottleneck.as_ref().map(|bottleneck| bottleneck.capacity)
    }

    /// Human readable node sequence, e.g. `A -> C -> D`.
    pub fn describe(&self) -> String {
        self.nodes.iter().map(|node| node.as_str()).collect::<Vec<_>>().join(" -> ")
    }

    pub fn is_loop_free(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.nodes.iter().all(|node| seen.insert(node))
    }
}

/// Index-level path used while searching.
///
/// Ordered by (cost, hop count, node sequence, arc sequence). Because graph node indices follow
/// id order, comparing index sequences is the same as comparing node-id sequences.
#[derive(Debug, Clone)]
pub(crate) struct RawPath {
    pub nodes: Vec<usize>,
    pub arcs: Vec<usize>,
    pub cost: Cost,
}

impl RawPath {
    pub fn start(node: usize) -> Self {
        Self { nodes: vec![node], arcs: Vec::new(), cost: Cost::ZERO }
    }

    pub fn last(&self) -> usize {
        // nodes always holds at least the start node
        self.nodes[self.nodes.len() - 1]
    }

    pub fn hops(&self) -> usize {
        self.arcs.len()
    }

    pub fn extend(&self, graph: &Graph, arc_index: usize) -> Self {
        let arc = graph.arc(arc_index);

        let mut nodes = self.nodes.clone();
        nodes.push(arc.to);
        let mut arcs = self.arcs.clone();
        arcs.push(arc_index);

        Self { nodes, arcs, cost: self.cost + arc.cost }
    }

    /// Concatenates a root prefix with a spur path starting at the root's last node.
    pub fn join(graph: &Graph, root_nodes: &[usize], root_arcs: &[usize], spur: &RawPath) -> Self {
        let mut nodes = root_nodes.to_vec();
        nodes.extend_from_slice(&spur.nodes[1..]);
        let mut arcs = root_arcs.to_vec();
        arcs.extend_from_slice(&spur.arcs);

        let cost = arcs.iter().map(|arc| graph.arc(*arc).cost).sum();

        Self { nodes, arcs, cost }
    }

    pub fn into_result(self, graph: &Graph) -> PathResult {
        let mut bottleneck: Option<Bottleneck> = None;
        for arc_index in &self.arcs {
            let arc = graph.arc(*arc_index);
            if bottleneck.as_ref().is_none_or(|current| arc.capacity < current.capacity) {
                bottleneck = Some(Bottleneck { link: graph.link_id(arc.link).clone(), capacity: arc.capacity });
            }
        }

        PathResult {
            nodes: self.nodes.iter().map(|node| graph.node_id(*node).clone()).collect(),
            links: self.arcs.iter().map(|arc| graph.link_id(graph.arc(*arc).link).clone()).collect(),
            cost: self.cost.as_f64(),
            hops: self.hops(),
            bottleneck,
        }
    }
}

impl Ord for RawPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.hops().cmp(&other.hops()))
            .then_with(|| self.nodes.cmp(&other.nodes))
            .then_with(|| self.arcs.cmp(&other.arcs))
    }
}

impl PartialOrd for RawPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RawPath {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RawPath {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::topology::{Link, Node, Topology};

    fn chain_graph() -> Graph {
        // A -(cap 80)- B -(cap 30)- C -(cap 30)- D
        let topology = Topology::new(
            vec![Node::new("A"), Node::new("B"), Node::new("C"), Node::new("D")],
            vec![
                Link::new("A-B", "A", "B", 1.0, 1.0, 80.0),
                Link::new("B-C", "B", "C", 2.0, 2.0, 30.0),
                Link::new("C-D", "C", "D", 3.0, 3.0, 30.0),
            ],
        )
        .unwrap();
        Graph::build(&topology).unwrap()
    }

    #[test]
    fn test_bottleneck_reports_first_minimum() {
        let graph = chain_graph();
        let path = RawPath::start(0).extend(&graph, 0).extend(&graph, 2).extend(&graph, 4).into_result(&graph);

        assert_eq!(path.describe(), "A -> B -> C -> D");
        assert_eq!(path.cost, 6.0);
        assert_eq!(path.hops, 3);
        assert_eq!(path.bottleneck, Some(Bottleneck { link: LinkId::new("B-C"), capacity: 30.0 }));
    }

    #[test]
    fn test_zero_hop_path_has_no_bottleneck() {
        let graph = chain_graph();
        let path = RawPath::start(1).into_result(&graph);

        assert_eq!(path.hops, 0);
        assert_eq!(path.cost, 0.0);
        assert!(path.bottleneck.is_none());
        assert!(path.is_loop_free());
    }

    #[test]
    fn test_join_matches_direct_extension() {
        let graph = chain_graph();
        let direct = RawPath::start(0).extend(&graph, 0).extend(&graph, 2).extend(&graph, 4);
        let spur = RawPath::start(1).extend(&graph, 2).extend(&graph, 4);

        let joined = RawPath::join(&graph, &[0, 1], &[0], &spur);

        assert_eq!(joined, direct);
        assert_eq!(joined.cost, direct.cost);
    }

    #[test]
    fn test_ordering_cost_then_hops_then_sequence() {
        let cheap = RawPath { nodes: vec![0, 3, 1], arcs: vec![0, 1], cost: Cost::from_metric(5.0) };
        let short = RawPath { nodes: vec![0, 1], arcs: vec![2], cost: Cost::from_metric(6.0) };
        assert!(cheap < short, "lower cost wins regardless of hops");

        let fewer_hops = RawPath { nodes: vec![0, 3, 1], arcs: vec![0, 1], cost: Cost::from_metric(6.0) };
        let more_hops = RawPath { nodes: vec![0, 2, 3, 1], arcs: vec![3, 4, 5], cost: Cost::from_metric(6.0) };
        assert!(fewer_hops < more_hops);

        let via_b = RawPath { nodes: vec![0, 1, 3], arcs: vec![7, 8], cost: Cost::from_metric(6.0) };
        let via_c = RawPath { nodes: vec![0, 2, 3], arcs: vec![0, 1], cost: Cost::from_metric(6.0) };
        assert!(via_b < via_c, "lexicographically smaller node sequence wins");
    }

    #[test]
    fn test_decimal_costs_that_sum_equal_compare_by_hops() {
        // 0.0 + 0.3 and 0.30000000000000004 are one f64 ulp apart but the same cost.
        let two_arcs = RawPath { nodes: vec![0, 1, 2], arcs: vec![0, 2], cost: Cost::from_metric(0.0) + Cost::from_metric(0.3) };
        let one_arc = RawPath { nodes: vec![0, 2], arcs: vec![4], cost: Cost::from_metric(0.30000000000000004) };

        assert_eq!(two_arcs.cost, one_arc.cost);
        assert!(one_arc < two_arcs);
    }
}

use crate::domain::graph::Graph;
use crate::domain::routing::path::RawPath;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

/// Parts of the graph a single search must not use.
#[derive(Debug, Clone)]
pub(crate) struct SearchExclusions {
    banned_nodes: Vec<bool>,
    banned_arcs: HashSet<usize>,
    banned_links: HashSet<usize>,
}

impl SearchExclusions {
    pub fn new(node_count: usize) -> Self {
        Self { banned_nodes: vec![false; node_count], banned_arcs: HashSet::new(), banned_links: HashSet::new() }
    }

    pub fn ban_node(&mut self, node: usize) {
        self.banned_nodes[node] = true;
    }

    pub fn ban_arc(&mut self, arc: usize) {
        self.banned_arcs.insert(arc);
    }

    /// Bans both directions of a link.
    pub fn ban_link(&mut self, link: usize) {
        self.banned_links.insert(link);
    }

    fn allows_node(&self, node: usize) -> bool {
        !self.banned_nodes[node]
    }

    fn allows_arc(&self, graph: &Graph, arc: usize) -> bool {
        !self.banned_arcs.contains(&arc) && !self.banned_links.contains(&graph.arc(arc).link) && self.allows_node(graph.arc(arc).to)
    }
}

/// Lowest ranked path from `source` to `target` that respects `exclusions`.
///
/// Labels are whole partial paths ordered like `RawPath`, so among equal cost paths the one
/// with fewer hops, then the lexicographically smaller node sequence, is returned. Costs are
/// fixed-point integers, so appending an arc preserves that order and never decreases a label,
/// which keeps label setting exact.
///
/// Runs in O((V + E) log V) heap operations, each label carrying its path.
pub(crate) fn shortest_path(graph: &Graph, source: usize, target: usize, exclusions: &SearchExclusions) -> Option<RawPath> {
    if !exclusions.allows_node(source) || !exclusions.allows_node(target) {
        return None;
    }

    let node_count = graph.node_count();
    let mut settled = vec![false; node_count];
    let mut best: Vec<Option<RawPath>> = vec![None; node_count];
    let mut open_set: BinaryHeap<Reverse<RawPath>> = BinaryHeap::new();

    open_set.push(Reverse(RawPath::start(source)));

    while let Some(Reverse(label)) = open_set.pop() {
        let node = label.last();
        if settled[node] {
            continue;
        }
        settled[node] = true;

        if node == target {
            return Some(label);
        }

        for &arc_index in graph.outgoing(node) {
            if !exclusions.allows_arc(graph, arc_index) {
                continue;
            }

            // Every node on `label` is settled, so this also keeps the path loop-free.
            let next_node = graph.arc(arc_index).to;
            if settled[next_node] {
                continue;
            }

            let next = label.extend(graph, arc_index);
            if best[next_node].as_ref().is_none_or(|current| next < *current) {
                best[next_node] = Some(next.clone());
                open_set.push(Reverse(next));
            }
        }
    }

    None
}

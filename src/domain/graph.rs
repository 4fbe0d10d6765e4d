use crate::domain::topology::Topology;
use crate::domain::utils::cost::Cost;
use crate::domain::utils::id::{LinkId, NodeId};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// One direction of a link.
///
/// Arc `2 * link` is the forward direction (`source -> target`), arc `2 * link + 1` the reverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphArc {
    pub from: usize,
    pub to: usize,

    /// Directed cost: the link's forward or reverse cost, depending on `reverse`.
    pub cost: Cost,

    pub capacity: f64,

    /// Index of the originating link, shared by both directions.
    pub link: usize,

    pub reverse: bool,
}

/// Directed, index-based view of a `Topology` used by the path search.
///
/// Nodes are indexed in ascending id order, so comparing node indices gives the same result
/// as comparing node ids. Outgoing arcs of a node are enumerated in link insertion order.
#[derive(Debug, Clone)]
pub struct Graph {
    node_ids: Vec<NodeId>,
    node_index: HashMap<NodeId, usize>,
    link_ids: Vec<LinkId>,
    arcs: Vec<GraphArc>,

    /// Outgoing arc indices per node.
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    pub fn build(topology: &Topology) -> Result<Graph> {
        let mut node_ids: Vec<NodeId> = topology.nodes().iter().map(|node| node.id.clone()).collect();
        node_ids.sort();
        node_ids.dedup();

        let node_index: HashMap<NodeId, usize> = node_ids.iter().enumerate().map(|(index, id)| (id.clone(), index)).collect();

        let mut link_ids = Vec::with_capacity(topology.links().len());
        let mut arcs = Vec::with_capacity(topology.links().len() * 2);
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_ids.len()];

        for (link_index, link) in topology.links().iter().enumerate() {
            link.validate_metrics()?;

            let lookup = |id: &NodeId| {
                node_index.get(id).copied().ok_or_else(|| Error::InvalidTopology(format!("link '{}' references unknown node '{}'", link.id, id)))
            };
            let source = lookup(&link.source)?;
            let target = lookup(&link.target)?;

            arcs.push(GraphArc { from: source, to: target, cost: Cost::from_metric(link.forward_cost), capacity: link.capacity, link: link_index, reverse: false });
            arcs.push(GraphArc { from: target, to: source, cost: Cost::from_metric(link.reverse_cost), capacity: link.capacity, link: link_index, reverse: true });
            link_ids.push(link.id.clone());

            // A self loop can never be part of a loop-free path.
            if source == target {
                log::debug!("Ignoring self loop {} on node {}", link.id, link.source);
                continue;
            }

            adjacency[source].push(2 * link_index);
            adjacency[target].push(2 * link_index + 1);
        }

        log::debug!("Graph built: {} nodes, {} links, {} arcs", node_ids.len(), link_ids.len(), arcs.len());

        Ok(Graph { node_ids, node_index, link_ids, arcs, adjacency })
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_ids.len()
    }

    pub fn node_index(&self, id: &NodeId) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_id(&self, index: usize) -> &NodeId {
        &self.node_ids[index]
    }

    /// All node ids in ascending order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn link_id(&self, link: usize) -> &LinkId {
        &self.link_ids[link]
    }

    pub fn arc(&self, arc: usize) -> &GraphArc {
        &self.arcs[arc]
    }

    /// Outgoing arc indices of `node`, in link insertion order.
    pub fn outgoing(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }
}

use crate::api::topology_dto::TopologyDto;
use crate::domain::utils::cost::MAX_LINK_COST;
use crate::domain::utils::id::{LinkId, NodeId};
use crate::error::{Error, Result};
use std::collections::HashSet;

/// A network element (router, site, PoP) that paths are computed between.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,

    /// Display name. Defaults to the id when the input carries none.
    pub name: String,

    pub country: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self { name: id.clone(), id: NodeId::new(id), country: None }
    }
}

/// A physical, bidirectional but asymmetric connection between two nodes.
///
/// Traversing `source -> target` costs `forward_cost`, traversing `target -> source` costs
/// `reverse_cost`. Both directions share one `capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub source: NodeId,
    pub target: NodeId,
    pub forward_cost: f64,
    pub reverse_cost: f64,
    pub capacity: f64,
}

impl Link {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>, forward_cost: f64, reverse_cost: f64, capacity: f64) -> Self {
        Self { id: LinkId::new(id), source: NodeId::new(source), target: NodeId::new(target), forward_cost, reverse_cost, capacity }
    }

    /// Rejects metrics that are negative, NaN or infinite, and costs above `MAX_LINK_COST`.
    pub fn validate_metrics(&self) -> Result<()> {
        validate_metric(&self.id, "forwardCost", self.forward_cost, MAX_LINK_COST)?;
        validate_metric(&self.id, "reverseCost", self.reverse_cost, MAX_LINK_COST)?;
        validate_metric(&self.id, "capacity", self.capacity, f64::MAX)
    }
}

fn validate_metric(link: &LinkId, field: &'static str, value: f64, max: f64) -> Result<()> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidMetric { link: link.to_string(), field, value })
    }
}

/// An immutable snapshot of a network: unique nodes plus links between them.
///
/// Construction validates the whole snapshot, so a `Topology` value is always consistent.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl Topology {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Result<Self> {
        let mut node_ids: HashSet<&NodeId> = HashSet::new();
        for node in &nodes {
            if !node_ids.insert(&node.id) {
                return Err(Error::InvalidTopology(format!("duplicate node id '{}'", node.id)));
            }
        }

        let mut link_ids: HashSet<&LinkId> = HashSet::new();
        for link in &links {
            if !link_ids.insert(&link.id) {
                return Err(Error::InvalidTopology(format!("duplicate link id '{}'", link.id)));
            }

            for endpoint in [&link.source, &link.target] {
                if !node_ids.contains(endpoint) {
                    return Err(Error::InvalidTopology(format!("link '{}' references unknown node '{}'", link.id, endpoint)));
                }
            }

            link.validate_metrics()?;
        }

        log::debug!("Topology validated: {} nodes, {} links", nodes.len(), links.len());

        Ok(Self { nodes, links })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Links in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == *id)
    }
}

impl TryFrom<TopologyDto> for Topology {
    type Error = Error;

    fn try_from(dto: TopologyDto) -> Result<Self> {
        let nodes = dto
            .nodes
            .into_iter()
            .map(|node| Node { name: node.name.unwrap_or_else(|| node.id.clone()), id: NodeId::new(node.id), country: node.country })
            .collect();

        let links = dto
            .links
            .into_iter()
            .map(|link| {
                let reverse_cost = link.reverse_cost.unwrap_or(link.forward_cost);
                Link::new(link.id, link.source, link.target, link.forward_cost, reverse_cost, link.capacity)
            })
            .collect();

        Topology::new(nodes, links)
    }
}

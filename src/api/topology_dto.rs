use serde::{Deserialize, Serialize};

/// Topology as it is handed over by the persistence layer or uploaded by a user.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyDto {
    pub nodes: Vec<NodeDto>,
    #[serde(default)]
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDto {
    pub id: String,
    pub name: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDto {
    pub id: String,
    pub source: String,
    pub target: String,
    pub forward_cost: f64,
    /// Cost of traversing target -> source. Falls back to `forward_cost` when omitted.
    pub reverse_cost: Option<f64>,
    pub capacity: f64,
}

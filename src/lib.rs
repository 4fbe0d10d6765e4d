use crate::api::topology_dto::TopologyDto;
use crate::config::AnalysisConfig;
use crate::domain::bulk::{BulkResultSet, analyze_all};
use crate::domain::graph::Graph;
use crate::domain::topology::Topology;
use crate::domain::utils::id::NodeId;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod loader;
pub mod logger;

/// Reads and validates a topology JSON file.
pub fn load_topology(file_path: &str) -> Result<Topology> {
    let dto: TopologyDto = parse_json_file(file_path)?;
    log::info!("Topology file '{}' parsed: {} nodes, {} links", file_path, dto.nodes.len(), dto.links.len());

    Topology::try_from(dto)
}

/// Loads a topology file and runs the bulk primary/backup analysis over `subset`
/// (all nodes when `None`).
pub fn analyze_topology_file(file_path: &str, config: &AnalysisConfig, subset: Option<&[NodeId]>) -> Result<BulkResultSet> {
    config.validate()?;

    let topology = load_topology(file_path)?;
    let graph = Graph::build(&topology)?;

    analyze_all(&graph, subset, &config.bulk_options())
}

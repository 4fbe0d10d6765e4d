use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use topo_route_engine::config::AnalysisConfig;
use topo_route_engine::domain::bulk::analyze_all;
use topo_route_engine::domain::graph::Graph;
use topo_route_engine::domain::report::to_routing_tables;
use topo_route_engine::domain::routing::{PathPolicy, k_shortest_paths};
use topo_route_engine::domain::utils::id::NodeId;
use topo_route_engine::export::flat_table::write_flat_table;
use topo_route_engine::export::json_report::write_json_report;
use topo_route_engine::export::path_list::write_path_list;
use topo_route_engine::export::routing_csv::write_routing_tables;
use topo_route_engine::logger::{self, LogOptions};
use topo_route_engine::load_topology;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One CSV row per node pair
    Table,
    /// JSON summary plus all paths
    Report,
    /// Per-source routing tables as CSV
    Routing,
}

/// Ranked alternative routes and redundancy reports for a network topology.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Topology JSON file (nodes and links)
    topology: String,

    /// Analysis configuration JSON file
    #[arg(long)]
    config: Option<String>,

    /// Source node for a single-pair query (requires --target)
    #[arg(long, requires = "target")]
    source: Option<String>,

    /// Target node for a single-pair query
    #[arg(long, requires = "source")]
    target: Option<String>,

    /// Restrict the bulk analysis to these nodes
    #[arg(long, value_delimiter = ',', conflicts_with = "source")]
    nodes: Option<Vec<String>>,

    /// Number of paths for a single-pair query
    #[arg(short)]
    k: Option<usize>,

    /// Only report paths that share no link with a better path
    #[arg(long)]
    disjoint: bool,

    /// Worker threads for the bulk analysis (1 runs sequentially)
    #[arg(long)]
    threads: Option<usize>,

    /// Abort the bulk analysis after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<String>,

    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Log file
    #[arg(long, default_value = "logs/route_engine.log")]
    log_file: PathBuf,

    /// Log to stderr only
    #[arg(long, conflicts_with = "log_file")]
    no_log_file: bool,
}

impl Cli {
    fn log_options(&self) -> LogOptions {
        LogOptions { level: self.log_level.clone(), file: (!self.no_log_file).then(|| self.log_file.clone()) }
    }

    fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(k) = self.k {
            config.k = k;
        }
        if self.disjoint {
            config.path_policy = PathPolicy::LinkDisjoint;
        }
        if let Some(threads) = self.threads {
            config.parallel = threads > 1;
            config.threads = Some(threads);
        }
        if self.timeout_ms.is_some() {
            config.timeout_ms = self.timeout_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(&cli.log_options());

    let config = cli.analysis_config()?;

    let topology = load_topology(&cli.topology).with_context(|| format!("loading topology '{}'", cli.topology))?;
    let graph = Graph::build(&topology)?;

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| format!("creating output file '{}'", path))?)),
        None => Box::new(io::stdout().lock()),
    };

    if let (Some(source), Some(target)) = (&cli.source, &cli.target) {
        let (source, target) = (NodeId::new(source.as_str()), NodeId::new(target.as_str()));
        for id in [&source, &target] {
            if topology.node(id).is_none() {
                log::warn!("Node '{}' is not part of the topology", id);
            }
        }

        let paths = k_shortest_paths(&graph, &source, &target, config.k, config.path_policy);
        write_path_list(&mut out, &source, &target, &paths)?;
        out.flush()?;
        return Ok(());
    }

    let subset: Option<Vec<NodeId>> = cli.nodes.as_ref().map(|nodes| nodes.iter().map(|id| NodeId::new(id.trim())).collect());
    let results = analyze_all(&graph, subset.as_deref(), &config.bulk_options())?;

    match cli.format {
        OutputFormat::Table => write_flat_table(&mut out, &results)?,
        OutputFormat::Report => write_json_report(&mut out, &results)?,
        OutputFormat::Routing => write_routing_tables(&mut out, &to_routing_tables(&results))?,
    }
    out.flush()?;

    Ok(())
}

//! All-pairs primary/backup analysis over a node subset.
//!
//! Every unordered pair of the subset is analysed once, so the work grows with n * (n - 1) / 2
//! times the cost of one `k_shortest_paths` call. This is the scaling limit for large
//! topologies; run in parallel and pass a deadline or a `CancellationToken` for those.

use crate::domain::graph::Graph;
use crate::domain::routing::{PathPolicy, PathResult, k_shortest_paths};
use crate::domain::utils::id::NodeId;
use crate::error::{Error, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

/// Primary plus one backup path.
const PATHS_PER_PAIR: usize = 2;

/// Shared flag used to abort a running bulk analysis from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct BulkOptions {
    pub policy: PathPolicy,

    /// Spread pairs over a rayon thread pool.
    pub parallel: bool,

    /// Worker count for the parallel run. `None` uses rayon's default.
    pub threads: Option<usize>,

    /// Stop with `Error::Cancelled` once this instant has passed.
    pub deadline: Option<Instant>,

    pub cancellation: Option<CancellationToken>,
}

impl Default for BulkOptions {
    fn default() -> Self {
        Self { policy: PathPolicy::Shortest, parallel: true, threads: None, deadline: None, cancellation: None }
    }
}

impl BulkOptions {
    fn should_stop(&self) -> bool {
        self.cancellation.as_ref().is_some_and(|token| token.is_cancelled()) || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Result for one node pair that has at least one path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairOutcome {
    pub source: NodeId,
    pub target: NodeId,
    pub primary: PathResult,
    pub backup: Option<PathResult>,
    pub has_redundancy: bool,
}

impl PairOutcome {
    pub fn new(source: NodeId, target: NodeId, primary: PathResult, backup: Option<PathResult>) -> Self {
        let has_redundancy = backup.is_some();
        Self { source, target, primary, backup, has_redundancy }
    }
}

/// Outcomes in pair order: sources ascending, and for each source the targets ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResultSet {
    pub outcomes: Vec<PairOutcome>,

    /// Pairs that were searched but have no path at all.
    pub unreachable_pairs: usize,
}

impl BulkResultSet {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }
}

/// Primary and backup path for a single pair, `None` when the pair is disconnected.
///
/// Pure function of the graph, safe to call from many threads at once.
pub fn analyze_pair(graph: &Graph, source: &NodeId, target: &NodeId, policy: PathPolicy) -> Option<PairOutcome> {
    let mut paths = k_shortest_paths(graph, source, target, PATHS_PER_PAIR, policy).into_iter();

    let primary = paths.next()?;
    let backup = paths.next();

    Some(PairOutcome::new(source.clone(), target.clone(), primary, backup))
}

/// Runs `analyze_pair` for every unordered pair of `subset` (all graph nodes when `None`).
///
/// Duplicate ids collapse and ids unknown to the graph are skipped with a warning. The
/// order of `subset` does not matter: pairs are formed over the ids sorted ascending.
pub fn analyze_all(graph: &Graph, subset: Option<&[NodeId]>, options: &BulkOptions) -> Result<BulkResultSet> {
    let nodes = select_nodes(graph, subset);
    let pairs: Vec<(&NodeId, &NodeId)> =
        nodes.iter().enumerate().flat_map(|(i, source)| nodes[i + 1..].iter().map(move |target| (*source, *target))).collect();

    log::info!("Bulk analysis started: {} nodes, {} pairs, policy {:?}, parallel {}", nodes.len(), pairs.len(), options.policy, options.parallel);

    let per_pair = if options.parallel && pairs.len() > 1 { run_parallel(graph, &pairs, options)? } else { run_sequential(graph, &pairs, options)? };

    let unreachable_pairs = per_pair.iter().filter(|outcome| outcome.is_none()).count();
    let outcomes: Vec<PairOutcome> = per_pair.into_iter().flatten().collect();

    log::info!("Bulk analysis finished: {} pairs with paths, {} unreachable", outcomes.len(), unreachable_pairs);

    Ok(BulkResultSet { outcomes, unreachable_pairs })
}

fn select_nodes<'a>(graph: &'a Graph, subset: Option<&[NodeId]>) -> Vec<&'a NodeId> {
    let Some(subset) = subset else {
        return graph.node_ids().iter().collect();
    };

    let mut indices: BTreeSet<usize> = BTreeSet::new();
    for id in subset {
        match graph.node_index(id) {
            Some(index) => {
                indices.insert(index);
            }
            None => log::warn!("Ignoring unknown node '{}' in bulk analysis subset", id),
        }
    }

    // Index order is id order.
    indices.into_iter().map(|index| graph.node_id(index)).collect()
}

fn run_sequential(graph: &Graph, pairs: &[(&NodeId, &NodeId)], options: &BulkOptions) -> Result<Vec<Option<PairOutcome>>> {
    let mut per_pair = Vec::with_capacity(pairs.len());

    for (completed, (source, target)) in pairs.iter().enumerate() {
        if options.should_stop() {
            log::warn!("Bulk analysis cancelled after {} of {} pairs", completed, pairs.len());
            return Err(Error::Cancelled { completed, total: pairs.len() });
        }
        per_pair.push(analyze_pair(graph, source, target, options.policy));
    }

    Ok(per_pair)
}

fn run_parallel(graph: &Graph, pairs: &[(&NodeId, &NodeId)], options: &BulkOptions) -> Result<Vec<Option<PairOutcome>>> {
    let completed = AtomicUsize::new(0);

    let work = || -> Result<Vec<Option<PairOutcome>>> {
        // Indexed collect keeps the pair order regardless of which worker finished first.
        pairs
            .par_iter()
            .map(|(source, target)| {
                if options.should_stop() {
                    return Err(Error::Cancelled { completed: completed.load(Ordering::Relaxed), total: pairs.len() });
                }
                let outcome = analyze_pair(graph, source, target, options.policy);
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(outcome)
            })
            .collect()
    };

    let result = match options.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| Error::InvalidConfig(format!("cannot start {} worker threads: {}", threads, e)))?;
            pool.install(work)
        }
        None => work(),
    };

    if let Err(Error::Cancelled { completed, total }) = &result {
        log::warn!("Bulk analysis cancelled after {} of {} pairs", completed, total);
    }

    result
}

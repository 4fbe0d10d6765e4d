use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use topo_route_engine::domain::bulk::{BulkOptions, analyze_all};
use topo_route_engine::domain::graph::Graph;
use topo_route_engine::domain::routing::{PathPolicy, PathResult, k_shortest_paths};
use topo_route_engine::domain::topology::{Link, Node, Topology};
use topo_route_engine::domain::utils::id::NodeId;

use std::collections::{HashMap, HashSet};

const SEEDS: [u64; 6] = [1, 7, 42, 1337, 2024, 99_991];

/// Whole costs for the integer runs; tenths make many sums collide after f64 rounding.
const COST_SCALES: [i64; 2] = [1, 10];

/// Random topology with at most one link per node pair. Costs are `ticks / cost_scale` for a
/// random integer tick count, so the brute force below can add them up exactly.
fn random_topology(rng: &mut StdRng, node_count: usize, link_probability: f64, cost_scale: i64) -> Topology {
    let nodes: Vec<Node> = (0..node_count).map(|i| Node::new(format!("N{:02}", i))).collect();
    let mut links = Vec::new();

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            if rng.random_bool(link_probability) {
                let (source, target) = if rng.random_bool(0.5) { (i, j) } else { (j, i) };
                links.push(Link::new(
                    format!("L{:02}-{:02}", source, target),
                    format!("N{:02}", source),
                    format!("N{:02}", target),
                    rng.random_range(0..=10 * cost_scale) as f64 / cost_scale as f64,
                    rng.random_range(0..=10 * cost_scale) as f64 / cost_scale as f64,
                    rng.random_range(1..=5) as f64 * 10.0,
                ));
            }
        }
    }

    Topology::new(nodes, links).unwrap()
}

/// Directed view used by the brute force enumeration: node -> (neighbour, cost in ticks).
fn arcs_of(topology: &Topology, cost_scale: i64) -> HashMap<String, Vec<(String, i64)>> {
    let ticks = |cost: f64| (cost * cost_scale as f64).round() as i64;

    let mut arcs: HashMap<String, Vec<(String, i64)>> = HashMap::new();
    for link in topology.links() {
        arcs.entry(link.source.to_string()).or_default().push((link.target.to_string(), ticks(link.forward_cost)));
        arcs.entry(link.target.to_string()).or_default().push((link.source.to_string(), ticks(link.reverse_cost)));
    }
    arcs
}

/// Every loop-free path from `source` to `target` as (cost, nodes), ranked like the engine ranks them.
fn all_simple_paths(arcs: &HashMap<String, Vec<(String, i64)>>, source: &str, target: &str, cost_scale: i64) -> Vec<(f64, Vec<String>)> {
    fn walk(arcs: &HashMap<String, Vec<(String, i64)>>, target: &str, path: &mut Vec<String>, ticks: i64, found: &mut Vec<(i64, Vec<String>)>) {
        let current = path[path.len() - 1].clone();
        if current == target {
            found.push((ticks, path.clone()));
            return;
        }
        for (next, arc_ticks) in arcs.get(&current).map(|v| v.as_slice()).unwrap_or(&[]) {
            if path.contains(next) {
                continue;
            }
            path.push(next.clone());
            walk(arcs, target, path, ticks + arc_ticks, found);
            path.pop();
        }
    }

    let mut found = Vec::new();
    walk(arcs, target, &mut vec![source.to_string()], 0, &mut found);
    found.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.len().cmp(&b.1.len())).then_with(|| a.1.cmp(&b.1)));
    found.into_iter().map(|(ticks, nodes)| (ticks as f64 / cost_scale as f64, nodes)).collect()
}

fn node_names(path: &PathResult) -> Vec<String> {
    path.nodes.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_yen_matches_brute_force_ranking() {
    for cost_scale in COST_SCALES {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let topology = random_topology(&mut rng, 7, 0.45, cost_scale);
            let graph = Graph::build(&topology).unwrap();
            let arcs = arcs_of(&topology, cost_scale);

            for source in graph.node_ids() {
                for target in graph.node_ids() {
                    if source == target {
                        continue;
                    }
                    let expected = all_simple_paths(&arcs, source.as_str(), target.as_str(), cost_scale);
                    let found = k_shortest_paths(&graph, source, target, 5, PathPolicy::Shortest);

                    let expected_top: Vec<(f64, Vec<String>)> = expected.into_iter().take(5).collect();
                    let found_top: Vec<(f64, Vec<String>)> = found.iter().map(|p| (p.cost, node_names(p))).collect();

                    assert_eq!(found_top, expected_top, "scale {} seed {} {} -> {}", cost_scale, seed, source, target);
                }
            }
        }
    }
}

#[test]
fn test_path_invariants_hold() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let topology = random_topology(&mut rng, 9, 0.35, 10);
        let graph = Graph::build(&topology).unwrap();
        let capacities: HashMap<String, f64> = topology.links().iter().map(|l| (l.id.to_string(), l.capacity)).collect();

        for policy in [PathPolicy::Shortest, PathPolicy::LinkDisjoint] {
            for source in graph.node_ids() {
                for target in graph.node_ids() {
                    let paths = k_shortest_paths(&graph, source, target, 4, policy);

                    assert_eq!(paths, k_shortest_paths(&graph, source, target, 4, policy), "deterministic");

                    for path in &paths {
                        assert!(path.is_loop_free());
                        assert_eq!(path.source(), Some(source));
                        assert_eq!(path.target(), Some(target));
                        assert_eq!(path.hops, path.nodes.len() - 1);
                        assert_eq!(path.links.len(), path.hops);

                        let min_capacity = path.links.iter().map(|l| capacities[l.as_str()]).fold(f64::INFINITY, f64::min);
                        let bottleneck = path.bottleneck.as_ref().expect("non-empty path has a bottleneck");
                        assert_eq!(bottleneck.capacity, min_capacity);
                        let first_min = path.links.iter().find(|l| capacities[l.as_str()] == min_capacity).unwrap();
                        assert_eq!(&bottleneck.link, first_min);
                    }

                    assert!(paths.windows(2).all(|w| w[0].cost <= w[1].cost), "seed {} {} -> {}: costs not monotonic", seed, source, target);

                    if policy == PathPolicy::LinkDisjoint {
                        let mut used = HashSet::new();
                        for path in &paths {
                            for link in &path.links {
                                assert!(used.insert(link.clone()), "link {} reused by disjoint paths", link);
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_bulk_enumeration_is_order_independent() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let topology = random_topology(&mut rng, 10, 0.3, 1);
        let graph = Graph::build(&topology).unwrap();

        let mut subset: Vec<NodeId> = graph.node_ids().iter().filter(|_| rng.random_bool(0.7)).cloned().collect();
        let reference = analyze_all(&graph, Some(subset.as_slice()), &BulkOptions { parallel: false, ..BulkOptions::default() }).unwrap();

        subset.shuffle(&mut rng);
        if let Some(first) = subset.first().cloned() {
            subset.push(first);
        }
        let shuffled = analyze_all(&graph, Some(subset.as_slice()), &BulkOptions::default()).unwrap();

        assert_eq!(reference, shuffled, "seed {}", seed);

        let mut seen = HashSet::new();
        for outcome in &reference.outcomes {
            assert!(outcome.source < outcome.target);
            assert!(seen.insert((outcome.source.clone(), outcome.target.clone())), "pair visited twice");
            assert_eq!(outcome.has_redundancy, outcome.backup.is_some());

            let paths = k_shortest_paths(&graph, &outcome.source, &outcome.target, 2, PathPolicy::Shortest);
            assert_eq!(outcome.has_redundancy, paths.len() == 2);
        }

        let distinct = subset.iter().collect::<HashSet<_>>().len();
        assert_eq!(reference.len() + reference.unreachable_pairs, distinct * distinct.saturating_sub(1) / 2);
    }
}

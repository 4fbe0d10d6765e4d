mod dijkstra;
pub mod k_shortest;
pub mod path;

pub use k_shortest::{PathPolicy, k_shortest_paths};
pub use path::{Bottleneck, PathResult};

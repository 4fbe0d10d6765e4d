pub mod bulk;
pub mod graph;
pub mod report;
pub mod routing;
pub mod topology;
pub mod utils;

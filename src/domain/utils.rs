pub mod cost;
pub mod id;

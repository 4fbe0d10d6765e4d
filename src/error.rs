use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write CSV export: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Invalid metric on link {link}: {field} = {value} (must be finite and non-negative)")]
    InvalidMetric { link: String, field: &'static str, value: f64 },

    #[error("Invalid analysis configuration: {0}")]
    InvalidConfig(String),

    #[error("Bulk analysis cancelled after {completed} of {total} pairs")]
    Cancelled { completed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

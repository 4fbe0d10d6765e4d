use crate::domain::bulk::BulkOptions;
use crate::domain::routing::PathPolicy;
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Tunables for an analysis run, usually read from a JSON file and refined by CLI flags.
///
/// ```json
/// { "k": 3, "pathPolicy": "linkDisjoint", "parallel": true, "threads": 4, "timeoutMs": 60000 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// Paths per pair in single-pair mode. Bulk mode always asks for primary and backup.
    pub k: usize,
    pub path_policy: PathPolicy,
    pub parallel: bool,
    pub threads: Option<usize>,
    pub timeout_ms: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { k: 2, path_policy: PathPolicy::Shortest, parallel: true, threads: None, timeout_ms: None }
    }
}

impl AnalysisConfig {
    pub fn from_file(file_path: &str) -> Result<Self> {
        let config: AnalysisConfig = parse_json_file(file_path)?;
        config.validate()?;
        log::info!("Analysis configuration loaded from '{}'", file_path);

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be at least 1".to_string()));
        }
        if self.threads == Some(0) {
            return Err(Error::InvalidConfig("threads must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Bulk options for a run starting now; the timeout becomes an absolute deadline.
    pub fn bulk_options(&self) -> BulkOptions {
        BulkOptions {
            policy: self.path_policy,
            parallel: self.parallel,
            threads: self.threads,
            deadline: self.timeout_ms.map(|timeout| Instant::now() + Duration::from_millis(timeout)),
            cancellation: None,
        }
    }
}

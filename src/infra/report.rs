// ============================================================
// Layer 6 - Run Report
// ============================================================
// Saves the effective configuration together with the run
// statistics as pretty-printed JSON.
//
// Why keep a report next to the data?
//   The train/val files alone do not say how they were made.
//   With the config and the drop counters on disk, a later
//   fine-tuning run can be traced back to the exact split and
//   the preprocessing yield.
//
// Example output:
//   {
//     "config": { "input": "data/raw/APCD.csv", "seed": 42, ... },
//     "stats":  { "records_read": 1831770, "couplets_emitted": ..., ... }
//   }

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::application::prepare_use_case::PrepareConfig;
use crate::domain::error::PrepError;
use crate::domain::stats::RunStats;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub config: PrepareConfig,
    pub stats:  RunStats,
}

impl RunReport {
    pub fn new(config: PrepareConfig, stats: RunStats) -> Self {
        Self { config, stats }
    }

    /// Write the report to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let fail = |source| PrepError::Output { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(fail)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(fail)?;

        tracing::debug!("Saved run report to '{}'", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl RunReport {
        pub fn load(path: &Path) -> Result<Self> {
            let json = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        }
    }

    #[test]
    fn test_save_and_reload() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/run.json");

        let mut stats = RunStats { records_read: 12, couplets_emitted: 4, ..Default::default() };
        stats.record_unknown_meter("النثر");

        RunReport::new(PrepareConfig::default(), stats.clone()).save(&path).unwrap();
        let loaded = RunReport::load(&path).unwrap();

        assert_eq!(loaded.stats, stats);
        assert_eq!(loaded.config.seed, PrepareConfig::default().seed);
    }
}

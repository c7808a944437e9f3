//! Batch configuration from TOML (`[batch]` section)

use debate_application::BatchSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBatchConfig {
    /// Debates running at the same time
    pub concurrency: usize,
    /// Resume: leave existing `<id>.json` records alone
    pub skip_existing: bool,
}

impl Default for FileBatchConfig {
    fn default() -> Self {
        let defaults = BatchSettings::default();
        Self {
            concurrency: defaults.concurrency,
            skip_existing: defaults.skip_existing,
        }
    }
}

impl FileBatchConfig {
    pub fn to_settings(&self) -> BatchSettings {
        BatchSettings::default()
            .with_concurrency(self.concurrency)
            .with_skip_existing(self.skip_existing)
    }
}

//! Corpus batch driver settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Debate instances running at the same time
    pub concurrency: usize,
    /// Leave instances whose record already exists untouched
    pub skip_existing: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            concurrency: 4,
            skip_existing: true,
        }
    }
}

impl BatchSettings {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }
}

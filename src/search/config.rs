//! Search configuration

use crate::search::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default quiet period after the last query edit
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Default cap on the number of published hits
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// Search aggregator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period in milliseconds before a query edit is scored
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of hits kept after ranking
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Record Prometheus metrics for computations and feed failures
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_results: DEFAULT_MAX_RESULTS,
            metrics_enabled: true,
        }
    }
}

impl SearchConfig {
    /// Debounce window as a duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check that the configuration can produce results
    pub fn validate(&self) -> SearchResult<()> {
        if self.max_results == 0 {
            return Err(SearchError::InvalidConfiguration(
                "max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.debounce_ms = ms;
        self
    }

    pub fn max_results(mut self, max: usize) -> Self {
        self.config.max_results = max;
        self
    }

    pub fn metrics_enabled(mut self, enabled: bool) -> Self {
        self.config.metrics_enabled = enabled;
        self
    }

    pub fn build(self) -> SearchResult<SearchConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

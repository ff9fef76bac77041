//! Prometheus metrics for the search aggregator

use crate::error::{AppError, Result};
use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_histogram, Counter, CounterVec, Encoder,
    Histogram, TextEncoder,
};

/// Search metrics collection
pub struct SearchMetrics {
    /// Completed ranking passes, by trigger (query | feed)
    pub computations_total: CounterVec,

    /// Computations dropped because a newer query superseded them
    pub stale_discards_total: Counter,

    /// Time spent scoring and ranking one pass
    pub computation_duration: Histogram,

    /// Number of hits published per pass
    pub result_count: Histogram,

    /// Failures reported by the live complaint feed
    pub feed_failures_total: Counter,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self {
            computations_total: register_counter_vec!(
                "search_computations_total",
                "Total number of completed search computations",
                &["trigger"]
            )
            .unwrap(),

            stale_discards_total: register_counter!(
                "search_stale_discards_total",
                "Total number of search computations discarded as stale"
            )
            .unwrap(),

            computation_duration: register_histogram!(
                "search_computation_duration_seconds",
                "Search computation duration in seconds",
                vec![0.00001, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]
            )
            .unwrap(),

            result_count: register_histogram!(
                "search_result_count",
                "Number of hits published per computation",
                vec![0.0, 1.0, 3.0, 5.0, 10.0, 15.0, 25.0, 50.0]
            )
            .unwrap(),

            feed_failures_total: register_counter!(
                "search_feed_failures_total",
                "Total number of complaint feed failures observed"
            )
            .unwrap(),
        }
    }

    /// Record a published computation
    pub fn record_computation(&self, trigger: &str, hits: usize, duration_secs: f64) {
        self.computations_total.with_label_values(&[trigger]).inc();
        self.computation_duration.observe(duration_secs);
        self.result_count.observe(hits as f64);
    }

    pub fn record_stale_discard(&self) {
        self.stale_discards_total.inc();
    }

    pub fn record_feed_failure(&self) {
        self.feed_failures_total.inc();
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    /// Global search metrics instance
    pub static ref SEARCH_METRICS: SearchMetrics = SearchMetrics::new();
}

/// Initialize search metrics (forces lazy registration)
pub fn init_search_metrics() {
    lazy_static::initialize(&SEARCH_METRICS);
}

/// Render the default registry in the Prometheus text format
pub fn gather_text() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| AppError::Serialization(format!("metrics encoding failed: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| AppError::Serialization(format!("metrics are not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_render() {
        init_search_metrics();
        SEARCH_METRICS.record_computation("query", 3, 0.0002);

        let text = gather_text().unwrap();
        assert!(text.contains("search_computations_total"));
        assert!(text.contains("trigger=\"query\""));
    }
}

//! Live search aggregator
//!
//! Owns the current query and ranked hits, and keeps them consistent with the
//! live complaint feed and the static directory catalogs.

use crate::catalog::Catalog;
use crate::models::{ComplaintRecord, DepartmentRecord, ServiceRecord};
use crate::search::config::SearchConfig;
use crate::search::document::{SearchHit, SearchableRecord};
use crate::search::error::SearchError;
use crate::search::feed::{ComplaintFeed, FeedState};
use crate::search::metrics::{SearchMetrics, SEARCH_METRICS};
use crate::search::scoring;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use strum::Display;
use tokio::sync::watch;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Lifecycle of the current query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchPhase {
    /// Query is empty
    Idle,
    /// Debounce window is open
    Pending,
    /// Scoring is in progress
    Computing,
    /// Results for the current query are published
    Settled,
}

/// Observable search state
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub results: Arc<[SearchHit]>,
    pub phase: SearchPhase,
}

impl SearchState {
    fn idle(query: String) -> Self {
        Self {
            query,
            results: Arc::from(Vec::new()),
            phase: SearchPhase::Idle,
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.phase, SearchPhase::Pending | SearchPhase::Computing)
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::idle(String::new())
    }
}

/// Aggregator counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregatorStats {
    /// Computations whose results were published
    pub computations: u64,
    /// Computations dropped because the query changed underneath them
    pub stale_discards: u64,
    /// Feed states received, including the initial one
    pub feed_updates: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
enum Trigger {
    Query,
    Feed,
}

/// Score, filter, sort and cap candidates for a query.
///
/// Zero-score candidates are dropped. The sort is stable, so equal scores keep
/// candidate order.
pub fn rank<'a>(
    query: &str,
    candidates: impl IntoIterator<Item = SearchableRecord<'a>>,
    limit: usize,
) -> Vec<SearchHit> {
    if query.trim().is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(f64, SearchableRecord<'a>)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = scoring::score(&candidate.searchable_text(), query);
            (score > 0.0).then_some((score, candidate))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(score, candidate)| candidate.to_hit(score))
        .collect()
}

struct Shared {
    config: SearchConfig,
    departments: Vec<DepartmentRecord>,
    services: Vec<ServiceRecord>,
    complaints: RwLock<Arc<[ComplaintRecord]>>,
    state: watch::Sender<SearchState>,
    upstream: watch::Sender<Option<SearchError>>,
    // Bumped inside the state lock on every query edit and clear.
    generation: AtomicU64,
    // Serializes computations so each one reads the newest snapshot.
    compute_lock: Mutex<()>,
    computations: AtomicU64,
    stale_discards: AtomicU64,
    feed_updates: AtomicU64,
}

impl Shared {
    fn metrics(&self) -> Option<&'static SearchMetrics> {
        self.config.metrics_enabled.then(|| &*SEARCH_METRICS)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn candidates<'a>(
        &'a self,
        complaints: &'a [ComplaintRecord],
    ) -> impl Iterator<Item = SearchableRecord<'a>> {
        complaints
            .iter()
            .map(SearchableRecord::Complaint)
            .chain(self.departments.iter().map(SearchableRecord::Department))
            .chain(self.services.iter().map(SearchableRecord::Service))
    }

    fn compute(&self, generation: u64, trigger: Trigger) {
        let _serial = self.compute_lock.lock();

        let mut query = None;
        self.state.send_if_modified(|state| {
            if !self.is_current(generation) || state.query.trim().is_empty() {
                return false;
            }
            state.phase = SearchPhase::Computing;
            query = Some(state.query.clone());
            true
        });
        let Some(query) = query else {
            self.discard_stale(trigger);
            return;
        };

        let started = Instant::now();
        let complaints = Arc::clone(&*self.complaints.read());
        let hits: Arc<[SearchHit]> =
            rank(&query, self.candidates(&complaints), self.config.max_results).into();
        let elapsed = started.elapsed();
        let count = hits.len();

        let published = self.state.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            state.results = hits;
            state.phase = SearchPhase::Settled;
            true
        });
        if !published {
            self.discard_stale(trigger);
            return;
        }

        self.computations.fetch_add(1, Ordering::Relaxed);
        if let Some(metrics) = self.metrics() {
            metrics.record_computation(&trigger.to_string(), count, elapsed.as_secs_f64());
        }
        debug!(
            query = %query,
            hits = count,
            trigger = %trigger,
            elapsed_us = elapsed.as_micros() as u64,
            "Search settled"
        );
    }

    fn discard_stale(&self, trigger: Trigger) {
        self.stale_discards.fetch_add(1, Ordering::Relaxed);
        if let Some(metrics) = self.metrics() {
            metrics.record_stale_discard();
        }
        debug!(trigger = %trigger, "Stale search computation discarded");
    }

    fn apply_feed_state(&self, feed_state: FeedState) {
        self.feed_updates.fetch_add(1, Ordering::Relaxed);
        *self.complaints.write() = feed_state.records();

        match feed_state {
            FeedState::Ready(records) => {
                if self.upstream.send_if_modified(|error| error.take().is_some()) {
                    info!(complaints = records.len(), "Complaint feed recovered");
                }
            }
            FeedState::Failed(reason) => {
                warn!(
                    reason = %reason,
                    "Complaint feed failed; searching departments and services only"
                );
                if let Some(metrics) = self.metrics() {
                    metrics.record_feed_failure();
                }
                self.upstream
                    .send_replace(Some(SearchError::UpstreamUnavailable(reason)));
            }
            FeedState::Connecting => {}
        }

        self.refresh_for_feed();
    }

    // Feed changes recompute immediately, except while a debounce window is open.
    fn refresh_for_feed(&self) {
        let generation = {
            let state = self.state.borrow();
            match state.phase {
                SearchPhase::Settled | SearchPhase::Computing => {
                    self.generation.load(Ordering::SeqCst)
                }
                SearchPhase::Idle | SearchPhase::Pending => return,
            }
        };
        self.compute(generation, Trigger::Feed);
    }
}

async fn listen(shared: Arc<Shared>, mut feed: watch::Receiver<FeedState>) {
    while feed.changed().await.is_ok() {
        let feed_state = feed.borrow_and_update().clone();
        shared.apply_feed_state(feed_state);
    }
    shared.apply_feed_state(FeedState::Failed("complaint feed closed".to_string()));
}

/// Debounced, feed-aware search over complaints, departments and services.
///
/// Debouncing and live feed updates run on the current tokio runtime. Without
/// one, queries are computed synchronously and feed changes after construction
/// are not picked up. Dropping the aggregator disposes it.
pub struct SearchAggregator {
    shared: Arc<Shared>,
    debounce: Mutex<Option<JoinHandle<()>>>,
    feed_task: Mutex<Option<JoinHandle<()>>>,
    disposed: AtomicBool,
}

impl SearchAggregator {
    /// Create an aggregator over a live feed and the two static catalogs
    pub fn new(
        feed: &dyn ComplaintFeed,
        departments: Vec<DepartmentRecord>,
        services: Vec<ServiceRecord>,
        config: SearchConfig,
    ) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        let (upstream, _) = watch::channel(None);

        let shared = Arc::new(Shared {
            config,
            departments,
            services,
            complaints: RwLock::new(Arc::from(Vec::new())),
            state,
            upstream,
            generation: AtomicU64::new(0),
            compute_lock: Mutex::new(()),
            computations: AtomicU64::new(0),
            stale_discards: AtomicU64::new(0),
            feed_updates: AtomicU64::new(0),
        });

        let feed_task = match feed.subscribe() {
            Ok(mut receiver) => {
                let initial = receiver.borrow_and_update().clone();
                shared.apply_feed_state(initial);

                match Handle::try_current() {
                    Ok(runtime) => Some(runtime.spawn(listen(Arc::clone(&shared), receiver))),
                    Err(_) => {
                        warn!("No tokio runtime; live complaint updates are disabled");
                        None
                    }
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Complaint feed subscription failed; searching departments and services only"
                );
                if let Some(metrics) = shared.metrics() {
                    metrics.record_feed_failure();
                }
                shared.upstream.send_replace(Some(e));
                None
            }
        };

        info!(
            departments = shared.departments.len(),
            services = shared.services.len(),
            debounce_ms = shared.config.debounce_ms,
            max_results = shared.config.max_results,
            "Search aggregator initialized"
        );

        Self {
            shared,
            debounce: Mutex::new(None),
            feed_task: Mutex::new(feed_task),
            disposed: AtomicBool::new(false),
        }
    }

    /// Create an aggregator using a loaded catalog
    pub fn from_catalog(feed: &dyn ComplaintFeed, catalog: Catalog, config: SearchConfig) -> Self {
        Self::new(feed, catalog.departments, catalog.services, config)
    }

    /// Replace the query.
    ///
    /// A blank query clears results at once. Anything else opens the debounce
    /// window; an edit inside the window restarts it.
    pub fn set_query(&self, text: impl Into<String>) {
        let query = text.into();
        if self.disposed.load(Ordering::SeqCst) {
            debug!("Query ignored on disposed aggregator");
            return;
        }

        let mut pending = self.debounce.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
            debug!("Pending search cancelled");
        }

        let blank = query.trim().is_empty();
        let mut generation = 0;
        self.shared.state.send_modify(|state| {
            generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            if blank {
                *state = SearchState::idle(query);
            } else {
                state.query = query;
                state.phase = SearchPhase::Pending;
            }
        });
        if blank {
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            debug!("No tokio runtime; computing without debounce");
            self.shared.compute(generation, Trigger::Query);
            return;
        };

        let shared = Arc::clone(&self.shared);
        let delay = self.shared.config.debounce();
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            shared.compute(generation, Trigger::Query);
        }));
    }

    /// Reset query and results immediately, cancelling any pending search
    pub fn clear(&self) {
        let mut pending = self.debounce.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        self.shared.state.send_modify(|state| {
            self.shared.generation.fetch_add(1, Ordering::SeqCst);
            *state = SearchState::default();
        });
    }

    /// Cancel pending work and unsubscribe from the feed.
    ///
    /// A search still pending or computing is abandoned: its phase drops to
    /// `Idle` so waiters and observers are released.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        let mut pending = self.debounce.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        if let Some(handle) = self.feed_task.lock().take() {
            handle.abort();
        }

        self.shared.state.send_if_modified(|state| {
            self.shared.generation.fetch_add(1, Ordering::SeqCst);
            if !state.is_searching() {
                return false;
            }
            state.phase = SearchPhase::Idle;
            true
        });

        debug!("Search aggregator disposed");
    }

    pub fn query(&self) -> String {
        self.shared.state.borrow().query.clone()
    }

    pub fn results(&self) -> Arc<[SearchHit]> {
        Arc::clone(&self.shared.state.borrow().results)
    }

    pub fn is_searching(&self) -> bool {
        self.shared.state.borrow().is_searching()
    }

    pub fn has_results(&self) -> bool {
        self.shared.state.borrow().has_results()
    }

    pub fn phase(&self) -> SearchPhase {
        self.shared.state.borrow().phase
    }

    /// Snapshot of query, results and phase
    pub fn state(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    /// Observe every change of query, results or phase
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    /// Wait until the current query has settled (or is idle)
    pub async fn settled(&self) -> SearchState {
        let mut receiver = self.shared.state.subscribe();
        let settled = match receiver.wait_for(|state| !state.is_searching()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    /// Last feed failure, cleared once the feed delivers a snapshot again
    pub fn upstream_error(&self) -> Option<SearchError> {
        self.shared.upstream.borrow().clone()
    }

    /// Observe feed failures separately from search state
    pub fn subscribe_upstream(&self) -> watch::Receiver<Option<SearchError>> {
        self.shared.upstream.subscribe()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.shared.config
    }

    pub fn stats(&self) -> AggregatorStats {
        AggregatorStats {
            computations: self.shared.computations.load(Ordering::Relaxed),
            stale_discards: self.shared.stale_discards.load(Ordering::Relaxed),
            feed_updates: self.shared.feed_updates.load(Ordering::Relaxed),
        }
    }
}

impl Drop for SearchAggregator {
    fn drop(&mut self) {
        self.dispose();
    }
}

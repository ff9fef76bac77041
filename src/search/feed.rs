//! Live complaint feed contract and an in-memory implementation

use crate::error::{AppError, Result};
use crate::models::ComplaintRecord;
use crate::search::error::SearchResult;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
use validator::Validate;

/// State of the live complaint feed as seen by subscribers
#[derive(Debug, Clone)]
pub enum FeedState {
    /// No snapshot has arrived yet
    Connecting,

    /// Full current list of complaints
    Ready(Arc<[ComplaintRecord]>),

    /// The feed failed; the reason is surfaced to callers
    Failed(String),
}

impl FeedState {
    /// Complaints usable for searching; empty unless the feed is ready
    pub fn records(&self) -> Arc<[ComplaintRecord]> {
        match self {
            FeedState::Ready(records) => Arc::clone(records),
            FeedState::Connecting | FeedState::Failed(_) => Arc::from(Vec::new()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FeedState::Ready(_))
    }
}

/// Subscription-style source of complaint snapshots.
///
/// Every change (add, update, remove) yields the full current list.
pub trait ComplaintFeed: Send + Sync {
    /// Subscribe to snapshots; dropping the receiver unsubscribes
    fn subscribe(&self) -> SearchResult<watch::Receiver<FeedState>>;
}

/// In-memory complaint feed.
///
/// Records keep insertion order; an upsert of an existing ID replaces it in place.
pub struct InMemoryComplaintFeed {
    records: Mutex<Vec<ComplaintRecord>>,
    tx: watch::Sender<FeedState>,
}

impl InMemoryComplaintFeed {
    /// Create an empty feed that is immediately ready
    pub fn new() -> Self {
        let (tx, _) = watch::channel(FeedState::Ready(Arc::from(Vec::new())));
        Self {
            records: Mutex::new(Vec::new()),
            tx,
        }
    }

    /// Create a feed seeded with records, validated like `upsert`
    pub fn with_records(records: Vec<ComplaintRecord>) -> Result<Self> {
        for record in &records {
            record.validate()?;
        }

        let (tx, _) = watch::channel(FeedState::Ready(Arc::from(records.clone())));
        Ok(Self {
            records: Mutex::new(records),
            tx,
        })
    }

    /// Add a complaint, or replace the complaint with the same ID
    pub fn upsert(&self, record: ComplaintRecord) -> Result<()> {
        record.validate()?;

        let mut records = self.records.lock();
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                debug!(complaint_id = %record.id, "Complaint updated in feed");
                *existing = record;
            }
            None => {
                debug!(complaint_id = %record.id, "Complaint added to feed");
                records.push(record);
            }
        }
        self.publish(&records);
        Ok(())
    }

    /// Remove a complaint by ID
    pub fn remove(&self, id: &str) -> Result<ComplaintRecord> {
        let mut records = self.records.lock();
        let position = records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", id)))?;

        let removed = records.remove(position);
        debug!(complaint_id = %id, "Complaint removed from feed");
        self.publish(&records);
        Ok(removed)
    }

    /// Replace the whole list in one update
    pub fn replace_all(&self, replacement: Vec<ComplaintRecord>) {
        let mut records = self.records.lock();
        *records = replacement;
        self.publish(&records);
    }

    /// Report a feed failure to subscribers.
    ///
    /// Stored records are kept and republished by the next successful change.
    pub fn fail(&self, reason: impl Into<String>) {
        let _records = self.records.lock();
        self.tx.send_replace(FeedState::Failed(reason.into()));
    }

    /// Republish the stored records after a failure
    pub fn recover(&self) {
        let records = self.records.lock();
        self.publish(&records);
    }

    /// Copy of the current records
    pub fn snapshot(&self) -> Vec<ComplaintRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    // Called with the records lock held so snapshots are published in mutation order.
    fn publish(&self, records: &[ComplaintRecord]) {
        self.tx.send_replace(FeedState::Ready(Arc::from(records.to_vec())));
    }
}

impl Default for InMemoryComplaintFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplaintFeed for InMemoryComplaintFeed {
    fn subscribe(&self) -> SearchResult<watch::Receiver<FeedState>> {
        Ok(self.tx.subscribe())
    }
}

impl<F: ComplaintFeed + ?Sized> ComplaintFeed for Arc<F> {
    fn subscribe(&self) -> SearchResult<watch::Receiver<FeedState>> {
        (**self).subscribe()
    }
}

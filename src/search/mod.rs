//! Live multi-source search for the grievance portal
//!
//! This module ranks three kinds of records against a free-text query:
//!
//! - **Complaints**: delivered by a live feed, re-ranked whenever the feed changes
//! - **Departments**: static directory entries with contacts and service names
//! - **Services**: helplines and e-services carrying an action reference
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           Search Aggregator                      │
//! ├─────────────────────────────────────────────────┤
//! │  - set_query()     - clear()     - subscribe()   │
//! │  - debounce window - stale-result guard          │
//! └─────────────────────────────────────────────────┘
//!          │                              │
//!          ▼                              ▼
//! ┌──────────────────────┐   ┌──────────────────────┐
//! │  Relevance Scorer     │   │  Complaint Feed       │
//! │  score(text, query)   │   │  watch snapshots      │
//! └──────────────────────┘   └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use grievance_search::catalog::Catalog;
//! use grievance_search::search::{InMemoryComplaintFeed, SearchAggregator, SearchConfig};
//!
//! # async fn example() {
//! let feed = InMemoryComplaintFeed::new();
//! let aggregator =
//!     SearchAggregator::from_catalog(&feed, Catalog::builtin(), SearchConfig::default());
//!
//! aggregator.set_query("street light");
//! let state = aggregator.settled().await;
//! for hit in state.results.iter() {
//!     println!("{} {} ({:.1})", hit.kind, hit.title, hit.score);
//! }
//! # }
//! ```

mod aggregator;
mod config;
mod document;
mod error;
mod feed;
pub mod metrics;
pub mod scoring;

pub use aggregator::{rank, AggregatorStats, SearchAggregator, SearchPhase, SearchState};
pub use self::config::{SearchConfig, SearchConfigBuilder, DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_RESULTS};
pub use document::{HitKind, SearchDocument, SearchHit, SearchableRecord};
pub use error::{SearchError, SearchResult};
pub use feed::{ComplaintFeed, FeedState, InMemoryComplaintFeed};
pub use metrics::{init_search_metrics, SEARCH_METRICS};
pub use scoring::score;

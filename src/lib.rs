//! Grievance portal live search
//!
//! Debounced, feed-aware relevance search over citizen complaints, government
//! departments and citizen services.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{AppError, Result};
pub use search::{SearchAggregator, SearchConfig, SearchHit};

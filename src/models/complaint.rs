use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// A citizen complaint as delivered by the live complaint feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ComplaintRecord {
    /// Unique identifier
    pub id: String,

    /// Short summary entered by the citizen
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    /// Detailed description
    #[serde(default)]
    pub description: String,

    /// Complaint category (e.g. "Infrastructure")
    #[serde(default)]
    pub category: String,

    /// Department the complaint is routed to
    #[serde(default)]
    pub department: String,

    /// Current workflow status
    #[serde(default)]
    pub status: ComplaintStatus,

    /// Priority assigned at triage
    #[serde(default)]
    pub priority: ComplaintPriority,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ComplaintRecord {
    /// Create a new pending complaint with a fresh identifier
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        department: impl Into<String>,
        priority: ComplaintPriority,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            department: department.into(),
            status: ComplaintStatus::Pending,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Override the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = status;
        self
    }

    /// Move the complaint to a new status
    pub fn update_status(&mut self, status: ComplaintStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Check whether the complaint still awaits resolution
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            ComplaintStatus::Pending | ComplaintStatus::Assigned | ComplaintStatus::InProgress
        )
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComplaintPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl ComplaintPriority {
    /// Check if the priority requires same-day attention
    pub fn is_urgent(&self) -> bool {
        matches!(self, ComplaintPriority::High | ComplaintPriority::Critical)
    }
}

//! Searchable record projections and search hits

use crate::models::{
    ActionRef, ComplaintPriority, ComplaintRecord, ComplaintStatus, DepartmentRecord,
    ServiceRecord,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Trait for records that can be scored by the relevance scorer
pub trait SearchDocument {
    /// Concatenation of every text field that should be searchable
    fn searchable_text(&self) -> String;

    /// Get document ID
    fn document_id(&self) -> &str;
}

impl SearchDocument for ComplaintRecord {
    fn searchable_text(&self) -> String {
        let status = self.status.to_string();
        let priority = self.priority.to_string();
        join_fields([
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            self.department.as_str(),
            status.as_str(),
            priority.as_str(),
        ])
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl SearchDocument for DepartmentRecord {
    fn searchable_text(&self) -> String {
        join_fields(
            [self.name.as_str(), self.description.as_str()]
                .into_iter()
                .chain(self.services.iter().map(String::as_str)),
        )
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

impl SearchDocument for ServiceRecord {
    fn searchable_text(&self) -> String {
        join_fields([
            self.name.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ])
    }

    fn document_id(&self) -> &str {
        &self.id
    }
}

fn join_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields.into_iter().collect::<Vec<_>>().join(" ")
}

/// Type tag carried by every hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HitKind {
    Complaint,
    Department,
    Service,
}

/// One candidate considered during a search computation
#[derive(Debug, Clone, Copy)]
pub enum SearchableRecord<'a> {
    Complaint(&'a ComplaintRecord),
    Department(&'a DepartmentRecord),
    Service(&'a ServiceRecord),
}

impl<'a> SearchableRecord<'a> {
    pub fn kind(&self) -> HitKind {
        match self {
            SearchableRecord::Complaint(_) => HitKind::Complaint,
            SearchableRecord::Department(_) => HitKind::Department,
            SearchableRecord::Service(_) => HitKind::Service,
        }
    }

    fn document(&self) -> &'a dyn SearchDocument {
        match *self {
            SearchableRecord::Complaint(c) => c as &dyn SearchDocument,
            SearchableRecord::Department(d) => d as &dyn SearchDocument,
            SearchableRecord::Service(s) => s as &dyn SearchDocument,
        }
    }

    pub fn searchable_text(&self) -> String {
        self.document().searchable_text()
    }

    pub fn document_id(&self) -> &'a str {
        self.document().document_id()
    }

    /// Project the record into an owned hit with the given score
    pub fn to_hit(&self, score: f64) -> SearchHit {
        match *self {
            SearchableRecord::Complaint(c) => SearchHit {
                id: c.id.clone(),
                kind: HitKind::Complaint,
                title: c.title.clone(),
                description: c.description.clone(),
                category: Some(c.category.clone()),
                priority: Some(c.priority),
                status: Some(c.status),
                department: Some(c.department.clone()),
                contact: None,
                action: None,
                score,
                complaint: Some(c.clone()),
            },
            SearchableRecord::Department(d) => SearchHit {
                id: d.id.clone(),
                kind: HitKind::Department,
                title: d.name.clone(),
                description: d.description.clone(),
                category: None,
                priority: None,
                status: None,
                department: None,
                contact: Some(d.contact.clone()),
                action: None,
                score,
                complaint: None,
            },
            SearchableRecord::Service(s) => SearchHit {
                id: s.id.clone(),
                kind: HitKind::Service,
                title: s.name.clone(),
                description: s.description.clone(),
                category: Some(s.category.clone()),
                priority: None,
                status: None,
                department: None,
                contact: None,
                action: Some(s.action.clone()),
                score,
                complaint: None,
            },
        }
    }
}

/// A single ranked search hit.
///
/// Hits own copies of the source fields; editing a hit never touches the
/// record it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Source record ID
    pub id: String,

    /// Source record type
    #[serde(rename = "type")]
    pub kind: HitKind,

    /// Display title (complaint title or department/service name)
    pub title: String,

    /// Display description
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<ComplaintPriority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplaintStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionRef>,

    /// Relevance score, always > 0
    pub score: f64,

    /// Full originating complaint, present only for complaint hits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complaint: Option<ComplaintRecord>,
}

impl SearchHit {
    /// Number to dial when a service hit is selected
    pub fn dial_target(&self) -> Option<&str> {
        match self.kind {
            HitKind::Service => self.action.as_ref().and_then(ActionRef::dial_number),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn street_light() -> ComplaintRecord {
        ComplaintRecord::new(
            "Street light broken",
            "near park",
            "Infrastructure",
            "Public Works",
            ComplaintPriority::Medium,
        )
        .with_id("c-1")
        .with_status(ComplaintStatus::InProgress)
    }

    #[test]
    fn test_complaint_searchable_text() {
        let complaint = street_light();
        assert_eq!(
            complaint.searchable_text(),
            "Street light broken near park Infrastructure Public Works in-progress medium"
        );
    }

    #[test]
    fn test_department_searchable_text_includes_services() {
        let dept = DepartmentRecord::new("pwd", "Public Works", "roads, lights", "1800")
            .with_services(vec!["Road repair"]);
        assert_eq!(dept.searchable_text(), "Public Works roads, lights Road repair");
    }

    #[test]
    fn test_service_searchable_text() {
        let service = ServiceRecord::new(
            "cm",
            "CM Helpline",
            "complaints to CM office",
            "Helpline",
            ActionRef::tel("1076"),
        );
        assert_eq!(
            service.searchable_text(),
            "CM Helpline complaints to CM office Helpline"
        );
    }

    #[test]
    fn test_complaint_hit_carries_back_reference() {
        let complaint = street_light();
        let hit = SearchableRecord::Complaint(&complaint).to_hit(115.0);

        assert_eq!(hit.kind, HitKind::Complaint);
        assert_eq!(hit.id, "c-1");
        assert_eq!(hit.status, Some(ComplaintStatus::InProgress));
        assert_eq!(hit.complaint.as_ref(), Some(&complaint));
        assert!(hit.dial_target().is_none());
    }

    #[test]
    fn test_hit_is_detached_from_record() {
        let complaint = street_light();
        let mut hit = SearchableRecord::Complaint(&complaint).to_hit(10.0);
        hit.title.push_str(" (edited)");
        if let Some(inner) = hit.complaint.as_mut() {
            inner.title.clear();
        }
        assert_eq!(complaint.title, "Street light broken");
    }

    #[test]
    fn test_service_hit_dial_target() {
        let service = ServiceRecord::new("amb", "Ambulance", "", "Emergency", ActionRef::tel("108"));
        let hit = SearchableRecord::Service(&service).to_hit(15.0);

        assert_eq!(hit.kind, HitKind::Service);
        assert!(hit.complaint.is_none());
        assert_eq!(hit.dial_target(), Some("108"));
    }

    #[test]
    fn test_hit_serialization_uses_type_tag() {
        let dept = DepartmentRecord::new("pwd", "Public Works", "roads", "1800");
        let hit = SearchableRecord::Department(&dept).to_hit(20.0);
        let json = serde_json::to_value(&hit).unwrap();

        assert_eq!(json["type"], "department");
        assert_eq!(json["contact"], "1800");
        assert!(json.get("complaint").is_none());
    }
}

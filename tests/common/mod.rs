//! Common test fixtures for search tests

#![allow(dead_code)]

use grievance_search::models::{
    ActionRef, ComplaintPriority, ComplaintRecord, DepartmentRecord, ServiceRecord,
};
use std::collections::HashMap;

/// Helper to create a test complaint with a fixed ID
pub fn create_test_complaint(id: &str, title: &str, description: &str) -> ComplaintRecord {
    ComplaintRecord::new(
        title,
        description,
        "Infrastructure",
        "Public Works",
        ComplaintPriority::Medium,
    )
    .with_id(id)
}

/// The street light complaint from the portal walkthrough
pub fn street_light_complaint() -> ComplaintRecord {
    create_test_complaint("c-street-light", "Street light broken", "near park")
}

pub fn public_works() -> DepartmentRecord {
    DepartmentRecord::new("d-pwd", "Public Works", "roads, lights", "1800-425-1000")
}

pub fn cm_helpline() -> ServiceRecord {
    ServiceRecord::new(
        "s-cm",
        "CM Helpline",
        "complaints to CM office",
        "Helpline",
        ActionRef::tel("1076"),
    )
}

pub fn test_departments() -> Vec<DepartmentRecord> {
    vec![public_works()]
}

pub fn test_services() -> Vec<ServiceRecord> {
    vec![cm_helpline()]
}

/// Helper function to parse Prometheus exposition format
/// Returns a map of metric name to its HELP/TYPE and sample lines
pub fn parse_prometheus_output(output: &str) -> HashMap<String, Vec<String>> {
    let mut metrics = HashMap::new();
    let mut current_metric = String::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("# HELP") || line.starts_with("# TYPE") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 3 {
                current_metric = parts[2].to_string();
                metrics
                    .entry(current_metric.clone())
                    .or_insert_with(Vec::new)
                    .push(line.to_string());
            }
        } else if !line.starts_with('#') && !current_metric.is_empty() {
            metrics
                .entry(current_metric.clone())
                .or_insert_with(Vec::new)
                .push(line.to_string());
        }
    }

    metrics
}

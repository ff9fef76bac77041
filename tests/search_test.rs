//! Ranking tests for the search module

mod common;

use common::*;
use grievance_search::models::{ComplaintRecord, DepartmentRecord, ServiceRecord};
use grievance_search::search::*;

/// Helper to rank the three sources the way the aggregator orders them
fn rank_all(
    query: &str,
    complaints: &[ComplaintRecord],
    departments: &[DepartmentRecord],
    services: &[ServiceRecord],
) -> Vec<SearchHit> {
    let candidates = complaints
        .iter()
        .map(SearchableRecord::Complaint)
        .chain(departments.iter().map(SearchableRecord::Department))
        .chain(services.iter().map(SearchableRecord::Service));
    rank(query, candidates, DEFAULT_MAX_RESULTS)
}

#[test]
fn test_street_light_scenario() {
    let complaints = vec![street_light_complaint()];
    let hits = rank_all("light", &complaints, &test_departments(), &test_services());

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].kind, HitKind::Complaint);
    assert_eq!(hits[0].id, "c-street-light");
    assert_eq!(hits[1].kind, HitKind::Department);
    assert_eq!(hits[1].id, "d-pwd");
    assert!(hits[0].score >= hits[1].score);
}

#[test]
fn test_blank_query_returns_nothing() {
    let complaints = vec![street_light_complaint()];
    for query in ["", " ", "\t\n"] {
        assert!(rank_all(query, &complaints, &test_departments(), &test_services()).is_empty());
    }
}

#[test]
fn test_exact_substring_beats_non_match() {
    let matching = score("Water pipeline leakage in ward 4", "pipeline leakage");
    let other = score("Garbage not collected", "pipeline leakage");

    assert!(matching >= scoring::EXACT_MATCH_WEIGHT);
    assert!(matching > other);
}

#[test]
fn test_case_insensitive_ranking() {
    let complaints = vec![street_light_complaint()];
    let lower = rank_all("light", &complaints, &test_departments(), &test_services());
    let upper = rank_all("LIGHT", &complaints, &test_departments(), &test_services());
    assert_eq!(lower, upper);
}

#[test]
fn test_results_capped_at_fifteen() {
    let complaints: Vec<ComplaintRecord> = (0..20)
        .map(|i| create_test_complaint(&format!("c-{}", i), &format!("Water leak {}", i), ""))
        .collect();

    let hits = rank_all("water", &complaints, &[], &[]);
    assert_eq!(hits.len(), 15);
    assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn test_ranking_is_non_increasing() {
    let complaints = vec![
        create_test_complaint("c-1", "Drain blocked", "water overflowing on road"),
        create_test_complaint("c-2", "Water supply irregular", "water comes once a week"),
        create_test_complaint("c-3", "Pothole", "road damaged"),
    ];
    let departments = vec![
        DepartmentRecord::new("d-water", "Water Supply", "drinking water", "1916"),
        DepartmentRecord::new("d-pwd", "Public Works", "roads and drains", "1800"),
    ];

    let hits = rank_all("water", &complaints, &departments, &[]);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|hit| hit.score > 0.0));
    assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
    assert!(hits.iter().all(|hit| hit.id != "c-3" && hit.id != "d-pwd"));
}

#[test]
fn test_back_reference_only_on_complaints() {
    let complaints = vec![create_test_complaint("c-1", "Helpline not answering", "")];
    let hits = rank_all("helpline", &complaints, &test_departments(), &test_services());

    assert_eq!(hits.len(), 2);
    for hit in &hits {
        match hit.kind {
            HitKind::Complaint => {
                assert_eq!(hit.complaint.as_ref().map(|c| c.id.as_str()), Some("c-1"))
            }
            HitKind::Department | HitKind::Service => assert!(hit.complaint.is_none()),
        }
    }
}

#[test]
fn test_service_hit_is_dialable() {
    let hits = rank_all("helpline", &[], &[], &test_services());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].dial_target(), Some("1076"));
}

#[test]
fn test_builtin_catalog_is_searchable() {
    let catalog = grievance_search::Catalog::builtin();
    let hits = rank_all("ambulance", &[], &catalog.departments, &catalog.services);

    assert_eq!(hits[0].title, "Ambulance");
    assert_eq!(hits[0].dial_target(), Some("108"));
}

//! Criterion benchmarks for relevance scoring and ranking
//!
//! These benchmarks measure:
//! - Single scorer calls for matching and non-matching text
//! - A full ranking pass over complaints plus the built-in directory

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grievance_search::catalog::Catalog;
use grievance_search::models::{ComplaintPriority, ComplaintRecord};
use grievance_search::search::{rank, score, SearchableRecord, DEFAULT_MAX_RESULTS};

fn create_complaints(count: usize) -> Vec<ComplaintRecord> {
    let titles = [
        "Street light broken",
        "Water pipeline leakage",
        "Garbage not collected",
        "Pothole on main road",
        "Power cut every evening",
    ];
    (0..count)
        .map(|i| {
            ComplaintRecord::new(
                format!("{} #{}", titles[i % titles.len()], i),
                "reported by residents of ward 12 near the park",
                "Infrastructure",
                "Public Works",
                ComplaintPriority::Medium,
            )
            .with_id(format!("c-{}", i))
        })
        .collect()
}

/// Benchmark scorer calls
fn bench_score(c: &mut Criterion) {
    let text = "Street light broken near park Infrastructure Public Works pending medium";

    c.bench_function("score_match", |b| {
        b.iter(|| score(black_box(text), black_box("street light")));
    });

    c.bench_function("score_no_match", |b| {
        b.iter(|| score(black_box(text), black_box("ambulance")));
    });
}

/// Benchmark ranking across all sources
fn bench_rank(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let mut group = c.benchmark_group("rank");

    for size in [100usize, 1_000, 5_000] {
        let complaints = create_complaints(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &complaints, |b, complaints| {
            b.iter(|| {
                let candidates = complaints
                    .iter()
                    .map(SearchableRecord::Complaint)
                    .chain(catalog.departments.iter().map(SearchableRecord::Department))
                    .chain(catalog.services.iter().map(SearchableRecord::Service));
                rank(black_box("water leak"), candidates, DEFAULT_MAX_RESULTS)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score, bench_rank);
criterion_main!(benches);

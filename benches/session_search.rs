use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use transcript_insights::models::SearchOptions;
use transcript_insights::parsers::parse_transcript;
use transcript_insights::search::search;

/// Build a corpus of N parsed sessions with varied content
fn generate_corpus(num_sessions: usize) -> Vec<transcript_insights::ParsedSession> {
    (0..num_sessions)
        .map(|i| {
            let body = format!(
                "### 1. User (10:00 AM)\nPlease refactor module {} and deploy it\n\
                 ### 2. Assistant (10:05 AM)\nRefactored and deployed\n\
                 Duration: {} seconds\n",
                i,
                (i % 100) * 60
            );
            parse_transcript(&format!("session-project-{}-{:06x}aa.md", i % 10, i), &body)
        })
        .collect()
}

fn bench_keyword_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyword_search");

    for size in [100, 1_000, 10_000].iter() {
        let corpus = generate_corpus(*size);
        let options =
            SearchOptions { keyword: Some("deploy".to_string()), ..Default::default() };

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| search(black_box(&corpus), black_box(&options)).unwrap());
        });
    }

    group.finish();
}

fn bench_filtered_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_search");

    for size in [100, 1_000, 10_000].iter() {
        let corpus = generate_corpus(*size);
        let options = SearchOptions {
            project: Some("project".to_string()),
            min_duration: Some(600),
            max_duration: Some(3600),
            ..Default::default()
        };

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| search(black_box(&corpus), black_box(&options)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_keyword_search, bench_filtered_search);
criterion_main!(benches);

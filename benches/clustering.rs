use criterion::{criterion_group, criterion_main, Criterion};
use lollipop::clusters::{cluster_variants, DEFAULT_CLUSTER_DISTANCE};
use lollipop::prelude::*;
use lollipop::test_utilities::{random_raw_table, random_variants};

const TABLE_LENGTH: usize = 100_000;

fn bench_clustering(c: &mut Criterion) {
    // create the benchmark group
    let mut group = c.benchmark_group("clustering");

    // create the test data
    let variants = random_variants(TABLE_LENGTH);
    let raw = random_raw_table(TABLE_LENGTH);
    let cohorts = CohortConfig::from_header(
        &ColumnConvention::default(),
        &raw.header,
        LabelOrder::HomHet,
    );
    let pipeline = Pipeline::new(cohorts);
    let view = CohortView::with_reference("all", "healthy");

    // configure the sample size for the group
    group.sample_size(10);

    group.bench_function("cluster_variants", |b| {
        b.iter(|| cluster_variants(&variants, DEFAULT_CLUSTER_DISTANCE).len());
    });

    group.bench_function("render", |b| {
        b.iter(|| pipeline.render(&raw, &view).clusters.len());
    });
}

criterion_group!(benches, bench_clustering,);
criterion_main!(benches);

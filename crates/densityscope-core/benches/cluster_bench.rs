//! Clustering benchmarks over the sample scenes and synthetic blob clouds

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use densityscope_core::datasets::{blobs, scatter};
use densityscope_core::{
    compare_presets, sample_rng, sweep, ClusterEngine, ClusteringSummary, CoreRule, DbscanParams,
    Point, Profession, Scene,
};

// =============================================================================
// Deterministic data
// =============================================================================

fn blob_cloud(n_clusters: usize, per_cluster: usize) -> Vec<Point> {
    let mut rng = sample_rng(42);
    let centers: Vec<(f64, f64)> = (0..n_clusters)
        .map(|i| (100.0 + 250.0 * (i % 8) as f64, 100.0 + 250.0 * (i / 8) as f64))
        .collect();
    let mut points = blobs(&mut rng, &centers, per_cluster, 60.0, 0);
    let noise = points.len() / 10;
    let first = points.len();
    points.extend(scatter(&mut rng, noise, (0.0, 2000.0), (0.0, 2000.0), first));
    points
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_scenes(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenes");

    let mut scenes: Vec<Scene> = Profession::ALL.into_iter().map(Scene::Profession).collect();
    scenes.push(Scene::Tutorial);
    scenes.push(Scene::Live);

    for scene in scenes {
        let points = scene.generate_seeded(2024);
        let engine = ClusterEngine::new(scene.suggested_params());
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(scene), &points, |b, points| {
            b.iter(|| engine.run(black_box(points)))
        });
    }

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");
    group.sample_size(20);

    let engine = ClusterEngine::new(DbscanParams::new(25.0, 5));
    for per_cluster in [25, 100, 250] {
        let points = blob_cloud(8, per_cluster);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(points.len()),
            &points,
            |b, points| b.iter(|| engine.run(black_box(points))),
        );
    }

    group.finish();
}

fn bench_core_rule(c: &mut Criterion) {
    let points = blob_cloud(4, 100);
    let mut group = c.benchmark_group("core_rule");

    for rule in [CoreRule::ExcludeSelf, CoreRule::IncludeSelf] {
        let engine = ClusterEngine::new(DbscanParams::new(25.0, 5).with_core_rule(rule));
        group.bench_function(rule.to_string(), |b| b.iter(|| engine.run(black_box(&points))));
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let points = blob_cloud(8, 100);
    let clustering = ClusterEngine::new(DbscanParams::new(25.0, 5))
        .run(&points)
        .unwrap();

    c.bench_function("summary_from_run", |b| {
        b.iter(|| ClusteringSummary::from_run(black_box(&points), black_box(&clustering)))
    });
}

fn bench_sweep(c: &mut Criterion) {
    let points = Scene::Tutorial.generate_seeded(7);
    let eps_values: Vec<f64> = (1..=12).map(|i| i as f64 * 10.0).collect();
    let min_pts_values: Vec<usize> = (2..=8).collect();

    let mut group = c.benchmark_group("sweep");
    group.sample_size(20);
    group.throughput(Throughput::Elements((eps_values.len() * min_pts_values.len()) as u64));
    group.bench_function("tutorial_12x7", |b| {
        b.iter(|| {
            sweep(
                black_box(&points),
                &eps_values,
                &min_pts_values,
                CoreRule::ExcludeSelf,
            )
        })
    });
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    for profession in Profession::ALL {
        let points = profession.realistic_dataset_seeded(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(profession),
            &points,
            |b, points| b.iter(|| compare_presets(profession, black_box(points))),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scenes,
    bench_scaling,
    bench_core_rule,
    bench_summary,
    bench_sweep,
    bench_compare
);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use postage_gallery::services::projection::project;
use postage_gallery::services::postage::StampGeometry;
use postage_gallery::{build_gallery, Catalog, CoordinateSet, GalleryConfig, SkyCoordinate, VetoMasks};
use std::hint::black_box;

fn scattered(n: usize) -> CoordinateSet {
    CoordinateSet::from_coordinates((0..n).map(|i| {
        let t = i as f64 / n as f64;
        SkyCoordinate::new(150.0 + 0.01 * (t * 97.0).sin(), 2.0 + 0.01 * (t * 31.0).cos())
    }))
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let center = SkyCoordinate::new(150.0, 2.0);
    let geometry = StampGeometry::new(4.0, 4.0 / 3600.0, 0.262);

    for n in [10usize, 1_000, 100_000] {
        let targets = scattered(n);
        group.bench_with_input(BenchmarkId::new("project", n), &targets, |b, targets| {
            b.iter(|| {
                black_box(project(
                    black_box(&center),
                    black_box(targets),
                    geometry.size_px,
                    geometry.pixel_scale,
                ))
            });
        });
    }

    group.finish();
}

fn bench_build_gallery(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery");

    let coords = scattered(20_000);
    let n = coords.len();
    let veto = VetoMasks::new()
        .with("star", (0..n).map(|i| i % 3 == 0).collect())
        .with("galaxy", (0..n).map(|i| i % 3 == 1).collect());
    let catalog = Catalog::new(coords, veto, None).unwrap();
    let centers: Vec<usize> = (0..n).collect();
    let config = GalleryConfig {
        seed: Some(1),
        ..GalleryConfig::default()
    };

    group.bench_function("build_gallery_20k", |b| {
        b.iter(|| build_gallery(black_box(&catalog), &centers, &config, None).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_project, bench_build_gallery);
criterion_main!(benches);

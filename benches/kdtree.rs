use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geonames_index::kdtree::{KDTree, KDTreeBuilder};
use geonames_index::projection::project;
use geonames_index::GeoNamesIndex;
use geonames_index::GeoName;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;

const NUM_POINTS: usize = 100_000;
const NUM_QUERIES: usize = 1000;

fn random_coords(rng: &mut StdRng, n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|_| (rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0)))
        .collect()
}

fn construct_kdtree(points: &[[f64; 3]]) -> KDTree<[f64; 3]> {
    let mut builder = KDTreeBuilder::with_capacity(points.len());
    for point in points {
        builder.add(*point);
    }
    builder.finish()
}

fn construct_rstar(points: Vec<[f64; 3]>) -> RTree<[f64; 3]> {
    RTree::bulk_load(points)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let coords = random_coords(&mut rng, NUM_POINTS);
    let points: Vec<[f64; 3]> = coords.iter().map(|(lat, lon)| project(*lat, *lon)).collect();
    let queries: Vec<[f64; 3]> = random_coords(&mut rng, NUM_QUERIES)
        .iter()
        .map(|(lat, lon)| project(*lat, *lon))
        .collect();

    c.bench_function("construction (kdtree)", |b| {
        b.iter(|| construct_kdtree(&points))
    });

    c.bench_function("construction (rstar bulk)", |b| {
        b.iter(|| construct_rstar(points.to_vec()))
    });

    let kdtree = construct_kdtree(&points);
    let rstar_tree = construct_rstar(points.to_vec());

    c.bench_function("nearest (kdtree)", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(kdtree.nearest(query));
            }
        })
    });

    c.bench_function("nearest (rstar)", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(rstar_tree.nearest_neighbor(query));
            }
        })
    });

    c.bench_function("nearest 10 (kdtree)", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(kdtree.nearest_k(query, 10));
            }
        })
    });

    let records: Vec<GeoName> = coords
        .iter()
        .map(|(lat, lon)| GeoName::from_coordinates(*lat, *lon).unwrap())
        .collect();
    let index = GeoNamesIndex::new(records);

    c.bench_function("within 50km (geonames)", |b| {
        b.iter(|| index.within_km(black_box(48.85), black_box(2.35), 50.0))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

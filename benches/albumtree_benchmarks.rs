//! # Albumtree Performance Benchmarks
//!
//! Benchmarks for the hot paths of tree building.
//!
//! ## Benchmark Categories
//!
//! - **Ranking**: Descriptor-overlap ranking over catalogs of growing size
//! - **Tree Building**: Full recommendation trees for common shapes
//! - **Flattening**: Converting built trees to vertices and edges
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench ranking
//! cargo bench tree_building
//! ```

use albumtree::algorithm;
use albumtree::catalog::{Album, Catalog};
use albumtree::genre;
use albumtree::recommend::{self, VisitedSet};
use albumtree::tree::flatten;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::hint::black_box;

const DESCRIPTOR_VOCABULARY: usize = 200;
const DESCRIPTORS_PER_ALBUM: usize = 12;
const GENRES: [&str; 6] = ["Rock", "Jazz", "Ambient", "Hip Hop", "Folk", "Electronic"];

/// Helper function to create a catalog with realistic descriptor overlap
fn create_catalog(count: usize) -> Catalog {
    let mut rng = StdRng::seed_from_u64(42);
    let vocabulary: Vec<String> = (0..DESCRIPTOR_VOCABULARY).map(|i| format!("descriptor-{i}")).collect();

    let albums = (0..count)
        .map(|i| Album {
            name: format!("Album {i}"),
            artist: format!("Artist {}", i % 97),
            genres: vec![GENRES[i % GENRES.len()].to_string()],
            rank: u32::try_from(i + 1).expect("benchmark catalog fits in u32"),
            release: "2000-01-01".to_string(),
            descriptors: vocabulary
                .choose_multiple(&mut rng, DESCRIPTORS_PER_ALBUM)
                .cloned()
                .collect(),
        })
        .collect();

    Catalog::new(albums, Vec::new()).expect("valid benchmark catalog")
}

fn benchmark_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for size in [1_000, 10_000] {
        let catalog = create_catalog(size);
        let reference = &catalog.albums()[size / 2];
        let visited = VisitedSet::new();

        group.bench_with_input(BenchmarkId::new("rank_candidates", size), &catalog, |b, catalog| {
            b.iter(|| {
                black_box(algorithm::rank_candidates(
                    reference,
                    black_box(catalog.albums()),
                    3,
                    &visited,
                ))
            });
        });
    }

    let catalog = create_catalog(10_000);
    group.bench_function("top_albums_in_genre", |b| {
        b.iter(|| black_box(genre::top_albums_in_genre("Jazz", black_box(catalog.albums()), 10)));
    });

    group.finish();
}

fn benchmark_tree_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_building");
    let catalog = create_catalog(5_000);
    let root = &catalog.albums()[0];

    for (branching, depth) in [(3, 2), (5, 2), (3, 3)] {
        group.bench_function(format!("build_tree_b{branching}_d{depth}"), |b| {
            b.iter_batched(
                VisitedSet::new,
                |mut visited| {
                    black_box(recommend::build_tree(
                        root,
                        catalog.albums(),
                        branching,
                        depth,
                        &mut visited,
                    ))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_flattening(c: &mut Criterion) {
    let mut group = c.benchmark_group("flattening");
    let catalog = create_catalog(5_000);
    let mut visited = VisitedSet::new();
    let tree = recommend::build_tree(&catalog.albums()[0], catalog.albums(), 5, 3, &mut visited);

    group.bench_function("flatten_b5_d3", |b| {
        b.iter(|| black_box(flatten(black_box(&tree))));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_ranking,
    benchmark_tree_building,
    benchmark_flattening
);
criterion_main!(benches);

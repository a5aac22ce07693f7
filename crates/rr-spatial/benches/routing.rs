// Routing and nearest-node benchmarks on a synthetic street grid.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rr_core::{GeoPoint, NodeId};
use rr_spatial::{
    Area, DijkstraRouter, GraphConfig, LinearScan, Node, NodeLocator, NodeSpatialIndex, Relation,
    Router, RoutingGraph, Way,
};

const SPACING_DEG: f64 = 0.001;

/// `side × side` grid of residential streets, every row and column one way.
/// A handful of no-left-turn restrictions are sprinkled along the diagonal.
fn grid_area(side: i64) -> Area {
    let mut area = Area::new(1);
    let id = |r: i64, c: i64| r * side + c;

    for r in 0..side {
        for c in 0..side {
            area.nodes.push(Node::new(id(r, c), r as f64 * SPACING_DEG, c as f64 * SPACING_DEG));
        }
    }
    for r in 0..side {
        area.ways.push(Way::new(r, (0..side).map(|c| id(r, c))).tag("highway", "residential"));
    }
    for c in 0..side {
        area.ways.push(Way::new(side + c, (0..side).map(|r| id(r, c))).tag("highway", "tertiary"));
    }
    for k in 1..side - 1 {
        area.relations.push(Relation::restriction(k, k, id(k, k), side + k));
    }
    area
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for side in [20i64, 50, 100] {
        let area = grid_area(side);
        group.bench_with_input(BenchmarkId::new("grid", side), &area, |b, area| {
            b.iter(|| RoutingGraph::with_areas(GraphConfig::default(), [black_box(area)]));
        });
    }
    group.finish();
}

fn benchmark_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");
    for side in [20i64, 50, 100] {
        let graph = RoutingGraph::with_areas(GraphConfig::default(), [&grid_area(side)]);
        let far = NodeId(side * side - 1);
        group.bench_with_input(BenchmarkId::new("corner_to_corner", side), &graph, |b, g| {
            b.iter(|| DijkstraRouter::default().shortest_path(g, black_box(NodeId(0)), far));
        });
    }
    group.finish();
}

fn benchmark_closest_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_node");
    let side = 100;
    let graph = RoutingGraph::with_areas(GraphConfig::default(), [&grid_area(side)]);
    let index = NodeSpatialIndex::build(&graph);
    let extent = side as f64 * SPACING_DEG;

    let mut rng = StdRng::seed_from_u64(1);
    let queries: Vec<GeoPoint> = (0..256)
        .map(|_| GeoPoint::new(rng.gen_range(0.0..extent), rng.gen_range(0.0..extent)))
        .collect();

    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(LinearScan.closest_node(&graph, *q));
            }
        });
    });
    group.bench_function("rtree", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(index.closest_node(&graph, *q));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_route, benchmark_closest_node);
criterion_main!(benches);

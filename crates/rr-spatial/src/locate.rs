//! Nearest-node lookup: map an arbitrary coordinate to a road node.
//!
//! Two interchangeable [`NodeLocator`]s:
//!
//! | Locator              | Cost per query     | Build cost      |
//! |----------------------|--------------------|-----------------|
//! | [`LinearScan`]       | O(road nodes)      | none            |
//! | [`NodeSpatialIndex`] | O(log N + k)       | O(N log N) bulk |
//!
//! Both only consider *road nodes* (nodes with at least one edge) and both
//! honour [`GraphConfig::closest_node_radius_m`](crate::GraphConfig) as an
//! exclusive bound: a node exactly at the radius is not returned.
//!
//! # Tie-break
//!
//! When several nodes are equally close the one inserted first (lowest
//! [`NodeIdx`]) wins.  `LinearScan` gets this for free by scanning in
//! insertion order and replacing only on a strictly smaller distance;
//! `NodeSpatialIndex` compares `(distance, idx)` explicitly, so the two
//! always agree.

use rstar::{RTree, RTreeObject, AABB};

use rr_core::{GeoPoint, NodeIdx};

use crate::network::{GraphNode, RoutingGraph};

// ── Result ────────────────────────────────────────────────────────────────────

/// Outcome of a nearest-node lookup.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClosestNode {
    /// `None` when no road node lies within the radius.
    pub node: Option<GraphNode>,
    /// Haversine distance in metres; `+∞` when `node` is `None`.
    pub distance_m: f64,
}

impl ClosestNode {
    pub fn none() -> Self {
        Self { node: None, distance_m: f64::INFINITY }
    }

    pub fn is_found(&self) -> bool {
        self.node.is_some()
    }
}

// ── Locator trait ─────────────────────────────────────────────────────────────

/// Pluggable nearest-node strategy.
pub trait NodeLocator: Send + Sync {
    /// The closest road node to `pos` within the graph's configured radius.
    fn closest_node(&self, graph: &RoutingGraph, pos: GeoPoint) -> ClosestNode;
}

impl<T: NodeLocator + ?Sized> NodeLocator for &T {
    fn closest_node(&self, graph: &RoutingGraph, pos: GeoPoint) -> ClosestNode {
        (**self).closest_node(graph, pos)
    }
}

// ── LinearScan ────────────────────────────────────────────────────────────────

/// Brute-force scan over every road node of the current tile set.
///
/// Bounded by the loaded area, which is small enough for interactive use.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearScan;

impl NodeLocator for LinearScan {
    fn closest_node(&self, graph: &RoutingGraph, pos: GeoPoint) -> ClosestNode {
        let radius = graph.config().closest_node_radius_m;
        let mut closest = ClosestNode::none();

        for node in graph.road_nodes() {
            let d = pos.distance_m(node.pos);
            if d < radius && d < closest.distance_m {
                closest = ClosestNode { node: Some(node), distance_m: d };
            }
        }
        closest
    }
}

// ── R-tree index ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lng]` point with
/// the associated `NodeIdx`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lng]
    idx:   NodeIdx,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// R-tree over the road nodes of one graph snapshot.
///
/// The index is not updated when the graph grows; rebuild it after
/// `extend` (see [`GraphStore::spatial_index`](crate::GraphStore::spatial_index)).
/// Always query it with the graph it was built from.  The envelope is not
/// wrapped across the antimeridian.
pub struct NodeSpatialIndex {
    tree: RTree<NodeEntry>,
}

impl NodeSpatialIndex {
    /// Bulk-load the road nodes of `graph`.
    pub fn build(graph: &RoutingGraph) -> Self {
        let entries: Vec<NodeEntry> = graph
            .road_nodes()
            .map(|node| NodeEntry { point: [node.pos.lat, node.pos.lng], idx: node.idx })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl NodeLocator for NodeSpatialIndex {
    fn closest_node(&self, graph: &RoutingGraph, pos: GeoPoint) -> ClosestNode {
        let radius = graph.config().closest_node_radius_m;
        let (d_lat, d_lng) = pos.bbox_half_extent_deg(radius);
        let envelope = AABB::from_corners(
            [pos.lat - d_lat, pos.lng - d_lng],
            [pos.lat + d_lat, pos.lng + d_lng],
        );

        let mut best: Option<(f64, NodeIdx)> = None;
        for entry in self.tree.locate_in_envelope(&envelope) {
            let d = pos.distance_m(graph.node_pos(entry.idx));
            if d >= radius {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_d, best_idx)) => d < best_d || (d == best_d && entry.idx < best_idx),
            };
            if better {
                best = Some((d, entry.idx));
            }
        }

        match best {
            Some((distance_m, idx)) => ClosestNode { node: Some(graph.graph_node(idx)), distance_m },
            None => ClosestNode::none(),
        }
    }
}

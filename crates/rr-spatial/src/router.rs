//! Routing trait and default turn-restricted Dijkstra implementation.
//!
//! # Pluggability
//!
//! `rr-estimate` calls routing via the [`Router`] trait, so applications can
//! swap in custom implementations (A*, contraction hierarchies, cached
//! lookups) without touching the estimator.
//!
//! # Search state
//!
//! Whether a turn is legal depends on the way we arrived on, so the search
//! state is `(node, incoming way)` rather than just `node`.  The same physical
//! node may be settled several times, once per incoming way, each with its own
//! set of legal continuations.  Collapsing this to per-node visited tracking
//! would make a restriction at one node hide legal routes through it.
//!
//! # Cost units
//!
//! All costs are metres of weighted length (`f64`).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use rr_core::{NodeId, NodeIdx, WayId};

use crate::network::RoutingGraph;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: visited nodes and the total weighted length.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes from source to destination, inclusive.  Empty when unreachable.
    pub nodes: Vec<NodeId>,
    /// Way used for each hop; `ways.len() == nodes.len() - 1` when reachable.
    pub ways: Vec<WayId>,
    /// Sum of edge weights in metres; `+∞` when unreachable.
    pub distance_m: f64,
}

impl Route {
    /// The "no path" sentinel: no nodes, infinite distance.
    pub fn unreachable() -> Self {
        Self { nodes: Vec::new(), ways: Vec::new(), distance_m: f64::INFINITY }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance_m.is_finite()
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }

    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1_000.0
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// worker threads when estimating many orders at once.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields a single-node route of length 0.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NodeNotFound`] if either id was never inserted.
    /// - [`SpatialError::NoRoute`] if no legal path exists.
    fn route(&self, graph: &RoutingGraph, from: NodeId, to: NodeId) -> SpatialResult<Route>;

    /// Like [`route`](Self::route) but folds every failure into
    /// [`Route::unreachable`].
    fn shortest_path(&self, graph: &RoutingGraph, from: NodeId, to: NodeId) -> Route {
        self.route(graph, from, to).unwrap_or_else(|_| Route::unreachable())
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Label-correcting Dijkstra over `(node, incoming way)` states.
///
/// `max_distance_m` bounds the search: routes longer than the bound are
/// reported as [`SpatialError::NoRoute`] and the search stops as soon as every
/// frontier label exceeds it.  Callers that
/// need bounded latency on large tile sets use this instead of a timeout.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter {
    pub max_distance_m: Option<f64>,
}

impl DijkstraRouter {
    pub fn with_max_distance(max_distance_m: f64) -> Self {
        Self { max_distance_m: Some(max_distance_m) }
    }
}

impl Router for DijkstraRouter {
    fn route(&self, graph: &RoutingGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        let start  = graph.idx_of(from).ok_or(SpatialError::NodeNotFound(from))?;
        let target = graph.idx_of(to).ok_or(SpatialError::NodeNotFound(to))?;

        dijkstra(graph, start, target, self.max_distance_m)
            .ok_or(SpatialError::NoRoute { from, to })
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// One search label: a node reached via `way`, with a link to the label it
/// was expanded from.  Labels are never removed, so parent indices stay valid.
struct Label {
    node:   NodeIdx,
    way:    Option<WayId>,
    parent: Option<usize>,
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost:  f64,
    label: usize,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(
    graph: &RoutingGraph,
    start: NodeIdx,
    target: NodeIdx,
    max_distance_m: Option<f64>,
) -> Option<Route> {
    let mut labels = vec![Label { node: start, way: None, parent: None }];
    // best[(node, way)] = shortest tentative distance pushed for that state.
    let mut best: FxHashMap<(NodeIdx, WayId), f64> = FxHashMap::default();
    let mut settled: FxHashSet<(NodeIdx, WayId)> = FxHashSet::default();

    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, label: 0 });

    while let Some(State { cost, label }) = heap.pop() {
        let (node, way_in) = (labels[label].node, labels[label].way);

        if max_distance_m.is_some_and(|max| cost > max) {
            // Every remaining label is at least this long.
            return None;
        }

        if node == target {
            return Some(reconstruct(graph, &labels, label, cost));
        }

        // The start label has no incoming way and is popped exactly once.
        if let Some(way) = way_in {
            if !settled.insert((node, way)) {
                continue;
            }
        }

        for edge in graph.out_edges(node) {
            if let Some(way) = way_in {
                if !graph.is_turn_allowed(node, way, edge.way) {
                    continue;
                }
            }

            let state = (edge.to, edge.way);
            if settled.contains(&state) {
                continue;
            }

            let next = cost + edge.weight_m;
            if best.get(&state).is_none_or(|&known| next < known) {
                best.insert(state, next);
                labels.push(Label { node: edge.to, way: Some(edge.way), parent: Some(label) });
                heap.push(State { cost: next, label: labels.len() - 1 });
            }
        }
    }

    None
}

fn reconstruct(graph: &RoutingGraph, labels: &[Label], last: usize, distance_m: f64) -> Route {
    let mut nodes = Vec::new();
    let mut ways  = Vec::new();
    let mut cur = Some(last);
    while let Some(i) = cur {
        let label = &labels[i];
        nodes.push(graph.node_id(label.node));
        if let Some(way) = label.way {
            ways.push(way);
        }
        cur = label.parent;
    }
    nodes.reverse();
    ways.reverse();
    Route { nodes, ways, distance_m }
}

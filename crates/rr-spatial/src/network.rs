//! Routing graph representation and incremental construction.
//!
//! # Data layout
//!
//! Nodes live in an **arena** indexed by a dense [`NodeIdx`] assigned in
//! insertion order.  Map ids are translated once through a hashed lookup;
//! everything after that (search, nearest-node scans) works on indices.
//!
//! ```text
//! lookup:    NodeId ──► NodeIdx
//! node_ids:  [NodeIdx] ──► NodeId
//! node_pos:  [NodeIdx] ──► GeoPoint
//! out_edges: [NodeIdx] ──► [Edge { to, weight_m, way }]
//! ```
//!
//! Unlike a CSR layout, per-node edge lists can grow after construction,
//! which is what tiled loading needs: every new tile is applied with
//! [`RoutingGraph::extend`] and may add edges to nodes seen in earlier tiles.
//!
//! # Turn restrictions
//!
//! Restrictions are stored per via node as `from_way → {to_way}`.  Only nodes
//! that actually anchor a restriction get a table.

use log::{debug, trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use rr_core::{GeoPoint, NodeId, NodeIdx, WayId};

use crate::locate::{ClosestNode, LinearScan, NodeLocator};
use crate::osm::{Area, Node, Relation, Way};
use crate::router::{DijkstraRouter, Route, Router};

/// Default search radius for nearest-node lookups, in metres.
pub const DEFAULT_CLOSEST_NODE_RADIUS_M: f64 = 1_000.0;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Graph-level settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    /// Maximum distance (metres) between a query point and the node a
    /// nearest-node lookup may return.
    pub closest_node_radius_m: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { closest_node_radius_m: DEFAULT_CLOSEST_NODE_RADIUS_M }
    }
}

// ── Graph elements ────────────────────────────────────────────────────────────

/// A directed, weighted edge derived from one segment of a way.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub to:       NodeIdx,
    /// Haversine length times the road-class multiplier.
    pub weight_m: f64,
    pub way:      WayId,
}

/// Read-only view of one graph node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub idx: NodeIdx,
    pub id:  NodeId,
    pub pos: GeoPoint,
}

/// Forbidden `from_way → to_way` transitions through a single via node.
#[derive(Clone, Debug, Default)]
pub struct TurnRestrictions {
    forbidden: FxHashMap<WayId, FxHashSet<WayId>>,
}

impl TurnRestrictions {
    /// Forbid `from → to`.  Returns `false` if it was already forbidden.
    pub fn forbid(&mut self, from: WayId, to: WayId) -> bool {
        self.forbidden.entry(from).or_default().insert(to)
    }

    #[inline]
    pub fn is_turn_allowed(&self, from: WayId, to: WayId) -> bool {
        !self.forbidden.get(&from).is_some_and(|to_ways| to_ways.contains(&to))
    }

    /// Number of forbidden pairs.
    pub fn len(&self) -> usize {
        self.forbidden.values().map(FxHashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty()
    }
}

// ── RoutingGraph ──────────────────────────────────────────────────────────────

/// Road graph with per-node turn restrictions.
///
/// The graph only grows.  It is `Clone + Send + Sync`, so a finished graph
/// can be shared read-only across threads (see [`GraphStore`](crate::GraphStore)
/// for the copy-on-extend wrapper).
#[derive(Clone, Debug, Default)]
pub struct RoutingGraph {
    config: GraphConfig,

    // ── Node arena (indexed by NodeIdx) ───────────────────────────────────
    node_ids:  Vec<NodeId>,
    node_pos:  Vec<GeoPoint>,
    out_edges: Vec<Vec<Edge>>,
    in_degree: Vec<u32>,
    lookup:    FxHashMap<NodeId, NodeIdx>,

    restrictions: FxHashMap<NodeIdx, TurnRestrictions>,

    edge_count:        usize,
    restriction_count: usize,
}

impl RoutingGraph {
    pub fn new(config: GraphConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Build a graph from a set of tiles, applied in iteration order.
    pub fn with_areas<'a>(config: GraphConfig, areas: impl IntoIterator<Item = &'a Area>) -> Self {
        let mut graph = Self::new(config);
        for area in areas {
            graph.extend(area);
        }
        graph
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Apply one tile: all nodes, then all ways, then all relations.
    ///
    /// The order matters: edges can only connect nodes that are already
    /// present, and restrictions need their via node.
    pub fn extend(&mut self, area: &Area) {
        let (nodes_before, edges_before, restr_before) =
            (self.node_count(), self.edge_count, self.restriction_count);

        for node in &area.nodes {
            self.add_node(node);
        }
        for way in &area.ways {
            self.add_way(way);
        }
        for relation in &area.relations {
            self.add_relation(relation);
        }

        debug!(
            "extended graph with area {}: +{} nodes, +{} edges, +{} restrictions ({} nodes, {} edges total)",
            area.id,
            self.node_count() - nodes_before,
            self.edge_count - edges_before,
            self.restriction_count - restr_before,
            self.node_count(),
            self.edge_count,
        );
    }

    /// Insert a node, or overwrite the position of an existing one.
    ///
    /// Overwriting does not re-weight edges that were already derived from
    /// the old position.  Returns `None` only when the arena has run out of
    /// `u32` indices; the node is then dropped.
    pub fn add_node(&mut self, node: &Node) -> Option<NodeIdx> {
        if let Some(&idx) = self.lookup.get(&node.id) {
            self.node_pos[idx.index()] = node.pos();
            return Some(idx);
        }

        let Ok(idx) = NodeIdx::try_from(self.node_ids.len()) else {
            warn!("node {} dropped: graph holds {} nodes", node.id, self.node_ids.len());
            return None;
        };
        self.node_ids.push(node.id);
        self.node_pos.push(node.pos());
        self.out_edges.push(Vec::new());
        self.in_degree.push(0);
        self.lookup.insert(node.id, idx);
        Some(idx)
    }

    /// Derive edges from a way.  Returns how many directed edges were added.
    ///
    /// Ways with an unrecognized `highway` class add nothing.  Segments whose
    /// endpoints are not (yet) in the graph are skipped.
    pub fn add_way(&mut self, way: &Way) -> usize {
        let Some(class) = way.road_class() else {
            trace!("way {} skipped: highway {:?} is not routable", way.id, way.highway());
            return 0;
        };
        let multiplier = class.multiplier();
        let oneway = way.is_oneway();

        let mut added = 0;
        for pair in way.node_ids.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (Some(&from), Some(&to)) = (self.lookup.get(&a), self.lookup.get(&b)) else {
                trace!("way {}: segment {} → {} references a missing node", way.id, a, b);
                continue;
            };
            if from == to {
                continue;
            }

            let weight_m =
                self.node_pos[from.index()].distance_m(self.node_pos[to.index()]) * multiplier;

            added += self.insert_edge(from, Edge { to, weight_m, way: way.id }) as usize;
            if !oneway {
                added += self.insert_edge(to, Edge { to: from, weight_m, way: way.id }) as usize;
            }
        }
        added
    }

    /// Record the turn restriction a relation describes.  Returns `true` if a
    /// new forbidden transition was stored.
    pub fn add_relation(&mut self, relation: &Relation) -> bool {
        let Some(restriction) = relation.turn_restriction() else {
            return false;
        };
        let Some(&via) = self.lookup.get(&restriction.via) else {
            trace!("relation {} skipped: via node {} unknown", relation.id, restriction.via);
            return false;
        };

        let added = self
            .restrictions
            .entry(via)
            .or_default()
            .forbid(restriction.from, restriction.to);
        self.restriction_count += added as usize;
        added
    }

    fn insert_edge(&mut self, from: NodeIdx, edge: Edge) -> bool {
        let out = &mut self.out_edges[from.index()];
        // Tiles overlap at their borders, so the same way can arrive twice.
        if out.iter().any(|e| e.to == edge.to && e.way == edge.way) {
            return false;
        }
        out.push(edge);
        self.in_degree[edge.to.index()] += 1;
        self.edge_count += 1;
        true
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn restriction_count(&self) -> usize {
        self.restriction_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Number of nodes touching at least one edge.
    pub fn road_node_count(&self) -> usize {
        self.road_nodes().count()
    }

    // ── Node access ───────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<GraphNode> {
        self.idx_of(id).map(|idx| self.graph_node(idx))
    }

    #[inline]
    pub fn idx_of(&self, id: NodeId) -> Option<NodeIdx> {
        self.lookup.get(&id).copied()
    }

    #[inline]
    pub fn node_id(&self, idx: NodeIdx) -> NodeId {
        self.node_ids[idx.index()]
    }

    #[inline]
    pub fn node_pos(&self, idx: NodeIdx) -> GeoPoint {
        self.node_pos[idx.index()]
    }

    #[inline]
    pub fn graph_node(&self, idx: NodeIdx) -> GraphNode {
        GraphNode { idx, id: self.node_id(idx), pos: self.node_pos(idx) }
    }

    /// `true` if the node has at least one incoming or outgoing edge.
    #[inline]
    pub fn is_road_node(&self, idx: NodeIdx) -> bool {
        !self.out_edges[idx.index()].is_empty() || self.in_degree[idx.index()] > 0
    }

    /// Nodes that participate in at least one edge, in insertion order.
    ///
    /// Isolated nodes (only referenced by non-routable ways, or whose way
    /// segments were all dropped) are never yielded, so nearest-node lookups
    /// cannot resolve to a point that cannot start a path.
    pub fn road_nodes(&self) -> impl Iterator<Item = GraphNode> + '_ {
        (0..self.node_ids.len())
            .map(|i| NodeIdx(i as u32))
            .filter(|&idx| self.is_road_node(idx))
            .map(|idx| self.graph_node(idx))
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    #[inline]
    pub fn out_edges(&self, idx: NodeIdx) -> &[Edge] {
        &self.out_edges[idx.index()]
    }

    #[inline]
    pub fn out_degree(&self, idx: NodeIdx) -> usize {
        self.out_edges[idx.index()].len()
    }

    /// Whether arriving on `from` and leaving on `to` is legal at `via`.
    #[inline]
    pub fn is_turn_allowed(&self, via: NodeIdx, from: WayId, to: WayId) -> bool {
        self.restrictions
            .get(&via)
            .is_none_or(|table| table.is_turn_allowed(from, to))
    }

    pub fn turn_restrictions(&self, via: NodeIdx) -> Option<&TurnRestrictions> {
        self.restrictions.get(&via)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Shortest turn-respecting path using the default [`DijkstraRouter`].
    ///
    /// Returns [`Route::unreachable`] for unknown ids or disconnected nodes.
    pub fn find_shortest_path(&self, start: NodeId, end: NodeId) -> Route {
        DijkstraRouter::default().shortest_path(self, start, end)
    }

    /// Nearest road node within the configured radius, by linear scan.
    pub fn find_closest_node(&self, pos: GeoPoint) -> ClosestNode {
        LinearScan.closest_node(self, pos)
    }
}

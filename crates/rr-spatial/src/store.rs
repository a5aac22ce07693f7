//! The `GraphStore`: a shared, copy-on-extend home for the routing graph.
//!
//! Tile loads and route queries happen on different threads.  Readers call
//! [`GraphStore::snapshot`] and get an `Arc<RoutingGraph>` they can query for
//! as long as they like without holding any lock.  Writers never mutate a
//! published graph: they clone it, extend the clone, and swap the `Arc`.  A
//! half-applied tile is therefore never visible to a search.
//!
//! # Reconciling against the loaded tile set
//!
//! The application keeps the set of currently loaded tiles.  Passing that
//! whole set to [`GraphStore::sync`] brings the graph in line with it:
//!
//! - nothing new, nothing removed → [`SyncOutcome::Unchanged`]
//! - only additions → the new tiles are applied on top ([`SyncOutcome::Extended`])
//! - any previously applied tile is gone → the graph is rebuilt from scratch
//!   ([`SyncOutcome::Rebuilt`]), because the graph has no deletion API

use std::sync::Arc;

use log::{debug, info};
use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use rr_core::AreaId;

use crate::locate::NodeSpatialIndex;
use crate::network::{GraphConfig, RoutingGraph};
use crate::osm::Area;

/// What [`GraphStore::sync`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    Unchanged,
    /// This many new areas were applied on top of the current graph.
    Extended(usize),
    /// At least one applied area disappeared; the graph was rebuilt.
    Rebuilt,
}

struct StoreState {
    graph:  Arc<RoutingGraph>,
    loaded: FxHashSet<AreaId>,
}

/// Thread-safe owner of the current routing graph.
pub struct GraphStore {
    config: GraphConfig,
    state:  RwLock<StoreState>,
}

impl GraphStore {
    pub fn new(config: GraphConfig) -> Self {
        let graph = Arc::new(RoutingGraph::new(config.clone()));
        Self {
            config,
            state: RwLock::new(StoreState { graph, loaded: FxHashSet::default() }),
        }
    }

    /// The current graph.  Cheap: one `Arc` clone under a read lock.
    pub fn snapshot(&self) -> Arc<RoutingGraph> {
        Arc::clone(&self.state.read().graph)
    }

    /// Ids of the areas applied to the current graph.
    pub fn loaded_areas(&self) -> Vec<AreaId> {
        let mut ids: Vec<AreaId> = self.state.read().loaded.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Build a spatial index over the current snapshot.
    ///
    /// Returns the snapshot alongside so callers query the pair together.
    pub fn spatial_index(&self) -> (Arc<RoutingGraph>, NodeSpatialIndex) {
        let graph = self.snapshot();
        let index = NodeSpatialIndex::build(&graph);
        (graph, index)
    }

    /// Apply one area.  Returns `false` if an area with the same id was
    /// already applied (the call is then a no-op).
    pub fn extend(&self, area: &Area) -> bool {
        let mut state = self.state.write();
        if state.loaded.contains(&area.id) {
            return false;
        }

        let mut next = RoutingGraph::clone(&state.graph);
        next.extend(area);
        state.graph = Arc::new(next);
        state.loaded.insert(area.id);
        true
    }

    /// Reconcile the graph with the full set of currently loaded areas.
    pub fn sync<'a>(&self, areas: impl IntoIterator<Item = &'a Area>) -> SyncOutcome {
        let areas: Vec<&Area> = areas.into_iter().collect();
        let current: FxHashSet<AreaId> = areas.iter().map(|a| a.id).collect();

        let mut state = self.state.write();

        if state.loaded.iter().any(|id| !current.contains(id)) {
            let graph = RoutingGraph::with_areas(self.config.clone(), areas.iter().copied());
            info!(
                "rebuilt routing graph from {} areas ({} nodes, {} edges)",
                current.len(),
                graph.node_count(),
                graph.edge_count(),
            );
            state.graph = Arc::new(graph);
            state.loaded = current;
            return SyncOutcome::Rebuilt;
        }

        let fresh: Vec<&Area> = areas
            .iter()
            .copied()
            .filter(|a| !state.loaded.contains(&a.id))
            .collect();
        if fresh.is_empty() {
            return SyncOutcome::Unchanged;
        }

        let mut next = RoutingGraph::clone(&state.graph);
        let mut applied = 0;
        for area in fresh {
            // Duplicate ids inside one call are applied once.
            if state.loaded.insert(area.id) {
                next.extend(area);
                applied += 1;
            }
        }
        debug!("extended routing graph with {applied} new areas");
        state.graph = Arc::new(next);
        SyncOutcome::Extended(applied)
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

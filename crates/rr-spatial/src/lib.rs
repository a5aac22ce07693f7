//! `rr-spatial`: road network graph with turn-restricted routing and nearest-node lookup.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`osm`]     | map model: `Node`, `Way`, `Relation`, `Area`                    |
//! | [`network`] | `RoutingGraph` (node arena + edge lists + turn restrictions)    |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                       |
//! | [`locate`]  | `NodeLocator` trait, `LinearScan`, `NodeSpatialIndex` (R-tree)  |
//! | [`store`]   | `GraphStore`, copy-on-extend snapshots for concurrent readers   |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize`; enables `load_area_json{,_file}`. |

pub mod error;
pub mod locate;
pub mod network;
pub mod osm;
pub mod router;
pub mod store;


pub use error::{SpatialError, SpatialResult};
pub use locate::{ClosestNode, LinearScan, NodeLocator, NodeSpatialIndex};
pub use network::{Edge, GraphConfig, GraphNode, RoutingGraph, TurnRestrictions};
pub use osm::{Area, Member, MemberKind, Node, Relation, TurnRestriction, Way};
pub use router::{DijkstraRouter, Route, Router};
pub use store::{GraphStore, SyncOutcome};

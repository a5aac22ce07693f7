//! `rr-core`: foundational types for the `rideroute` routing engine.
//!
//! This crate is a dependency of every other `rr-*` crate.  It has no `rr-*`
//! dependencies and no mandatory external ones (only optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`ids`]    | map ids (`NodeId`, `WayId`, …), tariff keys, dense `NodeIdx`    |
//! | [`geo`]    | `GeoPoint`, haversine distance                                  |
//! | [`road`]   | `RoadClass`, recognized `highway` values and their multipliers |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;
pub mod road;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{AreaId, NodeId, NodeIdx, OrderId, RegionId, RelationId, VehicleClassId, WayId};
pub use road::RoadClass;

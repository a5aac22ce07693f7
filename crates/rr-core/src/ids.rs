//! Strongly typed, zero-cost identifier wrappers.
//!
//! Two families live here:
//!
//! - **Map ids** (`NodeId`, `WayId`, …) wrap the `i64` identifiers handed to
//!   us by the external tile loader.  They are opaque keys: never indices.
//! - **Dense indices** (`NodeIdx`) are assigned by the routing graph in
//!   insertion order and index directly into its arena `Vec`s.
//!
//! All ids are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed wrapper around an external (loader-assigned) identifier.
macro_rules! map_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

map_id! {
    /// Map node identifier as assigned by the map extract.
    pub struct NodeId(i64);
}

map_id! {
    /// Map way identifier.  Edges remember the way they were derived from so
    /// turn restrictions can be checked during search.
    pub struct WayId(i64);
}

map_id! {
    /// Map relation identifier.
    pub struct RelationId(i64);
}

map_id! {
    /// Identifier of one loaded map tile.
    pub struct AreaId(i64);
}

map_id! {
    /// Pricing region (city) a tariff applies to.
    pub struct RegionId(u32);
}

map_id! {
    /// Vehicle class a tariff applies to.
    pub struct VehicleClassId(u32);
}

map_id! {
    /// Ride request identifier.
    pub struct OrderId(u64);
}

// ── Dense arena index ─────────────────────────────────────────────────────────

/// Position of a node in the routing graph's arena.
///
/// Assigned sequentially from 0 as nodes are first inserted, so ordering by
/// `NodeIdx` is ordering by insertion.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeIdx(pub u32);

impl NodeIdx {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIdx({})", self.0)
    }
}

/// Fails once the arena outgrows `u32`.
impl TryFrom<usize> for NodeIdx {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<NodeIdx, Self::Error> {
        u32::try_from(n).map(NodeIdx)
    }
}

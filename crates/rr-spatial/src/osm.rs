//! Normalized map model handed over by the tile loader.
//!
//! The engine never parses raw map formats.  An external loader turns each
//! map tile into an [`Area`] of plain [`Node`]s, [`Way`]s and [`Relation`]s,
//! and the routing graph consumes those through
//! [`RoutingGraph::extend`](crate::RoutingGraph::extend).
//!
//! # Tags the engine reads
//!
//! | Element  | Tag        | Meaning                                             |
//! |----------|------------|-----------------------------------------------------|
//! | way      | `highway`  | road class, see [`RoadClass::from_highway`]         |
//! | way      | `oneway`   | `yes` (also `1`, `true`) → forward edges only       |
//! | relation | `type`     | only `restriction` relations are used               |
//!
//! With the `serde` feature every type here derives `Serialize`/`Deserialize`
//! and [`load_area_json`] / [`load_area_json_file`] read a whole tile from JSON.

use std::collections::BTreeMap;

use rr_core::{AreaId, GeoPoint, NodeId, RelationId, RoadClass, WayId};

/// Free-form `key → value` tags.
pub type Tags = BTreeMap<String, String>;

// ── Elements ──────────────────────────────────────────────────────────────────

/// A map node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:  NodeId,
    pub lat: f64,
    pub lng: f64,
}

impl Node {
    pub fn new(id: i64, lat: f64, lng: f64) -> Self {
        Self { id: NodeId(id), lat, lng }
    }

    #[inline]
    pub fn pos(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// An ordered run of nodes forming a road (or any other linear feature).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Way {
    pub id:       WayId,
    pub node_ids: Vec<NodeId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags:     Tags,
}

impl Way {
    pub fn new(id: i64, node_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            id:       WayId(id),
            node_ids: node_ids.into_iter().map(NodeId).collect(),
            tags:     Tags::new(),
        }
    }

    /// Builder-style tag setter, mostly for fixtures.
    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn highway(&self) -> Option<&str> {
        self.tags.get("highway").map(String::as_str)
    }

    /// The routable road class, or `None` if the way must not produce edges.
    pub fn road_class(&self) -> Option<RoadClass> {
        self.highway().and_then(RoadClass::from_highway)
    }

    /// `true` when traffic may only flow in node order.
    pub fn is_oneway(&self) -> bool {
        matches!(
            self.tags.get("oneway").map(String::as_str),
            Some("yes" | "1" | "true")
        )
    }
}

/// Kind of element a relation member points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MemberKind {
    Node,
    Way,
    Relation,
}

/// One member of a relation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: MemberKind,
    #[cfg_attr(feature = "serde", serde(rename = "ref"))]
    pub id:   i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: String,
}

impl Member {
    pub fn new(kind: MemberKind, id: i64, role: &str) -> Self {
        Self { kind, id, role: role.to_owned() }
    }
}

/// A relation between map elements.  Only turn restrictions matter here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    pub id:      RelationId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub members: Vec<Member>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags:    Tags,
}

impl Relation {
    /// A `type=restriction` relation forbidding `from → to` through `via`.
    pub fn restriction(id: i64, from: i64, via: i64, to: i64) -> Self {
        let mut tags = Tags::new();
        tags.insert("type".to_owned(), "restriction".to_owned());
        Self {
            id: RelationId(id),
            members: vec![
                Member::new(MemberKind::Way, from, "from"),
                Member::new(MemberKind::Node, via, "via"),
                Member::new(MemberKind::Way, to, "to"),
            ],
            tags,
        }
    }

    /// Extract the restricted turn this relation describes.
    ///
    /// Returns `None` unless the relation is tagged `type=restriction` and has
    /// a `from` way, a `via` node and a `to` way.  Restrictions whose via is
    /// a way are not supported and yield `None`.  If a role appears more than
    /// once the last member wins.
    pub fn turn_restriction(&self) -> Option<TurnRestriction> {
        if self.tags.get("type").map(String::as_str) != Some("restriction") {
            return None;
        }

        let mut from = None;
        let mut via  = None;
        let mut to   = None;
        for member in &self.members {
            match (member.role.as_str(), member.kind) {
                ("from", MemberKind::Way)  => from = Some(WayId(member.id)),
                ("via",  MemberKind::Node) => via  = Some(NodeId(member.id)),
                ("via",  _)                => via  = None,
                ("to",   MemberKind::Way)  => to   = Some(WayId(member.id)),
                _ => {}
            }
        }

        Some(TurnRestriction { from: from?, via: via?, to: to? })
    }
}

/// A forbidden transition from one way onto another through a shared node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TurnRestriction {
    pub from: WayId,
    pub via:  NodeId,
    pub to:   WayId,
}

// ── Area ──────────────────────────────────────────────────────────────────────

/// One loaded map tile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub id:        AreaId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes:     Vec<Node>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ways:      Vec<Way>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub relations: Vec<Relation>,
}

impl Area {
    pub fn new(id: i64) -> Self {
        Self {
            id:        AreaId(id),
            nodes:     Vec::new(),
            ways:      Vec::new(),
            relations: Vec::new(),
        }
    }
}

// ── JSON loading ──────────────────────────────────────────────────────────────

/// Read one [`Area`] from a JSON document.
///
/// ```json
/// { "id": 7,
///   "nodes": [ { "id": 1, "lat": 5.55, "lng": -0.19 } ],
///   "ways": [ { "id": 10, "node_ids": [1, 2], "tags": { "highway": "primary" } } ],
///   "relations": [] }
/// ```
#[cfg(feature = "serde")]
pub fn load_area_json<R: std::io::Read>(reader: R) -> crate::SpatialResult<Area> {
    serde_json::from_reader(reader).map_err(|e| crate::SpatialError::Parse(e.to_string()))
}

/// Load an [`Area`] from a JSON file on disk.
#[cfg(feature = "serde")]
pub fn load_area_json_file(path: &std::path::Path) -> crate::SpatialResult<Area> {
    let file = std::fs::File::open(path)?;
    load_area_json(std::io::BufReader::new(file))
}

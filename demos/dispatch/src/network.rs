//! Synthetic two-tile street grid.
//!
//! Seven columns by four rows of intersections ~550 m apart, split into a
//! west tile (columns 0–3) and an east tile (columns 3–6).  Column 3 sits in
//! both tiles, the way a boundary street does in real tiled extracts.
//!
//! ```text
//!   row 3  o───o───o───o───o───o───o
//!   row 2  o───o───o───o───o───o───o
//!   row 1  o──>o──>o──>o───o───o───o     (west half one-way eastbound)
//!   row 0  o───o───o───o───o───o───o
//!          0   1   2   3   4   5   6
//! ```
//!
//! At (row 0, column 2) turning from the row 0 street onto column 2 is
//! forbidden.  A footway cuts diagonally across the west tile; it is not
//! routable.

use rr_core::GeoPoint;
use rr_spatial::{Area, Node, Relation, Way};

pub const ORIGIN:  GeoPoint = GeoPoint::new(30.690, -88.070);
pub const SPACING: f64      = 0.005;
const ROWS: i64 = 4;

pub fn node_id(row: i64, col: i64) -> i64 {
    1_000 + row * 100 + col
}

pub fn position(row: i64, col: i64) -> GeoPoint {
    GeoPoint::new(ORIGIN.lat + row as f64 * SPACING, ORIGIN.lng + col as f64 * SPACING)
}

fn tile(id: i64, cols: std::ops::RangeInclusive<i64>, row_way_base: i64) -> Area {
    let mut area = Area::new(id);

    for row in 0..ROWS {
        for col in cols.clone() {
            let pos = position(row, col);
            area.nodes.push(Node::new(node_id(row, col), pos.lat, pos.lng));
        }
    }

    for row in 0..ROWS {
        let class = if row == 0 { "secondary" } else { "residential" };
        area.ways.push(
            Way::new(row_way_base + row, cols.clone().map(|c| node_id(row, c))).tag("highway", class),
        );
    }
    for col in cols {
        area.ways.push(
            Way::new(30 + col, (0..ROWS).map(|r| node_id(r, col))).tag("highway", "tertiary"),
        );
    }
    area
}

/// `[west, east]`
pub fn build_tiles() -> [Area; 2] {
    let mut west = tile(1, 0..=3, 10);
    let east = tile(2, 3..=6, 20);

    // Row 1 west half is one-way.
    for way in &mut west.ways {
        if way.id.0 == 11 {
            *way = way.clone().tag("oneway", "yes");
        }
    }
    west.ways.push(
        Way::new(99, [node_id(0, 0), node_id(1, 1), node_id(2, 2)]).tag("highway", "footway"),
    );
    west.relations.push(Relation::restriction(500, 10, node_id(0, 2), 32));

    [west, east]
}

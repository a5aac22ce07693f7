//! dispatch: rank pending ride orders for one driver on a synthetic grid.
//!
//! Loads two map tiles into a `GraphStore`, reads the estimator config
//! (embedded, or a JSON file passed as the first argument), and prints the
//! pending orders best first.  Set `RUST_LOG=debug` to see why an order has
//! no estimate.

mod network;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::NaiveTime;
use log::info;

use rr_core::{GeoPoint, OrderId, VehicleClassId};
use rr_estimate::{load_config_json, EstimatorConfig, Order, OrderEstimator};
use rr_spatial::{GraphConfig, GraphStore};

use network::{build_tiles, position};

// ── Configuration ─────────────────────────────────────────────────────────────

const CONFIG_JSON: &str = r#"{
    "region": 1,
    "profit_ranks": { "low": 0, "medium": 60, "high": 120 },
    "tariffs": [
        { "region": 1, "vehicle_class": 1,
          "fuel_cost": 8.0, "rate": 30.0, "base_fare": 40.0, "min_fare": 70.0,
          "time_modifications": [
              { "start": "22:00:00", "end": "06:00:00", "rate": 45.0, "min_fare": 90.0 }
          ] },
        { "region": 1, "vehicle_class": 2,
          "fuel_cost": 12.0, "rate": 50.0, "base_fare": 80.0, "min_fare": 120.0 }
    ]
}"#;

const ECONOMY: VehicleClassId = VehicleClassId(1);

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn nudge(p: GeoPoint) -> GeoPoint {
    GeoPoint::new(p.lat + 0.0004, p.lng - 0.0003)
}

fn pending_orders() -> Vec<Order> {
    let order = |id, from: GeoPoint, to: Option<GeoPoint>, at| Order {
        id:            OrderId(id),
        vehicle_class: ECONOMY,
        pickup:        Some(nudge(from)),
        destination:   to.map(nudge),
        pickup_time:   at,
    };
    vec![
        order(1, position(0, 1), Some(position(3, 6)), time(9, 30)),
        order(2, position(2, 0), Some(position(2, 3)), time(23, 15)),
        order(3, position(1, 3), Some(position(1, 0)), time(14, 0)), // against the one-way
        order(4, position(3, 3), None, time(8, 0)),
        order(5, position(0, 5), Some(position(3, 0)), time(2, 45)),
        order(6, position(3, 2), Some(GeoPoint::new(31.5, -87.0)), time(18, 0)), // off map
    ]
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== dispatch: rideroute order ranking ===");
    println!();

    // 1. Load tiles.
    let store = GraphStore::new(GraphConfig::default());
    let [west, east] = build_tiles();
    let outcome = store.sync([&west, &east]);
    let graph = store.snapshot();
    println!(
        "Tiles {:?}: {} nodes, {} edges, {} turn restrictions ({outcome:?})",
        store.loaded_areas(),
        graph.node_count(),
        graph.edge_count(),
        graph.restriction_count(),
    );

    // 2. Estimator config.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config_json(Path::new(&path))?,
        None => EstimatorConfig::from_reader(CONFIG_JSON.as_bytes())?,
    };
    let tariffs = config.tariff_table()?;
    info!("{} tariffs for region {}", tariffs.len(), config.region);

    // 3. Rank.
    let (graph, index) = store.spatial_index();
    let estimator = OrderEstimator::new(&graph, &tariffs, config.region)
        .with_locator(&index)
        .with_thresholds(config.profit_ranks);

    let driver = nudge(position(0, 0));
    let orders = pending_orders();

    let t0 = Instant::now();
    let ranked = estimator.rank_orders(&orders, driver);
    let elapsed = t0.elapsed();

    println!("Driver at {driver}, {} pending orders", orders.len());
    println!();
    println!("{:<8} {:<7} {:>10} {:>12} {:>8}", "Order", "Pickup", "Trip km", "Profit", "Rank");
    println!("{}", "-".repeat(49));
    for entry in &ranked {
        let trip_km = estimator
            .trip_distances(entry.order, driver)
            .map(|t| format!("{:.2}", t.positioning_km() + t.fare_km()))
            .unwrap_or_else(|| "-".into());
        let profit = entry
            .estimation
            .profit
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| "undefined".into());
        let rank = entry
            .estimation
            .profit_rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<8} {:<7} {:>10} {:>12} {:>8}",
            entry.order.id.0,
            entry.order.pickup_time.format("%H:%M").to_string(),
            trip_km,
            profit,
            rank,
        );
    }
    println!();
    println!("Ranked in {:.3} ms", elapsed.as_secs_f64() * 1_000.0);

    // 4. Unload the east tile: the store rebuilds, east-side orders drop out.
    let outcome = store.sync([&west]);
    let (graph, index) = store.spatial_index();
    let estimator = OrderEstimator::new(&graph, &tariffs, config.region)
        .with_locator(&index)
        .with_thresholds(config.profit_ranks);
    let defined = estimator
        .estimate_all(&orders, driver)
        .iter()
        .filter(|e| e.is_defined())
        .count();
    println!(
        "After unloading the east tile ({outcome:?}): {} nodes, {defined}/{} orders estimable",
        graph.node_count(),
        orders.len(),
    );

    println!();
    println!("{}", serde_json::to_string_pretty(&estimator.estimate(&orders[1], driver))?);

    Ok(())
}

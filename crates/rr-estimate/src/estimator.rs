//! `OrderEstimator`: profit of a pending ride for a driver at a given position.
//!
//! # Pipeline
//!
//! ```text
//! driver pos ─┐
//! pickup     ─┼─ NodeLocator ─→ 3 road nodes ─ Router ─→ positioning_m, fare_m
//! destination ┘                                               │
//!                      Tariff (region, vehicle class) @ pickup time
//!                                                             │
//!                                income − cost = profit ─→ ProfitRank
//! ```
//!
//! Every step can fail: a coordinate with no road node within the locator
//! radius, an unreachable leg, a missing tariff, a missing coordinate on the
//! order.  Each failure makes the estimate *undefined* (`None`), which callers
//! must keep apart from a genuine zero profit.

use std::cmp::Ordering;

use chrono::NaiveTime;
use log::debug;
use serde::{Deserialize, Serialize};

use rr_core::{GeoPoint, NodeId, OrderId, RegionId, VehicleClassId};
use rr_spatial::{DijkstraRouter, LinearScan, NodeLocator, Router, RoutingGraph};

use crate::rank::{ProfitRank, RankThresholds};
use crate::tariff::TariffTable;

// ── Inputs and outputs ────────────────────────────────────────────────────────

/// A pending ride request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id:            OrderId,
    pub vehicle_class: VehicleClassId,
    pub pickup:        Option<GeoPoint>,
    pub destination:   Option<GeoPoint>,
    /// Local time of day of the pickup; selects the tariff window.
    pub pickup_time:   NaiveTime,
}

/// Routed lengths of the two legs of a trip, in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TripDistances {
    /// Driver position → pickup.
    pub positioning_m: f64,
    /// Pickup → destination.
    pub fare_m:        f64,
}

impl TripDistances {
    #[inline]
    pub fn positioning_km(&self) -> f64 {
        self.positioning_m / 1_000.0
    }

    #[inline]
    pub fn fare_km(&self) -> f64 {
        self.fare_m / 1_000.0
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderEstimation {
    pub profit:      Option<f64>,
    /// `None` exactly when `profit` is `None`.
    pub profit_rank: Option<ProfitRank>,
}

impl OrderEstimation {
    pub fn undefined() -> Self {
        Self::default()
    }

    pub fn is_defined(&self) -> bool {
        self.profit.is_some()
    }
}

/// An order paired with its estimate, as returned by
/// [`OrderEstimator::rank_orders`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EstimatedOrder<'o> {
    pub order:      &'o Order,
    pub estimation: OrderEstimation,
}

// ── Estimator ─────────────────────────────────────────────────────────────────

/// Stateless profit estimator over one graph snapshot and tariff table.
///
/// The router and locator default to [`DijkstraRouter`] and [`LinearScan`];
/// swap them with [`with_router`](Self::with_router) and
/// [`with_locator`](Self::with_locator).
pub struct OrderEstimator<'a, R: Router = DijkstraRouter, L: NodeLocator = LinearScan> {
    graph:      &'a RoutingGraph,
    tariffs:    &'a TariffTable,
    region:     RegionId,
    thresholds: RankThresholds,
    router:     R,
    locator:    L,
}

impl<'a> OrderEstimator<'a> {
    pub fn new(graph: &'a RoutingGraph, tariffs: &'a TariffTable, region: RegionId) -> Self {
        Self {
            graph,
            tariffs,
            region,
            thresholds: RankThresholds::default(),
            router: DijkstraRouter::default(),
            locator: LinearScan,
        }
    }
}

impl<'a, R: Router, L: NodeLocator> OrderEstimator<'a, R, L> {
    pub fn with_router<R2: Router>(self, router: R2) -> OrderEstimator<'a, R2, L> {
        OrderEstimator {
            graph:      self.graph,
            tariffs:    self.tariffs,
            region:     self.region,
            thresholds: self.thresholds,
            router,
            locator:    self.locator,
        }
    }

    pub fn with_locator<L2: NodeLocator>(self, locator: L2) -> OrderEstimator<'a, R, L2> {
        OrderEstimator {
            graph:      self.graph,
            tariffs:    self.tariffs,
            region:     self.region,
            thresholds: self.thresholds,
            router:     self.router,
            locator,
        }
    }

    pub fn with_thresholds(mut self, thresholds: RankThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &RankThresholds {
        &self.thresholds
    }

    /// Route both legs of `order` for a driver at `driver`.
    pub fn trip_distances(&self, order: &Order, driver: GeoPoint) -> Option<TripDistances> {
        let (Some(pickup), Some(destination)) = (order.pickup, order.destination) else {
            debug!("{}: no estimate, order has no pickup or destination", order.id);
            return None;
        };

        let driver_node      = self.resolve(order.id, "driver", driver)?;
        let pickup_node      = self.resolve(order.id, "pickup", pickup)?;
        let destination_node = self.resolve(order.id, "destination", destination)?;

        let positioning_m = self.leg(order.id, "positioning", driver_node, pickup_node)?;
        let fare_m        = self.leg(order.id, "fare", pickup_node, destination_node)?;
        Some(TripDistances { positioning_m, fare_m })
    }

    /// Estimated profit, or `None` when any input is missing or unresolvable.
    pub fn estimate_profit(&self, order: &Order, driver: GeoPoint) -> Option<f64> {
        let Some(tariff) = self.tariffs.get(self.region, order.vehicle_class) else {
            debug!(
                "{}: no estimate, no tariff for {} / {}",
                order.id, self.region, order.vehicle_class,
            );
            return None;
        };
        let trip = self.trip_distances(order, driver)?;
        Some(tariff.factors_at(order.pickup_time).profit(trip))
    }

    pub fn estimate(&self, order: &Order, driver: GeoPoint) -> OrderEstimation {
        let profit = self.estimate_profit(order, driver);
        OrderEstimation { profit, profit_rank: profit.map(|p| self.thresholds.rank(p)) }
    }

    /// Estimate a batch; output is index-aligned with `orders`.
    ///
    /// With the `parallel` Cargo feature the batch runs on Rayon's thread pool.
    pub fn estimate_all(&self, orders: &[Order], driver: GeoPoint) -> Vec<OrderEstimation> {
        #[cfg(not(feature = "parallel"))]
        {
            orders.iter().map(|order| self.estimate(order, driver)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            orders.par_iter().map(|order| self.estimate(order, driver)).collect()
        }
    }

    /// All orders sorted by profit, most profitable first; undefined
    /// estimates go last.  Equal profits keep their input order.
    pub fn rank_orders<'o>(&self, orders: &'o [Order], driver: GeoPoint) -> Vec<EstimatedOrder<'o>> {
        let mut ranked: Vec<EstimatedOrder<'o>> = orders
            .iter()
            .zip(self.estimate_all(orders, driver))
            .map(|(order, estimation)| EstimatedOrder { order, estimation })
            .collect();

        ranked.sort_by(|a, b| match (a.estimation.profit, b.estimation.profit) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None)    => Ordering::Less,
            (None, Some(_))    => Ordering::Greater,
            (None, None)       => Ordering::Equal,
        });
        ranked
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn resolve(&self, order: OrderId, what: &str, pos: GeoPoint) -> Option<NodeId> {
        let closest = self.locator.closest_node(self.graph, pos);
        match closest.node {
            Some(node) => Some(node.id),
            None => {
                debug!("{order}: no estimate, no road node near {what} {pos}");
                None
            }
        }
    }

    fn leg(&self, order: OrderId, what: &str, from: NodeId, to: NodeId) -> Option<f64> {
        let route = self.router.shortest_path(self.graph, from, to);
        if route.is_reachable() {
            Some(route.distance_m)
        } else {
            debug!("{order}: no estimate, {what} leg {from} → {to} unreachable");
            None
        }
    }
}

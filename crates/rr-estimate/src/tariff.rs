//! Tariffs and time-of-day pricing windows.
//!
//! A [`Tariff`] is a set of base [`TariffFactors`] plus an ordered list of
//! [`TimeModification`] windows.  At estimation time the first window that
//! contains the order's pickup time overrides some of the base factors:
//!
//! ```text
//! base:    fuel_cost=1.2  rate=12  base_fare=40  min_fare=60
//! 22:00–06:00 { rate: 15 }
//!
//! pickup 23:30  →  fuel_cost=1.2  rate=15  base_fare=40  min_fare=60
//! pickup 12:00  →  base factors unchanged
//! ```

use chrono::NaiveTime;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use rr_core::{RegionId, VehicleClassId};

use crate::estimator::TripDistances;
use crate::{EstimateError, EstimateResult};

// ── Factors ───────────────────────────────────────────────────────────────────

/// Monetary factors of one tariff.  Distances are in kilometres.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TariffFactors {
    /// Cost per driven kilometre (positioning and fare legs alike).
    pub fuel_cost: f64,
    /// Income per fare kilometre.
    pub rate:      f64,
    pub base_fare: f64,
    pub min_fare:  f64,
}

impl TariffFactors {
    /// `max(base_fare + rate × fare_km, min_fare)`
    pub fn income(&self, fare_km: f64) -> f64 {
        (self.base_fare + self.rate * fare_km).max(self.min_fare)
    }

    /// `fuel_cost × (positioning_km + fare_km)`
    pub fn cost(&self, positioning_km: f64, fare_km: f64) -> f64 {
        self.fuel_cost * (positioning_km + fare_km)
    }

    pub fn profit(&self, trip: TripDistances) -> f64 {
        let fare_km = trip.fare_km();
        self.income(fare_km) - self.cost(trip.positioning_km(), fare_km)
    }

    /// Copy of `self` with every factor present in `overrides` replaced.
    pub fn with_overrides(self, overrides: &FactorOverrides) -> Self {
        Self {
            fuel_cost: overrides.fuel_cost.unwrap_or(self.fuel_cost),
            rate:      overrides.rate.unwrap_or(self.rate),
            base_fare: overrides.base_fare.unwrap_or(self.base_fare),
            min_fare:  overrides.min_fare.unwrap_or(self.min_fare),
        }
    }
}

/// Partial [`TariffFactors`]; absent fields keep the base value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate:      Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fare: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_fare:  Option<f64>,
}

// ── Time windows ──────────────────────────────────────────────────────────────

/// A local time-of-day window `[start, end)` carrying factor overrides.
///
/// `start > end` wraps past midnight (`22:00–06:00` covers 23:00 and 05:59).
/// `start == end` matches nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeModification {
    pub start:     NaiveTime,
    pub end:       NaiveTime,
    #[serde(flatten)]
    pub overrides: FactorOverrides,
}

impl TimeModification {
    pub fn new(start: NaiveTime, end: NaiveTime, overrides: FactorOverrides) -> Self {
        Self { start, end, overrides }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }
}

// ── Tariff ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    #[serde(flatten)]
    pub factors:            TariffFactors,
    #[serde(default)]
    pub time_modifications: Vec<TimeModification>,
}

impl Tariff {
    pub fn new(factors: TariffFactors) -> Self {
        Self { factors, time_modifications: Vec::new() }
    }

    pub fn with_window(mut self, window: TimeModification) -> Self {
        self.time_modifications.push(window);
        self
    }

    /// The window that applies at `time`, if any.  First match wins.
    pub fn window_at(&self, time: NaiveTime) -> Option<&TimeModification> {
        self.time_modifications.iter().find(|w| w.contains(time))
    }

    /// Effective factors at `time`.
    pub fn factors_at(&self, time: NaiveTime) -> TariffFactors {
        match self.window_at(time) {
            Some(window) => self.factors.with_overrides(&window.overrides),
            None => self.factors,
        }
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// Tariffs keyed by `(region, vehicle class)`.
#[derive(Clone, Debug, Default)]
pub struct TariffTable {
    tariffs: FxHashMap<(RegionId, VehicleClassId), Tariff>,
}

impl TariffTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tariff, failing if the key is already taken.
    pub fn insert(
        &mut self,
        region: RegionId,
        vehicle_class: VehicleClassId,
        tariff: Tariff,
    ) -> EstimateResult<()> {
        if self.tariffs.contains_key(&(region, vehicle_class)) {
            return Err(EstimateError::DuplicateTariff { region, vehicle_class });
        }
        self.tariffs.insert((region, vehicle_class), tariff);
        Ok(())
    }

    pub fn get(&self, region: RegionId, vehicle_class: VehicleClassId) -> Option<&Tariff> {
        self.tariffs.get(&(region, vehicle_class))
    }

    pub fn len(&self) -> usize {
        self.tariffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tariffs.is_empty()
    }
}

//! `rr-estimate`: tariffs, time-of-day pricing, and order profit ranking.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`tariff`]    | `TariffFactors`, `FactorOverrides`, `TimeModification`, `Tariff`, `TariffTable` |
//! | [`rank`]      | `ProfitRank`, `RankThresholds`                                  |
//! | [`estimator`] | `Order`, `OrderEstimator`, `OrderEstimation`, `TripDistances`   |
//! | [`config`]    | `EstimatorConfig`, `load_config_json`                           |
//! | [`error`]     | `EstimateError`, `EstimateResult<T>`                            |
//!
//! # Profit model (summary)
//!
//! ```text
//! income = max(base_fare + rate × fare_km, min_fare)
//! cost   = fuel_cost × (positioning_km + fare_km)
//! profit = income − cost
//! ```
//!
//! `positioning_km` is the routed driver → pickup length, `fare_km` the
//! routed pickup → destination length.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                            |
//! |------------|---------------------------------------------------|
//! | `parallel` | `estimate_all` / `rank_orders` run on Rayon.      |

pub mod config;
pub mod error;
pub mod estimator;
pub mod rank;
pub mod tariff;


pub use config::{load_config_json, EstimatorConfig, TariffEntry};
pub use error::{EstimateError, EstimateResult};
pub use estimator::{EstimatedOrder, Order, OrderEstimation, OrderEstimator, TripDistances};
pub use rank::{ProfitRank, RankThresholds};
pub use tariff::{FactorOverrides, Tariff, TariffFactors, TariffTable, TimeModification};

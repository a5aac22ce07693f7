//! JSON estimator configuration.
//!
//! # Format
//!
//! ```json
//! {
//!   "region": 1,
//!   "profit_ranks": { "low": 0, "medium": 1000, "high": 10000 },
//!   "tariffs": [
//!     {
//!       "region": 1, "vehicle_class": 2,
//!       "fuel_cost": 1.2, "rate": 12.0, "base_fare": 40.0, "min_fare": 60.0,
//!       "time_modifications": [
//!         { "start": "22:00:00", "end": "06:00:00", "rate": 15.0 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `profit_ranks` and `time_modifications` are optional.  Two tariffs with
//! the same `(region, vehicle_class)` are rejected.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use rr_core::{RegionId, VehicleClassId};

use crate::rank::RankThresholds;
use crate::tariff::{Tariff, TariffTable};
use crate::{EstimateError, EstimateResult};

/// One row of the `tariffs` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TariffEntry {
    pub region:        RegionId,
    pub vehicle_class: VehicleClassId,
    #[serde(flatten)]
    pub tariff:        Tariff,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Region the driver operates in; selects the tariff row.
    pub region:       RegionId,
    #[serde(default)]
    pub profit_ranks: RankThresholds,
    #[serde(default)]
    pub tariffs:      Vec<TariffEntry>,
}

impl EstimatorConfig {
    /// Parse from any `Read` source and validate the tariff keys.
    pub fn from_reader<R: Read>(reader: R) -> EstimateResult<Self> {
        let config: Self = serde_json::from_reader(reader)
            .map_err(|e| EstimateError::Parse(e.to_string()))?;
        config.tariff_table()?;
        Ok(config)
    }

    /// Build the lookup table; fails on duplicate keys.
    pub fn tariff_table(&self) -> EstimateResult<TariffTable> {
        let mut table = TariffTable::new();
        for entry in &self.tariffs {
            table.insert(entry.region, entry.vehicle_class, entry.tariff.clone())?;
        }
        Ok(table)
    }
}

/// Load an [`EstimatorConfig`] from a JSON file.
pub fn load_config_json(path: &Path) -> EstimateResult<EstimatorConfig> {
    let file = std::fs::File::open(path)?;
    EstimatorConfig::from_reader(std::io::BufReader::new(file))
}

use thiserror::Error;

use rr_core::{RegionId, VehicleClassId};

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("estimator config parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate tariff for {region} / {vehicle_class}")]
    DuplicateTariff {
        region:        RegionId,
        vehicle_class: VehicleClassId,
    },
}

pub type EstimateResult<T> = Result<T, EstimateError>;

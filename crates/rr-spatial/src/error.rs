//! Spatial-subsystem error type.

use thiserror::Error;

use rr_core::NodeId;

/// Errors produced by `rr-spatial`.
///
/// Malformed map data never surfaces here: dangling references are dropped
/// while building the graph.  These variants only describe query outcomes
/// and tile-loading failures.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[cfg(feature = "serde")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("area parse error: {0}")]
    Parse(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

//! Error types shared by the route and plan pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// Rejected before any track work starts
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("computation error on leg {leg}: {reason}")]
    Computation { leg: usize, reason: String },

    #[error("failed to read GPX route: {0}")]
    Gpx(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;

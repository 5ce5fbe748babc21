//! trailplan - Trail race pacing and training calendar
//!
//! Splits a recorded route into timed legs and builds a periodized
//! training plan sized to the route's distance and climb.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod plan;
pub mod report;
pub mod track;

pub use config::{PaceModel, PlanConfig};
pub use error::{PlanError, Result};
pub use pipeline::{Pipeline, RouteReport};

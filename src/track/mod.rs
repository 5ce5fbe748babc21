//! Route geometry - point records, great-circle distance, route totals
//!
//! Features:
//! - Haversine distance between two points
//! - One-pass totals: distance, climb, descent
//! - Leg segmentation with pace estimates (see `legs`)
//! - GPX reading (see `gpx`)

pub mod gpx;
pub mod legs;

pub use legs::{Leg, LegSegmenter};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A single recorded route sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    pub time: Option<DateTime<Utc>>,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64, elevation: Option<f64>) -> Self {
        Self {
            time: None,
            latitude,
            longitude,
            elevation,
        }
    }

    /// Elevation in metres, 0 when the sample has none
    pub fn elevation_m(&self) -> f64 {
        match self.elevation {
            Some(e) if e.is_finite() => e,
            _ => 0.0,
        }
    }
}

/// Great-circle distance in km (haversine)
pub fn geo_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance and elevation change between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Step {
    pub distance_km: f64,
    pub climb_m: f64,
    pub descent_m: f64,
}

impl Step {
    pub fn between(a: &TrackPoint, b: &TrackPoint) -> Self {
        let delta = b.elevation_m() - a.elevation_m();
        Self {
            distance_km: geo_distance(a.latitude, a.longitude, b.latitude, b.longitude),
            climb_m: delta.max(0.0),
            descent_m: (-delta).max(0.0),
        }
    }
}

/// Iterate over consecutive point pairs
pub(crate) fn steps(points: &[TrackPoint]) -> impl Iterator<Item = Step> + '_ {
    points.windows(2).map(|w| Step::between(&w[0], &w[1]))
}

/// Whole-route totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrackTotals {
    pub distance_km: f64,
    pub climb_m: f64,
    pub descent_m: f64,
}

impl TrackTotals {
    /// Walk the route once. Fewer than two points gives all zeros.
    pub fn from_points(points: &[TrackPoint]) -> Self {
        steps(points).fold(Self::default(), |mut totals, step| {
            totals.distance_km += step.distance_km;
            totals.climb_m += step.climb_m;
            totals.descent_m += step.descent_m;
            totals
        })
    }
}

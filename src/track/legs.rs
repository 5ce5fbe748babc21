//! Leg segmentation - fixed-distance legs with estimated durations
//!
//! The segment that pushes a leg over the threshold belongs entirely to
//! that leg (distance, climb and descent). Legs may therefore run slightly
//! past the threshold, and leg distances always add up to the route total.

use serde::Serialize;
use tracing::debug;

use super::{TrackPoint, steps};
use crate::config::PaceModel;
use crate::error::{PlanError, Result};

/// One leg of the pacing table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    /// 1-based, in route order
    pub index: usize,
    pub distance_km: f64,
    pub climb_m: f64,
    pub descent_m: f64,
    pub duration_h: f64,
    pub cumulative_distance_km: f64,
    pub cumulative_duration_h: f64,
    pub avg_speed_kmh: f64,
}

/// Running accumulators for the leg being built
#[derive(Debug, Default)]
struct OpenLeg {
    distance_km: f64,
    climb_m: f64,
    descent_m: f64,
}

/// Splits a route into legs of roughly `threshold_km`
pub struct LegSegmenter {
    threshold_km: f64,
    pace: PaceModel,
}

impl LegSegmenter {
    pub fn new(threshold_km: f64, pace: PaceModel) -> Self {
        Self { threshold_km, pace }
    }

    /// Walk the route and emit legs. Empty or single-point routes give no legs.
    pub fn segment(&self, points: &[TrackPoint]) -> Result<Vec<Leg>> {
        let mut legs = Vec::new();
        let mut open = OpenLeg::default();
        let mut cumulative_distance = 0.0;
        let mut cumulative_duration = 0.0;

        for step in steps(points) {
            open.distance_km += step.distance_km;
            open.climb_m += step.climb_m;
            open.descent_m += step.descent_m;
            cumulative_distance += step.distance_km;

            if open.distance_km >= self.threshold_km {
                let leg = self.close_leg(
                    legs.len() + 1,
                    &open,
                    cumulative_distance,
                    &mut cumulative_duration,
                )?;
                legs.push(leg);
                open = OpenLeg::default();
            }
        }

        // Residual distance shorter than the threshold still gets its own leg
        if open.distance_km > 0.0 {
            let leg = self.close_leg(
                legs.len() + 1,
                &open,
                cumulative_distance,
                &mut cumulative_duration,
            )?;
            debug!(index = leg.index, distance_km = leg.distance_km, "flushed partial leg");
            legs.push(leg);
        }

        Ok(legs)
    }

    fn close_leg(
        &self,
        index: usize,
        open: &OpenLeg,
        cumulative_distance: f64,
        cumulative_duration: &mut f64,
    ) -> Result<Leg> {
        let effort = open.distance_km + self.pace.climb_penalty(open.climb_m);
        let speed = self.pace.adjusted_speed(open.distance_km, open.climb_m);

        if !speed.is_finite() || speed <= 0.0 {
            return Err(PlanError::Computation {
                leg: index,
                reason: format!(
                    "adjusted speed {:.3} km/h is not positive ({:.2} km, {:.0} m climb)",
                    speed, open.distance_km, open.climb_m
                ),
            });
        }

        let duration = effort / speed;
        if !duration.is_finite() {
            return Err(PlanError::Computation {
                leg: index,
                reason: format!("duration is not finite (effort {:.3})", effort),
            });
        }
        *cumulative_duration += duration;

        Ok(Leg {
            index,
            distance_km: open.distance_km,
            climb_m: open.climb_m,
            descent_m: open.descent_m,
            duration_h: duration,
            cumulative_distance_km: cumulative_distance,
            cumulative_duration_h: *cumulative_duration,
            avg_speed_kmh: open.distance_km / duration,
        })
    }
}

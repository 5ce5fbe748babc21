//! Route-to-plan pipeline
//!
//! points → totals → weeks → phases → sessions → weekly summary,
//! with the pacing legs computed from the same points alongside.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::PlanConfig;
use crate::error::Result;
use crate::plan::{
    PhaseAllocation, Session, SessionScheduler, WeeklySummaryRow, estimate_weeks, summarize_weeks,
};
use crate::track::{Leg, LegSegmenter, TrackPoint, TrackTotals};

/// Everything produced for one route
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub route_name: Option<String>,
    pub objective: String,
    pub race_date: NaiveDate,
    pub totals: TrackTotals,
    pub legs: Vec<Leg>,
    pub weeks: u32,
    pub phases: PhaseAllocation,
    pub sessions: Vec<Session>,
    pub summary: Vec<WeeklySummaryRow>,
}

/// One configured run over one route. Holds no state between runs.
pub struct Pipeline {
    config: PlanConfig,
}

impl Pipeline {
    /// Validates the configuration up front so bad input fails before any work
    pub fn new(config: PlanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Pacing table only
    pub fn legs(&self, points: &[TrackPoint]) -> Result<Vec<Leg>> {
        LegSegmenter::new(self.config.leg_threshold_km, self.config.pace).segment(points)
    }

    /// Full report for a route
    pub fn run(&self, route_name: Option<String>, points: &[TrackPoint]) -> Result<RouteReport> {
        let totals = TrackTotals::from_points(points);
        info!(
            points = points.len(),
            distance_km = totals.distance_km,
            climb_m = totals.climb_m as i64,
            descent_m = totals.descent_m as i64,
            "route totals"
        );

        let legs = self.legs(points)?;
        info!(legs = legs.len(), "pacing legs computed");

        let weeks = match self.config.weeks_override {
            Some(weeks) => weeks,
            None => estimate_weeks(totals.distance_km, totals.climb_m),
        };
        let phases = PhaseAllocation::new(weeks)?;
        info!(
            weeks,
            general = phases.general,
            specific = phases.specific,
            taper = phases.taper,
            "training phases allocated"
        );

        let sessions = SessionScheduler::new(totals.distance_km, totals.climb_m, self.config.race_date)
            .schedule(&phases)?;
        let summary = summarize_weeks(&sessions);
        info!(sessions = sessions.len(), "training calendar built");

        Ok(RouteReport {
            route_name,
            objective: self.config.objective.clone(),
            race_date: self.config.race_date,
            totals,
            legs,
            weeks,
            phases,
            sessions,
            summary,
        })
    }
}

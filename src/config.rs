//! Pipeline configuration - leg size, pace model, race date, objective

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{PlanError, Result};

pub const DEFAULT_LEG_THRESHOLD_KM: f64 = 5.0;
pub const DEFAULT_RACE_DATE: &str = "2025-06-01";
pub const DEFAULT_OBJECTIVE: &str = "Finish with a smile";
const RACE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Shortest plan the phase allocator can split (one week per phase)
pub const MIN_PLAN_WEEKS: u32 = 4;
/// Longest plan accepted, ten years of training
pub const MAX_PLAN_WEEKS: u32 = 520;

/// Heuristic pace model for leg duration estimates.
///
/// None of these coefficients are physically derived; they are tuned so a
/// flat 5 km leg lands close to the flat speed and climbing slows it down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaceModel {
    /// Baseline pace on flat ground (km/h)
    pub flat_speed_kmh: f64,
    /// Global slowdown applied to every leg
    pub fatigue_coeff: f64,
    /// Extra effort-kilometres per 100 m of climb
    pub climb_penalty_per_100m: f64,
    /// Climb (m) that halves the flat speed
    pub climb_slowdown_m: f64,
    /// Leg distance (km) at which fatigue would bring speed to zero
    pub fatigue_distance_km: f64,
}

impl Default for PaceModel {
    fn default() -> Self {
        Self {
            flat_speed_kmh: 9.0,
            fatigue_coeff: 1.05,
            climb_penalty_per_100m: 0.8,
            climb_slowdown_m: 500.0,
            fatigue_distance_km: 2000.0,
        }
    }
}

impl PaceModel {
    /// Extra distance equivalent of the leg's climb
    pub fn climb_penalty(&self, climb_m: f64) -> f64 {
        (climb_m / 100.0) * self.climb_penalty_per_100m
    }

    /// Flat speed slowed by leg length and climb. May be <= 0 for extreme legs.
    pub fn adjusted_speed(&self, distance_km: f64, climb_m: f64) -> f64 {
        let fatigue = 1.0 - distance_km / self.fatigue_distance_km;
        let slope = 1.0 + climb_m / self.climb_slowdown_m;
        self.flat_speed_kmh * fatigue / (slope * self.fatigue_coeff)
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("flat speed", self.flat_speed_kmh),
            ("fatigue coefficient", self.fatigue_coeff),
            ("climb slowdown", self.climb_slowdown_m),
            ("fatigue distance", self.fatigue_distance_km),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::Configuration(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.climb_penalty_per_100m.is_finite() || self.climb_penalty_per_100m < 0.0 {
            return Err(PlanError::Configuration(format!(
                "climb penalty must be >= 0, got {}",
                self.climb_penalty_per_100m
            )));
        }
        Ok(())
    }
}

/// Everything the pipeline needs besides the track itself
#[derive(Debug, Clone, Serialize)]
pub struct PlanConfig {
    pub leg_threshold_km: f64,
    pub pace: PaceModel,
    pub race_date: NaiveDate,
    /// Opaque label, passed through to the report
    pub objective: String,
    /// Replaces the estimated number of training weeks
    pub weeks_override: Option<u32>,
}

impl PlanConfig {
    /// Parse the race date and validate all settings
    pub fn new(race_date: &str, objective: impl Into<String>) -> Result<Self> {
        let config = Self {
            leg_threshold_km: DEFAULT_LEG_THRESHOLD_KM,
            pace: PaceModel::default(),
            race_date: parse_race_date(race_date)?,
            objective: objective.into(),
            weeks_override: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_leg_threshold(mut self, km: f64) -> Result<Self> {
        self.leg_threshold_km = km;
        self.validate()?;
        Ok(self)
    }

    pub fn with_pace(mut self, pace: PaceModel) -> Result<Self> {
        self.pace = pace;
        self.validate()?;
        Ok(self)
    }

    pub fn with_weeks(mut self, weeks: Option<u32>) -> Result<Self> {
        self.weeks_override = weeks;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.leg_threshold_km.is_finite() || self.leg_threshold_km <= 0.0 {
            return Err(PlanError::Configuration(format!(
                "leg threshold must be a positive distance, got {} km",
                self.leg_threshold_km
            )));
        }
        self.pace.validate()?;
        if let Some(weeks) = self.weeks_override {
            validate_weeks(weeks)?;
        }
        Ok(())
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            leg_threshold_km: DEFAULT_LEG_THRESHOLD_KM,
            pace: PaceModel::default(),
            race_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
            objective: DEFAULT_OBJECTIVE.to_string(),
            weeks_override: None,
        }
    }
}

pub fn parse_race_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), RACE_DATE_FORMAT).map_err(|e| {
        PlanError::Configuration(format!(
            "race date '{}' is not a valid YYYY-MM-DD date: {}",
            input, e
        ))
    })
}

pub fn validate_weeks(weeks: u32) -> Result<()> {
    if weeks < MIN_PLAN_WEEKS {
        return Err(PlanError::Configuration(format!(
            "a plan needs at least {} weeks, got {}",
            MIN_PLAN_WEEKS, weeks
        )));
    }
    if weeks > MAX_PLAN_WEEKS {
        return Err(PlanError::Configuration(format!(
            "a plan can span at most {} weeks, got {}",
            MAX_PLAN_WEEKS, weeks
        )));
    }
    Ok(())
}

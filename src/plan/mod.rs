//! Training plan - how many weeks, which phase each week belongs to
//!
//! Features:
//! - Plan length from route distance and climb
//! - Proportional split into general / specific / taper / race phases
//! - Session calendar (see `sessions`)
//! - Weekly summary table (see `summary`)

pub mod sessions;
pub mod summary;

pub use sessions::{Session, SessionScheduler, SessionType};
pub use summary::{WeeklySummaryRow, summarize_weeks};

use std::fmt;

use serde::Serialize;

use crate::config::validate_weeks;
use crate::error::Result;

const BASE_WEEKS: u32 = 8;
const DISTANCE_BASELINE_KM: f64 = 40.0;
/// One extra week per this many km beyond the baseline
const KM_PER_EXTRA_WEEK: f64 = 10.0;
/// One extra week per this much climb
const CLIMB_PER_EXTRA_WEEK_M: f64 = 1000.0;

/// Training phases, in calendar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    General,
    Specific,
    Taper,
    Race,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[Phase::General, Phase::Specific, Phase::Taper, Phase::Race]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::General => "general",
            Phase::Specific => "specific",
            Phase::Taper => "taper",
            Phase::Race => "race",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recommended plan length in weeks. Never below 8.
pub fn estimate_weeks(distance_km: f64, climb_m: f64) -> u32 {
    let extra_distance = (distance_km - DISTANCE_BASELINE_KM).max(0.0);
    let distance_weeks = (extra_distance / KM_PER_EXTRA_WEEK).floor();
    let climb_weeks = (climb_m.max(0.0) / CLIMB_PER_EXTRA_WEEK_M).floor();
    BASE_WEEKS + distance_weeks as u32 + climb_weeks as u32
}

/// Number of weeks in each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseAllocation {
    pub general: u32,
    pub specific: u32,
    pub taper: u32,
    pub race: u32,
}

impl PhaseAllocation {
    /// Split `total_weeks` into phases. The last week is always the race week.
    ///
    /// Needs at least 4 weeks so every phase gets one, and at most
    /// `MAX_PLAN_WEEKS`.
    pub fn new(total_weeks: u32) -> Result<Self> {
        validate_weeks(total_weeks)?;

        let remaining = total_weeks - 1;
        let general = ((remaining as f64 * 0.4).floor() as u32).max(1);
        let specific = ((remaining as f64 * 0.5).floor() as u32).max(1);
        let taper = remaining.saturating_sub(general + specific).max(1);

        Ok(Self {
            general,
            specific,
            taper,
            race: 1,
        })
    }

    pub fn total_weeks(&self) -> u32 {
        self.general + self.specific + self.taper + self.race
    }

    /// Phase lengths in calendar order
    pub fn spans(&self) -> [(Phase, u32); 4] {
        [
            (Phase::General, self.general),
            (Phase::Specific, self.specific),
            (Phase::Taper, self.taper),
            (Phase::Race, self.race),
        ]
    }

    /// Phase of every week, in order
    pub fn weeks(&self) -> Vec<Phase> {
        self.spans()
            .iter()
            .flat_map(|(phase, len)| std::iter::repeat_n(*phase, *len as usize))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;

    #[test]
    fn test_estimate_weeks_baseline() {
        assert_eq!(estimate_weeks(40.0, 0.0), 8);
        assert_eq!(estimate_weeks(0.0, 0.0), 8);
        assert_eq!(estimate_weeks(12.0, 300.0), 8);
    }

    #[test]
    fn test_estimate_weeks_distance_and_climb() {
        assert_eq!(estimate_weeks(45.0, 1200.0), 9);
        assert_eq!(estimate_weeks(50.0, 0.0), 9);
        assert_eq!(estimate_weeks(80.0, 3500.0), 8 + 4 + 3);
        assert_eq!(estimate_weeks(40.0, -200.0), 8);
    }

    #[test]
    fn test_estimate_weeks_monotonic() {
        let mut previous = 0;
        for km in 0..200 {
            let weeks = estimate_weeks(km as f64, 1500.0);
            assert!(weeks >= previous);
            previous = weeks;
        }
        let mut previous = 0;
        for climb in (0..8000).step_by(100) {
            let weeks = estimate_weeks(60.0, climb as f64);
            assert!(weeks >= previous);
            previous = weeks;
        }
    }

    #[test]
    fn test_allocation_nine_weeks() {
        let alloc = PhaseAllocation::new(9).unwrap();
        assert_eq!(
            alloc,
            PhaseAllocation {
                general: 3,
                specific: 4,
                taper: 1,
                race: 1
            }
        );
    }

    #[test]
    fn test_allocation_sums_to_total() {
        for weeks in 4..=60 {
            let alloc = PhaseAllocation::new(weeks).unwrap();
            assert_eq!(alloc.total_weeks(), weeks, "weeks = {}", weeks);
            assert_eq!(alloc.race, 1);
            assert!(alloc.general >= 1 && alloc.specific >= 1 && alloc.taper >= 1);
        }
    }

    #[test]
    fn test_allocation_rejects_short_plans() {
        for weeks in 0..4 {
            assert!(matches!(
                PhaseAllocation::new(weeks),
                Err(PlanError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_allocation_rejects_overlong_plans() {
        use crate::config::MAX_PLAN_WEEKS;
        assert!(matches!(
            PhaseAllocation::new(MAX_PLAN_WEEKS + 1),
            Err(PlanError::Configuration(_))
        ));
        let longest = PhaseAllocation::new(MAX_PLAN_WEEKS).unwrap();
        assert_eq!(longest.total_weeks(), MAX_PLAN_WEEKS);
    }

    #[test]
    fn test_weeks_are_contiguous_and_ordered() {
        let alloc = PhaseAllocation::new(14).unwrap();
        let weeks = alloc.weeks();
        assert_eq!(weeks.len(), 14);
        assert!(weeks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(weeks.last(), Some(&Phase::Race));
    }
}

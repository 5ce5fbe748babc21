//! Session calendar - session types, weekly templates, dated sessions

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use super::{Phase, PhaseAllocation};
use crate::error::{PlanError, Result};

/// Race day falls on this slot of the final week
pub const RACE_WEEKDAY: Weekday = Weekday::Sun;

const LONG_OUTING_BASE_MIN: u32 = 90;
const LONG_OUTING_MIN_PER_WEEK: u32 = 5;

/// Kinds of training session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SessionType {
    Footing,
    StrengthWork,
    Bike,
    Threshold,
    IntervalSpeed,
    LongOuting,
    MediumOuting,
    Rest,
    Race,
}

impl SessionType {
    /// All session types, in summary column order
    pub fn all() -> &'static [SessionType] {
        &[
            SessionType::Footing,
            SessionType::StrengthWork,
            SessionType::Bike,
            SessionType::Threshold,
            SessionType::IntervalSpeed,
            SessionType::LongOuting,
            SessionType::MediumOuting,
            SessionType::Rest,
            SessionType::Race,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionType::Footing => "Footing",
            SessionType::StrengthWork => "Strength",
            SessionType::Bike => "Bike",
            SessionType::Threshold => "Threshold",
            SessionType::IntervalSpeed => "Intervals",
            SessionType::LongOuting => "Long outing",
            SessionType::MediumOuting => "Medium outing",
            SessionType::Rest => "Rest",
            SessionType::Race => "Race",
        }
    }

    /// Fixed session content. Long outings are sized by `long_outing_minutes`.
    pub fn content(&self) -> &'static str {
        match self {
            SessionType::Footing => "45-60 min at an easy pace",
            SessionType::StrengthWork => "30-40 min core and strength work",
            SessionType::Bike => "1h easy ride or 45 min on the home trainer",
            SessionType::Threshold => "2x10 to 3x10 min at tempo pace",
            SessionType::IntervalSpeed => "8x45s fast / 45s recovery",
            SessionType::LongOuting => "Long hilly trail run",
            SessionType::MediumOuting => "1h on trails, comfortable pace",
            SessionType::Rest => "Full rest or a 30 min walk",
            SessionType::Race => "Race day! Give it everything",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            SessionType::Footing => "Stay loose and relaxed",
            SessionType::StrengthWork => "Posture and control",
            SessionType::Bike => "Smooth cadence, recovery",
            SessionType::Threshold => "Hold the pace, keep breathing",
            SessionType::IntervalSpeed => "Explosive and light",
            SessionType::LongOuting => "Hydrate well",
            SessionType::MediumOuting => "Good stride, steady rhythm",
            SessionType::Rest => "Sleep well!",
            SessionType::Race => "Remember why you run",
        }
    }
}

/// Session type for a weekday slot of a phase. Unlisted slots are rest.
pub fn session_for(phase: Phase, day: Weekday) -> SessionType {
    use SessionType::*;
    use Weekday::*;

    match (phase, day) {
        (Phase::General, Tue) => Footing,
        (Phase::General, Wed) => StrengthWork,
        (Phase::General, Thu) => Footing,
        (Phase::General, Sat) => Bike,
        (Phase::General, Sun) => LongOuting,

        (Phase::Specific, Tue) => Threshold,
        (Phase::Specific, Wed) => StrengthWork,
        (Phase::Specific, Thu) => IntervalSpeed,
        (Phase::Specific, Sat) => Bike,
        (Phase::Specific, Sun) => LongOuting,

        (Phase::Taper, Tue) => Footing,
        (Phase::Taper, Wed) => StrengthWork,
        (Phase::Taper, Thu) => Footing,
        (Phase::Taper, Sat) => Threshold,
        (Phase::Taper, Sun) => MediumOuting,

        (Phase::Race, Tue) => Footing,
        (Phase::Race, Wed) => IntervalSpeed,
        (Phase::Race, Thu) => Footing,
        (Phase::Race, Sun) => Race,

        _ => Rest,
    }
}

/// Training days per week, picked by route distance
pub fn training_days(distance_km: f64) -> &'static [Weekday] {
    use Weekday::*;

    if distance_km > 50.0 {
        &[Tue, Wed, Thu, Fri, Sat, Sun]
    } else if distance_km > 30.0 {
        &[Tue, Wed, Thu, Sat, Sun]
    } else {
        &[Tue, Wed, Sat, Sun]
    }
}

/// Long outing length for a 0-based week index
pub fn long_outing_minutes(distance_km: f64, climb_m: f64, week_index: u32) -> u32 {
    let distance_bonus = (distance_km.max(0.0) / 10.0).floor() as u32;
    let climb_bonus = (climb_m.max(0.0) / 500.0).floor() as u32;
    LONG_OUTING_BASE_MIN + distance_bonus + climb_bonus + LONG_OUTING_MIN_PER_WEEK * week_index
}

/// One dated training session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// 1-based
    pub week: u32,
    pub phase: Phase,
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub session_type: SessionType,
    pub content: String,
    pub advice: String,
}

/// Builds the dated session calendar for a route
pub struct SessionScheduler {
    distance_km: f64,
    climb_m: f64,
    race_date: NaiveDate,
}

impl SessionScheduler {
    pub fn new(distance_km: f64, climb_m: f64, race_date: NaiveDate) -> Self {
        Self {
            distance_km,
            climb_m,
            race_date,
        }
    }

    /// Sessions in (week, weekday) order; the last one is the race itself.
    pub fn schedule(&self, allocation: &PhaseAllocation) -> Result<Vec<Session>> {
        let days = training_days(self.distance_km);
        let phases = allocation.weeks();
        let total_weeks = phases.len() as u32;
        // Earliest session first, so an impossible calendar fails before allocating
        if let Some(&first_day) = days.first() {
            self.session_date(total_weeks, 0, first_day)?;
        }
        let mut sessions = Vec::with_capacity(phases.len() * days.len());

        for (week_index, phase) in (0u32..).zip(phases) {
            for &day in days {
                let session_type = session_for(phase, day);
                let date = self.session_date(total_weeks, week_index, day)?;
                let content = match session_type {
                    SessionType::LongOuting => {
                        let minutes =
                            long_outing_minutes(self.distance_km, self.climb_m, week_index);
                        format!("{} min hilly trail", minutes)
                    }
                    other => other.content().to_string(),
                };

                sessions.push(Session {
                    week: week_index + 1,
                    phase,
                    date,
                    weekday: date.weekday(),
                    session_type,
                    content,
                    advice: session_type.advice().to_string(),
                });
            }
            debug!(week = week_index + 1, phase = %phase, sessions = days.len(), "week scheduled");
        }

        Ok(sessions)
    }

    /// Count back from the race date: whole weeks, then days within the week
    fn session_date(&self, total_weeks: u32, week_index: u32, day: Weekday) -> Result<NaiveDate> {
        let weeks_before = u64::from(total_weeks - 1 - week_index);
        let days_before_race_day =
            u64::from(RACE_WEEKDAY.num_days_from_monday() - day.num_days_from_monday());

        self.race_date
            .checked_sub_days(Days::new(weeks_before * 7 + days_before_race_day))
            .ok_or_else(|| {
                PlanError::Configuration(format!(
                    "race date {} leaves no room for a {}-week plan",
                    self.race_date, total_weeks
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn race_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn schedule(distance_km: f64, climb_m: f64, weeks: u32) -> Vec<Session> {
        let allocation = PhaseAllocation::new(weeks).unwrap();
        SessionScheduler::new(distance_km, climb_m, race_date())
            .schedule(&allocation)
            .unwrap()
    }

    #[test]
    fn test_training_days_by_distance_tier() {
        assert_eq!(training_days(80.0).len(), 6);
        assert_eq!(training_days(50.1).len(), 6);
        assert_eq!(training_days(50.0).len(), 5);
        assert_eq!(training_days(30.1).len(), 5);
        assert_eq!(training_days(30.0).len(), 4);
        assert_eq!(training_days(0.0), &[Weekday::Tue, Weekday::Wed, Weekday::Sat, Weekday::Sun]);
        assert!(!training_days(40.0).contains(&Weekday::Fri));
    }

    #[test]
    fn test_session_table_defaults_to_rest() {
        assert_eq!(session_for(Phase::General, Weekday::Fri), SessionType::Rest);
        assert_eq!(session_for(Phase::Specific, Weekday::Mon), SessionType::Rest);
        assert_eq!(session_for(Phase::Race, Weekday::Sat), SessionType::Rest);
        assert_eq!(session_for(Phase::General, Weekday::Sun), SessionType::LongOuting);
        assert_eq!(session_for(Phase::Race, Weekday::Sun), SessionType::Race);
    }

    #[test]
    fn test_race_only_in_race_phase() {
        for phase in [Phase::General, Phase::Specific, Phase::Taper] {
            for day in training_days(100.0) {
                assert_ne!(session_for(phase, *day), SessionType::Race);
            }
        }
    }

    #[test]
    fn test_every_type_has_text() {
        for t in SessionType::all() {
            assert!(!t.name().is_empty());
            assert!(!t.content().is_empty());
            assert!(!t.advice().is_empty());
        }
    }

    #[test]
    fn test_long_outing_minutes() {
        assert_eq!(long_outing_minutes(45.0, 1200.0, 0), 90 + 4 + 2);
        assert_eq!(long_outing_minutes(45.0, 1200.0, 3), 90 + 4 + 2 + 15);
        assert_eq!(long_outing_minutes(0.0, 0.0, 0), 90);
    }

    #[test]
    fn test_sessions_per_week_match_quota() {
        for (distance, quota) in [(20.0, 4), (42.0, 5), (70.0, 6)] {
            let sessions = schedule(distance, 500.0, 9);
            assert_eq!(sessions.len(), 9 * quota);
            for week in 1..=9 {
                let count = sessions.iter().filter(|s| s.week == week).count();
                assert_eq!(count, quota, "distance {} week {}", distance, week);
            }
        }
    }

    #[test]
    fn test_race_week_has_single_race_on_race_date() {
        let sessions = schedule(42.0, 1500.0, 9);
        let races: Vec<_> = sessions
            .iter()
            .filter(|s| s.session_type == SessionType::Race)
            .collect();
        assert_eq!(races.len(), 1);

        let last = sessions.last().unwrap();
        assert_eq!(last.session_type, SessionType::Race);
        assert_eq!(last.date, race_date());
        assert_eq!(last.week, 9);
        assert_eq!(last.phase, Phase::Race);
        assert_eq!(last.weekday, Weekday::Sun);
    }

    #[test]
    fn test_dates_strictly_increasing() {
        let sessions = schedule(70.0, 2500.0, 12);
        for pair in sessions.windows(2) {
            assert!(pair[0].date < pair[1].date, "{} !< {}", pair[0].date, pair[1].date);
        }
    }

    #[test]
    fn test_first_session_date() {
        // 9 weeks before a Sunday race: first Tuesday is 8 weeks + 5 days earlier
        let sessions = schedule(20.0, 0.0, 9);
        let first = &sessions[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(first.weekday, Weekday::Tue);
        assert_eq!(first.week, 1);
        assert_eq!(first.phase, Phase::General);
    }

    #[test]
    fn test_weekday_follows_calendar_for_saturday_race() {
        let saturday = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        let allocation = PhaseAllocation::new(8).unwrap();
        let sessions = SessionScheduler::new(20.0, 0.0, saturday)
            .schedule(&allocation)
            .unwrap();

        assert_eq!(sessions.last().unwrap().date, saturday);
        for s in &sessions {
            assert_eq!(s.weekday, s.date.weekday());
        }
    }

    #[test]
    fn test_race_date_too_early_for_plan() {
        let race = NaiveDate::MIN.checked_add_days(Days::new(10)).unwrap();
        let allocation = PhaseAllocation::new(8).unwrap();
        let err = SessionScheduler::new(20.0, 0.0, race)
            .schedule(&allocation)
            .unwrap_err();
        assert!(matches!(err, PlanError::Configuration(_)), "{:?}", err);
    }

    #[test]
    fn test_long_outing_grows_each_week() {
        let sessions = schedule(45.0, 1200.0, 9);
        let long: Vec<_> = sessions
            .iter()
            .filter(|s| s.session_type == SessionType::LongOuting)
            .collect();
        assert_eq!(long.len(), 7);
        assert_eq!(long[0].content, "96 min hilly trail");
        assert_eq!(long[1].content, "101 min hilly trail");
        assert_eq!(long[0].advice, "Hydrate well");
    }

    #[test]
    fn test_phase_order_in_calendar() {
        let sessions = schedule(42.0, 0.0, 10);
        assert!(sessions.windows(2).all(|w| w[0].phase <= w[1].phase));
        assert!(sessions.windows(2).all(|w| w[0].week <= w[1].week));
    }
}

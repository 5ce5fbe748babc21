//! Weekly summary - session counts per type for each week

use std::collections::BTreeMap;

use serde::Serialize;

use super::Phase;
use super::sessions::{Session, SessionType};

/// Session counts for one week, zero-filled for every type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummaryRow {
    pub week: u32,
    pub phase: Phase,
    pub counts: BTreeMap<SessionType, u32>,
}

impl WeeklySummaryRow {
    fn new(week: u32, phase: Phase) -> Self {
        let counts = SessionType::all().iter().map(|t| (*t, 0)).collect();
        Self {
            week,
            phase,
            counts,
        }
    }

    pub fn count(&self, session_type: SessionType) -> u32 {
        self.counts.get(&session_type).copied().unwrap_or(0)
    }

    /// Sessions scheduled that week
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Group sessions by (week, phase) and count each type
pub fn summarize_weeks(sessions: &[Session]) -> Vec<WeeklySummaryRow> {
    let mut rows: BTreeMap<(u32, Phase), WeeklySummaryRow> = BTreeMap::new();

    for session in sessions {
        let row = rows
            .entry((session.week, session.phase))
            .or_insert_with(|| WeeklySummaryRow::new(session.week, session.phase));
        *row.counts.entry(session.session_type).or_insert(0) += 1;
    }

    rows.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{PhaseAllocation, SessionScheduler};
    use chrono::NaiveDate;

    fn sessions(distance_km: f64, weeks: u32) -> Vec<Session> {
        let race = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let allocation = PhaseAllocation::new(weeks).unwrap();
        SessionScheduler::new(distance_km, 800.0, race)
            .schedule(&allocation)
            .unwrap()
    }

    #[test]
    fn test_empty_sessions_give_no_rows() {
        assert!(summarize_weeks(&[]).is_empty());
    }

    #[test]
    fn test_one_row_per_week() {
        let rows = summarize_weeks(&sessions(42.0, 9));
        assert_eq!(rows.len(), 9);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.week, i as u32 + 1);
        }
        assert_eq!(rows[0].phase, Phase::General);
        assert_eq!(rows[8].phase, Phase::Race);
    }

    #[test]
    fn test_row_totals_match_scheduled_sessions() {
        let all = sessions(70.0, 11);
        for row in summarize_weeks(&all) {
            let scheduled = all.iter().filter(|s| s.week == row.week).count() as u32;
            assert_eq!(row.total(), scheduled);
            assert_eq!(row.total(), 6);
        }
    }

    #[test]
    fn test_counts_zero_filled() {
        let rows = summarize_weeks(&sessions(20.0, 8));
        for row in &rows {
            assert_eq!(row.counts.len(), SessionType::all().len());
        }
        let general = &rows[0];
        assert_eq!(general.count(SessionType::Race), 0);
        assert_eq!(general.count(SessionType::Footing), 1);
        assert_eq!(general.count(SessionType::LongOuting), 1);

        let race_week = rows.last().unwrap();
        assert_eq!(race_week.count(SessionType::Race), 1);
        assert_eq!(race_week.count(SessionType::Rest), 1);
    }
}

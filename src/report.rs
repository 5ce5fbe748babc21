//! Plain-text rendering of a route report

use crate::pipeline::RouteReport;
use crate::plan::{Session, SessionType, WeeklySummaryRow};
use crate::track::Leg;

/// Hours as a clock string, e.g. 1.75 -> "1h45". Truncates, never rounds up.
pub fn format_clock(hours: f64) -> String {
    let total_minutes = (hours * 60.0).max(0.0) as u64;
    format!("{}h{:02}", total_minutes / 60, total_minutes % 60)
}

/// Whole minutes, truncated
pub fn format_minutes(hours: f64) -> u64 {
    (hours * 60.0).max(0.0) as u64
}

/// Newline-terminated lines as one block
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn render_header(report: &RouteReport) -> String {
    let name = report.route_name.as_deref().unwrap_or("Unnamed route");
    block(vec![
        name.to_string(),
        "-".repeat(60),
        format!(
            "Distance: {:.2} km | D+ {} m | D- {} m",
            report.totals.distance_km, report.totals.climb_m as i64, report.totals.descent_m as i64
        ),
        format!(
            "Objective: {} | Race day: {} | Plan: {} weeks",
            report.objective,
            report.race_date.format("%Y-%m-%d"),
            report.weeks
        ),
    ])
}

pub fn render_legs(legs: &[Leg]) -> String {
    let mut lines = vec![
        format!(
            "{:>4} | {:>9} | {:>6} | {:>6} | {:>5} | {:>6} | {:>10} | {:>8}",
            "Leg", "Dist (km)", "D+ (m)", "D- (m)", "Min", "Time", "Total (km)", "Total"
        ),
        "-".repeat(80),
    ];
    lines.extend(legs.iter().map(|leg| {
        format!(
            "{:>4} | {:>9.2} | {:>6} | {:>6} | {:>5} | {:>6} | {:>10.2} | {:>8}",
            leg.index,
            leg.distance_km,
            leg.climb_m as i64,
            leg.descent_m as i64,
            format_minutes(leg.duration_h),
            format_clock(leg.duration_h),
            leg.cumulative_distance_km,
            format_clock(leg.cumulative_duration_h),
        )
    }));
    block(lines)
}

/// One line per session, e.g. "Tue 2025-04-01: Footing - 45-60 min ... (advice)"
pub fn render_session(session: &Session) -> String {
    format!(
        "{} {}: {} - {} ({})",
        session.weekday,
        session.date.format("%Y-%m-%d"),
        session.session_type.name(),
        session.content,
        session.advice
    )
}

/// Sessions grouped under a heading per week, blank line between weeks
pub fn render_sessions(sessions: &[Session]) -> String {
    let mut lines = Vec::new();
    let mut current_week = None;
    for session in sessions {
        if current_week != Some(session.week) {
            if current_week.is_some() {
                lines.push(String::new());
            }
            lines.push(format!("Week {} - Phase: {}", session.week, session.phase));
            current_week = Some(session.week);
        }
        lines.push(format!("  {}", render_session(session)));
    }
    block(lines)
}

/// Leading cell, then the rest behind column separators
fn summary_row(first: String, cells: impl Iterator<Item = String>) -> String {
    cells.fold(first, |row, cell| row + " | " + &cell)
}

pub fn render_summary(rows: &[WeeklySummaryRow]) -> String {
    let types = SessionType::all();

    let mut lines = vec![
        summary_row(
            format!("{:>4} | {:<8}", "Week", "Phase"),
            types.iter().map(|t| t.name().to_string()),
        ),
        "-".repeat(120),
    ];
    lines.extend(rows.iter().map(|row| {
        summary_row(
            format!("{:>4} | {:<8}", row.week, row.phase.name()),
            types
                .iter()
                .map(|t| format!("{:>w$}", row.count(*t), w = t.name().len())),
        )
    }));
    block(lines)
}

/// Header, pacing table, calendar and weekly summary
pub fn render_report(report: &RouteReport) -> String {
    [
        render_header(report),
        render_legs(&report.legs),
        render_sessions(&report.sessions),
        render_summary(&report.summary),
    ]
    .join("\n")
}

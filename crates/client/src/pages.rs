//! Page-level derivations.
//!
//! The browser application computes these from fetched data: the dashboard
//! shows the most recent reports, the statistics page aggregates the report
//! set by category and state, and the creation form cascades state to LGA
//! options from the static lookup tables.

use naijafix_common::nigeria;

use crate::types::{Report, StatsSummary};

/// How many reports the dashboard shows.
pub const DASHBOARD_RECENT_COUNT: usize = 4;

/// The most recent reports for the dashboard. The API returns lists newest
/// first, so this is a prefix.
#[must_use]
pub fn recent_reports(reports: &[Report]) -> &[Report] {
    &reports[..reports.len().min(DASHBOARD_RECENT_COUNT)]
}

/// Count reports per category, largest first, ties broken by name.
#[must_use]
pub fn category_counts(reports: &[Report]) -> Vec<(String, u64)> {
    count_by(reports, |r| r.category.as_str())
}

/// Count reports per state, largest first, ties broken by name.
#[must_use]
pub fn state_counts(reports: &[Report]) -> Vec<(String, u64)> {
    count_by(reports, |r| r.location.state.as_str())
}

fn count_by<'a>(reports: &'a [Report], key: impl Fn(&'a Report) -> &'a str) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for report in reports {
        let key = key(report);
        match counts.iter().position(|(name, _)| name == key) {
            Some(idx) => counts[idx].1 += 1,
            None => counts.push((key.to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Fraction of reports resolved, `0.0` when there are none.
#[must_use]
pub fn resolution_rate(stats: &StatsSummary) -> f64 {
    if stats.total == 0 {
        0.0
    } else {
        stats.resolved as f64 / stats.total as f64
    }
}

/// States offered by the creation form, in display order.
#[must_use]
pub const fn state_options() -> &'static [&'static str] {
    &nigeria::STATES
}

/// LGA options for the selected state; empty until a known state is picked.
#[must_use]
pub fn lga_options(state: &str) -> &'static [&'static str] {
    nigeria::lgas_for_state(state).unwrap_or(&[])
}

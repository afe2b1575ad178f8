//! Derived card figures: series total, week-over-week change, and their display strings.

use crate::consts::cli_consts::WEEK_WINDOW;
use crate::model::SnapshotPoint;

/// Numbers a view-mode card shows for its fetched series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total_value: f64,
    pub percentage_change: f64,
}

impl Summary {
    /// Fold a freshly fetched series into the summary.
    ///
    /// The total is always replaced. The percentage change is only recomputed
    /// when the series covers at least one full week; a shorter series keeps
    /// the previous percentage. A zero previous total is not guarded and yields
    /// an infinite or NaN percentage.
    pub fn apply(&mut self, points: &[SnapshotPoint]) {
        self.total_value = sum(points);
        if let Some(change) = percentage_change(points) {
            self.percentage_change = change;
        }
    }

    /// Whether a total has ever been computed (nonzero and not NaN).
    ///
    /// Drives the "Save"/"Add" and "Delete"/"Cancel" labels.
    pub fn has_total(&self) -> bool {
        self.total_value != 0.0 && !self.total_value.is_nan()
    }
}

fn sum(points: &[SnapshotPoint]) -> f64 {
    points.iter().map(|p| p.value).sum()
}

/// `(last week - everything before) / everything before * 100`, or `None`
/// for a series shorter than a week.
pub fn percentage_change(points: &[SnapshotPoint]) -> Option<f64> {
    if points.len() < WEEK_WINDOW {
        return None;
    }
    let (previous, recent) = points.split_at(points.len() - WEEK_WINDOW);
    let previous_total = sum(previous);
    let recent_total = sum(recent);
    Some((recent_total - previous_total) / previous_total * 100.0)
}

/// Round half away from zero. `{:.N}` alone rounds ties to even.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Abbreviate a total with a B/M/K suffix and one decimal place.
pub fn format_number(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{:.1}B", round_to(value / 1_000_000_000.0, 1))
    } else if value >= 1_000_000.0 {
        format!("{:.1}M", round_to(value / 1_000_000.0, 1))
    } else if value >= 1_000.0 {
        format!("{:.1}K", round_to(value / 1_000.0, 1))
    } else {
        value.to_string()
    }
}

/// Zero counts as non-negative.
pub fn is_non_negative(change: f64) -> bool {
    change >= 0.0
}

/// `"↑ 12.34% Δ7d"` / `"↓ 5.00% Δ7d"`
pub fn format_percentage_change(change: f64) -> String {
    let arrow = if is_non_negative(change) { "↑" } else { "↓" };
    format!("{} {:.2}% Δ7d", arrow, round_to(change.abs(), 2))
}

//! Dashboard utility functions
//!
//! Contains helper functions and colors used across dashboard components

use crate::events::Source;
use ratatui::prelude::Color;

/// Rising week-over-week change and the series line.
pub const CUSTOM_GREEN: Color = Color::Rgb(0x11, 0x9F, 0x97);
/// Falling week-over-week change.
pub const CUSTOM_RED: Color = Color::Rgb(0xFF, 0x5D, 0x39);

pub const BACKGROUND: Color = Color::Rgb(16, 20, 24);

/// Get a ratatui color for an event source
pub fn get_source_color(source: Source) -> Color {
    match source {
        Source::Catalog => Color::Cyan,
        Source::Snapshot => Color::Yellow,
        Source::Dashboard => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp_keeps_month_day_and_minutes() {
        assert_eq!(format_compact_timestamp("2024-03-07 14:05:59"), "03-07 14:05");
    }

    #[test]
    fn unparseable_timestamp_is_returned_unchanged() {
        assert_eq!(format_compact_timestamp("soon"), "soon");
    }
}

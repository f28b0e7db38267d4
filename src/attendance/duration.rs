use crate::model::attendance::AttendanceEvent;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Total elapsed hours across a day's events. Only completed events
/// count; an event still missing its check-out contributes zero. Pure
/// and idempotent.
pub fn total_hours(events: &[AttendanceEvent]) -> f64 {
    events
        .iter()
        .filter_map(|event| {
            event
                .check_out
                .map(|out| (out - event.check_in).num_milliseconds() as f64 / MILLIS_PER_HOUR)
        })
        .sum()
}

/// Renders a duration for display and persistence: under one hour as
/// whole minutes, otherwise as hours rounded to two decimals, both
/// pluralized. The formatted string is what gets stored, not the raw
/// number.
pub fn format_duration(hours: f64) -> String {
    if hours < 1.0 {
        let minutes = (hours * 60.0).round();
        format!(
            "{} minute{}",
            minutes,
            if minutes == 1.0 { "" } else { "s" }
        )
    } else {
        let rounded = (hours * 100.0).round() / 100.0;
        format!("{} hour{}", rounded, if rounded == 1.0 { "" } else { "s" })
    }
}

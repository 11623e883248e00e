use chrono::NaiveTime;

use super::domain::{DateRange, DayOfWeek, WeeklySchedule};

/// Reduces a menu time such as `"09:00 AM"` to its hour-only label, `"9 AM"`.
///
/// Returns `None` for strings that do not parse as a 12-hour clock time.
pub fn format_time_label(raw: &str) -> Option<String> {
    let time = NaiveTime::parse_from_str(raw.trim(), "%I:%M %p").ok()?;
    Some(time.format("%-I %p").to_string())
}

/// Display window for a stay: the check-in day's opening hour through the
/// check-out day's closing hour, in the caller's time zone label.
///
/// Only the two boundary buckets are consulted. Interior days are deliberately
/// ignored, so a window can be produced even when [`is_range_covered`] would
/// reject the same range; callers wanting full-coverage validation run the
/// checker first.
///
/// [`is_range_covered`]: super::schedule::is_range_covered
pub fn resolve_display_window(
    range: &DateRange,
    schedule: &WeeklySchedule,
    time_zone_label: &str,
) -> Option<String> {
    let check_in = schedule.hours_for(DayOfWeek::of(range.from))?;
    let check_out = schedule.hours_for(DayOfWeek::of(range.to))?;

    let start = format_time_label(check_in.start_time.as_deref()?)?;
    let end = format_time_label(check_out.end_time.as_deref()?)?;

    Some(format!("{start} - {end} {time_zone_label}"))
}

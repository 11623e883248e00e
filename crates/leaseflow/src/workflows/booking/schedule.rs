use super::domain::{DateRange, DayOfWeek, WeeklySchedule};

/// Whether every calendar day in the range has a fully defined open/close window.
///
/// Walks the concrete dates rather than the seven weekday buckets: a nine-day
/// stay visits nine dates even though only seven distinct buckets exist, so a
/// weekday that is open must stay open for every occurrence inside the stay.
/// Returns false as soon as a visited day's bucket is missing either time.
pub fn is_range_covered(range: &DateRange, schedule: &WeeklySchedule) -> bool {
    range.days().all(|date| {
        schedule
            .hours_for(DayOfWeek::of(date))
            .is_some_and(|hours| hours.is_complete())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::booking::domain::DayHours;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn business_week() -> WeeklySchedule {
        let mut schedule = WeeklySchedule::default();
        for day in [
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
        ] {
            schedule.set(day, DayHours::window("09:00 AM", "05:00 PM"));
        }
        schedule
    }

    #[test]
    fn single_day_follows_its_bucket() {
        let schedule = business_week();
        // 2025-06-02 is a Monday, 2025-06-01 a Sunday.
        let monday = DateRange::single_day(date(2025, 6, 2));
        let sunday = DateRange::single_day(date(2025, 6, 1));

        assert!(is_range_covered(&monday, &schedule));
        assert!(!is_range_covered(&sunday, &schedule));
    }

    #[test]
    fn monday_only_schedule_rejects_tuesday() {
        let mut schedule = WeeklySchedule::default();
        schedule.set(DayOfWeek::Monday, DayHours::window("09:00 AM", "05:00 PM"));

        let monday = DateRange::single_day(date(2025, 6, 2));
        assert!(is_range_covered(&monday, &schedule));

        let monday_to_tuesday =
            DateRange::new(date(2025, 6, 2), date(2025, 6, 3)).expect("valid range");
        assert!(!is_range_covered(&monday_to_tuesday, &schedule));
    }

    #[test]
    fn weekend_gap_fails_a_full_week() {
        let schedule = business_week();
        let monday_to_sunday =
            DateRange::new(date(2025, 6, 2), date(2025, 6, 8)).expect("valid range");
        assert!(!is_range_covered(&monday_to_sunday, &schedule));
    }

    #[test]
    fn coverage_is_stable_under_whole_week_extension() {
        let schedule = business_week();
        let week = DateRange::new(date(2025, 6, 2), date(2025, 6, 6)).expect("valid range");
        // Same weekday buckets three weeks later; 17 concrete dates visited.
        let three_weeks = DateRange::new(date(2025, 6, 2), date(2025, 6, 20)).expect("valid range");

        assert!(is_range_covered(&week, &schedule));
        assert!(is_range_covered(&three_weeks, &schedule));
    }

    #[test]
    fn one_sided_window_counts_as_unavailable() {
        let mut schedule = business_week();
        schedule.set(
            DayOfWeek::Wednesday,
            DayHours {
                selected: Some(true),
                start_time: Some("09:00 AM".to_string()),
                end_time: None,
            },
        );

        let week = DateRange::new(date(2025, 6, 2), date(2025, 6, 6)).expect("valid range");
        assert!(!is_range_covered(&week, &schedule));
    }
}

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// The seven weekday buckets a recurring schedule is keyed by, 0 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Sunday,
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
        ]
    }

    /// Maps the numeric weekday index (0 = Sunday .. 6 = Saturday) to its bucket.
    pub const fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Sunday),
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            _ => None,
        }
    }

    /// Bucket for a concrete calendar date.
    pub fn of(date: NaiveDate) -> Self {
        // num_days_from_sunday is always 0..=6, so the lookup cannot miss.
        Self::from_index(date.weekday().num_days_from_sunday()).unwrap_or(Self::Sunday)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }
}

/// Open/close window for one weekday, as entered by the host.
///
/// Times are 12-hour display strings drawn from [`HOUR_MENU`]. A day with only
/// one of the two times set is a data-entry defect and counts as unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl DayHours {
    pub fn window(start_time: &str, end_time: &str) -> Self {
        Self {
            selected: Some(true),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
        }
    }

    /// Both boundary times present.
    pub fn is_complete(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }
}

/// Recurring weekly availability for a workspace, read-only from this core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DayHours>,
}

impl WeeklySchedule {
    pub fn hours_for(&self, day: DayOfWeek) -> Option<&DayHours> {
        match day {
            DayOfWeek::Sunday => self.sunday.as_ref(),
            DayOfWeek::Monday => self.monday.as_ref(),
            DayOfWeek::Tuesday => self.tuesday.as_ref(),
            DayOfWeek::Wednesday => self.wednesday.as_ref(),
            DayOfWeek::Thursday => self.thursday.as_ref(),
            DayOfWeek::Friday => self.friday.as_ref(),
            DayOfWeek::Saturday => self.saturday.as_ref(),
        }
    }

    /// Rejects any boundary time that is not one of the fixed menu entries.
    pub fn check_menu_times(&self) -> Result<(), BookingError> {
        for day in DayOfWeek::ordered() {
            let Some(hours) = self.hours_for(day) else {
                continue;
            };
            for time in hours.start_time.iter().chain(hours.end_time.iter()) {
                if !is_menu_time(time) {
                    return Err(BookingError::OffMenuTime {
                        day,
                        value: time.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn set(&mut self, day: DayOfWeek, hours: DayHours) {
        let slot = match day {
            DayOfWeek::Sunday => &mut self.sunday,
            DayOfWeek::Monday => &mut self.monday,
            DayOfWeek::Tuesday => &mut self.tuesday,
            DayOfWeek::Wednesday => &mut self.wednesday,
            DayOfWeek::Thursday => &mut self.thursday,
            DayOfWeek::Friday => &mut self.friday,
            DayOfWeek::Saturday => &mut self.saturday,
        };
        *slot = Some(hours);
    }
}

/// Inclusive calendar date range selected by a booking search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, BookingError> {
        if from > to {
            return Err(BookingError::InvertedRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    /// Number of calendar days visited, inclusive of both ends.
    pub fn len_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    /// Every concrete calendar date in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let from = self.from;
        (0..self.len_days()).map(move |offset| from + Duration::days(offset))
    }
}

/// The fixed hour menu hosts pick open/close times from.
pub const HOUR_MENU: [&str; 24] = [
    "12:00 AM", "01:00 AM", "02:00 AM", "03:00 AM", "04:00 AM", "05:00 AM", "06:00 AM", "07:00 AM",
    "08:00 AM", "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM",
    "04:00 PM", "05:00 PM", "06:00 PM", "07:00 PM", "08:00 PM", "09:00 PM", "10:00 PM", "11:00 PM",
];

/// True when the string is one of the 24 menu entries.
pub fn is_menu_time(raw: &str) -> bool {
    HOUR_MENU.contains(&raw)
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("date range start {from} is after end {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
    #[error("{} time '{value}' is not on the hour menu", .day.label())]
    OffMenuTime { day: DayOfWeek, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn index_mapping_is_sunday_first() {
        assert_eq!(DayOfWeek::from_index(0), Some(DayOfWeek::Sunday));
        assert_eq!(DayOfWeek::from_index(6), Some(DayOfWeek::Saturday));
        assert_eq!(DayOfWeek::from_index(7), None);

        for (index, day) in DayOfWeek::ordered().into_iter().enumerate() {
            assert_eq!(DayOfWeek::from_index(index as u32), Some(day));
        }
    }

    #[test]
    fn bucket_of_date_matches_calendar() {
        // 2025-06-01 is a Sunday.
        assert_eq!(DayOfWeek::of(date(2025, 6, 1)), DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::of(date(2025, 6, 2)), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::of(date(2025, 6, 7)), DayOfWeek::Saturday);
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2025, 6, 2), date(2025, 6, 1));
        assert!(matches!(err, Err(BookingError::InvertedRange { .. })));
    }

    #[test]
    fn range_days_are_inclusive() {
        let range = DateRange::new(date(2025, 6, 1), date(2025, 6, 9)).expect("valid range");
        assert_eq!(range.len_days(), 9);
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.first(), Some(&date(2025, 6, 1)));
        assert_eq!(days.last(), Some(&date(2025, 6, 9)));

        let single = DateRange::single_day(date(2025, 6, 1));
        assert_eq!(single.len_days(), 1);
    }

    #[test]
    fn hour_menu_spans_the_full_day() {
        assert_eq!(HOUR_MENU.len(), 24);
        assert_eq!(HOUR_MENU[0], "12:00 AM");
        assert_eq!(HOUR_MENU[23], "11:00 PM");
        assert!(is_menu_time("09:00 AM"));
        assert!(!is_menu_time("09:30 AM"));
    }

    #[test]
    fn schedule_rejects_off_menu_times() {
        let mut schedule = WeeklySchedule::default();
        schedule.set(DayOfWeek::Monday, DayHours::window("09:00 AM", "05:00 PM"));
        assert!(schedule.check_menu_times().is_ok());

        schedule.set(DayOfWeek::Friday, DayHours::window("09:00 AM", "05:30 PM"));
        let err = schedule.check_menu_times();
        assert!(matches!(
            err,
            Err(BookingError::OffMenuTime {
                day: DayOfWeek::Friday,
                ref value,
            }) if value == "05:30 PM"
        ));
    }

    #[test]
    fn one_sided_hours_are_incomplete() {
        let partial = DayHours {
            selected: Some(true),
            start_time: Some("09:00 AM".to_string()),
            end_time: None,
        };
        assert!(!partial.is_complete());
        assert!(DayHours::window("09:00 AM", "05:00 PM").is_complete());
    }
}

//! Recurring weekly availability and billing-window computation for bookings.

pub mod billing;
pub mod domain;
pub mod schedule;

pub use billing::{format_time_label, resolve_display_window};
pub use domain::{
    is_menu_time, BookingError, DateRange, DayHours, DayOfWeek, WeeklySchedule, HOUR_MENU,
};
pub use schedule::is_range_covered;

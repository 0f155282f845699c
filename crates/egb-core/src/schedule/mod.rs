//! The weekly timetable and the daily classification engine.
//!
//! `model` holds the static timetable, `time` turns raw course labels into
//! normalized 24-hour start times, and `classify` partitions a day's courses
//! into Done / In session / Upcoming relative to a clock reading.

pub mod classify;
pub mod model;
pub mod time;

pub use classify::{
    classify_day, render_today, render_today_now, render_week, CourseStatus, DayReport,
};
pub use model::{CourseEntry, DaySchedule, StartTime, Weekday, WeeklySchedule};
pub use time::extract_start_time;

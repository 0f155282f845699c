use chrono::{DateTime, Datelike, Local, Timelike};

use crate::formatting::{bold, escape_html, strike};

use super::model::{CourseEntry, Weekday, WeeklySchedule};

/// Where a course sits relative to "now".
///
/// Driven purely by the clock: recomputed from scratch on every query, with
/// no state carried between calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourseStatus {
    Upcoming,
    InSession,
    Done,
}

impl CourseStatus {
    /// Classify by elapsed minutes since start. Negative means the course has
    /// not begun, inside the duration window means in session, anything past
    /// the window means done — a strict partition with no boundary overlap,
    /// and no wraparound handling needed when start + duration crosses 24:00.
    pub fn at(course: &CourseEntry, now_minutes: i32) -> Self {
        let elapsed = now_minutes - course.start.minutes_from_midnight();
        if elapsed < 0 {
            Self::Upcoming
        } else if elapsed < course.duration_hours as i32 * 60 {
            Self::InSession
        } else {
            Self::Done
        }
    }
}

/// A day's courses partitioned relative to one clock reading. Each bucket
/// preserves the day's original course order.
#[derive(Clone, Debug, Default)]
pub struct DayReport {
    pub done: Vec<CourseEntry>,
    pub in_session: Vec<CourseEntry>,
    pub upcoming: Vec<CourseEntry>,
}

pub fn classify_day(courses: &[CourseEntry], now_minutes: i32) -> DayReport {
    let mut report = DayReport::default();
    for course in courses {
        let bucket = match CourseStatus::at(course, now_minutes) {
            CourseStatus::Done => &mut report.done,
            CourseStatus::InSession => &mut report.in_session,
            CourseStatus::Upcoming => &mut report.upcoming,
        };
        bucket.push(course.clone());
    }
    report
}

pub const WEEKEND_MESSAGE: &str =
    "It's the weekend! No classes today 🥳\n\nPS: /classes shows your classes for the week.";

const NONE_PLACEHOLDER: &str = "🚫 None";

fn minute_of_day(now: DateTime<Local>) -> i32 {
    now.hour() as i32 * 60 + now.minute() as i32
}

fn push_section(out: &mut String, heading: &str, entries: &[CourseEntry], struck: bool) {
    out.push_str(heading);
    out.push('\n');
    if entries.is_empty() {
        out.push_str(NONE_PLACEHOLDER);
        out.push('\n');
    } else {
        for course in entries {
            if struck {
                out.push_str(&strike(&course.name));
            } else {
                out.push_str(&escape_html(&course.name));
            }
            out.push('\n');
        }
    }
}

/// Render the Done / In session / Upcoming report for `now`'s weekday.
///
/// Saturday and Sunday short-circuit to a fixed message without consulting
/// any course entries; a weekday missing from the timetable renders as an
/// empty day.
pub fn render_today(schedule: &WeeklySchedule, now: DateTime<Local>) -> String {
    let Some(today) = Weekday::from_chrono(now.weekday()) else {
        return WEEKEND_MESSAGE.to_string();
    };

    let courses = schedule.courses_for(today).unwrap_or(&[]);
    let report = classify_day(courses, minute_of_day(now));

    let mut out = String::from("☀ <b>Today's classes</b>\n\n");
    push_section(&mut out, "✅ <b>Done</b>:", &report.done, true);
    out.push('\n');
    push_section(&mut out, "⏳ <b>In session</b>:", &report.in_session, false);
    out.push('\n');
    push_section(&mut out, "💡 <b>Upcoming</b>:", &report.upcoming, false);
    out
}

/// Same report, sampled at the current wall clock.
pub fn render_today_now(schedule: &WeeklySchedule) -> String {
    render_today(schedule, Local::now())
}

/// Full-week overview, each day a heading followed by its course lines, in
/// schedule order.
pub fn render_week(schedule: &WeeklySchedule) -> String {
    let mut out = String::from("If <b>Soft. Modelling</b> is your elective:\n\n");
    for day in schedule.days() {
        out.push_str(&format!("{}:\n", bold(day.day.name())));
        for course in &day.courses {
            out.push_str(&escape_html(&course.name));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

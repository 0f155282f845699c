use super::time::extract_start_time;

/// Weekdays that can carry classes. Weekends are intentionally absent from
/// the type: day resolution maps Saturday/Sunday to `None` before any lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
        }
    }

    /// Map a calendar weekday; `None` on weekends.
    pub fn from_chrono(day: chrono::Weekday) -> Option<Self> {
        use chrono::Weekday::*;
        match day {
            Mon => Some(Self::Monday),
            Tue => Some(Self::Tuesday),
            Wed => Some(Self::Wednesday),
            Thu => Some(Self::Thursday),
            Fri => Some(Self::Friday),
            Sat | Sun => None,
        }
    }
}

/// Normalized 24-hour start time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartTime {
    pub hour: u8,
    pub minute: u8,
}

impl StartTime {
    pub fn minutes_from_midnight(self) -> i32 {
        self.hour as i32 * 60 + self.minute as i32
    }
}

/// One scheduled class occurrence on a given weekday.
///
/// `name` is the full display label (course, time glyph, room); `start` is
/// the label's time segment already normalized, so no downstream code has to
/// deal with am/pm again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseEntry {
    pub name: String,
    pub start: StartTime,
    pub duration_hours: u32,
}

#[derive(Clone, Debug)]
pub struct DaySchedule {
    pub day: Weekday,
    pub courses: Vec<CourseEntry>,
}

/// The static five-weekday timetable.
///
/// Configuration, not state: built once at startup, never mutated, insertion
/// order is calendar order. Each weekday appears at most once.
#[derive(Clone, Debug, Default)]
pub struct WeeklySchedule {
    days: Vec<DaySchedule>,
}

impl WeeklySchedule {
    pub fn new(days: Vec<DaySchedule>) -> Self {
        debug_assert!(
            days.iter()
                .enumerate()
                .all(|(i, d)| days[..i].iter().all(|prev| prev.day != d.day)),
            "a weekday may appear at most once"
        );
        Self { days }
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    /// Pure lookup; `None` for a weekday with no entry.
    pub fn courses_for(&self, day: Weekday) -> Option<&[CourseEntry]> {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.courses.as_slice())
    }

    /// Build a day from raw labels, dropping any label whose time segment
    /// does not parse. The rest of the day survives.
    fn day_from_labels(day: Weekday, labels: &[(&str, u32)]) -> DaySchedule {
        let mut courses = Vec::with_capacity(labels.len());
        for (label, duration_hours) in labels {
            match extract_start_time(label) {
                Ok(start) => courses.push(CourseEntry {
                    name: (*label).to_string(),
                    start,
                    duration_hours: *duration_hours,
                }),
                Err(e) => tracing::warn!("skipping timetable entry: {e}"),
            }
        }
        DaySchedule { day, courses }
    }

    /// The group's timetable, Monday through Friday.
    pub fn default_timetable() -> Self {
        use Weekday::*;
        Self::new(vec![
            Self::day_from_labels(Monday, &[("_Formal Methods_ | ⏰5:30pm | 🏠N3", 1)]),
            Self::day_from_labels(Tuesday, &[("_Accounting_ | ⏰5:30pm | 🏠JQB23", 1)]),
            Self::day_from_labels(
                Wednesday,
                &[
                    ("_Compilers_ | ⏰9:30am | 🏠E10", 1),
                    ("_Theory & Survey_ | ⏰3:30pm | 🏠JQB09", 1),
                    ("_Soft. Modelling_ | ⏰5:30pm | 🏠LOT1", 1),
                ],
            ),
            Self::day_from_labels(
                Thursday,
                &[
                    ("_Project_ | ⏰8:30am | 🏠Online", 1),
                    ("_Formal Methods_ | ⏰12:30pm | 🏠JQB19", 1),
                    ("_Accounting_ | ⏰6:30pm | 🏠E10", 1),
                ],
            ),
            Self::day_from_labels(
                Friday,
                &[
                    ("_Soft. Modelling_ | ⏰9:30am | 🏠N3", 1),
                    ("_Theory & Survey_ | ⏰10:30am | 🏠N3", 1),
                    ("_Compilers_ | ⏰4:30pm | 🏠NNB2", 1),
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timetable_covers_all_weekdays() {
        let schedule = WeeklySchedule::default_timetable();
        assert_eq!(schedule.days().len(), 5);
        for day in [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
        ] {
            assert!(schedule.courses_for(day).is_some(), "{} missing", day.name());
        }
    }

    #[test]
    fn start_times_are_normalized_at_construction() {
        let schedule = WeeklySchedule::default_timetable();
        let wednesday = schedule.courses_for(Weekday::Wednesday).unwrap();
        assert_eq!(wednesday[0].start, StartTime { hour: 9, minute: 30 });
        assert_eq!(
            wednesday[2].start,
            StartTime {
                hour: 17,
                minute: 30
            }
        );
    }

    #[test]
    fn lookup_gap_is_none_not_error() {
        let schedule = WeeklySchedule::new(vec![]);
        assert!(schedule.courses_for(Weekday::Monday).is_none());
    }

    #[test]
    fn malformed_label_is_dropped_not_fatal() {
        let day = WeeklySchedule::day_from_labels(
            Weekday::Monday,
            &[
                ("broken label without pipes", 1),
                ("_Formal Methods_ | ⏰5:30pm | 🏠N3", 1),
            ],
        );
        assert_eq!(day.courses.len(), 1);
        assert!(day.courses[0].name.contains("Formal Methods"));
    }

    #[test]
    fn weekend_resolution_is_absent() {
        assert!(Weekday::from_chrono(chrono::Weekday::Sat).is_none());
        assert!(Weekday::from_chrono(chrono::Weekday::Sun).is_none());
        assert_eq!(
            Weekday::from_chrono(chrono::Weekday::Wed),
            Some(Weekday::Wednesday)
        );
    }
}

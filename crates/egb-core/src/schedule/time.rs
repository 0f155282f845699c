use crate::{errors::Error, Result};

use super::model::StartTime;

/// Extract the normalized 24-hour start time from a course label.
///
/// Labels look like `_Compilers_ | ⏰9:30am | 🏠E10`: the second pipe-delimited
/// segment carries a single clock glyph followed by `H:MM` and an am/pm
/// marker, `H` in 1-12. Normalization happens exactly once, when the
/// timetable is built; nothing downstream re-parses the label.
pub fn extract_start_time(label: &str) -> Result<StartTime> {
    let segment = label
        .split('|')
        .nth(1)
        .ok_or_else(|| parse_err(label, "missing time segment"))?
        .trim();

    // Drop the single leading glyph.
    let mut chars = segment.chars();
    if chars.next().is_none() {
        return Err(parse_err(label, "empty time segment"));
    }
    let raw = chars.as_str().trim();

    let (clock, meridiem) =
        split_meridiem(raw).ok_or_else(|| parse_err(label, "missing am/pm marker"))?;

    let (hour_s, minute_s) = clock
        .split_once(':')
        .ok_or_else(|| parse_err(label, "missing ':' in time"))?;

    let hour: u8 = hour_s
        .trim()
        .parse()
        .map_err(|_| parse_err(label, "unparseable hour"))?;
    let minute: u8 = minute_s
        .trim()
        .parse()
        .map_err(|_| parse_err(label, "unparseable minute"))?;

    if !(1..=12).contains(&hour) {
        return Err(parse_err(label, "hour outside 1-12"));
    }
    if minute > 59 {
        return Err(parse_err(label, "minute outside 0-59"));
    }

    // 12-hour to 24-hour: pm adds 12 except at noon, and 12am is midnight.
    let hour = match meridiem {
        Meridiem::Pm if hour != 12 => hour + 12,
        Meridiem::Am if hour == 12 => 0,
        _ => hour,
    };

    Ok(StartTime { hour, minute })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

fn split_meridiem(raw: &str) -> Option<(&str, Meridiem)> {
    if let Some(head) = strip_suffix_ci(raw, "am") {
        return Some((head.trim_end(), Meridiem::Am));
    }
    if let Some(head) = strip_suffix_ci(raw, "pm") {
        return Some((head.trim_end(), Meridiem::Pm));
    }
    None
}

fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    if s.len() < suffix.len() {
        return None;
    }
    let split = s.len() - suffix.len();
    if !s.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = s.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

fn parse_err(label: &str, reason: &str) -> Error {
    Error::TimeParse {
        label: label.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_of(label: &str) -> StartTime {
        extract_start_time(label).unwrap()
    }

    #[test]
    fn pm_shifts_afternoon_hours() {
        assert_eq!(
            time_of("_Soft. Modelling_ | ⏰5:30pm | 🏠LOT1"),
            StartTime {
                hour: 17,
                minute: 30
            }
        );
    }

    #[test]
    fn am_passes_through() {
        assert_eq!(
            time_of("_Compilers_ | ⏰9:30am | 🏠E10"),
            StartTime { hour: 9, minute: 30 }
        );
    }

    #[test]
    fn noon_stays_twelve() {
        assert_eq!(
            time_of("_Formal Methods_ | ⏰12:30pm | 🏠JQB19"),
            StartTime {
                hour: 12,
                minute: 30
            }
        );
    }

    #[test]
    fn midnight_is_hour_zero() {
        // The upstream labeling scheme left 12am at hour 12; here midnight is
        // normalized to 0 so a 12:30am label cannot collide with 12:30pm.
        assert_eq!(
            time_of("_Night Lab_ | ⏰12:30am | 🏠Online"),
            StartTime { hour: 0, minute: 30 }
        );
    }

    #[test]
    fn uppercase_marker_is_accepted() {
        assert_eq!(
            time_of("_Accounting_ | ⏰6:30PM | 🏠E10"),
            StartTime {
                hour: 18,
                minute: 30
            }
        );
    }

    #[test]
    fn missing_pipe_segment_errors() {
        let err = extract_start_time("just a name").unwrap_err();
        assert!(matches!(err, Error::TimeParse { .. }));
    }

    #[test]
    fn garbage_numbers_error() {
        assert!(extract_start_time("_X_ | ⏰ab:cdpm | 🏠Y").is_err());
        assert!(extract_start_time("_X_ | ⏰5.30pm | 🏠Y").is_err());
    }

    #[test]
    fn out_of_range_fields_error() {
        assert!(extract_start_time("_X_ | ⏰13:30pm | 🏠Y").is_err());
        assert!(extract_start_time("_X_ | ⏰0:30am | 🏠Y").is_err());
        assert!(extract_start_time("_X_ | ⏰5:61pm | 🏠Y").is_err());
    }

    #[test]
    fn missing_meridiem_errors() {
        assert!(extract_start_time("_X_ | ⏰17:30 | 🏠Y").is_err());
    }
}

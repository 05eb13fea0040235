//! Settlement deadline parsing
//!
//! Up/down market questions embed their settlement time as Eastern wall-clock
//! time, e.g. "Bitcoin Up or Down - March 9, 2:00AM-2:05AM ET". The end of the
//! range is the deadline. Eastern time switches between UTC-5 and UTC-4, so the
//! offset is resolved per date through the tz database.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::America::New_York;
use regex::Regex;
use std::sync::OnceLock;

/// Month-day, then the time after the range dash, then the zone suffix
const DEADLINE_PATTERN: &str = r"(\w+ \d+),.*?-\s*(\d{1,2}:\d{2}(?:AM|PM))\s*ET";

/// `%B` in chrono also accepts "Jan" and friends; only full names are valid here
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn deadline_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DEADLINE_PATTERN).expect("deadline pattern is valid"))
}

/// Parse a deadline assuming the current UTC year
pub fn parse_deadline_now(question: &str) -> Option<DateTime<Utc>> {
    parse_deadline(question, Utc::now().year())
}

/// Parse the settlement deadline embedded in `question`
///
/// Returns `None` when the text does not contain a recognizable date and ET
/// time. Wall times repeated by the autumn transition resolve to standard
/// time; wall times skipped in spring use the standard offset.
pub fn parse_deadline(question: &str, year: i32) -> Option<DateTime<Utc>> {
    let caps = deadline_regex().captures(question)?;
    let date = caps.get(1)?.as_str();
    let time = caps.get(2)?.as_str();

    let month = date.split_whitespace().next()?;
    if !MONTH_NAMES.iter().any(|m| m.eq_ignore_ascii_case(month)) {
        tracing::debug!(month, "Month is not a full month name");
        return None;
    }

    let text = format!("{} {} {}", date, year, time);
    let naive = match NaiveDateTime::parse_from_str(&text, "%B %d %Y %I:%M%p") {
        Ok(naive) => naive,
        Err(e) => {
            tracing::debug!(text = %text, error = %e, "Deadline text did not parse");
            return None;
        }
    };

    eastern_to_utc(naive)
}

/// Convert an Eastern wall-clock time to UTC
fn eastern_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match New_York.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        // The later instant of a repeated hour is the standard-time one
        LocalResult::Ambiguous(a, b) => Some(a.max(b).with_timezone(&Utc)),
        LocalResult::None => {
            // Inside the spring-forward gap; an hour earlier is still standard time
            let before_gap = New_York
                .offset_from_local_datetime(&(naive - Duration::hours(1)))
                .earliest()?
                .fix();
            before_gap
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

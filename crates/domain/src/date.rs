use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Formats accepted for datetimes submitted by clients. They are
/// interpreted as wall clock time in the user's timezone.
const USER_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Error, Debug)]
pub enum InvalidDateTimeError {
    #[error("Datetime: {0} is malformed, expected format: YYYY-MM-DD HH:MM")]
    Malformed(String),
}

/// Parses a datetime string provided by a client into the naive wall clock
/// time it represents. Slashes are accepted as date separators.
pub fn parse_user_datetime(raw: &str) -> Result<NaiveDateTime, InvalidDateTimeError> {
    let raw = raw.replace('/', "-");
    for format in &USER_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw.trim(), format) {
            return Ok(datetime);
        }
    }
    Err(InvalidDateTimeError::Malformed(raw))
}

/// Resolves a wall clock time in the user's timezone to an UTC instant.
///
/// An ambiguous local time (the clock was set back) resolves to the earliest
/// of the two instants. A local time inside a DST gap (the clock was set
/// forward) rolls forward to the first valid wall clock time.
pub fn from_user_datetime(local: &NaiveDateTime, timezone: &Tz) -> DateTime<Utc> {
    match timezone.from_local_datetime(local) {
        LocalResult::Single(datetime) => datetime.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _latest) => earliest.with_timezone(&Utc),
        LocalResult::None => from_user_datetime(&(*local + Duration::hours(1)), timezone),
    }
}

/// The wall clock time in the user's timezone at the given UTC timestamp.
pub fn to_user_datetime(timestamp_millis: i64, timezone: &Tz) -> Option<NaiveDateTime> {
    timezone
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|datetime| datetime.naive_local())
}

pub fn format_user_datetime(timestamp_millis: i64, timezone: &Tz) -> String {
    match to_user_datetime(timestamp_millis, timezone) {
        Some(local) => local.format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}

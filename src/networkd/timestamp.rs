//! Parsing of systemd's `ActiveEnterTimestamp` property.
//!
//! `systemctl show --value` prints it as `Tue 2024-05-14 10:00:00 UTC`.
//! The zone is an abbreviation; `UTC`/`GMT` are honoured, anything else is
//! taken to be the host's local zone, which is what systemctl prints in.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Layout of the timestamp without its trailing zone abbreviation.
pub const STAMP_FORMAT: &str = "%a %Y-%m-%d %H:%M:%S";

#[derive(Error, Debug, PartialEq)]
pub enum TimestampError {
    #[error("missing time zone")]
    MissingZone,

    #[error("invalid time zone '{0}'")]
    InvalidZone(String),

    #[error("{0}")]
    Malformed(#[from] chrono::ParseError),

    #[error("'{0}' does not exist in the local time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

/// Parse an `ActiveEnterTimestamp` value into an absolute instant.
pub fn parse_active_enter(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let (stamp, zone) = value
        .trim()
        .rsplit_once(' ')
        .ok_or(TimestampError::MissingZone)?;

    let valid_zone = !zone.is_empty()
        && zone
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-');
    if !valid_zone {
        return Err(TimestampError::InvalidZone(zone.to_string()));
    }

    let naive = NaiveDateTime::parse_from_str(stamp.trim_end(), STAMP_FORMAT)?;

    match zone {
        "UTC" | "GMT" => Ok(Utc.from_utc_datetime(&naive)),
        _ => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .ok_or(TimestampError::NonexistentLocalTime(naive)),
    }
}

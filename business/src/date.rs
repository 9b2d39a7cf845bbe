use std::fmt::Display;

use chrono::{DateTime, TimeZone};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a millisecond Unix timestamp in `tz`. Out-of-range values render as `-`.
pub fn format_timestamp<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => "-".to_owned(),
    }
}

//! HTTP date codec
//!
//! Conversions between POSIX seconds and the two date formats a server
//! emits: the RFC 1123 HTTP date (`Sun, 06 Nov 1994 08:49:37 GMT`) and the
//! common log format date (`06/Nov/1994:08:49:37 +0000`).
//!
//! Formatting uses fixed English day and month names regardless of the
//! process locale. Only [`format_log_time`] depends on the local timezone.

use super::{Error, Result};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use tracing::debug;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const LOG_DATE_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Timestamps chrono cannot represent collapse to the epoch.
fn utc(epoch_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch_secs, 0).unwrap_or_default()
}

/// Render POSIX seconds as an RFC 1123 HTTP date, always in GMT
///
/// Timestamps chrono cannot represent render as the epoch. Years past 9999
/// render with a signed year (`Sat, 01 Jan +10000 00:00:00 GMT`), which is
/// not RFC 1123 and does not parse back.
pub fn format_http_time(epoch_secs: i64) -> String {
    utc(epoch_secs).format(HTTP_DATE_FORMAT).to_string()
}

/// Render POSIX seconds as a common log format date in the local timezone
pub fn format_log_time(epoch_secs: i64) -> String {
    utc(epoch_secs)
        .with_timezone(&Local)
        .format(LOG_DATE_FORMAT)
        .to_string()
}

/// Parse an RFC 1123 HTTP date into POSIX seconds
///
/// The weekday must agree with the date.
pub fn parse_http_time_strict(raw: impl AsRef<[u8]>) -> Result<i64> {
    let raw = raw.as_ref();
    let text = std::str::from_utf8(raw)
        .map_err(|_| Error::InvalidDate(String::from_utf8_lossy(raw).into_owned()))?;

    NaiveDateTime::parse_from_str(text, HTTP_DATE_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|e| Error::InvalidDate(format!("{}: {}", text, e)))
}

/// Parse an RFC 1123 HTTP date, returning 0 (the epoch) when it is malformed
///
/// Use [`parse_http_time_strict`] to tell a bad date from the epoch itself.
pub fn parse_http_time(raw: impl AsRef<[u8]>) -> i64 {
    match parse_http_time_strict(raw) {
        Ok(secs) => secs,
        Err(e) => {
            debug!(error = %e, "falling back to epoch for unparseable HTTP date");
            0
        }
    }
}

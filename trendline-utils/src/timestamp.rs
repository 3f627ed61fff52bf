use crate::{Error, Result};
use chrono::prelude::*;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a candle timestamp.
///
/// Offsets in RFC 3339 input are dropped and the wall time as written is kept,
/// so `2019-07-22T09:30:00-04:00` becomes `2019-07-22 09:30:00`.
/// Bare dates resolve to midnight.
pub fn parse_ts_from_str(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    if s.len() == 10 {
        let day = NaiveDate::parse_from_str(s, DATE_FORMAT)?;
        return day
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| Error(format!("invalid midnight for date: {}", s)));
    }
    Err(Error(format!("invalid datetime format: {}", s)))
}

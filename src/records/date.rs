//! Calendar-year extraction from ISO 8601 event dates.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Calendar year of an ISO 8601 date string.
///
/// Accepts full RFC 3339 datetimes, naive datetimes, `YYYY-MM-DD`, `YYYY-MM`
/// and bare signed years. Returns `None` for anything else.
pub fn year_of(date: &str) -> Option<i32> {
    let s = date.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.year());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.year());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.year());
    }
    if let Some((year, month)) = s.rsplit_once('-')
        && month.len() == 2
        && month.parse::<u32>().is_ok_and(|m| (1..=12).contains(&m))
    {
        return parse_bare_year(year);
    }
    parse_bare_year(s)
}

fn parse_bare_year(s: &str) -> Option<i32> {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/records/date.rs"]
mod tests;

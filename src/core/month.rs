//! Reporting month normalization.
//!
//! Timesheets store the month in whatever shape the author's spreadsheet
//! produced: a real date cell, typed text, or a bare date serial. All of
//! them collapse to a `YYYY_MM` label. Values that cannot be read as a
//! date are passed through as text so no workbook is rejected for it.

use crate::models::CellValue;
use crate::models::cell::format_float;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Day zero of spreadsheet date serials.
pub const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

const MONTH_FORMAT: &str = "%Y_%m";

static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})$").expect("valid regex"));

static JAPANESE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})\s*年\s*(\d{1,2})\s*月(?:\s*(\d{1,2})\s*日)?$").expect("valid regex")
});

static COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("valid regex"));

/// Canonical month label for a raw month cell.
pub fn normalize_month(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => String::new(),
        CellValue::DateTime(dt) => dt.format(MONTH_FORMAT).to_string(),
        CellValue::Text(s) => match parse_date_text(s) {
            Some(d) => d.format(MONTH_FORMAT).to_string(),
            None => {
                warn!(value = %s, "month cell is not a recognizable date, keeping raw text");
                s.clone()
            }
        },
        CellValue::Int(i) => serial_to_datetime(*i as f64)
            .map(|dt| dt.format(MONTH_FORMAT).to_string())
            .unwrap_or_else(|| i.to_string()),
        CellValue::Float(f) => serial_to_datetime(*f)
            .map(|dt| dt.format(MONTH_FORMAT).to_string())
            .unwrap_or_else(|| format_float(*f)),
        other => other.as_text(),
    }
}

/// Date for a spreadsheet serial number (days since 1899-12-30,
/// fractional part is the time of day).
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }

    let (y, m, d) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;

    let millis = (serial * 86_400_000.0).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }

    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    epoch.checked_add_signed(delta)
}

/// Best-effort date parsing for typed month text.
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    // "2024-05-01T00:00:00Z", "2024-05-01 00:00:00+09:00": keep the local date
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.date_naive());
        }
    }

    // %.f also matches an absent fraction
    const DATETIME_FORMATS: [&str; 10] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S%.f",
        "%Y.%m.%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M",
        "%m/%d/%Y %H:%M:%S%.f",
        "%m/%d/%Y %H:%M",
        "%B %d, %Y %H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    const DATE_FORMATS: [&str; 7] = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y.%m.%d",
        "%m/%d/%Y",
        "%B %d, %Y",
        "%B %d %Y",
        "%d %B %Y",
    ];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    if let Some(c) = COMPACT.captures(s) {
        return ymd(&c[1], &c[2], Some(&c[3]));
    }

    if let Some(c) = YEAR_MONTH.captures(s) {
        return ymd(&c[1], &c[2], None);
    }

    if let Some(c) = JAPANESE.captures(s) {
        return ymd(&c[1], &c[2], c.get(3).map(|m| m.as_str()));
    }

    // "May 2024", "Sep 2024"
    for fmt in ["%d %B %Y", "%d %b %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("1 {s}"), fmt) {
            return Some(d);
        }
    }

    None
}

fn ymd(year: &str, month: &str, day: Option<&str>) -> Option<NaiveDate> {
    let y: i32 = year.parse().ok()?;
    let m: u32 = month.parse().ok()?;
    let d: u32 = match day {
        Some(d) => d.parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(y, m, d)
}

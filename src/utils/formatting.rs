//! Formatting utilities used for CLI outputs.

use unicode_width::UnicodeWidthStr;

/// Display width of `s` in terminal columns (CJK characters count as 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(fill), s)
}

/// Hours with one decimal ("12.5"), "-" when missing.
pub fn hours2readable(hours: Option<f64>) -> String {
    match hours {
        Some(h) => format!("{:.1}", h),
        None => "-".to_string(),
    }
}

pub fn percent2readable(p: f64) -> String {
    format!("{:.1}%", p)
}

/// Placeholder for empty categorical values in tables.
pub fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

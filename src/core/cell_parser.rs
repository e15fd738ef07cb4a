//! Numeric hour values out of hand-typed cells.

use crate::models::CellValue;

/// Numeric cells pass through; text starting with digits yields the
/// leading run as an integer ("8h残業" → 8); anything else is missing.
pub fn extract_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Int(i) => Some(*i as f64),
        CellValue::Float(f) if f.is_nan() => None,
        CellValue::Float(f) => Some(*f),
        CellValue::Text(s) => leading_integer(s),
        _ => None,
    }
}

/// Leading run of decimal digits (any script) as a number. A run too long
/// to represent is missing.
pub fn leading_integer(s: &str) -> Option<f64> {
    let mut value: Option<f64> = None;

    for c in s.chars() {
        match decimal_digit(c) {
            Some(d) => value = Some(value.unwrap_or(0.0) * 10.0 + f64::from(d)),
            None => break,
        }
    }

    value.filter(|v| v.is_finite())
}

/// Lenient coercion used when re-reading exported text: plain numbers
/// first, then the leading-digits rule.
pub fn coerce_hours(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }

    match t.parse::<f64>() {
        Ok(v) if v.is_nan() => None,
        Ok(v) => Some(v),
        Err(_) => leading_integer(t),
    }
}

/// Code point of the zero of every decimal digit block (Unicode `Nd`).
/// Each block holds ten consecutive digits.
const DIGIT_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

fn decimal_digit(c: char) -> Option<u32> {
    let cp = c as u32;
    let block = DIGIT_ZEROS.partition_point(|&zero| zero <= cp).checked_sub(1)?;
    let offset = cp - DIGIT_ZEROS[block];
    (offset < 10).then_some(offset)
}

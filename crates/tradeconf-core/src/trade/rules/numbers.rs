//! Locale-aware number normalization.
//!
//! Trade confirmations mix `1.234,56` and `1,234.56` styles. The decimal
//! separator is inferred once per document from the settlement amount and
//! then reused for every other numeric field.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::patterns::DECIMAL_TAIL;

/// Decimal separator used by a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecimalSeparator {
    /// `1,234.56`
    #[default]
    #[serde(rename = ".")]
    Period,
    /// `1.234,56`
    #[serde(rename = ",")]
    Comma,
}

impl DecimalSeparator {
    /// The separator character.
    pub fn as_char(self) -> char {
        match self {
            DecimalSeparator::Period => '.',
            DecimalSeparator::Comma => ',',
        }
    }

    /// The character treated as thousands separator under this convention.
    pub fn thousands(self) -> char {
        match self {
            DecimalSeparator::Period => ',',
            DecimalSeparator::Comma => '.',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(DecimalSeparator::Period),
            ',' => Some(DecimalSeparator::Comma),
            _ => None,
        }
    }
}

impl fmt::Display for DecimalSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Outcome of normalizing a raw numeric string.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// Input was empty.
    Empty,
    /// Parsed value.
    Number(f64),
    /// Cleaned text that did not parse as a number.
    Unparsed(String),
}

impl Normalized {
    /// Parsed value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Normalized::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Canonical string form: `""`, a canonical decimal, or the cleaned text.
    pub fn into_canonical(self) -> String {
        match self {
            Normalized::Empty => String::new(),
            Normalized::Number(v) => canonical(v),
            Normalized::Unparsed(s) => s,
        }
    }
}

/// Infer the decimal separator from a raw amount such as `1 234,56`.
///
/// Defaults to [`DecimalSeparator::Period`] when the amount does not end in a
/// separator followed by exactly two digits.
pub fn infer_separator(raw_amount: &str) -> DecimalSeparator {
    let cleaned = strip_whitespace(raw_amount);
    DECIMAL_TAIL
        .captures(&cleaned)
        .and_then(|caps| caps[1].chars().next())
        .and_then(DecimalSeparator::from_char)
        .unwrap_or_default()
}

/// Normalize a raw number, keeping the failure case as data.
pub fn normalize_value(raw: &str, separator: DecimalSeparator) -> Normalized {
    if raw.is_empty() {
        return Normalized::Empty;
    }

    let cleaned: String = strip_whitespace(raw)
        .chars()
        .filter(|c| *c != separator.thousands())
        .map(|c| if c == separator.as_char() { '.' } else { c })
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) => Normalized::Number(value),
        Err(_) => {
            trace!("Could not parse {:?} as a number, keeping {:?}", raw, cleaned);
            Normalized::Unparsed(cleaned)
        }
    }
}

/// Normalize a raw number into its canonical decimal string.
///
/// Returns the cleaned-but-unparsed string when parsing fails and `""` for
/// empty input.
pub fn normalize(raw: &str, separator: DecimalSeparator) -> String {
    normalize_value(raw, separator).into_canonical()
}

/// Format a float with `.` as separator and at least one fractional digit.
pub fn canonical(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let s = value.to_string();
    if s.contains('.') { s } else { format!("{}.0", s) }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

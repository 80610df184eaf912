//! Scalar type inference for raw column values.
//!
//! A column's type is decided by a fixed-order cascade: each candidate type
//! owns an anchored validation pattern, and the first candidate whose pattern
//! accepts **every** non-missing value in the column wins. [`ScalarType::Text`]
//! accepts anything and is the terminal fallback. The cascade order is part of
//! the contract: `BIGINT` admits every `INTEGER`, and an undashed `YYYYMMDD`
//! date is also a run of digits, so the narrower candidates must be probed
//! before the wider ones.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// Year 1000-2999, month 0x/1x, day 0x-3x. The `-` separators appear in both
// positions or in neither, which the alternation encodes directly.
const DATE_BODY: &str = r"[12]\d{3}-[01]\d-[0-3]\d|[12]\d{3}[01]\d[0-3]\d";

static DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{DATE_BODY})[T ]\d{{1,2}}:[0-5]\d(?::[0-5]\d)?Z?$"
    ))
    .expect("datetime pattern")
});

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^(?:{DATE_BODY})$")).expect("date pattern"));

static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,10}$").expect("integer pattern"));

static BIGINT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,19}$").expect("bigint pattern"));

static REAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d+|\.\d+|\d+\.\d*)$").expect("real pattern"));

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:[0-5]\d$").expect("time pattern"));

/// Inferred scalar type for a column of raw string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScalarType {
    DateTime,
    Date,
    Integer,
    BigInt,
    Real,
    Time,
    Text,
}

/// How values of a given [`ScalarType`] are totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingRule {
    /// Byte-wise string order; chronologically correct for the zero-padded
    /// date/time shapes the patterns admit.
    Lexical,
    /// Parse to `f64` and order with `total_cmp`, so "9" sorts before "10".
    Numeric,
}

impl OrderingRule {
    pub fn compare(self, left: &str, right: &str) -> Ordering {
        match self {
            OrderingRule::Lexical => left.cmp(right),
            OrderingRule::Numeric => numeric_key(left).total_cmp(&numeric_key(right)),
        }
    }
}

// Values that reached a numeric comparator already passed a numeric pattern,
// but NaN keeps the order total for arbitrary strings as well.
fn numeric_key(value: &str) -> f64 {
    value.parse().unwrap_or(f64::NAN)
}

impl ScalarType {
    /// Candidate probe order. Narrow patterns precede their supersets:
    /// `INTEGER` before `BIGINT`, both before `REAL`, and the date shapes
    /// before any all-digit candidate so `20160118` stays a date.
    pub const CANDIDATES: [ScalarType; 6] = [
        ScalarType::DateTime,
        ScalarType::Date,
        ScalarType::Integer,
        ScalarType::BigInt,
        ScalarType::Real,
        ScalarType::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::DateTime => "DATETIME",
            ScalarType::Date => "DATE",
            ScalarType::Integer => "INTEGER",
            ScalarType::BigInt => "BIGINT",
            ScalarType::Real => "REAL",
            ScalarType::Time => "TIME",
            ScalarType::Text => "TEXT",
        }
    }

    /// Whether `value` conforms to this type's validation pattern.
    /// [`ScalarType::Text`] accepts any string.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            ScalarType::DateTime => DATETIME_PATTERN.is_match(value),
            ScalarType::Date => DATE_PATTERN.is_match(value),
            ScalarType::Integer => INTEGER_PATTERN.is_match(value),
            ScalarType::BigInt => BIGINT_PATTERN.is_match(value),
            ScalarType::Real => REAL_PATTERN.is_match(value),
            ScalarType::Time => TIME_PATTERN.is_match(value),
            ScalarType::Text => true,
        }
    }

    pub fn ordering_rule(&self) -> OrderingRule {
        match self {
            ScalarType::Integer | ScalarType::BigInt | ScalarType::Real => OrderingRule::Numeric,
            ScalarType::DateTime | ScalarType::Date | ScalarType::Time | ScalarType::Text => {
                OrderingRule::Lexical
            }
        }
    }

    /// Compares two raw values under this type's ordering rule.
    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        self.ordering_rule().compare(left, right)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when a value counts as missing: the record carried no field for the
/// column, or the field is empty/whitespace-only. Missing values are never
/// classified, compared, or counted.
pub fn is_missing(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(text) => text.trim().is_empty(),
    }
}

/// Returns the most specific [`ScalarType`] that every value conforms to,
/// probing [`ScalarType::CANDIDATES`] in order and falling back to
/// [`ScalarType::Text`].
///
/// An empty slice yields `Text`: "every value matches" is vacuously true for
/// no values, and reporting the first candidate for a column with nothing in
/// it would be misleading.
pub fn classify<S: AsRef<str>>(values: &[S]) -> ScalarType {
    if values.is_empty() {
        return ScalarType::Text;
    }
    for candidate in ScalarType::CANDIDATES {
        if values.iter().all(|value| candidate.matches(value.as_ref())) {
            return candidate;
        }
    }
    ScalarType::Text
}

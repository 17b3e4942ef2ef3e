//! Point-in-time column type with an "unset" sentinel.
//!
//! The zero instant (`0001-01-01 00:00:00`) means the value was never set. It is
//! rendered as `""` for storage and JSON, and as a bare `null` when embedded in a SQL
//! literal, never as a calendar date.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{DecodeError, EncodeError};
use crate::types::{Cell, CellValue, DecodeMode, TypeName, discard};

/// `YYYY-MM-DD HH:MM:SS` with an optional fractional part.
pub const LAYOUT_MILLIS: &str = "%Y-%m-%d %H:%M:%S%.f";
/// `YYYYMMDD`.
pub const LAYOUT_COMPACT_DATE: &str = "%Y%m%d";
/// `YYYY-MM-DD HH:MM:SS`.
pub const LAYOUT_SECONDS: &str = "%Y-%m-%d %H:%M:%S";

/// The named text layouts a [`Timestamp`] can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeLayout {
    /// Second precision plus milliseconds. Trailing zero digits of the fraction are
    /// trimmed and the fraction is left out entirely when it is zero:
    /// `2024-03-01 12:30:45.12`, `2024-03-01 12:30:45`.
    Millis,
    CompactDate,
    Seconds,
}

impl TimeLayout {
    pub fn pattern(self) -> &'static str {
        match self {
            TimeLayout::Millis => LAYOUT_MILLIS,
            TimeLayout::CompactDate => LAYOUT_COMPACT_DATE,
            TimeLayout::Seconds => LAYOUT_SECONDS,
        }
    }

    pub fn format(self, t: &NaiveDateTime) -> String {
        match self {
            TimeLayout::Millis => {
                let mut out = t.format(LAYOUT_SECONDS).to_string();
                // Leap seconds carry nanos past 1e9; the fraction ignores that.
                let millis = (t.nanosecond() % 1_000_000_000) / 1_000_000;
                if millis > 0 {
                    let digits = format!("{millis:03}");
                    out.push('.');
                    out.push_str(digits.trim_end_matches('0'));
                }
                out
            }
            TimeLayout::CompactDate => t.format(LAYOUT_COMPACT_DATE).to_string(),
            TimeLayout::Seconds => t.format(LAYOUT_SECONDS).to_string(),
        }
    }

    pub fn parse(self, text: &str) -> Result<NaiveDateTime, DecodeError> {
        let parsed = match self {
            TimeLayout::Millis | TimeLayout::Seconds => {
                NaiveDateTime::parse_from_str(text, self.pattern()).ok()
            }
            TimeLayout::CompactDate => NaiveDate::parse_from_str(text, LAYOUT_COMPACT_DATE)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
        };
        parsed.ok_or_else(|| DecodeError::InvalidTime {
            text: text.to_string(),
            layout: self.pattern(),
        })
    }
}

/// The zero instant, `0001-01-01 00:00:00`.
fn zero_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// A point in time, or unset.
///
/// There is no separate null flag: the value is unset exactly when it holds the zero
/// instant, which is also the [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Default for Timestamp {
    fn default() -> Self {
        Self(zero_instant())
    }
}

impl Timestamp {
    pub fn new(t: NaiveDateTime) -> Self {
        Self(t)
    }

    /// The unset value.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The current local wall-clock time.
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Returns true if this holds the zero instant.
    pub fn is_zero(&self) -> bool {
        self.0 == zero_instant()
    }

    /// Returns true if the value is unset.
    ///
    /// This is the same check as [`Timestamp::is_zero`]; an absent column is
    /// represented by `Option<Timestamp>` at the call site.
    pub fn is_empty(&self) -> bool {
        self.is_zero()
    }

    pub fn to_time(&self) -> NaiveDateTime {
        self.0
    }

    /// Renders in `layout`, or `""` when unset.
    pub fn format_with(&self, layout: TimeLayout) -> String {
        if self.is_zero() {
            return String::new();
        }
        layout.format(&self.0)
    }

    /// Renders for direct embedding in a SQL statement: `null` when unset, otherwise
    /// the millisecond layout in single quotes.
    pub fn sql_literal(&self) -> String {
        if self.is_zero() {
            return "null".to_string();
        }
        format!("'{}'", TimeLayout::Millis.format(&self.0))
    }

    /// Parses storage text: `""` is unset, otherwise the millisecond layout, whose
    /// fraction is optional.
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        if text.is_empty() {
            return Ok(Self::zero());
        }
        TimeLayout::Millis.parse(text).map(Self)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(t: NaiveDateTime) -> Self {
        Self(t)
    }
}

impl From<Timestamp> for NaiveDateTime {
    fn from(t: Timestamp) -> Self {
        t.0
    }
}

/// Storage text: `""` when unset.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(TimeLayout::Millis))
    }
}

impl CellValue for Timestamp {
    fn type_name() -> TypeName {
        TypeName::new("flatcell::Timestamp")
    }

    fn to_cell(&self) -> Result<Cell, EncodeError> {
        Ok(Cell::Text(self.to_string()))
    }

    fn from_cell(cell: &Cell, _mode: DecodeMode) -> Result<Self, DecodeError> {
        match cell {
            Cell::Timestamp(t) => Ok(Self(*t)),
            Cell::Null => Ok(Self::zero()),
            other => Self::parse(other.as_text()?),
        }
    }

    /// A NULL column leaves the receiver as it was.
    fn scan(&mut self, cell: &Cell) {
        if matches!(cell, Cell::Null) {
            return;
        }
        match Self::from_cell(cell, DecodeMode::BestEffort) {
            Ok(value) => *self = value,
            Err(err) => discard(&Self::type_name(), &err),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text.is_empty() {
            return Ok(Self::zero());
        }
        TimeLayout::Millis
            .parse(&text)
            .map(Self)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> Timestamp {
        let t = NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap();
        Timestamp::new(t)
    }

    #[test]
    fn test_zero_renders_empty() {
        let t = Timestamp::zero();
        assert!(t.is_zero());
        assert!(t.is_empty());
        assert_eq!(t.to_string(), "");
        assert_eq!(t.sql_literal(), "null");
        assert_eq!(t.to_cell().unwrap(), Cell::Text(String::new()));
    }

    #[test]
    fn test_millis_layout_trims_fraction() {
        assert_eq!(at(2024, 3, 1, 12, 30, 45, 120).to_string(), "2024-03-01 12:30:45.12");
        assert_eq!(at(2024, 3, 1, 12, 30, 45, 7).to_string(), "2024-03-01 12:30:45.007");
        assert_eq!(at(2024, 3, 1, 12, 30, 45, 0).to_string(), "2024-03-01 12:30:45");
    }

    #[test]
    fn test_sql_literal() {
        let t = at(2024, 3, 1, 12, 30, 45, 500);
        assert_eq!(t.sql_literal(), "'2024-03-01 12:30:45.5'");
    }

    #[test]
    fn test_other_layouts() {
        let t = at(2024, 3, 1, 12, 30, 45, 500);
        assert_eq!(t.format_with(TimeLayout::CompactDate), "20240301");
        assert_eq!(t.format_with(TimeLayout::Seconds), "2024-03-01 12:30:45");
        assert_eq!(Timestamp::zero().format_with(TimeLayout::CompactDate), "");

        let day = TimeLayout::CompactDate.parse("20240301").unwrap();
        assert_eq!(Timestamp::new(day), at(2024, 3, 1, 0, 0, 0, 0));
    }

    #[test]
    fn test_parse_storage_text() {
        let t = at(2024, 3, 1, 12, 30, 45, 120);
        assert_eq!(Timestamp::parse("2024-03-01 12:30:45.12").unwrap(), t);
        assert_eq!(
            Timestamp::parse("2024-03-01 12:30:45").unwrap(),
            at(2024, 3, 1, 12, 30, 45, 0)
        );
        assert!(Timestamp::parse("").unwrap().is_zero());
        assert!(matches!(
            Timestamp::parse("yesterday"),
            Err(DecodeError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_millis_layout_accepts_whole_seconds() {
        let t = TimeLayout::Millis.parse("2024-03-01 12:30:45").unwrap();
        assert_eq!(Timestamp::new(t), at(2024, 3, 1, 12, 30, 45, 0));

        match Timestamp::parse("2024-03-01") {
            Err(DecodeError::InvalidTime { layout, .. }) => assert_eq!(layout, LAYOUT_MILLIS),
            other => panic!("Expected InvalidTime, got {:?}", other),
        }
    }

    #[test]
    fn test_scan() {
        let t = at(2020, 1, 2, 3, 4, 5, 6);
        let mut scanned = Timestamp::zero();
        scanned.scan(&Cell::Timestamp(t.to_time()));
        assert_eq!(scanned, t);

        scanned.scan(&Cell::Null);
        assert_eq!(scanned, t);

        scanned.scan(&Cell::Integer(1));
        assert_eq!(scanned, t);

        scanned.scan(&Cell::Text(String::new()));
        assert!(scanned.is_zero());
    }

    #[test]
    fn test_json() {
        let t = at(2024, 3, 1, 12, 30, 45, 120);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#""2024-03-01 12:30:45.12""#);
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), t);

        assert_eq!(serde_json::to_string(&Timestamp::zero()).unwrap(), r#""""#);
        assert!(serde_json::from_str::<Timestamp>(r#""""#).unwrap().is_zero());
        assert!(serde_json::from_str::<Timestamp>(r#""not a time""#).is_err());
    }

    #[test]
    fn test_now_is_set() {
        assert!(!Timestamp::now().is_zero());
    }
}

use chrono::NaiveDateTime;

use crate::error::{DecodeError, EncodeError};

/// A raw value as handed over by the relational driver.
///
/// Writes produce one of these from [`CellValue::to_cell`]; reads pass one back into
/// [`CellValue::scan`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bytes(Vec<u8>),
    Text(String),
    Integer(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
}

impl Cell {
    /// Short name of the representation, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Bytes(_) => "bytes",
            Cell::Text(_) => "text",
            Cell::Integer(_) => "integer",
            Cell::Float(_) => "float",
            Cell::Timestamp(_) => "timestamp",
        }
    }

    /// Borrows the cell as UTF-8 text if it is a textual representation.
    pub fn as_text(&self) -> Result<&str, DecodeError> {
        match self {
            Cell::Bytes(b) => Ok(std::str::from_utf8(b)?),
            Cell::Text(s) => Ok(s),
            other => Err(DecodeError::TypeMismatch {
                expected: "text or bytes",
                found: other.kind(),
            }),
        }
    }

    /// Borrows the cell as raw bytes if it is a textual representation.
    pub fn as_bytes(&self) -> Result<&[u8], DecodeError> {
        match self {
            Cell::Bytes(b) => Ok(b),
            Cell::Text(s) => Ok(s.as_bytes()),
            other => Err(DecodeError::TypeMismatch {
                expected: "text or bytes",
                found: other.kind(),
            }),
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Cell {
    fn from(b: Vec<u8>) -> Self {
        Cell::Bytes(b)
    }
}

/// Policy applied to malformed input while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Malformed tokens become zero values; decoding only fails on a cell of the
    /// wrong representation.
    #[default]
    BestEffort,
    /// Every malformed token is an error.
    Strict,
}

/// Stable name of a storable type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    name: String,
}

impl TypeName {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The two extension points a relational driver calls for every column type.
///
/// `to_cell` is the write path. `scan` is the read path and follows the best-effort
/// contract: it never reports failure and leaves the receiver untouched when the
/// payload cannot be decoded at all. `from_cell` exposes the same decoding with an
/// explicit result for callers that want to see failures.
pub trait CellValue: Sized {
    fn type_name() -> TypeName;

    /// Encodes the value into its storage representation.
    fn to_cell(&self) -> Result<Cell, EncodeError>;

    /// Decodes a value from its storage representation.
    fn from_cell(cell: &Cell, mode: DecodeMode) -> Result<Self, DecodeError>;

    /// Decodes `cell` into `self` in place, best effort.
    fn scan(&mut self, cell: &Cell) {
        match Self::from_cell(cell, DecodeMode::BestEffort) {
            Ok(value) => *self = value,
            Err(err) => discard(&Self::type_name(), &err),
        }
    }
}

/// Records a decode failure that the storage boundary swallows.
#[allow(unused_variables)]
pub(crate) fn discard(type_name: &TypeName, err: &DecodeError) {
    #[cfg(feature = "logging")]
    log::warn!("{}: keeping previous value, decode failed: {err}", type_name.name());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        let name = TypeName::new("flatcell::Array<i64>");
        assert_eq!(name.name(), "flatcell::Array<i64>");
        assert_eq!(name, TypeName::new("flatcell::Array<i64>"));
    }

    #[test]
    fn test_cell_as_text() {
        assert_eq!(Cell::Bytes(b"1,2".to_vec()).as_text().unwrap(), "1,2");
        assert_eq!(Cell::Text("a".to_string()).as_text().unwrap(), "a");
        assert!(matches!(
            Cell::Integer(5).as_text(),
            Err(DecodeError::TypeMismatch {
                found: "integer",
                ..
            })
        ));
        assert!(matches!(
            Cell::Bytes(vec![0xff, 0xfe]).as_text(),
            Err(DecodeError::Utf8(_))
        ));
    }

    #[test]
    fn test_default_mode_is_best_effort() {
        assert_eq!(DecodeMode::default(), DecodeMode::BestEffort);
    }
}

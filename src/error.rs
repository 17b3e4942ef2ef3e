use std::fmt;
use std::str::Utf8Error;

/// Errors that can occur when decoding a value from its storage representation.
///
/// The storage boundary ([`CellValue::scan`](crate::CellValue::scan)) never surfaces
/// these to the driver; they are returned from
/// [`CellValue::from_cell`](crate::CellValue::from_cell) so callers that care can see
/// exactly what went wrong.
#[derive(Debug)]
pub enum DecodeError {
    /// The raw cell is not of a representation this type can be read from.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The raw bytes are not valid UTF-8.
    Utf8(Utf8Error),
    /// A delimited token could not be parsed as the element type.
    InvalidToken { token: String, kind: &'static str },
    /// A `key:value` token has no key/value separator.
    MissingSeparator { token: String, separator: char },
    /// Text does not match any accepted time layout.
    InvalidTime { text: String, layout: &'static str },
    /// The JSON layer rejected the payload.
    Json(serde_json::Error),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} cell, found {found}")
            }
            DecodeError::Utf8(e) => write!(f, "invalid UTF-8 in cell: {e}"),
            DecodeError::InvalidToken { token, kind } => {
                write!(f, "cannot parse '{token}' as {kind}")
            }
            DecodeError::MissingSeparator { token, separator } => {
                write!(f, "token '{token}' has no '{separator}' separator")
            }
            DecodeError::InvalidTime { text, layout } => {
                write!(f, "'{text}' does not match time layout {layout}")
            }
            DecodeError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Utf8(e) => Some(e),
            DecodeError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Utf8Error> for DecodeError {
    fn from(err: Utf8Error) -> Self {
        DecodeError::Utf8(err)
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err)
    }
}

/// Errors that can occur when encoding a value for storage.
///
/// Delimited codecs never fail; only the JSON-backed types can produce one.
#[derive(Debug)]
pub enum EncodeError {
    /// The JSON layer refused to serialize the value.
    Json(serde_json::Error),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Json(err)
    }
}

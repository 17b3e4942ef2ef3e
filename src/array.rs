//! Delimited codecs for one-, two- and three-dimensional arrays.
//!
//! Each nesting level has its own fixed separator:
//!
//! ```text
//! Array<T>   [1, 2, 3]                  "1,2,3"
//! Array2<T>  [[1, 2], [3]]              "1,2;3"
//! Array3<T>  [[[1, 2], [3]], [[4]]]     "1,2;3|4"
//! ```
//!
//! The empty string decodes to an empty outer sequence at every arity. Rows are not
//! required to have equal lengths, and an empty segment at a row or plane level decodes
//! to an empty sub-sequence. Floats are written with four decimal places, so a
//! float array survives a round trip only to that precision.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::{DecodeError, EncodeError};
use crate::token::{ELEMENT_SEP, PLANE_SEP, ROW_SEP, Token, read_token, write_joined};
use crate::types::{Cell, CellValue, DecodeMode, TypeName};

pub type IntArray = Array<isize>;
pub type Int64Array = Array<i64>;
pub type StrArray = Array<String>;

pub type IntArray2 = Array2<isize>;
pub type Int64Array2 = Array2<i64>;
pub type FloatArray2 = Array2<f64>;
pub type StrArray2 = Array2<String>;

pub type IntArray3 = Array3<isize>;

macro_rules! vec_newtype {
    ($name:ident, $inner:ty) => {
        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self(Vec::new())
            }
        }

        impl<T> Deref for $name<T> {
            type Target = Vec<$inner>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<T> DerefMut for $name<T> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl<T> From<Vec<$inner>> for $name<T> {
            fn from(v: Vec<$inner>) -> Self {
                Self(v)
            }
        }

        impl<T> From<$name<T>> for Vec<$inner> {
            fn from(v: $name<T>) -> Self {
                v.0
            }
        }

        impl<T> FromIterator<$inner> for $name<T> {
            fn from_iter<I: IntoIterator<Item = $inner>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }
    };
}

/// A flat sequence stored as `a,b,c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Array<T>(pub Vec<T>);

/// A sequence of rows stored as `a,b;c,d`.
#[derive(Debug, Clone, PartialEq)]
pub struct Array2<T>(pub Vec<Vec<T>>);

/// A sequence of planes stored as `a,b;c|d,e;f`.
#[derive(Debug, Clone, PartialEq)]
pub struct Array3<T>(pub Vec<Vec<Vec<T>>>);

vec_newtype!(Array, T);
vec_newtype!(Array2, Vec<T>);
vec_newtype!(Array3, Vec<Vec<T>>);

fn write_elements<T: Token>(out: &mut String, elements: &[T]) {
    write_joined(out, elements, ELEMENT_SEP, |out, v| v.write_token(out));
}

fn write_rows<T: Token>(out: &mut String, rows: &[Vec<T>]) {
    write_joined(out, rows, ROW_SEP, |out, row| write_elements(out, row));
}

fn read_elements<T: Token>(raw: &str, mode: DecodeMode) -> Result<Vec<T>, DecodeError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(ELEMENT_SEP)
        .map(|token| read_token(token, mode))
        .collect()
}

fn read_rows<T: Token>(raw: &str, mode: DecodeMode) -> Result<Vec<Vec<T>>, DecodeError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(ROW_SEP)
        .map(|row| read_elements(row, mode))
        .collect()
}

fn read_planes<T: Token>(raw: &str, mode: DecodeMode) -> Result<Vec<Vec<Vec<T>>>, DecodeError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(PLANE_SEP)
        .map(|plane| read_rows(plane, mode))
        .collect()
}

impl<T: Token> Array<T> {
    /// Renders the storage text, `""` for an empty array.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        write_elements(&mut out, &self.0);
        out
    }

    pub fn decode(raw: &str, mode: DecodeMode) -> Result<Self, DecodeError> {
        read_elements(raw, mode).map(Self)
    }

    /// Renders the elements joined by an arbitrary separator.
    pub fn join(&self, sep: &str) -> String {
        let mut out = String::new();
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            v.write_token(&mut out);
        }
        out
    }
}

impl<T: Token> Array2<T> {
    pub fn encode(&self) -> String {
        let mut out = String::new();
        write_rows(&mut out, &self.0);
        out
    }

    pub fn decode(raw: &str, mode: DecodeMode) -> Result<Self, DecodeError> {
        read_rows(raw, mode).map(Self)
    }
}

impl<T: Token> Array3<T> {
    pub fn encode(&self) -> String {
        let mut out = String::new();
        write_joined(&mut out, &self.0, PLANE_SEP, |out, plane| {
            write_rows(out, plane)
        });
        out
    }

    pub fn decode(raw: &str, mode: DecodeMode) -> Result<Self, DecodeError> {
        read_planes(raw, mode).map(Self)
    }
}

macro_rules! delimited_cell_value {
    ($name:ident, $label:literal) => {
        impl<T: Token> CellValue for $name<T> {
            fn type_name() -> TypeName {
                TypeName::new(&format!(concat!("flatcell::", $label, "<{}>"), T::KIND))
            }

            fn to_cell(&self) -> Result<Cell, EncodeError> {
                Ok(Cell::Text(self.encode()))
            }

            fn from_cell(cell: &Cell, mode: DecodeMode) -> Result<Self, DecodeError> {
                Self::decode(cell.as_text()?, mode)
            }
        }

        impl<T: Token> fmt::Display for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.encode())
            }
        }
    };
}

delimited_cell_value!(Array, "Array");
delimited_cell_value!(Array2, "Array2");
delimited_cell_value!(Array3, "Array3");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_array_roundtrip() {
        let arr = IntArray::from(vec![1, -2, 300]);
        assert_eq!(arr.encode(), "1,-2,300");
        assert_eq!(IntArray::decode("1,-2,300", DecodeMode::Strict).unwrap(), arr);
    }

    #[test]
    fn test_empty_array_encodes_to_empty_string() {
        assert_eq!(IntArray::default().encode(), "");
        assert_eq!(IntArray2::default().encode(), "");
        assert_eq!(IntArray3::default().encode(), "");
    }

    #[test]
    fn test_empty_string_decodes_to_empty_array() {
        assert!(Int64Array::decode("", DecodeMode::Strict).unwrap().is_empty());
        assert!(StrArray::decode("", DecodeMode::Strict).unwrap().is_empty());
        assert!(FloatArray2::decode("", DecodeMode::Strict).unwrap().is_empty());
        assert!(IntArray3::decode("", DecodeMode::Strict).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_token_coerced_to_zero() {
        let arr = IntArray::decode("1,x,3", DecodeMode::BestEffort).unwrap();
        assert_eq!(arr.0, vec![1, 0, 3]);
    }

    #[test]
    fn test_malformed_token_strict() {
        let err = IntArray::decode("1,x,3", DecodeMode::Strict).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidToken { ref token, .. } if token == "x"));
    }

    #[test]
    fn test_join() {
        let arr = Int64Array::from(vec![7, 8, 9]);
        assert_eq!(arr.join("-"), "7-8-9");
        assert_eq!(arr.join(""), "789");
        assert_eq!(Int64Array::default().join("-"), "");
        assert_eq!(arr.to_string(), "7,8,9");
    }

    #[test]
    fn test_str_array() {
        let arr = StrArray::from(vec!["a".to_string(), "".to_string(), "c".to_string()]);
        assert_eq!(arr.encode(), "a,,c");
        assert_eq!(StrArray::decode("a,,c", DecodeMode::Strict).unwrap(), arr);
    }

    #[test]
    fn test_ragged_2d() {
        let arr = IntArray2::from(vec![vec![1, 2, 3], vec![4], vec![]]);
        assert_eq!(arr.encode(), "1,2,3;4;");
        assert_eq!(IntArray2::decode("1,2,3;4;", DecodeMode::Strict).unwrap(), arr);
    }

    #[test]
    fn test_float_2d_precision() {
        let arr = FloatArray2::from(vec![vec![1.0, 2.123456], vec![-0.5]]);
        assert_eq!(arr.encode(), "1.0000,2.1235;-0.5000");
        let decoded = FloatArray2::decode(&arr.encode(), DecodeMode::Strict).unwrap();
        assert_eq!(decoded.0, vec![vec![1.0, 2.1235], vec![-0.5]]);
    }

    #[test]
    fn test_3d_scenario() {
        let arr = IntArray3::from(vec![vec![vec![1, 2], vec![3]], vec![vec![4]]]);
        assert_eq!(arr.encode(), "1,2;3|4");
        assert_eq!(IntArray3::decode("1,2;3|4", DecodeMode::Strict).unwrap(), arr);
    }

    #[test]
    fn test_cell_value() {
        let arr = Int64Array2::from(vec![vec![1, 2], vec![3]]);
        assert_eq!(arr.to_cell().unwrap(), Cell::Text("1,2;3".to_string()));

        let mut scanned = Int64Array2::default();
        scanned.scan(&Cell::Bytes(b"1,2;3".to_vec()));
        assert_eq!(scanned, arr);

        assert_eq!(Int64Array2::type_name().name(), "flatcell::Array2<i64>");
    }

    #[test]
    fn test_scan_type_mismatch_keeps_value() {
        let mut arr = IntArray::from(vec![5, 6]);
        arr.scan(&Cell::Integer(9));
        assert_eq!(arr.0, vec![5, 6]);
    }
}

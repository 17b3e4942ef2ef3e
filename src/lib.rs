//! Flat column codecs for relational storage.
//!
//! This crate packs structured values into a single text or byte cell and reads them
//! back. A relational driver calls two extension points per column type, both on
//! [`CellValue`]: [`to_cell`](CellValue::to_cell) when writing and
//! [`scan`](CellValue::scan) when reading.
//!
//! # Column types
//!
//! - **Delimited arrays**: [`Array`], [`Array2`], [`Array3`] using `,` `;` `|`
//! - **Simple objects**: [`SimpleObject`] and [`ObjectList`] as `key:value` pairs
//! - **JSON documents**: [`Json`] and its aliases for irregular structures
//! - **Timestamps**: [`Timestamp`] with an unset sentinel and fixed text layouts
//! - **Sets**: [`Set`], a deduplicated collection stored as a JSON array
//!
//! # Decoding policy
//!
//! Reads are best effort. A malformed number becomes zero, and a cell of the wrong
//! representation leaves the destination untouched; `scan` never fails.
//! [`CellValue::from_cell`] runs the same decoding with an explicit result, and
//! [`DecodeMode::Strict`] turns every malformed token into an error.
//!
//! # Example
//!
//! ```rust
//! use flatcell::{Cell, CellValue, DecodeMode, IntArray3};
//!
//! let arr = IntArray3::from(vec![vec![vec![1, 2], vec![3]], vec![vec![4]]]);
//! assert_eq!(arr.to_cell().unwrap(), Cell::Text("1,2;3|4".to_string()));
//!
//! let mut read = IntArray3::default();
//! read.scan(&Cell::Bytes(b"1,2;3|4".to_vec()));
//! assert_eq!(read, arr);
//!
//! assert!(IntArray3::from_cell(&Cell::from("1,x"), DecodeMode::Strict).is_err());
//! ```
//!
//! Enable the `logging` feature to have coerced tokens and discarded reads reported
//! through the `log` facade.

pub mod array;
pub mod error;
pub mod json;
pub mod object;
pub mod set;
pub mod timestamp;
pub mod token;
pub mod types;

pub use array::{
    Array, Array2, Array3, FloatArray2, Int64Array, Int64Array2, IntArray, IntArray2, IntArray3,
    StrArray, StrArray2,
};
pub use error::{DecodeError, EncodeError};
pub use json::{IntIntMap, IntKeyedMap, Item, ItemList, Json, JsonMap, JsonObjectList};
pub use object::{ObjectList, Scalar, SimpleObject};
pub use set::Set;
pub use timestamp::{
    LAYOUT_COMPACT_DATE, LAYOUT_MILLIS, LAYOUT_SECONDS, TimeLayout, Timestamp,
};
pub use token::{ELEMENT_SEP, FLOAT_PRECISION, PAIR_SEP, PLANE_SEP, ROW_SEP, Token};
pub use types::{Cell, CellValue, DecodeMode, TypeName};

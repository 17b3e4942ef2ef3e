//! Text form of the individual elements packed by the delimited codecs.

use crate::error::DecodeError;
use crate::types::DecodeMode;

/// Separates elements of the innermost sequence, and `key:value` pairs.
pub const ELEMENT_SEP: char = ',';
/// Separates rows of a 2-D array, and the rows inside each plane of a 3-D array.
pub const ROW_SEP: char = ';';
/// Separates planes of a 3-D array.
pub const PLANE_SEP: char = '|';
/// Separates a key from its value in simple objects.
pub const PAIR_SEP: char = ':';
/// Digits after the decimal point when floats are packed into arrays.
pub const FLOAT_PRECISION: usize = 4;

/// An element that can be written into, and read back from, a delimited cell.
///
/// Tokens never contain the separators themselves; no escaping is performed.
pub trait Token: Default + Sized {
    /// Human readable element kind, used in error messages.
    const KIND: &'static str;

    fn write_token(&self, out: &mut String);

    fn parse_token(token: &str) -> Result<Self, DecodeError>;
}

impl Token for i32 {
    const KIND: &'static str = "i32";

    fn write_token(&self, out: &mut String) {
        out.push_str(&self.to_string());
    }

    fn parse_token(token: &str) -> Result<Self, DecodeError> {
        token.parse().map_err(|_| invalid::<Self>(token))
    }
}

// Pointer-width, the element type of the `int` array columns.
impl Token for isize {
    const KIND: &'static str = "isize";

    fn write_token(&self, out: &mut String) {
        out.push_str(&self.to_string());
    }

    fn parse_token(token: &str) -> Result<Self, DecodeError> {
        token.parse().map_err(|_| invalid::<Self>(token))
    }
}

impl Token for i64 {
    const KIND: &'static str = "i64";

    fn write_token(&self, out: &mut String) {
        out.push_str(&self.to_string());
    }

    fn parse_token(token: &str) -> Result<Self, DecodeError> {
        token.parse().map_err(|_| invalid::<Self>(token))
    }
}

impl Token for f64 {
    const KIND: &'static str = "f64";

    // Fixed precision: values needing more than FLOAT_PRECISION digits lose them.
    fn write_token(&self, out: &mut String) {
        out.push_str(&format!("{:.*}", FLOAT_PRECISION, self));
    }

    fn parse_token(token: &str) -> Result<Self, DecodeError> {
        token.parse().map_err(|_| invalid::<Self>(token))
    }
}

impl Token for String {
    const KIND: &'static str = "string";

    fn write_token(&self, out: &mut String) {
        out.push_str(self);
    }

    fn parse_token(token: &str) -> Result<Self, DecodeError> {
        Ok(token.to_string())
    }
}

fn invalid<T: Token>(token: &str) -> DecodeError {
    DecodeError::InvalidToken {
        token: token.to_string(),
        kind: T::KIND,
    }
}

/// Parses one token under `mode`, substituting the zero value in best-effort mode.
pub(crate) fn read_token<T: Token>(token: &str, mode: DecodeMode) -> Result<T, DecodeError> {
    match T::parse_token(token) {
        Ok(value) => Ok(value),
        Err(err) => match mode {
            DecodeMode::Strict => Err(err),
            DecodeMode::BestEffort => {
                #[cfg(feature = "logging")]
                log::debug!("coercing to zero: {err}");
                Ok(T::default())
            }
        },
    }
}

/// Writes `items` separated by `sep`, rendering each one with `write`.
pub(crate) fn write_joined<I, F>(out: &mut String, items: I, sep: char, mut write: F)
where
    I: IntoIterator,
    F: FnMut(&mut String, I::Item),
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        write(out, item);
    }
}

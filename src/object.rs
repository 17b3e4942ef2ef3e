//! Shorthand `key:value` encoding for flat objects.
//!
//! ```text
//! {"a": true, "b": 1, "c": 1.5, "d": "x"}   <->   "c:1.5,d:x"        (encode)
//! "a:true,b:1,c:1.5,d:x"                    ->    {a: true, b: 1, c: 1.5, d: "x"}
//! ```
//!
//! Encoding is lossy: only string and float values are written, every other kind is
//! silently dropped. Floats use the shortest exact decimal form, with infinities
//! spelled `+Inf` and `-Inf`. Decoding infers the kind of each value from its text.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use crate::error::{DecodeError, EncodeError};
use crate::token::{ELEMENT_SEP, PAIR_SEP};
use crate::types::{Cell, CellValue, DecodeMode, TypeName};

/// A single value of a simple object.
///
/// The kinds are mutually exclusive; which one a decoded value gets is fixed by
/// [`Scalar::infer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Classifies value text, in this order: `null` or empty, `true`, `false`,
    /// base-10 `i64`, `f64`, and finally the raw text as a string.
    pub fn infer(text: &str) -> Self {
        match text {
            "" | "null" => Scalar::Null,
            "true" => Scalar::Boolean(true),
            "false" => Scalar::Boolean(false),
            _ => {
                if let Ok(i) = text.parse::<i64>() {
                    Scalar::Integer(i)
                } else if let Ok(f) = text.parse::<f64>() {
                    Scalar::Float(f)
                } else {
                    Scalar::String(text.to_string())
                }
            }
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Boolean(_) => "Boolean",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text written to storage, or `None` for kinds the encoding drops.
    fn storage_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Float(f) if f.is_infinite() => {
                Some(if *f > 0.0 { "+Inf" } else { "-Inf" }.to_string())
            }
            Self::Float(f) => Some(f.to_string()),
            Self::Null | Self::Boolean(_) | Self::Integer(_) => None,
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Boolean(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Integer(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Scalar::Null, Into::into)
    }
}

/// Splits a `key:value` token on its first separator.
fn split_pair(token: &str, mode: DecodeMode) -> Result<(&str, &str), DecodeError> {
    match token.split_once(PAIR_SEP) {
        Some(pair) => Ok(pair),
        None => match mode {
            DecodeMode::Strict => Err(DecodeError::MissingSeparator {
                token: token.to_string(),
                separator: PAIR_SEP,
            }),
            DecodeMode::BestEffort => {
                #[cfg(feature = "logging")]
                log::debug!("token '{token}' has no '{PAIR_SEP}', reading it as a null key");
                Ok((token, ""))
            }
        },
    }
}

fn write_pairs<'a, I>(out: &mut String, pairs: I)
where
    I: IntoIterator<Item = (&'a String, &'a Scalar)>,
{
    for (key, value) in pairs {
        let Some(text) = value.storage_text() else {
            continue;
        };
        if !out.is_empty() {
            out.push(ELEMENT_SEP);
        }
        out.push_str(key);
        out.push(PAIR_SEP);
        out.push_str(&text);
    }
}

/// A flat map from key to [`Scalar`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleObject(pub BTreeMap<String, Scalar>);

impl SimpleObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `key:value` pairs for string and float values, in key order.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        write_pairs(&mut out, &self.0);
        out
    }

    pub fn decode(raw: &str, mode: DecodeMode) -> Result<Self, DecodeError> {
        let mut map = BTreeMap::new();
        if raw.is_empty() {
            return Ok(Self(map));
        }
        for token in raw.split(ELEMENT_SEP) {
            let (key, value) = split_pair(token, mode)?;
            map.insert(key.to_string(), Scalar::infer(value));
        }
        Ok(Self(map))
    }
}

impl Deref for SimpleObject {
    type Target = BTreeMap<String, Scalar>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SimpleObject {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for SimpleObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl CellValue for SimpleObject {
    fn type_name() -> TypeName {
        TypeName::new("flatcell::SimpleObject")
    }

    fn to_cell(&self) -> Result<Cell, EncodeError> {
        Ok(Cell::Text(self.encode()))
    }

    fn from_cell(cell: &Cell, mode: DecodeMode) -> Result<Self, DecodeError> {
        Self::decode(cell.as_text()?, mode)
    }
}

/// A sequence of simple objects.
///
/// Encoding concatenates the pairs of every object into one string, so object
/// boundaries are lost. Decoding produces one single-key object per pair, holding the
/// value text as a string, `""` included. The two are not inverses; stored data
/// depends on this layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectList(pub Vec<SimpleObject>);

impl ObjectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(&self) -> String {
        let mut out = String::new();
        for object in &self.0 {
            write_pairs(&mut out, &object.0);
        }
        out
    }

    pub fn decode(raw: &str, mode: DecodeMode) -> Result<Self, DecodeError> {
        if raw.is_empty() {
            return Ok(Self(Vec::new()));
        }
        raw.split(ELEMENT_SEP)
            .map(|token| {
                let (key, value) = split_pair(token, mode)?;
                let value = Scalar::String(value.to_string());
                Ok(SimpleObject(BTreeMap::from([(key.to_string(), value)])))
            })
            .collect::<Result<Vec<_>, DecodeError>>()
            .map(Self)
    }
}

impl Deref for ObjectList {
    type Target = Vec<SimpleObject>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ObjectList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<SimpleObject>> for ObjectList {
    fn from(v: Vec<SimpleObject>) -> Self {
        Self(v)
    }
}

impl CellValue for ObjectList {
    fn type_name() -> TypeName {
        TypeName::new("flatcell::ObjectList")
    }

    fn to_cell(&self) -> Result<Cell, EncodeError> {
        Ok(Cell::Text(self.encode()))
    }

    fn from_cell(cell: &Cell, mode: DecodeMode) -> Result<Self, DecodeError> {
        Self::decode(cell.as_text()?, mode)
    }
}

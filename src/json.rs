//! Values stored as a full JSON document.
//!
//! Used where the structure is too irregular for the delimited codecs. Any
//! `Serialize + DeserializeOwned` type can be wrapped in [`Json`]; the aliases cover
//! the shapes that are stored this way in practice.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::types::{Cell, CellValue, DecodeMode, TypeName};

/// String-keyed JSON object.
pub type JsonMap = Json<serde_json::Map<String, serde_json::Value>>;
/// Integer-keyed map of arbitrary JSON values.
pub type IntKeyedMap = Json<BTreeMap<i64, serde_json::Value>>;
/// Integer-keyed map of integers.
pub type IntIntMap = Json<BTreeMap<i64, i64>>;
/// Sequence of string-keyed JSON objects.
pub type JsonObjectList = Json<Vec<serde_json::Map<String, serde_json::Value>>>;
/// Sequence of `{id, count}` records.
pub type ItemList = Json<Vec<Item>>;

/// An `{id, count}` pair, stored with the short keys `i` and `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "i")]
    pub id: i64,
    #[serde(rename = "n")]
    pub count: i64,
}

impl Item {
    pub fn new(id: i64, count: i64) -> Self {
        Self { id, count }
    }
}

/// A value encoded as a JSON document in a single cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Json<T>(pub T);

impl<T: Serialize> Json<T> {
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(&self.0)?)
    }
}

impl<T: DeserializeOwned> Json<T> {
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self(serde_json::from_slice(raw)?))
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<T> for Json<T> {
    fn from(v: T) -> Self {
        Self(v)
    }
}

impl<T: Serialize + DeserializeOwned> CellValue for Json<T> {
    fn type_name() -> TypeName {
        TypeName::new(&format!("flatcell::Json<{}>", std::any::type_name::<T>()))
    }

    fn to_cell(&self) -> Result<Cell, EncodeError> {
        Ok(Cell::Bytes(self.encode()?))
    }

    // JSON has no partial results; the mode makes no difference here.
    fn from_cell(cell: &Cell, _mode: DecodeMode) -> Result<Self, DecodeError> {
        Self::decode(cell.as_bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_map_roundtrip() {
        let value = json!({"a": 1, "b": [true, null], "c": {"d": "e"}});
        let map = JsonMap::from(value.as_object().unwrap().clone());
        let cell = map.to_cell().unwrap();

        let mut decoded = JsonMap::default();
        decoded.scan(&cell);
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_item_list_short_keys() {
        let items = ItemList::from(vec![Item::new(1, 10), Item::new(2, 20)]);
        let encoded = items.encode().unwrap();
        assert_eq!(encoded, br#"[{"i":1,"n":10},{"i":2,"n":20}]"#);
        assert_eq!(ItemList::decode(&encoded).unwrap(), items);
    }

    #[test]
    fn test_int_keyed_maps() {
        let decoded = IntIntMap::decode(br#"{"1":2,"30":40}"#).unwrap();
        assert_eq!(decoded.get(&1), Some(&2));
        assert_eq!(decoded.get(&30), Some(&40));

        let decoded = IntKeyedMap::decode(br#"{"7":"x","8":[1]}"#).unwrap();
        assert_eq!(decoded[&7], json!("x"));
        assert_eq!(decoded[&8], json!([1]));
    }

    #[test]
    fn test_malformed_input_keeps_value() {
        let mut list = JsonObjectList::from(vec![serde_json::Map::new()]);
        list.scan(&Cell::Bytes(b"[{".to_vec()));
        assert_eq!(list.len(), 1);

        assert!(matches!(
            JsonObjectList::from_cell(&Cell::Bytes(b"nope".to_vec()), DecodeMode::Strict),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn test_type_mismatch() {
        assert!(matches!(
            ItemList::from_cell(&Cell::Integer(1), DecodeMode::BestEffort),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }
}

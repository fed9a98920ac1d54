pub mod crypto;
pub mod db;
pub mod favorite;
pub mod memory;
pub mod object_storage;
pub mod recipe;
pub mod user;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Elements of a JSON array that deserialize as `T`. Anything else in the
/// column (null, an object, malformed entries) is dropped.
pub(crate) fn json_list<T: DeserializeOwned>(value: &Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

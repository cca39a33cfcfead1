//! Session state store: a generic key/value facility shared with the front end.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Last-write-wins key/value store holding JSON values.
///
/// No atomicity across keys is assumed.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
}

/// In-process state store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStateStore {
    items: HashMap<String, Value>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.items.insert(key.to_string(), value);
    }
}

/// Read and decode `key`. A missing, null or malformed value yields `None`;
/// malformed values are logged.
pub fn get_item<T: DeserializeOwned>(state: &dyn StateStore, key: &str) -> Option<T> {
    let value = state.get(key)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(item) => Some(item),
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring malformed state value");
            None
        }
    }
}

/// Encode and write `item` under `key`. Encoding failures are logged and
/// leave the previous value in place.
pub fn set_item<T: Serialize>(state: &mut dyn StateStore, key: &str, item: &T) {
    match serde_json::to_value(item) {
        Ok(value) => state.set(key, value),
        Err(err) => tracing::warn!(key, error = %err, "failed to encode state value"),
    }
}

//! Configuration merging logic
//!
//! Layers are partial JSON documents. A key present in a later layer
//! replaces the earlier value, whatever that value is; absent keys and
//! nulls leave it alone.

use serde_json::{Map, Value};

/// Deep-merge `overlay` into `base`
pub fn merge_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_values(existing, value),
                    None if !value.is_null() => {
                        base_map.insert(key.clone(), value.clone());
                    }
                    None => {}
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

/// `{"a": {"b": value}}` for the key `a.b`
pub fn nest(key: &str, value: Value) -> Value {
    key.rsplit('.').fold(value, |inner, segment| {
        let mut map = Map::new();
        map.insert(segment.to_string(), inner);
        Value::Object(map)
    })
}

/// Value at a dotted key, if present and not null
pub fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(value, |node, segment| node.get(segment))
        .filter(|found| !found.is_null())
}

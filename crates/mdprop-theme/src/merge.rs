//! Recursive YAML value merging.

use serde_yaml::Value;

/// Merge `overlay` onto `base`.
///
/// Mappings merge key-by-key recursively; any other value kind from the
/// overlay (including sequences) replaces the base value wholesale.
pub(crate) fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Mapping(base_map)
        }
        (_, overlay) => overlay,
    }
}

//! Shallow JSON-object merge — the patch semantics shared by the in-memory
//! reducer and the document backends.

use serde_json::Value;

/// Merge `patch` into `target` one level deep: every top-level key in
/// `patch` overwrites the corresponding key in `target`, untouched keys
/// keep their value. Non-object inputs replace `target` wholesale.
pub fn shallow_merge(target: &mut Value, patch: &Value) {
  match (target, patch) {
    (Value::Object(target), Value::Object(patch)) => {
      for (key, value) in patch {
        target.insert(key.clone(), value.clone());
      }
    }
    (target, patch) => *target = patch.clone(),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::shallow_merge;

  #[test]
  fn patch_fields_win_and_others_survive() {
    let mut target = json!({"a": 1, "b": "old", "c": [1, 2]});
    shallow_merge(&mut target, &json!({"b": "new", "d": true}));
    assert_eq!(target, json!({"a": 1, "b": "new", "c": [1, 2], "d": true}));
  }

  #[test]
  fn nested_objects_are_replaced_not_merged() {
    let mut target = json!({"nested": {"x": 1, "y": 2}});
    shallow_merge(&mut target, &json!({"nested": {"x": 9}}));
    assert_eq!(target, json!({"nested": {"x": 9}}));
  }

  #[test]
  fn non_object_patch_replaces_wholesale() {
    let mut target = json!({"a": 1});
    shallow_merge(&mut target, &json!(42));
    assert_eq!(target, json!(42));
  }
}

use serde_json::Value;
use xxhash_rust::xxh3::Xxh3;

use crate::build_env::JSONObject;

/// Hashes the parts of a build environment that should invalidate previously written bundle
/// entries when they change.
///
/// The hash is stable across runs, machines and platforms. Context keys are hashed in sorted order
/// so that insertion order does not matter, while plugin tags are hashed in registration order.
pub fn fingerprint<'a>(
  context: &JSONObject,
  plugin_tags: impl IntoIterator<Item = &'a String>,
) -> String {
  let mut hasher = Xxh3::new();

  let mut entries: Vec<(&String, &Value)> = context.iter().collect();
  entries.sort_by(|(a, _), (b, _)| a.cmp(b));

  for (key, value) in entries {
    hasher.update(key.as_bytes());
    hasher.update(&[0]);
    hasher.update(value.to_string().as_bytes());
    hasher.update(&[0]);
  }

  hasher.update(&[0xff]);

  for tag in plugin_tags {
    hasher.update(tag.as_bytes());
    hasher.update(&[0]);
  }

  format!("{:016x}", hasher.digest())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn context(entries: &[(&str, Value)]) -> JSONObject {
    let mut context = JSONObject::new();
    for (key, value) in entries {
      context.insert(String::from(*key), value.clone());
    }

    context
  }

  fn tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| String::from(*tag)).collect()
  }

  #[test]
  fn is_a_sixteen_digit_hex_string() {
    let hash = fingerprint(&JSONObject::new(), &tags(&[]));

    assert_eq!(hash.len(), 16);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
  }

  #[test]
  fn ignores_context_insertion_order() {
    let a = context(&[("env", json!("dev")), ("sourceMaps", json!(true))]);
    let b = context(&[("sourceMaps", json!(true)), ("env", json!("dev"))]);

    assert_eq!(
      fingerprint(&a, &tags(&["foo@1.0.0"])),
      fingerprint(&b, &tags(&["foo@1.0.0"]))
    );
  }

  #[test]
  fn changes_with_context_values() {
    let tags = tags(&["foo@1.0.0"]);

    assert_ne!(
      fingerprint(&context(&[("env", json!("dev"))]), &tags),
      fingerprint(&context(&[("env", json!("prod"))]), &tags)
    );
  }

  #[test]
  fn changes_with_plugins() {
    let context = context(&[("env", json!("dev"))]);

    assert_ne!(
      fingerprint(&context, &tags(&["foo@1.0.0"])),
      fingerprint(&context, &tags(&["foo@1.0.1"]))
    );
    assert_ne!(
      fingerprint(&context, &tags(&["foo@1.0.0"])),
      fingerprint(&context, &tags(&["foo@1.0.0", "bar@1.0.0"]))
    );
  }

  #[test]
  fn keeps_context_and_plugins_apart() {
    assert_ne!(
      fingerprint(&context(&[("foo@1.0.0", json!(null))]), &tags(&[])),
      fingerprint(&JSONObject::new(), &tags(&["foo@1.0.0", "null"]))
    );
  }
}

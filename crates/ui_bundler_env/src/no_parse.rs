use std::path::Path;

use regex::Regex;
use serde_json::Value;

use crate::build_env_error::BuildEnvError;

/// A rule identifying files the bundler should not parse, as supplied by a plugin
#[derive(Clone, Debug)]
pub enum NoParseRule {
  /// An absolute path prefix or a path fragment, matched literally
  Path(String),
  /// A compiled pattern, used as-is
  Pattern(Regex),
  /// Loosely typed plugin data; only string values are valid rules
  Value(Value),
}

impl From<&str> for NoParseRule {
  fn from(rule: &str) -> Self {
    NoParseRule::Path(rule.to_owned())
  }
}

impl From<String> for NoParseRule {
  fn from(rule: String) -> Self {
    NoParseRule::Path(rule)
  }
}

impl From<Regex> for NoParseRule {
  fn from(rule: Regex) -> Self {
    NoParseRule::Pattern(rule)
  }
}

impl From<Value> for NoParseRule {
  fn from(rule: Value) -> Self {
    match rule {
      Value::String(path) => NoParseRule::Path(path),
      value => NoParseRule::Value(value),
    }
  }
}

/// Converts a no-parse rule into the pattern the bundler matches module paths against
///
/// Path rules are escaped so they only ever match their literal characters. Absolute paths are
/// anchored to the start of the module path, while relative fragments match anywhere, e.g. within
/// a `node_modules` directory.
///
/// # Examples
///
/// ```
/// use ui_bundler_env::no_parse_regex;
///
/// let pattern = no_parse_regex("moment".into()).unwrap();
/// assert!(pattern.is_match("foo/node_modules/moment/index.js"));
///
/// let pattern = no_parse_regex("/abs/path".into()).unwrap();
/// assert!(pattern.is_match("/abs/path/file.js"));
/// assert!(!pattern.is_match("/other/abs/path"));
/// ```
pub fn no_parse_regex(rule: NoParseRule) -> Result<Regex, BuildEnvError> {
  match rule {
    NoParseRule::Pattern(pattern) => Ok(pattern),
    NoParseRule::Path(path) => literal_path_regex(&path),
    NoParseRule::Value(Value::String(path)) => literal_path_regex(&path),
    NoParseRule::Value(value) => Err(BuildEnvError::InvalidRuleKind {
      found: value_kind(&value).to_owned(),
    }),
  }
}

fn literal_path_regex(path: &str) -> Result<Regex, BuildEnvError> {
  let anchor = if Path::new(path).is_absolute() { "^" } else { "" };

  Ok(Regex::new(&format!("{}{}", anchor, regex::escape(path)))?)
}

fn value_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  mod relative_paths {
    use super::*;

    #[test]
    fn matches_the_fragment_anywhere() {
      let pattern = no_parse_regex("moment".into()).unwrap();

      assert!(pattern.is_match("foo/node_modules/moment/index.js"));
      assert!(pattern.is_match("moment"));
      assert_eq!(pattern.as_str(), "moment");
    }

    #[test]
    fn escapes_pattern_syntax() {
      let pattern = no_parse_regex("lodash.debounce".into()).unwrap();

      assert_eq!(pattern.as_str(), r"lodash\.debounce");
      assert!(pattern.is_match("node_modules/lodash.debounce/index.js"));
      assert!(!pattern.is_match("node_modules/lodash_debounce/index.js"));
    }

    #[test]
    fn treats_json_strings_as_paths() {
      let pattern = no_parse_regex(json!("d3").into()).unwrap();

      assert!(pattern.is_match("node_modules/d3/build/d3.js"));
    }

    #[test]
    fn escapes_json_strings_that_were_not_converted() {
      let pattern = no_parse_regex(NoParseRule::Value(json!("a+b"))).unwrap();

      assert_eq!(pattern.as_str(), r"a\+b");
    }
  }

  mod absolute_paths {
    use super::*;

    #[test]
    fn anchors_to_the_start_of_the_path() {
      let pattern = no_parse_regex("/abs/path".into()).unwrap();

      assert_eq!(pattern.as_str(), "^/abs/path");
      assert!(pattern.is_match("/abs/path/file.js"));
      assert!(!pattern.is_match("/other/abs/path"));
    }

    #[test]
    fn escapes_pattern_syntax() {
      let pattern = no_parse_regex(String::from("/src/(vendor)/*.js").into()).unwrap();

      assert!(pattern.is_match("/src/(vendor)/*.js"));
      assert!(!pattern.is_match("/src/vendor/a.js"));
    }
  }

  mod patterns {
    use super::*;

    #[test]
    fn returns_compiled_patterns_unchanged() {
      let input = Regex::new(r"node_modules[\/\\](mocha|moment)[\/\\]").unwrap();
      let pattern = no_parse_regex(input.clone().into()).unwrap();

      assert_eq!(pattern.as_str(), input.as_str());
      assert!(pattern.is_match("app/node_modules/mocha/mocha.js"));
      assert!(!pattern.is_match("app/node_modules/chai/chai.js"));
    }
  }

  mod invalid_rules {
    use super::*;

    #[test]
    fn rejects_numbers() {
      let error = no_parse_regex(json!(42).into()).unwrap_err();

      assert!(matches!(
        error,
        BuildEnvError::InvalidRuleKind { ref found } if found == "number"
      ));
      assert_eq!(
        error.to_string(),
        "Expected noParse rule to be a string or regexp, got number"
      );
    }

    #[test]
    fn rejects_other_json_values() {
      for value in [json!(null), json!(true), json!(["a"]), json!({ "a": "b" })] {
        assert!(matches!(
          no_parse_regex(value.into()),
          Err(BuildEnvError::InvalidRuleKind { .. })
        ));
      }
    }
  }
}

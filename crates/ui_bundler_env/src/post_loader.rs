use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// A loader the bundler applies to modules after all other processing
///
/// The environment never inspects these; they are handed to the bundler config in registration
/// order.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLoader {
  /// Module specifier or path of the loader
  pub loader: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<Value>,
}

impl PostLoader {
  pub fn new(loader: impl Into<String>) -> Self {
    PostLoader {
      loader: loader.into(),
      options: None,
    }
  }

  pub fn with_options(mut self, options: Value) -> Self {
    self.options = Some(options);
    self
  }
}

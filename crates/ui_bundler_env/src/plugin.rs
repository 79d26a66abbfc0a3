use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// A plugin contributing to the build environment
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
  pub id: String,
  pub version: String,
  /// Directory of static assets, exposed to bundles under the `plugins/<id>` alias
  pub public_dir: Option<PathBuf>,
}

impl Plugin {
  pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
    Plugin {
      id: id.into(),
      version: version.into(),
      public_dir: None,
    }
  }

  pub fn with_public_dir(mut self, public_dir: impl Into<PathBuf>) -> Self {
    self.public_dir = Some(public_dir.into());
    self
  }

  /// The `<id>@<version>` tag a plugin is deduplicated by
  pub fn tag(&self) -> String {
    format!("{}@{}", self.id, self.version)
  }

  pub(crate) fn alias(&self) -> String {
    format!("plugins/{}", self.id)
  }
}

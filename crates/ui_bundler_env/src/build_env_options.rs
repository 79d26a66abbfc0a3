use std::path::PathBuf;

use serde::Deserialize;

use crate::build_env::JSONObject;

/// The options a build environment is created from
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildEnvOptions {
  /// Where bundle entry files and compiled output are written
  pub working_dir: PathBuf,
  /// Root of the core installation. When set, the core aliases and noParse rules are registered
  /// before any plugin.
  pub core_root: Option<PathBuf>,
  #[serde(default)]
  pub context: JSONObject,
}

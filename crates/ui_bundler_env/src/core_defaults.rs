use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;
use regex::Regex;

use crate::build_env_error::BuildEnvError;

/// Dependencies that ship prebuilt bundles and are too costly to parse
const CORE_NO_PARSE: [&str; 2] = [
  r"node_modules[\/\\](angular|elasticsearch-browser)[\/\\]",
  r"node_modules[\/\\](mocha|moment)[\/\\]",
];

/// Aliases the core exposes to every bundle, resolved against the core root
pub fn core_aliases(core_root: &Path) -> IndexMap<String, PathBuf> {
  let from_root = |path: &str| core_root.join(path);

  IndexMap::from([
    (String::from("ui"), from_root("src/ui/public")),
    (String::from("ui_framework"), from_root("ui_framework")),
    (String::from("packages"), from_root("packages")),
    (
      String::from("test_harness"),
      from_root("src/test_harness/public"),
    ),
    (
      String::from("querystring"),
      PathBuf::from("querystring-browser"),
    ),
    (String::from("moment$"), from_root("webpackShims/moment")),
    (
      String::from("moment-timezone$"),
      from_root("webpackShims/moment-timezone"),
    ),
  ])
}

pub fn core_no_parse() -> Result<Vec<Regex>, BuildEnvError> {
  CORE_NO_PARSE
    .iter()
    .map(|pattern| Regex::new(pattern).map_err(BuildEnvError::from))
    .collect()
}

use std::path::PathBuf;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::build_env::BuildEnv;
use crate::build_env_error::BuildEnvError;
use crate::no_parse::no_parse_regex;
use crate::no_parse::NoParseRule;
use crate::plugin::Plugin;

/// Registers a single export of a plugin into the build environment
pub type Registrar = fn(&mut BuildEnv, &Plugin, ExportSpec) -> Result<(), BuildEnvError>;

/// The export types a build environment accepts from plugins
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportType {
  /// Modules the bundler should not parse
  NoParse,
  /// Aliases available to every bundle
  GlobalAlias,
}

impl ExportType {
  pub fn from_tag(tag: &str) -> Option<Self> {
    match tag {
      "noParse" => Some(ExportType::NoParse),
      "globalAlias" | "__globalImportAliases__" => Some(ExportType::GlobalAlias),
      _ => None,
    }
  }

  pub fn registrar(self) -> Registrar {
    match self {
      ExportType::NoParse => register_no_parse,
      ExportType::GlobalAlias => register_global_aliases,
    }
  }
}

/// The value a plugin exports for a given export type
#[derive(Clone, Debug, Default)]
pub enum ExportSpec {
  #[default]
  None,
  Rule(NoParseRule),
  Rules(Vec<NoParseRule>),
  Aliases(IndexMap<String, PathBuf>),
  /// Loosely typed data, as read from a plugin manifest
  Json(Value),
}

impl From<&str> for ExportSpec {
  fn from(rule: &str) -> Self {
    ExportSpec::Rule(rule.into())
  }
}

impl From<Regex> for ExportSpec {
  fn from(rule: Regex) -> Self {
    ExportSpec::Rule(rule.into())
  }
}

impl From<Vec<NoParseRule>> for ExportSpec {
  fn from(rules: Vec<NoParseRule>) -> Self {
    ExportSpec::Rules(rules)
  }
}

impl From<IndexMap<String, PathBuf>> for ExportSpec {
  fn from(aliases: IndexMap<String, PathBuf>) -> Self {
    ExportSpec::Aliases(aliases)
  }
}

impl From<Value> for ExportSpec {
  fn from(value: Value) -> Self {
    ExportSpec::Json(value)
  }
}

impl ExportSpec {
  /// A missing or falsy spec holds no rules, a list holds one rule per item, anything else is a
  /// single rule
  fn into_rules(self) -> Result<Vec<NoParseRule>, BuildEnvError> {
    match self {
      ExportSpec::None => Ok(Vec::new()),
      ExportSpec::Rule(NoParseRule::Path(path)) if path.is_empty() => Ok(Vec::new()),
      ExportSpec::Rule(NoParseRule::Value(value)) => ExportSpec::Json(value).into_rules(),
      ExportSpec::Rule(rule) => Ok(vec![rule]),
      ExportSpec::Rules(rules) => Ok(rules),
      ExportSpec::Aliases(_) => Err(BuildEnvError::InvalidRuleKind {
        found: String::from("object"),
      }),
      ExportSpec::Json(value) if is_falsy(&value) => Ok(Vec::new()),
      ExportSpec::Json(Value::Array(values)) => {
        Ok(values.into_iter().map(NoParseRule::from).collect())
      }
      ExportSpec::Json(value) => Ok(vec![NoParseRule::from(value)]),
    }
  }
}

fn is_falsy(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::Bool(value) => !value,
    Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
    Value::String(value) => value.is_empty(),
    Value::Array(_) | Value::Object(_) => false,
  }
}

/// Rules are registered in order until the first invalid one, which fails the registration and
/// leaves the rules before it in place
fn register_no_parse(
  env: &mut BuildEnv,
  plugin: &Plugin,
  spec: ExportSpec,
) -> Result<(), BuildEnvError> {
  for rule in spec.into_rules()? {
    let pattern = no_parse_regex(rule)?;
    tracing::debug!(plugin = %plugin.id, pattern = pattern.as_str(), "Registered noParse rule");
    env.no_parse.push(pattern);
  }

  Ok(())
}

fn register_global_aliases(
  env: &mut BuildEnv,
  plugin: &Plugin,
  spec: ExportSpec,
) -> Result<(), BuildEnvError> {
  match spec {
    ExportSpec::Aliases(aliases) => {
      for (alias, target) in aliases {
        env.set_alias(alias, target);
      }
    }
    ExportSpec::Json(Value::Object(aliases)) => {
      for (alias, target) in aliases {
        match target {
          Value::String(target) => env.set_alias(alias, PathBuf::from(target)),
          target => tracing::warn!(
            plugin = %plugin.id,
            %alias,
            %target,
            "Ignoring global alias that does not map to a path"
          ),
        }
      }
    }
    _ => tracing::debug!(plugin = %plugin.id, "Ignoring global aliases that are not a map"),
  }

  Ok(())
}

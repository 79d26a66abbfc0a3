use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use indexmap::IndexMap;
use indexmap::IndexSet;
use regex::Regex;
use serde_json::Value;

use crate::build_env_error::BuildEnvError;
use crate::build_env_options::BuildEnvOptions;
use crate::core_defaults::core_aliases;
use crate::core_defaults::core_no_parse;
use crate::fingerprint::fingerprint;
use crate::plugin::Plugin;
use crate::post_loader::PostLoader;
use crate::registrar::ExportSpec;
use crate::registrar::ExportType;

pub type JSONObject = serde_json::Map<String, Value>;

/// Configuration accumulated from plugins while setting up a single build
///
/// Plugins register into the environment in the order the setup phase visits them. Once setup is
/// complete the environment is read by the bundler config builder.
#[derive(Debug)]
pub struct BuildEnv {
  /// Where bundle entry files and compiled output are written
  pub(crate) working_dir: PathBuf,
  /// Values that invalidate previously written bundle entries when they change
  pub(crate) context: JSONObject,
  /// `<id>@<version>` of every plugin that was registered, in registration order
  pub(crate) plugin_tags: IndexSet<String>,
  /// Module specifier prefixes mapped to the directory or module they resolve to
  pub(crate) aliases: IndexMap<String, PathBuf>,
  /// Which plugin introduced which alias. Nothing records ownership yet, so this stays empty.
  pub(crate) alias_owners: IndexMap<String, String>,
  /// Patterns for modules the bundler should include without parsing
  pub(crate) no_parse: Vec<Regex>,
  /// Loaders applied after all other module processing
  pub(crate) post_loaders: Vec<PostLoader>,
}

impl BuildEnv {
  pub fn new(working_dir: impl Into<PathBuf>) -> Self {
    BuildEnv {
      working_dir: working_dir.into(),
      context: JSONObject::new(),
      plugin_tags: IndexSet::new(),
      aliases: IndexMap::new(),
      alias_owners: IndexMap::new(),
      no_parse: Vec::new(),
      post_loaders: Vec::new(),
    }
  }

  /// Creates an environment with the aliases and noParse rules the core provides to every build
  pub fn with_core_defaults(
    working_dir: impl Into<PathBuf>,
    core_root: &Path,
  ) -> Result<Self, BuildEnvError> {
    let mut env = BuildEnv::new(working_dir);

    env.aliases = core_aliases(core_root);
    env.no_parse = core_no_parse()?;

    Ok(env)
  }

  pub fn from_options(options: BuildEnvOptions) -> Result<Self, BuildEnvError> {
    let mut env = match &options.core_root {
      Some(core_root) => BuildEnv::with_core_defaults(options.working_dir, core_root)?,
      None => BuildEnv::new(options.working_dir),
    };

    env.context = options.context;

    Ok(env)
  }

  /// Records a plugin and exposes its public directory under `plugins/<id>`
  ///
  /// Registering the same `<id>@<version>` again does nothing.
  pub fn register_plugin(&mut self, plugin: &Plugin) {
    let tag = plugin.tag();
    if self.plugin_tags.contains(&tag) {
      tracing::trace!(%tag, "Plugin is already registered");
      return;
    }

    if let Some(public_dir) = &plugin.public_dir {
      self.set_alias(plugin.alias(), public_dir.clone());
    }

    tracing::debug!(%tag, "Registered plugin");
    self.plugin_tags.insert(tag);
  }

  /// Returns the handler that registers exports of the given type, or `None` when this
  /// environment does not accept them
  ///
  /// The handler borrows the environment mutably, so it has to go out of scope before the
  /// environment can be read again.
  ///
  /// # Examples
  ///
  /// ```
  /// use ui_bundler_env::BuildEnv;
  /// use ui_bundler_env::ExportSpec;
  /// use ui_bundler_env::Plugin;
  ///
  /// let mut env = BuildEnv::new("/tmp/build");
  /// let plugin = Plugin::new("charts", "1.0.0");
  ///
  /// if let Some(mut register) = env.registrar_for("noParse") {
  ///   register(&plugin, ExportSpec::from("node_modules/d3")).unwrap();
  /// }
  ///
  /// assert!(env.registrar_for("styleSheetPaths").is_none());
  /// assert_eq!(env.no_parse().len(), 1);
  /// ```
  pub fn registrar_for(
    &mut self,
    export_type: &str,
  ) -> Option<impl FnMut(&Plugin, ExportSpec) -> Result<(), BuildEnvError> + '_> {
    let registrar = ExportType::from_tag(export_type)?.registrar();

    Some(move |plugin: &Plugin, spec: ExportSpec| registrar(&mut *self, plugin, spec))
  }

  /// Registers each of a plugin's exports with the matching registrar
  ///
  /// Export types this environment does not accept are skipped. The first export that fails to
  /// register aborts the rest, keeping whatever was registered before it.
  pub fn consume_exports(
    &mut self,
    plugin: &Plugin,
    exports: impl IntoIterator<Item = (String, ExportSpec)>,
  ) -> anyhow::Result<()> {
    for (export_type, spec) in exports {
      let Some(mut register) = self.registrar_for(&export_type) else {
        tracing::trace!(plugin = %plugin.tag(), %export_type, "Skipping unsupported export");
        continue;
      };

      register(plugin, spec).with_context(|| {
        format!(
          "Failed to register {} export from plugin {}",
          export_type,
          plugin.tag()
        )
      })?;
    }

    Ok(())
  }

  pub fn add_context(&mut self, key: impl Into<String>, value: impl Into<Value>) {
    self.context.insert(key.into(), value.into());
  }

  pub fn add_post_loader(&mut self, loader: PostLoader) {
    tracing::debug!(loader = %loader.loader, "Registered post loader");
    self.post_loaders.push(loader);
  }

  pub(crate) fn set_alias(&mut self, alias: String, target: PathBuf) {
    tracing::debug!(%alias, target = %target.display(), "Registered alias");

    if let Some(previous) = self.aliases.insert(alias.clone(), target) {
      tracing::debug!(%alias, previous = %previous.display(), "Replaced alias");
    }
  }

  /// A stable hash of the context and registered plugins, used to invalidate bundle entries that
  /// were written for a different environment
  pub fn cache_key(&self) -> String {
    fingerprint(&self.context, &self.plugin_tags)
  }

  pub fn working_dir(&self) -> &Path {
    &self.working_dir
  }

  pub fn context(&self) -> &JSONObject {
    &self.context
  }

  pub fn plugin_tags(&self) -> &IndexSet<String> {
    &self.plugin_tags
  }

  pub fn aliases(&self) -> &IndexMap<String, PathBuf> {
    &self.aliases
  }

  pub fn alias_owners(&self) -> &IndexMap<String, String> {
    &self.alias_owners
  }

  pub fn no_parse(&self) -> &[Regex] {
    &self.no_parse
  }

  pub fn post_loaders(&self) -> &[PostLoader] {
    &self.post_loaders
  }
}

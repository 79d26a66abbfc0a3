use crate::BuildEnv;
use crate::Plugin;

pub(crate) fn foo_plugin() -> Plugin {
  Plugin::new("foo", "1.0.0").with_public_dir("/plugins/foo")
}

pub(crate) fn patterns(env: &BuildEnv) -> Vec<&str> {
  env.no_parse().iter().map(|pattern| pattern.as_str()).collect()
}

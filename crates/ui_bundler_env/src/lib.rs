pub mod build_env;
pub mod build_env_error;
pub mod build_env_options;
pub mod core_defaults;
pub mod fingerprint;
pub mod no_parse;
pub mod plugin;
pub mod post_loader;
pub mod registrar;
#[cfg(test)]
mod test_utils;

pub use build_env::BuildEnv;
pub use build_env::JSONObject;
pub use build_env_error::BuildEnvError;
pub use build_env_options::BuildEnvOptions;
pub use no_parse::no_parse_regex;
pub use no_parse::NoParseRule;
pub use plugin::Plugin;
pub use post_loader::PostLoader;
pub use registrar::ExportSpec;
pub use registrar::ExportType;
pub use registrar::Registrar;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildEnvError {
  /// A plugin registered a no-parse rule that is neither a path string nor a compiled pattern
  #[error("Expected noParse rule to be a string or regexp, got {found}")]
  InvalidRuleKind { found: String },
  #[error("Failed to compile noParse pattern")]
  InvalidPattern(#[from] regex::Error),
}

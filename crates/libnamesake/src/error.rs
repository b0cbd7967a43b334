#[derive(Debug, thiserror::Error)]
pub enum NameMatchError {
  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("could not parse configuration: {0}")]
  ParseError(#[from] serde_yaml::Error),
}

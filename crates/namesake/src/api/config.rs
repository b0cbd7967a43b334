use std::{
  env::{self, VarError},
  fmt::Display,
  fs,
  str::FromStr,
};

use libnamesake::prelude::*;

use crate::api::errors::AppError;

#[derive(Clone)]
pub struct Config {
  pub env: Env,
  pub listen_addr: String,
  pub api_key: Option<String>,

  // Match settings
  pub matcher: MatcherConfig,

  // Debugging
  pub enable_prometheus: bool,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      env: Env::Dev,
      listen_addr: "0.0.0.0:8000".into(),
      api_key: None,
      matcher: MatcherConfig::default(),
      enable_prometheus: false,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: env::var("LISTEN_ADDR").unwrap_or("0.0.0.0:8000".into()),
      api_key: env::var("API_KEY").ok().filter(|key| !key.is_empty()),
      matcher: matcher_config_from_env()?,
      enable_prometheus: env::var("ENABLE_PROMETHEUS").unwrap_or_default() == "1",
    };

    Ok(config)
  }
}

/// Load the matcher configuration from the file named by `MATCHER_CONFIG`, if
/// any, then apply the individual overrides from the environment.
fn matcher_config_from_env() -> Result<MatcherConfig, AppError> {
  let mut config = match env::var("MATCHER_CONFIG") {
    Ok(path) if !path.is_empty() => {
      let document = fs::read_to_string(&path).map_err(|err| AppError::ConfigError(format!("could not read {path}: {err}")))?;

      MatcherConfig::from_yaml(&document)?
    }

    _ => MatcherConfig::default(),
  };

  if let Some(weight) = parse_optional_env::<f64>("PHONETIC_WEIGHT")? {
    config.phonetic_weight = weight;
  }

  if let Some(weight) = parse_optional_env::<f64>("WORD_SIM_WEIGHT")? {
    config.word_similarity_weight = weight;
  }

  if env::var("TRANSLITERATE").unwrap_or_default() == "1" {
    config.transliterate = true;
  }

  config.validate()?;

  Ok(config)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

pub fn parse_optional_env<T>(name: &str) -> Result<Option<T>, AppError>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(None),
    Ok(value) => Ok(Some(value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}")))?)),
    Err(err) => match err {
      VarError::NotPresent => Ok(None),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}"))),
    },
  }
}

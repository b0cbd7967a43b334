use std::{collections::BTreeMap, sync::LazyLock};

use ahash::HashMap;
use bon::bon;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;

use crate::{error::NameMatchError, labels::LabelThresholds};

pub const DEFAULT_PHONETIC_WEIGHT: f64 = 0.85;
pub const DEFAULT_WORD_SIMILARITY_WEIGHT: f64 = 0.15;

const WEIGHT_EPSILON: f64 = 1e-9;

#[derive(Embed)]
#[folder = "./assets"]
struct Dictionaries;

pub(crate) static DEFAULT_ALIASES: LazyLock<AliasTable> = LazyLock::new(|| {
  let file = Dictionaries::get("aliases.yml").expect("could not read aliases dictionary");

  serde_yaml::from_slice::<AliasTable>(&file.data).expect("could not unmarshal aliases dictionary")
});

/// Spelling variants of names, mapped to their canonical form.
///
/// The table is described as `canonical -> [variants]`, which is also the shape
/// of the embedded dictionary and of the `aliases` key in YAML configuration.
/// Variants are stored lowercase, since they are looked up against lowercase
/// tokens.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct AliasTable {
  variants: HashMap<String, String>,
}

impl AliasTable {
  /// An alias table without any entry.
  pub fn empty() -> AliasTable {
    AliasTable { variants: HashMap::default() }
  }

  /// The alias table shipped with the library.
  pub fn builtin() -> AliasTable {
    DEFAULT_ALIASES.clone()
  }

  /// Register variants for a canonical spelling.
  ///
  /// A variant already registered for another canonical name is reassigned.
  pub fn insert<S: AsRef<str>>(&mut self, canonical: &str, variants: &[S]) {
    for variant in variants {
      self.variants.insert(variant.as_ref().to_lowercase(), canonical.to_string());
    }
  }

  /// Canonical spelling for a lowercase token, if it is a known variant.
  pub fn canonical(&self, token: &str) -> Option<&str> {
    self.variants.get(token).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.variants.len()
  }

  pub fn is_empty(&self) -> bool {
    self.variants.is_empty()
  }

  fn validate(&self) -> Result<(), NameMatchError> {
    for (variant, canonical) in &self.variants {
      if canonical.trim().is_empty() {
        return Err(NameMatchError::ConfigError(format!("alias '{variant}' has an empty canonical form")));
      }

      // Tokens only ever contain ASCII letters, anything else could never match.
      if variant.is_empty() || !variant.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(NameMatchError::ConfigError(format!("alias '{variant}' for '{canonical}' must only contain letters")));
      }
    }

    Ok(())
  }
}

impl Default for AliasTable {
  fn default() -> Self {
    AliasTable::builtin()
  }
}

impl From<BTreeMap<String, Vec<String>>> for AliasTable {
  fn from(value: BTreeMap<String, Vec<String>>) -> Self {
    let mut table = AliasTable::empty();

    for (canonical, variants) in value {
      table.insert(&canonical, &variants);
    }

    table
  }
}

impl From<AliasTable> for BTreeMap<String, Vec<String>> {
  fn from(value: AliasTable) -> Self {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (variant, canonical) in value.variants {
      out.entry(canonical).or_default().push(variant);
    }

    out.values_mut().for_each(|variants| variants.sort());
    out
  }
}

/// Tunables consumed by the matching pipeline.
///
/// A configuration is validated once, when it is built or loaded, and is
/// immutable afterwards. Use [`MatcherConfig::builder`] to override individual
/// values, or [`MatcherConfig::from_yaml`] to load it from a document.
///
/// ```rust
/// # use libnamesake::prelude::*;
/// let config = MatcherConfig::builder().phonetic_weight(0.9).word_similarity_weight(0.1).build().unwrap();
///
/// assert_eq!(config.phonetic_weight, 0.9);
/// assert!(MatcherConfig::builder().phonetic_weight(0.9).build().is_err());
/// ```
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MatcherConfig {
  #[serde(default)]
  pub aliases: AliasTable,
  #[serde_inline_default(DEFAULT_PHONETIC_WEIGHT)]
  pub phonetic_weight: f64,
  #[serde_inline_default(DEFAULT_WORD_SIMILARITY_WEIGHT)]
  pub word_similarity_weight: f64,
  #[serde(default)]
  pub thresholds: LabelThresholds,
  #[serde(default)]
  pub transliterate: bool,
}

impl Default for MatcherConfig {
  fn default() -> Self {
    MatcherConfig {
      aliases: AliasTable::builtin(),
      phonetic_weight: DEFAULT_PHONETIC_WEIGHT,
      word_similarity_weight: DEFAULT_WORD_SIMILARITY_WEIGHT,
      thresholds: LabelThresholds::default(),
      transliterate: false,
    }
  }
}

#[bon]
impl MatcherConfig {
  #[builder(finish_fn = build)]
  pub fn new(
    #[builder(default)] aliases: AliasTable,
    #[builder(default = DEFAULT_PHONETIC_WEIGHT)] phonetic_weight: f64,
    #[builder(default = DEFAULT_WORD_SIMILARITY_WEIGHT)] word_similarity_weight: f64,
    #[builder(default)] thresholds: LabelThresholds,
    #[builder(default)] transliterate: bool,
  ) -> Result<MatcherConfig, NameMatchError> {
    let config = MatcherConfig {
      aliases,
      phonetic_weight,
      word_similarity_weight,
      thresholds,
      transliterate,
    };

    config.validate()?;

    Ok(config)
  }
}

impl MatcherConfig {
  /// Parse and validate a YAML configuration document.
  ///
  /// Missing keys take their default values, so an empty document yields the
  /// default configuration.
  pub fn from_yaml(document: &str) -> Result<MatcherConfig, NameMatchError> {
    let config = match document.trim() {
      "" => MatcherConfig::default(),
      document => serde_yaml::from_str::<MatcherConfig>(document)?,
    };

    config.validate()?;

    Ok(config)
  }

  pub fn validate(&self) -> Result<(), NameMatchError> {
    for (name, weight) in [("phonetic_weight", self.phonetic_weight), ("word_similarity_weight", self.word_similarity_weight)] {
      if !(0.0..=1.0).contains(&weight) {
        return Err(NameMatchError::ConfigError(format!("{name} must be between 0.0 and 1.0, got {weight}")));
      }
    }

    let sum = self.phonetic_weight + self.word_similarity_weight;

    if (sum - 1.0).abs() > WEIGHT_EPSILON {
      return Err(NameMatchError::ConfigError(format!("phonetic_weight and word_similarity_weight must sum to 1.0, got {sum}")));
    }

    self.thresholds.validate()?;
    self.aliases.validate()?;

    Ok(())
  }
}

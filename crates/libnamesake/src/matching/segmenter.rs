use std::sync::Arc;

use itertools::Itertools;

use crate::config::MatcherConfig;

/// Segmentation of one name into full segments and initials.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameProfile {
  /// Full name segments (NS), capitalized or canonicalized.
  pub segments: Vec<String>,
  /// Runs of consecutive initials joined together (NI), uppercased.
  pub joined_initials: Vec<String>,
  /// Every initial on its own, uppercased.
  pub initials: Vec<String>,
}

impl NameProfile {
  pub fn is_empty(&self) -> bool {
    self.segments.is_empty() && self.joined_initials.is_empty()
  }
}

/// Splits tokenized names into name segments and initials.
#[derive(Clone, Debug)]
pub struct NameSegmenter {
  config: Arc<MatcherConfig>,
}

impl NameSegmenter {
  pub fn new(config: Arc<MatcherConfig>) -> NameSegmenter {
    NameSegmenter { config }
  }

  /// Build the profile of a name from its lowercase tokens.
  ///
  /// Segments and initials are two independent views over the same tokens.
  pub fn segment<S: AsRef<str>>(&self, tokens: &[S]) -> NameProfile {
    let (joined_initials, initials) = extract_initials(tokens);

    NameProfile {
      segments: self.extract_segments(tokens),
      joined_initials,
      initials,
    }
  }

  fn extract_segments<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
    tokens
      .iter()
      .map(AsRef::as_ref)
      .filter_map(|token| match self.config.aliases.canonical(token) {
        Some(canonical) => Some(canonical.to_string()),
        None if token.chars().count() > 1 => Some(capitalize(token)),
        None => None,
      })
      .unique()
      .collect()
  }
}

fn extract_initials<S: AsRef<str>>(tokens: &[S]) -> (Vec<String>, Vec<String>) {
  let mut joined = Vec::new();
  let mut individual = Vec::new();
  let mut run = String::new();

  for token in tokens.iter().map(AsRef::as_ref) {
    if token.chars().count() == 1 {
      let initial = token.to_uppercase();

      run.push_str(&initial);
      individual.push(initial);
    } else if !run.is_empty() {
      joined.push(std::mem::take(&mut run));
    }
  }

  if !run.is_empty() {
    joined.push(run);
  }

  (joined.into_iter().unique().collect(), individual.into_iter().unique().collect())
}

fn capitalize(token: &str) -> String {
  let mut chars = token.chars();

  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

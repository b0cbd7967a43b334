use std::fmt;

use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;

use crate::error::NameMatchError;

/// Human-readable category for an aggregate score.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum MatchLabel {
  #[serde(rename = "Names Do Not Match")]
  NoMatch,
  #[serde(rename = "Weak Match")]
  Weak,
  #[serde(rename = "Slightly Similar")]
  SlightlySimilar,
  #[serde(rename = "Somewhat Similar")]
  SomewhatSimilar,
  #[serde(rename = "Highly Similar")]
  HighlySimilar,
  #[serde(rename = "Almost Identical")]
  AlmostIdentical,
  #[serde(rename = "Identical Name")]
  Identical,
}

impl MatchLabel {
  pub fn as_str(&self) -> &'static str {
    match self {
      MatchLabel::NoMatch => "Names Do Not Match",
      MatchLabel::Weak => "Weak Match",
      MatchLabel::SlightlySimilar => "Slightly Similar",
      MatchLabel::SomewhatSimilar => "Somewhat Similar",
      MatchLabel::HighlySimilar => "Highly Similar",
      MatchLabel::AlmostIdentical => "Almost Identical",
      MatchLabel::Identical => "Identical Name",
    }
  }
}

impl fmt::Display for MatchLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Upper bounds (inclusive) of each label band, on the 0-100 scale.
///
/// Anything above `highly_similar` and below 100 is "Almost Identical", and
/// exactly 100 is "Identical Name".
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LabelThresholds {
  #[serde_inline_default(30.0)]
  pub no_match: f64,
  #[serde_inline_default(60.0)]
  pub weak: f64,
  #[serde_inline_default(75.0)]
  pub slightly_similar: f64,
  #[serde_inline_default(88.0)]
  pub somewhat_similar: f64,
  #[serde_inline_default(94.0)]
  pub highly_similar: f64,
}

impl Default for LabelThresholds {
  fn default() -> Self {
    LabelThresholds {
      no_match: 30.0,
      weak: 60.0,
      slightly_similar: 75.0,
      somewhat_similar: 88.0,
      highly_similar: 94.0,
    }
  }
}

impl LabelThresholds {
  fn bands(&self) -> [(f64, MatchLabel); 5] {
    [
      (self.no_match, MatchLabel::NoMatch),
      (self.weak, MatchLabel::Weak),
      (self.slightly_similar, MatchLabel::SlightlySimilar),
      (self.somewhat_similar, MatchLabel::SomewhatSimilar),
      (self.highly_similar, MatchLabel::HighlySimilar),
    ]
  }

  pub(crate) fn validate(&self) -> Result<(), NameMatchError> {
    let mut previous = 0.0;

    for (bound, label) in self.bands() {
      if !(bound > previous && bound < 100.0) {
        return Err(NameMatchError::ConfigError(format!(
          "threshold for '{label}' must be greater than {previous} and lower than 100, got {bound}"
        )));
      }

      previous = bound;
    }

    Ok(())
  }

  /// Map a 0-100 score to its label.
  ///
  /// Scores outside of the range are clamped, and NaN is treated as 0.
  pub fn label(&self, score: f64) -> MatchLabel {
    let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) };

    if score >= 100.0 {
      return MatchLabel::Identical;
    }

    self
      .bands()
      .into_iter()
      .find(|(bound, _)| score <= *bound)
      .map(|(_, label)| label)
      .unwrap_or(MatchLabel::AlmostIdentical)
  }
}

use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer};
use strsim::jaro_winkler;

use crate::{config::MatcherConfig, matching::normalize::normalize, model::Segment};

/// Which pair of codes produced a segment score.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CodePairing {
  None,
  PrimaryPrimary,
  PrimarySecondary,
  SecondaryPrimary,
  SecondarySecondary,
}

impl CodePairing {
  pub fn as_str(&self) -> &'static str {
    match self {
      CodePairing::None => "None",
      CodePairing::PrimaryPrimary => "Primary-Primary",
      CodePairing::PrimarySecondary => "Primary-Secondary",
      CodePairing::SecondaryPrimary => "Secondary-Primary",
      CodePairing::SecondarySecondary => "Secondary-Secondary",
    }
  }
}

/// Description of how a pair score was obtained.
///
/// `weighted` holds the blended score when a perfect phonetic match was
/// tempered by literal similarity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchType {
  pub pairing: CodePairing,
  pub weighted: Option<f64>,
}

impl MatchType {
  const NONE: MatchType = MatchType {
    pairing: CodePairing::None,
    weighted: None,
  };
}

impl fmt::Display for MatchType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.weighted {
      Some(score) => write!(f, "{} (Weighted: 1.0->{score:.4})", self.pairing.as_str()),
      None => f.write_str(self.pairing.as_str()),
    }
  }
}

impl Serialize for MatchType {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// Scores two encoded segments against each other.
#[derive(Clone, Debug)]
pub struct PairScorer {
  config: Arc<MatcherConfig>,
}

impl PairScorer {
  pub fn new(config: Arc<MatcherConfig>) -> PairScorer {
    PairScorer { config }
  }

  /// Best Jaro-Winkler similarity across the code combinations of two segments.
  ///
  /// A perfect phonetic match is blended with the literal similarity of the
  /// full names (when both are given) or of the segments themselves, so that
  /// names sounding alike but written differently do not score 1.0.
  pub fn score(&self, lhs: &Segment, rhs: &Segment, lhs_name: Option<&str>, rhs_name: Option<&str>) -> (f64, MatchType) {
    let combinations = [
      (Some(&lhs.primary_code), Some(&rhs.primary_code), CodePairing::PrimaryPrimary),
      (Some(&lhs.primary_code), rhs.secondary_code.as_ref(), CodePairing::PrimarySecondary),
      (lhs.secondary_code.as_ref(), Some(&rhs.primary_code), CodePairing::SecondaryPrimary),
      (lhs.secondary_code.as_ref(), rhs.secondary_code.as_ref(), CodePairing::SecondarySecondary),
    ];

    let mut best = 0.0f64;
    let mut match_type = MatchType::NONE;

    for (lcode, rcode, pairing) in combinations {
      let (Some(lcode), Some(rcode)) = (lcode, rcode) else {
        continue;
      };

      if lcode.is_empty() || rcode.is_empty() {
        continue;
      }

      let similarity = jaro_winkler(lcode, rcode);

      if similarity > best {
        best = similarity;
        match_type.pairing = pairing;
      }
    }

    if best == 1.0 {
      let literal = literal_similarity(lhs, rhs, lhs_name, rhs_name);

      best = best * self.config.phonetic_weight + literal * self.config.word_similarity_weight;
      match_type.weighted = Some(best);
    }

    (best, match_type)
  }
}

fn literal_similarity(lhs: &Segment, rhs: &Segment, lhs_name: Option<&str>, rhs_name: Option<&str>) -> f64 {
  match (lhs_name, rhs_name) {
    (Some(lhs_name), Some(rhs_name)) if !lhs_name.is_empty() && !rhs_name.is_empty() => {
      jaro_winkler(&normalize(lhs_name).replace(' ', ""), &normalize(rhs_name).replace(' ', ""))
    }

    _ => jaro_winkler(&lhs.original_text.to_lowercase(), &rhs.original_text.to_lowercase()),
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use float_cmp::assert_approx_eq;

  use crate::{config::MatcherConfig, model::Segment};

  use super::{CodePairing, MatchType, PairScorer};

  fn segment(text: &str, primary: &str, secondary: Option<&str>) -> Segment {
    Segment {
      original_text: text.to_string(),
      index: 0,
      primary_code: primary.to_string(),
      secondary_code: secondary.map(ToString::to_string),
    }
  }

  fn scorer() -> PairScorer {
    PairScorer::new(Arc::new(MatcherConfig::default()))
  }

  #[test]
  fn identical_segments() {
    let lhs = segment("Smith", "SM0", Some("XMT"));
    let rhs = segment("Smith", "SM0", Some("XMT"));

    let (score, match_type) = scorer().score(&lhs, &rhs, None, None);

    assert_approx_eq!(f64, score, 1.0);
    assert_eq!(match_type.pairing, CodePairing::PrimaryPrimary);
    assert_eq!(match_type.to_string(), "Primary-Primary (Weighted: 1.0->1.0000)");
  }

  #[test]
  fn perfect_phonetic_match_is_tempered_by_literal_similarity() {
    let lhs = segment("Muhammad", "MHMT", None);
    let rhs = segment("Muhammad", "MHMT", None);

    let (score, match_type) = scorer().score(&lhs, &rhs, Some("Muhammad"), Some("Md"));
    let literal = strsim::jaro_winkler("muhammad", "md");

    assert!(score < 1.0);
    assert_approx_eq!(f64, score, 0.85 + 0.15 * literal);
    assert_eq!(match_type.weighted, Some(score));
  }

  #[test]
  fn full_names_are_normalized_before_comparison() {
    let lhs = segment("Doe", "T", None);
    let rhs = segment("Doe", "T", None);

    let (score, _) = scorer().score(&lhs, &rhs, Some("  JOHN   Doe "), Some("john doe"));

    assert_approx_eq!(f64, score, 1.0);
  }

  #[test]
  fn falls_back_to_segment_text() {
    let lhs = segment("Jon", "JN", Some("AN"));
    let rhs = segment("John", "JN", Some("AN"));

    let (score, _) = scorer().score(&lhs, &rhs, Some("Jon"), None);
    let literal = strsim::jaro_winkler("jon", "john");

    assert_approx_eq!(f64, score, 0.85 + 0.15 * literal);
  }

  #[test]
  fn custom_weights() {
    let config = MatcherConfig::builder().phonetic_weight(0.5).word_similarity_weight(0.5).build().unwrap();
    let scorer = PairScorer::new(Arc::new(config));

    let lhs = segment("Jon", "JN", None);
    let rhs = segment("John", "JN", None);

    let (score, _) = scorer.score(&lhs, &rhs, None, None);

    assert_approx_eq!(f64, score, 0.5 + 0.5 * strsim::jaro_winkler("jon", "john"));
  }

  #[test]
  fn first_best_combination_wins() {
    let lhs = segment("a", "AB", Some("KL"));
    let rhs = segment("b", "XY", Some("KL"));

    let (_, match_type) = scorer().score(&lhs, &rhs, None, None);

    assert_eq!(match_type.pairing, CodePairing::SecondarySecondary);

    let lhs = segment("a", "KL", Some("KL2"));
    let rhs = segment("b", "KL", Some("KL"));

    let (_, match_type) = scorer().score(&lhs, &rhs, None, None);

    assert_eq!(match_type.pairing, CodePairing::PrimaryPrimary);
  }

  #[test]
  fn imperfect_match_is_not_weighted() {
    let lhs = segment("John", "JN", Some("AN"));
    let rhs = segment("J", "J", Some("A"));

    let (score, match_type) = scorer().score(&lhs, &rhs, Some("John Doe"), Some("J Doe"));

    assert_approx_eq!(f64, score, strsim::jaro_winkler("JN", "J"));
    assert_eq!(match_type.pairing, CodePairing::PrimaryPrimary);
    assert_eq!(match_type.weighted, None);
  }

  #[test]
  fn nothing_comparable() {
    let lhs = segment("", "", None);
    let rhs = segment("Smith", "SM0", Some("XMT"));

    let (score, match_type) = scorer().score(&lhs, &rhs, None, None);

    assert_eq!(score, 0.0);
    assert_eq!(match_type, MatchType::NONE);
    assert_eq!(match_type.to_string(), "None");
  }

  #[test]
  fn serialize_match_type() {
    let match_type = MatchType {
      pairing: CodePairing::SecondaryPrimary,
      weighted: Some(0.93126),
    };

    assert_eq!(serde_json::to_string(&match_type).unwrap(), r#""Secondary-Primary (Weighted: 1.0->0.9313)""#);
  }
}

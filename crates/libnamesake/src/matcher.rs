use std::{sync::Arc, time::Instant};

use itertools::Itertools;
use metrics::histogram;
use tracing::instrument;

use crate::{
  config::MatcherConfig,
  error::NameMatchError,
  labels::MatchLabel,
  matching::{
    assignment,
    normalize::{name_tokens, prepare},
    phonetic::PhoneticEncoder,
    scorer::PairScorer,
    segmenter::{NameProfile, NameSegmenter},
  },
  model::{CandidatePair, LabeledSegment, MatchResult, SegmentLabel, SegmentMatch},
};

const SCORE_MULTIPLIER: f64 = 100.0;

/// The main entrypoint for comparing personal names.
///
/// A `NameMatcher` is built once from a validated [`MatcherConfig`] and is
/// immutable afterwards. It can be cloned cheaply and shared across threads,
/// every call to [`NameMatcher::compare`] being independent from the others.
///
/// # Examples
///
/// ```rust
/// # use libnamesake::prelude::*;
/// let matcher = NameMatcher::new(MatcherConfig::default()).unwrap();
/// let result = matcher.compare("John Smith", "John Smith");
///
/// assert_eq!(result.score, 100.0);
/// assert_eq!(matcher.label(result.score), MatchLabel::Identical);
/// ```
#[derive(Clone)]
pub struct NameMatcher {
  config: Arc<MatcherConfig>,
  segmenter: NameSegmenter,
  encoder: PhoneticEncoder,
  scorer: PairScorer,
}

impl NameMatcher {
  /// Create a matcher, rejecting invalid configuration.
  pub fn new(config: MatcherConfig) -> Result<NameMatcher, NameMatchError> {
    config.validate()?;

    let config = Arc::new(config);

    Ok(NameMatcher {
      segmenter: NameSegmenter::new(Arc::clone(&config)),
      encoder: PhoneticEncoder::new(),
      scorer: PairScorer::new(Arc::clone(&config)),
      config,
    })
  }

  pub fn config(&self) -> &MatcherConfig {
    &self.config
  }

  /// Split a raw name into its segments and initials.
  pub fn profile(&self, name: &str) -> NameProfile {
    self.segmenter.segment(&name_tokens(name, self.config.transliterate))
  }

  /// Score how closely `reference` matches `target`, from 0 to 100.
  ///
  /// The score is averaged over the units of the target name, so unmatched
  /// target units lower the score while extra reference units do not. As a
  /// consequence, comparing A to B and B to A can give different results.
  #[instrument(name = "compare_names", skip_all)]
  pub fn compare(&self, target: &str, reference: &str) -> MatchResult {
    let then = Instant::now();

    // Literal similarity compares the names as they were tokenized.
    let target_name = prepare(target, self.config.transliterate);
    let reference_name = prepare(reference, self.config.transliterate);

    let target_units = self.units(&self.profile(&target_name));
    let reference_units = self.units(&self.profile(&reference_name));

    let candidates = target_units
      .iter()
      .cartesian_product(reference_units.iter())
      .filter_map(|(t, r)| {
        let (score, match_type) = self.scorer.score(&t.segment, &r.segment, Some(target_name.as_ref()), Some(reference_name.as_ref()));

        (score > 0.0).then_some(CandidatePair {
          target: t,
          reference: r,
          score,
          match_type,
        })
      })
      .collect::<Vec<_>>();

    let candidate_count = candidates.len();
    let matches = assignment::solve(candidates);

    for pair in &matches {
      tracing::debug!(
        target_label = %pair.target.label,
        target_text = pair.target.segment.original_text.as_str(),
        reference_label = %pair.reference.label,
        reference_text = pair.reference.segment.original_text.as_str(),
        match_type = %pair.match_type,
        score = pair.score * SCORE_MULTIPLIER,
        "selected segment match"
      );
    }

    let n = target_units.len();

    let all_scores = matches
      .iter()
      .map(|pair| pair.score * SCORE_MULTIPLIER)
      .sorted_by(|lhs, rhs| rhs.total_cmp(lhs))
      .take(n)
      .collect::<Vec<_>>();

    let score = match n {
      0 => 0.0,
      n => round2(all_scores.iter().sum::<f64>() / n as f64),
    };

    tracing::debug!(score, n, candidates = candidate_count, "computed name score");

    histogram!("namesake_scoring_scores").record(score);
    histogram!("namesake_scoring_latency_seconds").record(then.elapsed().as_secs_f64());

    MatchResult {
      score,
      n,
      target: target.to_string(),
      reference: reference.to_string(),
      matches: matches.iter().map(SegmentMatch::from).collect(),
      all_scores,
    }
  }

  /// Label of a 0-100 score according to the configured thresholds.
  pub fn label(&self, score: f64) -> MatchLabel {
    self.config.thresholds.label(score)
  }

  /// Encode the full segments and joined initials of a profile into one pool.
  ///
  /// Individual initials are not part of the pool.
  fn units(&self, profile: &NameProfile) -> Vec<LabeledSegment> {
    let segments = self.encoder.encode(&profile.segments).into_iter().map(|s| (SegmentLabel::NameSegment, s));
    let initials = self.encoder.encode(&profile.joined_initials).into_iter().map(|s| (SegmentLabel::NameInitial, s));

    segments
      .chain(initials)
      .enumerate()
      .map(|(slot, (label, segment))| LabeledSegment { slot, label, segment })
      .collect()
  }
}

/// Round to two decimals according to the exact value of `value`, ties to even.
///
/// `value * 100.0` can itself round onto a half (2.675 becomes 267.5), so the
/// side of the midpoint is decided with a fused multiply-add instead.
fn round2(value: f64) -> f64 {
  let lower = (value * 100.0).floor();
  let distance = value.mul_add(100.0, -(lower + 0.5));

  let hundredths = if distance > 0.0 {
    lower + 1.0
  } else if distance < 0.0 {
    lower
  } else if lower % 2.0 == 0.0 {
    lower
  } else {
    lower + 1.0
  };

  hundredths / 100.0
}

#[cfg(test)]
mod tests {
  use float_cmp::assert_approx_eq;

  use crate::{config::MatcherConfig, labels::MatchLabel, model::SegmentLabel};

  use super::NameMatcher;

  fn matcher() -> NameMatcher {
    NameMatcher::new(MatcherConfig::default()).unwrap()
  }

  #[test]
  fn rejects_invalid_config() {
    let config = MatcherConfig {
      phonetic_weight: 0.9,
      ..Default::default()
    };

    assert!(NameMatcher::new(config).is_err());
  }

  #[test]
  fn identical_names() {
    let matcher = matcher();
    let result = matcher.compare("John Smith", "John Smith");

    assert_eq!(result.score, 100.0);
    assert_eq!(result.n, 2);
    assert_eq!(result.matches.len(), 2);
    assert_eq!(result.all_scores.len(), 2);
    assert_eq!(matcher.label(result.score), MatchLabel::Identical);
  }

  #[test]
  fn no_letters() {
    for (target, reference) in [("", ""), ("1234", "John"), ("!!! ---", "?"), ("", "John Smith")] {
      let result = matcher().compare(target, reference);

      assert_eq!(result.score, 0.0);
      assert_eq!(result.n, 0);
      assert!(result.matches.is_empty());
      assert!(result.all_scores.is_empty());
    }
  }

  #[test]
  fn empty_reference() {
    let result = matcher().compare("John Smith", "");

    assert_eq!(result.score, 0.0);
    assert_eq!(result.n, 2);
    assert!(result.matches.is_empty());
  }

  #[test]
  fn unmatched_target_units_lower_the_score() {
    let result = matcher().compare("John Smith", "John");

    assert_eq!(result.n, 2);
    assert!(result.score <= 50.0);
    assert!(result.score > 0.0);
  }

  #[test]
  fn alias_canonicalization() {
    let matcher = matcher();
    let result = matcher.compare("Muhammad", "Md");

    assert_eq!(result.n, 1);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].target_text, "Muhammad");
    assert_eq!(result.matches[0].reference_text, "Muhammad");
    assert!(result.matches[0].match_type.weighted.is_some());

    let expected = 85.0 + 15.0 * strsim::jaro_winkler("muhammad", "md");

    assert_approx_eq!(f64, result.score, expected, epsilon = 0.01);
    assert!(result.score < 100.0);
    assert_eq!(matcher.label(result.score), MatchLabel::HighlySimilar);
  }

  #[test]
  fn initials_against_segments() {
    let result = matcher().compare("John Doe", "J Doe");

    assert_eq!(result.n, 2);
    assert_eq!(result.matches.len(), 2);

    let doe = result.matches.iter().find(|m| m.target_text == "Doe").unwrap();

    assert_eq!(doe.reference_text, "Doe");
    assert_eq!(doe.reference_label, SegmentLabel::NameSegment);

    let john = result.matches.iter().find(|m| m.target_text == "John").unwrap();

    assert_eq!(john.reference_text, "J");
    assert_eq!(john.target_label, SegmentLabel::NameSegment);
    assert_eq!(john.reference_label, SegmentLabel::NameInitial);
  }

  #[test]
  fn joined_initials() {
    let result = matcher().compare("JK Rowling", "Joanne Kathleen Rowling");

    assert_eq!(result.n, 2);

    let rowling = result.matches.iter().find(|m| m.target_text == "Rowling").unwrap();

    assert_eq!(rowling.reference_text, "Rowling");
  }

  #[test]
  fn spacing() {
    let result = matcher().compare("Abu Bakar", "Abubakar");

    assert_eq!(result.n, 2);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].reference_text, "Abubakar");
    assert!(result.score > 0.0);
  }

  #[test]
  fn asymmetry() {
    let matcher = matcher();

    let forward = matcher.compare("John Smith", "John Smith Doe");
    let backward = matcher.compare("John Smith Doe", "John Smith");

    assert_eq!(forward.n, 2);
    assert_eq!(backward.n, 3);
    assert!(forward.score > backward.score);
  }

  #[test]
  fn deterministic() {
    let matcher = matcher();

    for (target, reference) in [("JK Rowling", "Joanne Kathleen Rowling"), ("Mohd Ali", "Muhammad Aly"), ("A B C", "C B A")] {
      assert_eq!(matcher.compare(target, reference), matcher.compare(target, reference));
    }
  }

  #[test]
  fn transliteration() {
    let plain = matcher().compare("José Muñoz", "Jose Munoz");
    let transliterated = NameMatcher::new(MatcherConfig::builder().transliterate(true).build().unwrap()).unwrap().compare("José Muñoz", "Jose Munoz");

    assert_eq!(transliterated.score, 100.0);
    assert!(plain.score < transliterated.score);
  }

  #[test]
  fn long_codes_differ() {
    let matcher = matcher();
    let result = matcher.compare("Robertson", "Robert");

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].match_type.weighted, None);
    assert_approx_eq!(f64, result.score, 100.0 * strsim::jaro_winkler("RPRTSN", "RPRT"), epsilon = 0.01);
    assert_approx_eq!(f64, result.score, 93.33, epsilon = 0.001);
    assert_eq!(matcher.label(result.score), MatchLabel::HighlySimilar);
  }

  #[test]
  fn round2() {
    assert_eq!(super::round2(93.12499), 93.12);
    assert_eq!(super::round2(42.0), 42.0);
    assert_eq!(super::round2(66.66666), 66.67);
    assert_eq!(super::round2(0.0), 0.0);
    assert_eq!(super::round2(100.0), 100.0);

    // Stored just below the half, even though the product rounds to 267.5.
    assert_eq!(super::round2(2.675), 2.67);

    // Exact halves go to the even neighbour.
    assert_eq!(super::round2(93.125), 93.12);
    assert_eq!(super::round2(0.375), 0.38);
    assert_eq!(super::round2(0.125), 0.12);
  }
}

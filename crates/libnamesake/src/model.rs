use std::fmt;

use serde::Serialize;

use crate::matching::scorer::MatchType;

/// A name unit along with its Double Metaphone codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
  pub original_text: String,
  /// Position of the unit in the list it was encoded from.
  pub index: usize,
  pub primary_code: String,
  pub secondary_code: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum SegmentLabel {
  /// Full name segment.
  #[serde(rename = "[NS]")]
  NameSegment,
  /// Run of initials.
  #[serde(rename = "[NI]")]
  NameInitial,
}

impl fmt::Display for SegmentLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SegmentLabel::NameSegment => f.write_str("[NS]"),
      SegmentLabel::NameInitial => f.write_str("[NI]"),
    }
  }
}

/// A segment placed in the pool of units of one of the compared names.
///
/// `slot` is unique within a pool and is the only identity the assignment
/// considers: two units with the same text and codes are still matched
/// independently.
#[derive(Clone, Debug)]
pub struct LabeledSegment {
  pub slot: usize,
  pub label: SegmentLabel,
  pub segment: Segment,
}

#[derive(Clone, Debug)]
pub struct CandidatePair<'p> {
  pub target: &'p LabeledSegment,
  pub reference: &'p LabeledSegment,
  pub score: f64,
  pub match_type: MatchType,
}

/// A pairing retained by the assignment, detached from the unit pools.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentMatch {
  pub target_text: String,
  pub reference_text: String,
  pub target_label: SegmentLabel,
  pub reference_label: SegmentLabel,
  pub score: f64,
  pub match_type: MatchType,
}

impl From<&CandidatePair<'_>> for SegmentMatch {
  fn from(pair: &CandidatePair<'_>) -> Self {
    SegmentMatch {
      target_text: pair.target.segment.original_text.clone(),
      reference_text: pair.reference.segment.original_text.clone(),
      target_label: pair.target.label,
      reference_label: pair.reference.label,
      score: pair.score,
      match_type: pair.match_type,
    }
  }
}

/// Outcome of comparing a target name against a reference name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchResult {
  /// Aggregate score, between 0 and 100, rounded to two decimals.
  pub score: f64,
  /// Number of units in the target name.
  pub n: usize,
  pub target: String,
  pub reference: String,
  /// Retained pairings, by descending score.
  pub matches: Vec<SegmentMatch>,
  /// Scores (0-100) of the pairings used in the aggregate.
  pub all_scores: Vec<f64>,
}

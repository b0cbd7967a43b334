mod config;
mod error;
mod labels;
mod matcher;
mod model;

pub mod matching;

pub mod prelude {
  pub use crate::config::{AliasTable, DEFAULT_PHONETIC_WEIGHT, DEFAULT_WORD_SIMILARITY_WEIGHT, MatcherConfig};
  pub use crate::error::NameMatchError;
  pub use crate::labels::{LabelThresholds, MatchLabel};
  pub use crate::matcher::NameMatcher;
  pub use crate::matching::{
    phonetic::PhoneticEncoder,
    scorer::{CodePairing, MatchType, PairScorer},
    segmenter::{NameProfile, NameSegmenter},
  };
  pub use crate::model::{CandidatePair, LabeledSegment, MatchResult, Segment, SegmentLabel, SegmentMatch};
}

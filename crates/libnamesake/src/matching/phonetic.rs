use rphonetic::DoubleMetaphone;

use crate::model::Segment;

/// Shortest code length limit, the usual Double Metaphone length.
const MIN_CODE_LENGTH: usize = 4;

/// Double Metaphone encoder for name units.
///
/// Codes are never truncated: names that only differ after their fourth
/// consonant sound must not get identical codes. Units are expected to be made
/// of ASCII letters only, which is what the tokenizer produces.
#[derive(Clone, Debug, Default)]
pub struct PhoneticEncoder;

impl PhoneticEncoder {
  pub fn new() -> PhoneticEncoder {
    PhoneticEncoder
  }

  /// Encode every unit, keeping its position as the segment index.
  pub fn encode<S: AsRef<str>>(&self, units: &[S]) -> Vec<Segment> {
    units.iter().enumerate().map(|(index, unit)| self.encode_one(unit.as_ref(), index)).collect()
  }

  fn encode_one(&self, unit: &str, index: usize) -> Segment {
    // A letter yields at most two code characters ("X" is "KS").
    let encoder = DoubleMetaphone::new((unit.len() * 2).max(MIN_CODE_LENGTH).into());
    let codes = encoder.double_metaphone(unit);
    let primary = codes.primary();
    let alternate = codes.alternate();

    let secondary_code = if alternate.is_empty() || alternate == primary { None } else { Some(alternate) };

    Segment {
      original_text: unit.to_string(),
      index,
      primary_code: primary,
      secondary_code,
    }
  }
}

use std::{borrow::Cow, sync::LazyLock};

use any_ascii::any_ascii;
use regex::Regex;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static ALPHA_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]+").unwrap());

/// Lowercase a name, collapse whitespace runs into single spaces and trim it.
pub fn normalize(text: &str) -> String {
  WHITESPACE_REGEX.replace_all(&text.to_lowercase(), " ").trim().to_string()
}

/// Extract the runs of ASCII letters from a text.
///
/// Any other character separates tokens and is dropped.
pub fn tokenize(text: &str) -> Vec<String> {
  ALPHA_REGEX.find_iter(text).map(|token| token.as_str().to_string()).collect()
}

pub(crate) fn latinize(value: &str) -> Cow<'_, str> {
  if value.is_ascii() {
    return Cow::Borrowed(value);
  }

  Cow::Owned(any_ascii(value))
}

/// Latinize a raw name when transliteration is enabled.
pub(crate) fn prepare(name: &str, transliterate: bool) -> Cow<'_, str> {
  match transliterate {
    true => latinize(name),
    false => Cow::Borrowed(name),
  }
}

/// Produce the tokens used for segmentation from a raw name.
pub(crate) fn name_tokens(name: &str, transliterate: bool) -> Vec<String> {
  tokenize(&normalize(&prepare(name, transliterate)))
}

#[cfg(test)]
mod tests {
  #[test]
  fn normalize() {
    assert_eq!(super::normalize("  John\t\tSMITH \n"), "john smith");
    assert_eq!(super::normalize("J.K.   Rowling"), "j.k. rowling");
    assert_eq!(super::normalize(""), "");
    assert_eq!(super::normalize(" \t\n "), "");
  }

  #[test]
  fn tokenize() {
    assert_eq!(super::tokenize("j.k. rowling"), vec!["j", "k", "rowling"]);
    assert_eq!(super::tokenize("o'brien-smith3rd"), vec!["o", "brien", "smith", "rd"]);
    assert_eq!(super::tokenize("1234 !!"), Vec::<String>::new());
    assert_eq!(super::tokenize(""), Vec::<String>::new());
  }

  #[test]
  fn tokenize_non_ascii() {
    assert_eq!(super::tokenize("muñoz"), vec!["mu", "oz"]);
  }

  #[test]
  fn latinize() {
    assert_eq!(super::latinize("Muñoz"), "Munoz");
    assert_eq!(super::latinize("Светлана"), "Svetlana");
    assert_eq!(super::latinize("plain"), "plain");
  }

  #[test]
  fn name_tokens() {
    assert_eq!(super::name_tokens("José  Muñoz", false), vec!["jos", "mu", "oz"]);
    assert_eq!(super::name_tokens("José  Muñoz", true), vec!["jose", "munoz"]);
    assert_eq!(super::name_tokens("Abu-Bakar, 2nd", false), vec!["abu", "bakar", "nd"]);
  }
}

use libnamesake::prelude::*;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use validator::Validate;

#[serde_inline_default]
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MatchParams {
  #[serde_inline_default(false)]
  pub explain: bool,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct Payload {
  #[validate(length(max = 1024, message = "name1 must be at most 1024 characters"))]
  pub name1: String,
  #[validate(length(max = 1024, message = "name2 must be at most 1024 characters"))]
  pub name2: String,
}

#[derive(Serialize)]
pub(super) struct MatchResponse {
  pub similarity_score: f64,
  pub similarity_label: MatchLabel,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<MatchResult>,
}

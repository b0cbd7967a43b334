mod match_names;

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use libnamesake::prelude::*;

use crate::api::AppState;
use crate::api::errors::AppError;

pub use self::match_names::match_names;

pub async fn not_found() -> impl IntoResponse {
  AppError::ResourceNotFound
}

pub async fn healthz() -> StatusCode {
  StatusCode::OK
}

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
  match is_ready(&state.matcher) {
    true => StatusCode::OK,
    false => StatusCode::SERVICE_UNAVAILABLE,
  }
}

/// Check the matcher can segment a name, without scoring it.
///
/// Scoring would record readiness checks in the scoring histograms.
pub(crate) fn is_ready(matcher: &NameMatcher) -> bool {
  !matcher.profile("ready").is_empty()
}

pub async fn prometheus(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
  match state.prometheus {
    Some(handle) => Ok(handle.render()),
    None => Err(AppError::ResourceNotFound),
  }
}

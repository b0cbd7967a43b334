use axum::{Json, extract::Query, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use metrics::counter;
use tracing::instrument;

use crate::api::errors::AppError;
use crate::api::middlewares::auth::Auth;
use crate::api::{
  AppState,
  dto::{MatchParams, MatchResponse, Payload},
  middlewares::json_rejection::TypedJson,
};

#[instrument(skip_all)]
pub async fn match_names(
  State(state): State<AppState>,
  _: Auth,
  WithRejection(Query(query), _): WithRejection<Query<MatchParams>, AppError>,
  TypedJson(body): TypedJson<Payload>,
) -> Result<(StatusCode, impl IntoResponse), AppError> {
  let result = state.matcher.compare(&body.name1, &body.name2);
  let label = state.matcher.label(result.score);

  counter!("namesake_matches_total", "label" => label.as_str()).increment(1);

  let response = MatchResponse {
    similarity_score: result.score,
    similarity_label: label,
    details: query.explain.then_some(result),
  };

  Ok((StatusCode::OK, Json(response)))
}

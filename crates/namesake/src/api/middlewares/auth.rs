use axum::{
  RequestPartsExt,
  extract::{FromRef, FromRequestParts},
  http::request::Parts,
};
use axum_extra::{
  TypedHeader,
  headers::{Authorization, authorization::Bearer},
};

use crate::api::{AppState, errors::AppError};

/// Guard requiring a bearer token when an API key is configured.
pub(crate) struct Auth;

impl<S> FromRequestParts<S> for Auth
where
  S: Send + Sync,
  AppState: FromRef<S>,
{
  type Rejection = AppError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let app_state = AppState::from_ref(state);

    let Some(api_key) = app_state.config.api_key.as_deref() else {
      return Ok(Auth);
    };

    let Ok(TypedHeader(Authorization(bearer))) = parts.extract::<TypedHeader<Authorization<Bearer>>>().await else {
      return Err(AppError::InvalidCredentials);
    };

    if bearer.token() != api_key {
      return Err(AppError::InvalidCredentials);
    }

    Ok(Auth)
  }
}

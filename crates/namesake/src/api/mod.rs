use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::Request,
  middleware,
  routing::{get, post},
};
use libnamesake::prelude::*;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
  api::{config::Config, errors::AppError, middlewares::RequestId},
  trace::build_prometheus,
};

pub mod config;
pub mod dto;
pub mod errors;

pub mod handlers;
mod middlewares;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<Config>,
  pub prometheus: Option<PrometheusHandle>,
  pub matcher: NameMatcher,
}

impl AppState {
  pub fn new(config: Config, prometheus: Option<PrometheusHandle>) -> Result<AppState, AppError> {
    let matcher = NameMatcher::new(config.matcher.clone())?;

    Ok(AppState {
      config: Arc::new(config),
      prometheus,
      matcher,
    })
  }
}

pub fn routes(config: Config) -> Result<Router, AppError> {
  let prometheus = match config.enable_prometheus {
    true => Some(build_prometheus().map_err(|err| AppError::ConfigError(format!("could not install prometheus recorder: {err}")))?),
    false => None,
  };

  Ok(router(AppState::new(config, prometheus)?))
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/match", post(handlers::match_names))
    .fallback(handlers::not_found)
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| middlewares::request_span(req.extensions().get::<RequestId>())))
        .layer(middleware::from_fn(middlewares::metrics)),
    )
    // The routes below will not go through the observability middlewares above
    .route("/healthz", get(handlers::healthz))
    .route("/readyz", get(handlers::readyz))
    .route("/metrics", get(handlers::prometheus))
    .layer(middleware::from_fn(middlewares::logging::api_logger))
    .layer(middleware::from_fn(middlewares::request_id))
    .with_state(state)
}

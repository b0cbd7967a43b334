use crate::api::{AppState, config::Config};


pub(crate) fn state(config: Config) -> AppState {
  AppState::new(config, None).unwrap()
}

//! Builders wiring domain services onto their storage adapters.

use std::sync::Arc;

use actix_web::web;

use users_backend::domain::UserService;
use users_backend::inbound::http::state::HttpState;
use users_backend::outbound::persistence::InMemoryUserRepository;

use super::ServerConfig;

/// Build handler state over a fresh in-memory store.
///
/// One `UserService` backs both the command and query ports so reads observe
/// every write.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository = Arc::new(InMemoryUserRepository::new(config.clock.clone()));
    let service = Arc::new(UserService::new(repository));
    web::Data::new(HttpState::new(service.clone(), service))
}

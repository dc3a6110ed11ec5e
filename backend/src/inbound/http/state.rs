//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Mutating user use-cases.
    pub users: Arc<dyn UsersCommand>,
    /// Read-only user use-cases.
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// One service usually backs both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use users_backend::domain::UserService;
    /// use users_backend::inbound::http::state::HttpState;
    /// use users_backend::outbound::persistence::InMemoryUserRepository;
    ///
    /// let repo = Arc::new(InMemoryUserRepository::new(Arc::new(DefaultClock)));
    /// let service = Arc::new(UserService::new(repo));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.users_query.clone();
    /// ```
    pub fn new(users: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self { users, users_query }
    }
}

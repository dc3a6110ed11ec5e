//! User persistence adapters.
//!
//! The process keeps users in memory; swapping in a durable store means
//! providing another [`crate::domain::ports::UserRepository`] implementation
//! and wiring it in the server bootstrap.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use users_backend::outbound::persistence::InMemoryUserRepository;
//!
//! let repo = InMemoryUserRepository::new(Arc::new(DefaultClock));
//! assert_eq!(repo.len(), 0);
//! ```

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;

//! Driven port for user storage.
//!
//! Adapters own id assignment and creation timestamps. They must also guard
//! the email uniqueness invariant at write time: a `create` or `update` that
//! would leave two records with one email fails with
//! [`UserPersistenceError::DuplicateEmail`], even if the domain's own lookup
//! raced with a concurrent writer.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another record already holds the email.
        DuplicateEmail { email: String } => "email already stored: {email}",
    }
}

/// Storage contract consumed by the user domain service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the user holding `email`, if any.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user, assigning its id and creation timestamp.
    async fn create(&self, new_user: NewUser) -> Result<User, UserPersistenceError>;

    /// Merge `patch` into the stored record.
    ///
    /// Returns `None` when no record exists for `id`.
    async fn update(
        &self,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user. Returns `true` when a record existed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;

    /// Every stored user, in insertion order.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}

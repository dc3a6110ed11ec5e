//! User domain service.
//!
//! The only place user business rules are enforced: field validation, the
//! email uniqueness invariant, raised not-found on delete, and statistics.
//! Errors are returned to the caller untouched and never logged here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CreateUserRequest, UpdateUserRequest, UserPersistenceError, UserRepository, UsersCommand,
    UsersQuery,
};
use crate::domain::{EmailAddress, Error, User, UserId, UserStats};

/// Message returned when an email is held by another user.
pub const EMAIL_IN_USE_MESSAGE: &str = "El email ya está en uso";
/// Message returned when a user does not exist.
pub const USER_NOT_FOUND_MESSAGE: &str = "Usuario no encontrado";

/// User service implementing the [`UsersCommand`] and [`UsersQuery`] ports.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use users_backend::domain::UserService;
/// use users_backend::domain::ports::{CreateUserRequest, UsersCommand, UsersQuery};
/// use users_backend::outbound::persistence::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repo = Arc::new(InMemoryUserRepository::new(Arc::new(DefaultClock)));
/// let service = UserService::new(repo);
/// let user = service
///     .create_user(CreateUserRequest {
///         name: "Juan Pérez".into(),
///         email: "juan.perez@example.com".into(),
///         age: 25,
///     })
///     .await
///     .expect("valid user");
/// assert!(user.is_active());
/// assert_eq!(service.user_stats().await.expect("stats").total, 1);
/// # });
/// ```
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service over the given repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_IN_USE_MESSAGE),
        }
    }

    fn parse_id(id: &str) -> Result<UserId, Error> {
        UserId::new(id).map_err(Error::from)
    }

    /// Fail with a conflict when `email` belongs to anyone but `owner`.
    async fn ensure_email_available(
        &self,
        email: &EmailAddress,
        owner: Option<&UserId>,
    ) -> Result<(), Error> {
        let holder = self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(Self::map_persistence_error)?;

        match holder {
            Some(existing) if Some(existing.id()) != owner => Err(Error::conflict(EMAIL_IN_USE_MESSAGE)),
            _ => Ok(()),
        }
    }

    async fn all_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .find_all()
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let fields = request.validate()?;
        self.ensure_email_available(&fields.email, None).await?;

        let user = self
            .user_repo
            .create(fields)
            .await
            .map_err(Self::map_persistence_error)?;
        debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<Option<User>, Error> {
        let id = Self::parse_id(id)?;
        let patch = request.validate()?;
        if let Some(email) = patch.email.as_ref() {
            self.ensure_email_available(email, Some(&id)).await?;
        }

        let updated = self
            .user_repo
            .update(&id, patch)
            .await
            .map_err(Self::map_persistence_error)?;
        if updated.is_some() {
            debug!(user_id = %id, "user updated");
        }
        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> Result<(), Error> {
        let id = Self::parse_id(id)?;
        let existing = self
            .user_repo
            .find_by_id(&id)
            .await
            .map_err(Self::map_persistence_error)?;
        if existing.is_none() {
            return Err(Error::not_found(USER_NOT_FOUND_MESSAGE));
        }

        let removed = self
            .user_repo
            .delete(&id)
            .await
            .map_err(Self::map_persistence_error)?;
        if !removed {
            // Lost a race with a concurrent delete.
            return Err(Error::not_found(USER_NOT_FOUND_MESSAGE));
        }
        debug!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, Error> {
        let id = Self::parse_id(id)?;
        self.user_repo
            .find_by_id(&id)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn list_active_users(&self) -> Result<Vec<User>, Error> {
        let mut users = self.all_users().await?;
        users.retain(User::is_active);
        Ok(users)
    }

    async fn user_stats(&self) -> Result<UserStats, Error> {
        let users = self.all_users().await?;
        Ok(UserStats::from_users(&users))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;

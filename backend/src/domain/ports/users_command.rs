//! Driving port for user mutations.
//!
//! Inbound adapters hand raw field values to this port; validation happens
//! behind it so no adapter can bypass the business rules.

use async_trait::async_trait;

use crate::domain::{
    Age, EmailAddress, Error, NewUser, User, UserName, UserPatch, UserValidationError,
};

/// Raw fields for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Age in years.
    pub age: i64,
}

impl CreateUserRequest {
    /// Validate every field, reporting the first failure.
    ///
    /// Rules run in a fixed order: email shape, age range, then name length.
    pub fn validate(self) -> Result<NewUser, UserValidationError> {
        let Self { name, email, age } = self;
        let email = EmailAddress::new(email)?;
        let age = Age::new(age)?;
        let name = UserName::new(name)?;
        Ok(NewUser { name, email, age })
    }
}

/// Raw fields for a partial update; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
    /// Replacement age.
    pub age: Option<i64>,
    /// Replacement activity flag.
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    /// Validate the supplied fields only, in the same order as creation.
    pub fn validate(self) -> Result<UserPatch, UserValidationError> {
        let Self {
            name,
            email,
            age,
            is_active,
        } = self;
        let email = email.map(EmailAddress::new).transpose()?;
        let age = age.map(Age::new).transpose()?;
        let name = name.map(UserName::new).transpose()?;
        Ok(UserPatch {
            name,
            email,
            age,
            is_active,
        })
    }
}

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new user.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Apply a partial update. Returns `None` when `id` is unknown.
    async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<Option<User>, Error>;

    /// Delete a user. Unknown ids are an error, not a no-op.
    async fn delete_user(&self, id: &str) -> Result<(), Error>;
}

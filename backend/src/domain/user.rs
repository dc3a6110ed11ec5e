//! User data model and field validation.
//!
//! Raw input only becomes a [`User`] field after passing through one of the
//! validated newtypes below, so an invalid value can never reach storage.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Minimum number of characters in a trimmed user name.
pub const NAME_MIN_CHARS: usize = 2;
/// Youngest accepted age.
pub const AGE_MIN: i64 = 0;
/// Oldest accepted age.
pub const AGE_MAX: i64 = 120;

/// Validation failures for user input.
///
/// The display strings are matched on by API clients and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email does not have the `local@domain.tld` shape.
    #[error("Email inválido")]
    InvalidEmail,
    /// Age outside `[AGE_MIN, AGE_MAX]`.
    #[error("Edad debe estar entre 0 y 120 años")]
    AgeOutOfRange,
    /// Trimmed name shorter than [`NAME_MIN_CHARS`].
    #[error("El nombre debe tener al menos 2 caracteres")]
    NameTooShort,
    /// Identifier empty or whitespace only.
    #[error("ID de usuario requerido")]
    MissingId,
}

impl From<UserValidationError> for Error {
    fn from(value: UserValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Opaque user identifier assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate a caller-supplied identifier.
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::{UserId, UserValidationError};
    ///
    /// assert!(UserId::new("42").is_ok());
    /// assert_eq!(UserId::new("  "), Err(UserValidationError::MissingId));
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::MissingId);
        }
        Ok(Self(id))
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Structural check only; not RFC 5322.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address with a `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate an email address.
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("juan.perez@example.com").is_ok());
    /// assert!(EmailAddress::new("invalid-email").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// User name with at least [`NAME_MIN_CHARS`] characters once trimmed.
///
/// The original spelling, surrounding whitespace included, is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate a user name.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().chars().count() < NAME_MIN_CHARS {
            return Err(UserValidationError::NameTooShort);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Age in whole years, within `[AGE_MIN, AGE_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Age(u8);

impl Age {
    /// Validate an age.
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::Age;
    ///
    /// assert!(Age::new(0).is_ok());
    /// assert!(Age::new(120).is_ok());
    /// assert!(Age::new(121).is_err());
    /// ```
    pub fn new(age: i64) -> Result<Self, UserValidationError> {
        if !(AGE_MIN..=AGE_MAX).contains(&age) {
            return Err(UserValidationError::AgeOutOfRange);
        }
        u8::try_from(age)
            .map(Self)
            .map_err(|_| UserValidationError::AgeOutOfRange)
    }

    /// Age in years.
    #[must_use]
    pub fn years(self) -> u8 {
        self.0
    }
}

impl From<Age> for u8 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Age {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated fields for a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: UserName,
    /// Unique email address.
    pub email: EmailAddress,
    /// Age in years.
    pub age: Age,
}

/// Validated partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement name.
    pub name: Option<UserName>,
    /// Replacement email.
    pub email: Option<EmailAddress>,
    /// Replacement age.
    pub age: Option<Age>,
    /// Replacement activity flag.
    pub is_active: Option<bool>,
}

/// Registered user.
///
/// ## Invariants
/// - `id` and `created_at` never change after creation.
/// - `name`, `email` and `age` always satisfy their validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    age: Age,
    created_at: DateTime<Utc>,
    is_active: bool,
}

impl User {
    /// Materialise a freshly stored user. New users start active.
    #[must_use]
    pub fn new(id: UserId, fields: NewUser, created_at: DateTime<Utc>) -> Self {
        let NewUser { name, email, age } = fields;
        Self {
            id,
            name,
            email,
            age,
            created_at,
            is_active: true,
        }
    }

    /// Merge a partial update over this record.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use users_backend::domain::{Age, EmailAddress, NewUser, User, UserId, UserName, UserPatch};
    ///
    /// let mut user = User::new(
    ///     UserId::from(1),
    ///     NewUser {
    ///         name: UserName::new("Ada").expect("name"),
    ///         email: EmailAddress::new("ada@example.com").expect("email"),
    ///         age: Age::new(36).expect("age"),
    ///     },
    ///     Utc::now(),
    /// );
    /// user.apply(UserPatch { age: Some(Age::new(37).expect("age")), ..UserPatch::default() });
    /// assert_eq!(user.age().years(), 37);
    /// assert_eq!(user.email().as_ref(), "ada@example.com");
    /// ```
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            name,
            email,
            age,
            is_active,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(age) = age {
            self.age = age;
        }
        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
    }

    /// Storage-assigned identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name as supplied.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Unique email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Age in years.
    #[must_use]
    pub fn age(&self) -> Age {
        self.age
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the user is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

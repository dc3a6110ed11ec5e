//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed user entities and the business rules that
//! govern them. Adapters depend on this module; it depends on no adapter.
//!
//! Public surface:
//! - Error (alias to `error::Error`): domain failure with a stable code.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): stored user record.
//! - UserStats (alias to `user_stats::UserStats`): directory aggregates.
//! - UserService (alias to `user_service::UserService`): implements the
//!   driving ports over a [`ports::UserRepository`].

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod user_stats;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AGE_MAX, AGE_MIN, Age, EmailAddress, NAME_MIN_CHARS, NewUser, User, UserId, UserName,
    UserPatch, UserValidationError,
};
pub use self::user_service::{EMAIL_IN_USE_MESSAGE, USER_NOT_FOUND_MESSAGE, UserService};
pub use self::user_stats::UserStats;

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use users_backend::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("Usuario no encontrado"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;

//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`UsersCommand`], [`UsersQuery`]) are called by inbound
//! adapters; the driven port ([`UserRepository`]) is implemented by outbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{CreateUserRequest, UpdateUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

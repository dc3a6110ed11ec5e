//! Driving port for user-facing reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserStats};

/// Domain use-case port for reading users and directory statistics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Look a user up by id. Absence is `Ok(None)`; a blank id is an error.
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, Error>;

    /// Every user whose activity flag is set.
    async fn list_active_users(&self) -> Result<Vec<User>, Error>;

    /// Totals and mean age across all users.
    async fn user_stats(&self) -> Result<UserStats, Error>;
}

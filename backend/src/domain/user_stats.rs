//! Aggregate statistics over the user directory.

use serde::{Deserialize, Serialize};

use crate::domain::User;

/// Headline counts and mean age across every stored user.
///
/// ## Invariants
/// - `active <= total`.
/// - `average_age` is rounded to two decimals and is `0.0` for an empty
///   directory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Number of users, active or not.
    pub total: usize,
    /// Number of users flagged active.
    pub active: usize,
    /// Mean age of all users.
    pub average_age: f64,
}

impl UserStats {
    /// Compute statistics over a snapshot of users.
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::UserStats;
    ///
    /// let stats = UserStats::from_users(&[]);
    /// assert_eq!(stats, UserStats { total: 0, active: 0, average_age: 0.0 });
    /// ```
    #[must_use]
    pub fn from_users(users: &[User]) -> Self {
        let total = users.len();
        let active = users.iter().filter(|user| user.is_active()).count();
        let age_sum: u64 = users.iter().map(|user| u64::from(user.age().years())).sum();

        Self {
            total,
            active,
            average_age: rounded_mean(age_sum, total),
        }
    }
}

// Age sums and user counts stay far below 2^52, so the casts are exact.
fn rounded_mean(sum: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let mean = sum as f64 / count as f64;
    (mean * 100.0).round() / 100.0
}

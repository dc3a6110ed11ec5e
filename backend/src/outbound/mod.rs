//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: user storage adapters
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic beyond the write-time
//! uniqueness guard the repository port requires.

pub mod persistence;

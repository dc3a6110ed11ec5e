//! Request middleware.
//!
//! Purpose: request lifecycle concerns that apply to every route, currently
//! trace correlation and access logging.

pub mod trace;

pub use trace::Trace;

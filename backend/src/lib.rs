//! Users backend library modules.
//!
//! A small user directory built as a hexagon: [`domain`] holds the rules,
//! [`inbound`] and [`outbound`] hold the HTTP and storage adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

//! Cake manager service library.
//!
//! The domain layer holds cake rules and ports; `inbound` and `outbound`
//! adapt it to HTTP and storage; `server` composes them into an Actix app.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

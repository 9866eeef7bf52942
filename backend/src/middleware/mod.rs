//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing, query sanitization and response hardening headers.

pub mod sanitize;
pub mod trace;

use actix_web::middleware::DefaultHeaders;

pub use sanitize::SanitizeQuery;
pub use trace::Trace;

/// Content security policy applied to every response.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self'; \
style-src 'self' 'unsafe-inline'; img-src 'self' data:; font-src 'self'; \
object-src 'none'; frame-ancestors 'none'; base-uri 'self';";

/// Default headers forbidding framing, MIME sniffing and foreign content.
///
/// Headers already set by a handler are left untouched.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Content-Security-Policy", CONTENT_SECURITY_POLICY))
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
}

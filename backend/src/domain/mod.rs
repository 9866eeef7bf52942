//! Domain primitives, services and ports.
//!
//! Purpose: hold the cake catalogue core. Nothing here knows about HTTP,
//! SQL or any other transport; inbound and outbound adapters depend on this
//! module, never the other way round.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Cake, CakeId, Price, CakeRecord: the catalogue entity and its write model.
//! - CakeRequest: sanitized create/update input.
//! - CakeService: orchestration of the five catalogue operations.
//! - CakeServiceError: classified failure raised by the service.
//! - TraceId: request-scoped correlation identifier.

pub mod cake;
pub mod cake_service;
pub mod error;
pub mod ports;
pub mod sanitizer;
pub mod trace_id;
pub mod validation;

pub use self::cake::{
    Cake, CakeCreateRequest, CakeId, CakeRecord, CakeRequest, CakeUpdateRequest, Price,
    PriceValidationError,
};
pub use self::cake_service::{CakeService, CakeServiceError, CakeServiceErrorKind};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::sanitizer::{SanitizedText, sanitize_field, sanitize_request_parameters};
pub use self::trace_id::TraceId;
pub use self::validation::{
    CakeValidationError, FieldViolation, ValidCake, validate_cake_request,
};

/// HTTP header name used to propagate trace identifiers.
///
/// # Examples
/// ```
/// use cake_manager::domain::TRACE_ID_HEADER;
///
/// assert_eq!(TRACE_ID_HEADER, "trace-id");
/// ```
pub const TRACE_ID_HEADER: &str = "trace-id";

//! Cake catalogue service.
//!
//! Implements the [`CakeCommand`] and [`CakeQuery`] driving ports on top of
//! a [`CakeRepository`]. Every operation validates before touching storage,
//! re-reads from storage rather than caching, and classifies failures into a
//! [`CakeServiceError`] with an explicit [`CakeServiceErrorKind`] and a
//! stable `CS:xx` tag.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{CakeCommand, CakeQuery, CakeRepository, CakeRepositoryError};
use crate::domain::{
    Cake, CakeCreateRequest, CakeId, CakeRecord, CakeUpdateRequest, Error, ValidCake,
    validate_cake_request,
};

const CAKE_DOES_NOT_EXIST: &str = "Cake does not exist for id : ";

/// Classification of a [`CakeServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CakeServiceErrorKind {
    /// The request broke a cake constraint. Raised before storage is used.
    Validation,
    /// The identifier did not resolve to a cake.
    NotFound,
    /// Storage or runtime fault.
    Operational,
}

/// Classified failure raised by [`CakeService`].
///
/// `errors` holds granular, client-presentable strings. For operational
/// failures the underlying repository error is kept as the source for
/// logging and is never part of `errors`.
///
/// # Examples
/// ```
/// use cake_manager::domain::{CakeId, CakeServiceError, CakeServiceErrorKind};
///
/// let err = CakeServiceError::not_found("CS:06", "Failed to find Cake", CakeId::new(3));
/// assert_eq!(err.kind(), CakeServiceErrorKind::NotFound);
/// assert_eq!(err.to_string(), "CS:06: Failed to find Cake. ID = 3");
/// assert_eq!(err.errors(), ["Cake does not exist for id : 3"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CakeServiceError {
    kind: CakeServiceErrorKind,
    tag: &'static str,
    message: String,
    errors: Vec<String>,
    #[source]
    source: Option<CakeRepositoryError>,
}

impl CakeServiceError {
    /// Constraint violations found in a request.
    pub fn validation(tag: &'static str, message: &str, violations: Vec<String>) -> Self {
        Self {
            kind: CakeServiceErrorKind::Validation,
            tag,
            message: format!("{tag}: {message}"),
            errors: violations,
            source: None,
        }
    }

    /// Cake `id` does not exist.
    pub fn not_found(tag: &'static str, message: &str, id: CakeId) -> Self {
        Self {
            kind: CakeServiceErrorKind::NotFound,
            tag,
            message: format!("{tag}: {message}. ID = {id}"),
            errors: vec![format!("{CAKE_DOES_NOT_EXIST}{id}")],
            source: None,
        }
    }

    /// Storage fault while performing an operation.
    pub fn operational(tag: &'static str, message: String, source: CakeRepositoryError) -> Self {
        let message = format!("{tag}: {message}");
        Self {
            kind: CakeServiceErrorKind::Operational,
            tag,
            errors: vec![message.clone()],
            message,
            source: Some(source),
        }
    }

    /// Failure classification.
    pub fn kind(&self) -> CakeServiceErrorKind {
        self.kind
    }

    /// Stable operation tag such as `CS:02`.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Tagged human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Granular error strings in the order they were raised.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Underlying repository failure, for operational errors.
    pub fn cause(&self) -> Option<&CakeRepositoryError> {
        self.source.as_ref()
    }
}

impl From<CakeServiceError> for Error {
    fn from(value: CakeServiceError) -> Self {
        let error = match value.kind {
            CakeServiceErrorKind::Validation => Error::invalid_request(value.message),
            CakeServiceErrorKind::NotFound => Error::not_found(value.message),
            CakeServiceErrorKind::Operational => Error::internal(value.message),
        };
        error.with_errors(value.errors)
    }
}

/// Cake service implementing the driving ports.
#[derive(Clone)]
pub struct CakeService<R> {
    repository: Arc<R>,
}

impl<R> CakeService<R> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> CakeService<R>
where
    R: CakeRepository,
{
    fn validate(
        request: CakeCreateRequest,
        tag: &'static str,
        message: &str,
    ) -> Result<ValidCake, CakeServiceError> {
        validate_cake_request(request).map_err(|err| {
            debug!(tag, violations = %err, "rejected invalid cake request");
            CakeServiceError::validation(tag, message, err.messages())
        })
    }

    fn storage_failure(
        tag: &'static str,
        message: String,
    ) -> impl FnOnce(CakeRepositoryError) -> CakeServiceError {
        move |source| {
            error!(tag, error = %source, "{message}");
            CakeServiceError::operational(tag, message, source)
        }
    }

    fn missing(tag: &'static str, message: &str, id: CakeId) -> CakeServiceError {
        debug!(tag, cake_id = %id, "cake not found");
        CakeServiceError::not_found(tag, message, id)
    }

    async fn find_existing(
        &self,
        id: CakeId,
        not_found_tag: &'static str,
        failure_tag: &'static str,
        message: &str,
    ) -> Result<Cake, CakeServiceError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::storage_failure(failure_tag, format!("{message}. ID = {id}")))?
            .ok_or_else(|| Self::missing(not_found_tag, message, id))
    }
}

#[async_trait]
impl<R> CakeCommand for CakeService<R>
where
    R: CakeRepository,
{
    async fn add_new_cake(&self, request: CakeCreateRequest) -> Result<CakeId, CakeServiceError> {
        const MESSAGE: &str = "Failed to Create new Cake";
        let cake = Self::validate(request, "CS:01", MESSAGE)?;
        let stored = self
            .repository
            .save(&CakeRecord::new(cake))
            .await
            .map_err(Self::storage_failure("CS:01", MESSAGE.to_owned()))?;
        Ok(stored.id())
    }

    async fn update_cake(
        &self,
        id: CakeId,
        request: CakeUpdateRequest,
    ) -> Result<Cake, CakeServiceError> {
        const MESSAGE: &str = "Failed to Update Cake";
        let cake = Self::validate(request, "CS:03", &format!("{MESSAGE}. ID = {id}"))?;
        self.find_existing(id, "CS:02", "CS:03", MESSAGE).await?;
        self.repository
            .save(&CakeRecord::with_id(id, cake))
            .await
            .map_err(Self::storage_failure("CS:03", format!("{MESSAGE}. ID = {id}")))?;
        self.find_existing(id, "CS:02", "CS:03", MESSAGE).await
    }

    async fn delete_cake(&self, id: CakeId) -> Result<(), CakeServiceError> {
        const MESSAGE: &str = "Failed to Delete Cake";
        let cake = self.find_existing(id, "CS:04", "CS:05", MESSAGE).await?;
        self.repository
            .delete(&cake)
            .await
            .map_err(Self::storage_failure("CS:05", format!("{MESSAGE}. ID = {id}")))
    }
}

#[async_trait]
impl<R> CakeQuery for CakeService<R>
where
    R: CakeRepository,
{
    async fn get_cake(&self, id: CakeId) -> Result<Cake, CakeServiceError> {
        self.find_existing(id, "CS:06", "CS:07", "Failed to find Cake")
            .await
    }

    async fn get_all_cakes(&self) -> Result<Vec<Cake>, CakeServiceError> {
        self.repository
            .find_all()
            .await
            .map_err(Self::storage_failure("CS:08", "Failed to list Cakes".to_owned()))
    }
}

#[cfg(test)]
#[path = "cake_service_tests.rs"]
mod tests;

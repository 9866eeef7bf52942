//! Driving port for cake mutations.
//!
//! Inbound adapters call this port instead of reaching for the service
//! implementation, so HTTP handlers can be tested against a mock.

use async_trait::async_trait;

use crate::domain::{Cake, CakeCreateRequest, CakeId, CakeServiceError, CakeUpdateRequest};

/// Domain use-case port for creating, replacing and removing cakes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CakeCommand: Send + Sync {
    /// Validate and store a new cake, returning its identifier.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example() -> Result<(), cake_manager::domain::CakeServiceError> {
    /// use std::sync::Arc;
    /// use cake_manager::domain::{CakeRequest, CakeService};
    /// use cake_manager::domain::ports::{CakeCommand, FixtureCakeRepository};
    /// use rust_decimal::Decimal;
    ///
    /// let service = CakeService::new(Arc::new(FixtureCakeRepository));
    /// let request = CakeRequest::from_raw(Some("Chocolate"), Some(Decimal::new(999, 2)), None);
    /// let id = service.add_new_cake(request).await?;
    /// assert_eq!(id.get(), 1);
    /// # Ok(())
    /// # }
    /// ```
    async fn add_new_cake(&self, request: CakeCreateRequest) -> Result<CakeId, CakeServiceError>;

    /// Overwrite every mutable field of an existing cake and return the
    /// state re-read from storage.
    async fn update_cake(
        &self,
        id: CakeId,
        request: CakeUpdateRequest,
    ) -> Result<Cake, CakeServiceError>;

    /// Remove an existing cake.
    async fn delete_cake(&self, id: CakeId) -> Result<(), CakeServiceError>;
}

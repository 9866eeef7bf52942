//! Driving port for cake reads.

use async_trait::async_trait;

use crate::domain::{Cake, CakeId, CakeServiceError};

/// Domain use-case port for reading cakes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CakeQuery: Send + Sync {
    /// Fetch one cake.
    async fn get_cake(&self, id: CakeId) -> Result<Cake, CakeServiceError>;

    /// Fetch every cake in storage order. Empty when there are none.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example() -> Result<(), cake_manager::domain::CakeServiceError> {
    /// use std::sync::Arc;
    /// use cake_manager::domain::CakeService;
    /// use cake_manager::domain::ports::{CakeQuery, FixtureCakeRepository};
    ///
    /// let service = CakeService::new(Arc::new(FixtureCakeRepository));
    /// assert!(service.get_all_cakes().await?.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    async fn get_all_cakes(&self) -> Result<Vec<Cake>, CakeServiceError>;
}

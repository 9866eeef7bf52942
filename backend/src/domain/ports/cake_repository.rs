//! Port for cake persistence.
//!
//! The [`CakeRepository`] trait is the only way the domain touches storage.
//! Adapters translate their own failures into [`CakeRepositoryError`] so the
//! service can classify them without knowing which backend is in use.

use async_trait::async_trait;

use crate::domain::{Cake, CakeId, CakeRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by cake repository adapters.
    pub enum CakeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "cake repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "cake repository query failed: {message}",
    }
}

/// Port for cake storage and retrieval.
///
/// # Ordering
///
/// [`CakeRepository::find_all`] returns cakes in ascending identifier order,
/// which matches insertion order for storage-assigned identifiers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CakeRepository: Send + Sync {
    /// Persist `record`.
    ///
    /// Creates a new cake when `record.id()` is `None` and overwrites every
    /// mutable field of the identified cake otherwise. Returns the stored
    /// state including the assigned identifier.
    async fn save(&self, record: &CakeRecord) -> Result<Cake, CakeRepositoryError>;

    /// Fetch a cake by identifier. `None` when no such cake exists.
    async fn find_by_id(&self, id: CakeId) -> Result<Option<Cake>, CakeRepositoryError>;

    /// Fetch every stored cake.
    async fn find_all(&self) -> Result<Vec<Cake>, CakeRepositoryError>;

    /// Remove a stored cake.
    async fn delete(&self, cake: &Cake) -> Result<(), CakeRepositoryError>;
}

/// Fixture repository that stores nothing.
///
/// Lookups always miss and writes echo the record back with identifier 1.
/// Useful where a repository is required but its behaviour is not under
/// test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCakeRepository;

#[async_trait]
impl CakeRepository for FixtureCakeRepository {
    async fn save(&self, record: &CakeRecord) -> Result<Cake, CakeRepositoryError> {
        let id = record.id().unwrap_or(CakeId::new(1));
        Ok(record.clone().into_cake(id))
    }

    async fn find_by_id(&self, _id: CakeId) -> Result<Option<Cake>, CakeRepositoryError> {
        Ok(None)
    }

    async fn find_all(&self) -> Result<Vec<Cake>, CakeRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _cake: &Cake) -> Result<(), CakeRepositoryError> {
        Ok(())
    }
}

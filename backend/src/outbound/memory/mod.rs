//! Process-local cake storage.
//!
//! Used when no database is configured and in integration tests. Contents
//! are lost when the process exits.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{CakeRepository, CakeRepositoryError};
use crate::domain::{Cake, CakeId, CakeRecord};

#[derive(Debug)]
struct Store {
    cakes: BTreeMap<CakeId, Cake>,
    next_id: i32,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            cakes: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory [`CakeRepository`] backed by an ordered map.
///
/// Identifiers start at 1 and are never reused, so ascending id order is
/// insertion order. Clones share the same storage.
///
/// # Examples
/// ```
/// use cake_manager::outbound::memory::InMemoryCakeRepository;
///
/// let repository = InMemoryCakeRepository::new();
/// let shared = repository.clone();
/// # let _ = (repository, shared);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCakeRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryCakeRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, CakeRepositoryError> {
        self.store
            .read()
            .map_err(|_| CakeRepositoryError::query("cake store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, CakeRepositoryError> {
        self.store
            .write()
            .map_err(|_| CakeRepositoryError::query("cake store lock poisoned"))
    }
}

#[async_trait]
impl CakeRepository for InMemoryCakeRepository {
    async fn save(&self, record: &CakeRecord) -> Result<Cake, CakeRepositoryError> {
        let mut store = self.write()?;
        let id = match record.id() {
            Some(id) if store.cakes.contains_key(&id) => id,
            Some(_) => return Err(CakeRepositoryError::query("record not found")),
            None => {
                let id = CakeId::new(store.next_id);
                store.next_id = store
                    .next_id
                    .checked_add(1)
                    .ok_or_else(|| CakeRepositoryError::query("cake identifiers exhausted"))?;
                id
            }
        };
        let cake = record.clone().into_cake(id);
        store.cakes.insert(id, cake.clone());
        Ok(cake)
    }

    async fn find_by_id(&self, id: CakeId) -> Result<Option<Cake>, CakeRepositoryError> {
        Ok(self.read()?.cakes.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Cake>, CakeRepositoryError> {
        Ok(self.read()?.cakes.values().cloned().collect())
    }

    async fn delete(&self, cake: &Cake) -> Result<(), CakeRepositoryError> {
        self.write()?.cakes.remove(&cake.id());
        Ok(())
    }
}

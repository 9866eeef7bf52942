//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CakeCommand, CakeQuery};
use crate::inbound::http::auth::AccountDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cakes: Arc<dyn CakeCommand>,
    pub cakes_query: Arc<dyn CakeQuery>,
    pub accounts: Arc<AccountDirectory>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use cake_manager::domain::CakeService;
    /// use cake_manager::domain::ports::FixtureCakeRepository;
    /// use cake_manager::inbound::http::auth::AccountDirectory;
    /// use cake_manager::inbound::http::state::HttpState;
    ///
    /// let service = Arc::new(CakeService::new(Arc::new(FixtureCakeRepository)));
    /// let state = HttpState::new(service.clone(), service, AccountDirectory::default());
    /// # let _ = state;
    /// ```
    pub fn new(
        cakes: Arc<dyn CakeCommand>,
        cakes_query: Arc<dyn CakeQuery>,
        accounts: AccountDirectory,
    ) -> Self {
        Self {
            cakes,
            cakes_query,
            accounts: Arc::new(accounts),
        }
    }
}

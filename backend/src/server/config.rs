//! HTTP server configuration object.

use std::net::SocketAddr;

use crate::inbound::http::auth::AccountDirectory;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) accounts: AccountDirectory,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Serve `accounts` on `bind_addr` with in-memory storage.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, accounts: AccountDirectory) -> Self {
        Self {
            bind_addr,
            accounts,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, cakes are stored in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether persistent storage is configured.
    #[must_use]
    pub fn uses_database(&self) -> bool {
        self.db_pool.is_some()
    }
}

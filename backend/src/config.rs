//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `CAKES_*` environment variables, command-line flags or a
//! configuration file, in OrthoConfig's usual precedence.

use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::auth::{Account, AccountDirectory, Role};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ADMIN_USERNAME: &str = "cakemanager";
const DEFAULT_CUSTOMER_USERNAME: &str = "cakeuser";

/// Runtime settings for the cake manager service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAKES")]
pub struct CakeManagerSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL. In-memory storage is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Username of the administrator account.
    pub admin_username: Option<String>,
    /// Password of the administrator account. The account is disabled when
    /// unset.
    pub admin_password: Option<String>,
    /// Username of the read-only customer account.
    pub customer_username: Option<String>,
    /// Password of the customer account. The account is disabled when unset.
    pub customer_password: Option<String>,
}

impl CakeManagerSettings {
    /// Configured bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Configured pool size, defaulting to ten connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Build the account directory from the configured credentials.
    pub fn account_directory(&self) -> AccountDirectory {
        let admin = Account::new(
            self.admin_username
                .as_deref()
                .unwrap_or(DEFAULT_ADMIN_USERNAME),
            self.admin_password.as_deref().unwrap_or_default(),
            Role::Admin,
        );
        let customer = Account::new(
            self.customer_username
                .as_deref()
                .unwrap_or(DEFAULT_CUSTOMER_USERNAME),
            self.customer_password.as_deref().unwrap_or_default(),
            Role::Customer,
        );
        AccountDirectory::new([admin, customer])
    }
}

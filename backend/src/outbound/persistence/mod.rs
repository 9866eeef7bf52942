//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here implement domain ports on top of `diesel-async` with a
//! `bb8` connection pool. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; only domain types cross the
//! boundary, and every database failure is mapped to a port error.
//!
//! # Example
//!
//! ```no_run
//! use cake_manager::outbound::persistence::{DbPool, DieselCakeRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/cakes")).await?;
//! let repository = DieselCakeRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_cake_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cake_repository::DieselCakeRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

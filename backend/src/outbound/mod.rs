//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local storage for database-less runs and tests
//!
//! Adapters only translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;

//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (storage) expose strongly typed errors so adapters map their
//! failures into predictable variants. Driving ports (commands and queries)
//! are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod cake_command;
mod cake_query;
mod cake_repository;

#[cfg(test)]
pub use cake_command::MockCakeCommand;
pub use cake_command::CakeCommand;
#[cfg(test)]
pub use cake_query::MockCakeQuery;
pub use cake_query::CakeQuery;
#[cfg(test)]
pub use cake_repository::MockCakeRepository;
pub use cake_repository::{CakeRepository, CakeRepositoryError, FixtureCakeRepository};

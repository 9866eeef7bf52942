//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::cakes;

/// Row struct for reading from the cakes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cakes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CakeRow {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
}

/// Insertable struct for creating new cake records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cakes)]
pub(crate) struct NewCakeRow<'a> {
    pub name: &'a str,
    pub price: Decimal,
    pub description: Option<&'a str>,
}

/// Changeset overwriting every mutable column, clearing `description` when
/// it is absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = cakes)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CakeUpdate<'a> {
    pub name: &'a str,
    pub price: Decimal,
    pub description: Option<&'a str>,
}

//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// Cake catalogue.
    ///
    /// `price` is `NUMERIC(10, 2)` with a `price > 0` check constraint.
    cakes (id) {
        /// Primary key assigned from a serial sequence.
        id -> Int4,
        /// Display name, at most 100 characters.
        name -> Varchar,
        /// Unit price.
        price -> Numeric,
        /// Optional description, at most 300 characters.
        description -> Nullable<Varchar>,
    }
}

//! PostgreSQL-backed `CakeRepository` implementation using Diesel ORM.
//!
//! Inserts and overwrites use `RETURNING` so the stored state comes back in
//! the same round trip. SQL text and driver messages never reach the domain;
//! they are logged at `debug` and replaced with fixed descriptions.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{CakeRepository, CakeRepositoryError};
use crate::domain::{Cake, CakeId, CakeRecord, Price};

use super::models::{CakeRow, CakeUpdate, NewCakeRow};
use super::pool::{DbPool, PoolError};
use super::schema::cakes;

/// Diesel-backed implementation of the [`CakeRepository`] port.
#[derive(Clone)]
pub struct DieselCakeRepository {
    pool: DbPool,
}

impl DieselCakeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CakeRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CakeRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CakeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => CakeRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => CakeRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CakeRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            CakeRepositoryError::query("constraint violated")
        }
        _ => CakeRepositoryError::query("database error"),
    }
}

/// Convert a stored row into a domain cake.
///
/// Rows violating the positive-price invariant are reported as query
/// failures rather than surfaced as cakes.
fn row_to_cake(row: CakeRow) -> Result<Cake, CakeRepositoryError> {
    let CakeRow {
        id,
        name,
        price,
        description,
    } = row;
    let price = Price::new(price).map_err(|error| {
        warn!(cake_id = id, %error, "stored cake has an invalid price");
        CakeRepositoryError::query("stored cake has an invalid price")
    })?;
    Ok(Cake::new(CakeId::new(id), name, price, description))
}

#[async_trait]
impl CakeRepository for DieselCakeRepository {
    async fn save(&self, record: &CakeRecord) -> Result<Cake, CakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = match record.id() {
            None => {
                let new_row = NewCakeRow {
                    name: record.name(),
                    price: record.price().amount(),
                    description: record.description(),
                };
                diesel::insert_into(cakes::table)
                    .values(&new_row)
                    .returning(CakeRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            Some(id) => {
                let update = CakeUpdate {
                    name: record.name(),
                    price: record.price().amount(),
                    description: record.description(),
                };
                diesel::update(cakes::table.find(id.get()))
                    .set(&update)
                    .returning(CakeRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        row_to_cake(row)
    }

    async fn find_by_id(&self, id: CakeId) -> Result<Option<Cake>, CakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CakeRow> = cakes::table
            .find(id.get())
            .select(CakeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_cake).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Cake>, CakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CakeRow> = cakes::table
            .order(cakes::id.asc())
            .select(CakeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_cake).collect()
    }

    async fn delete(&self, cake: &Cake) -> Result<(), CakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(cakes::table.find(cake.id().get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            debug!(cake_id = %cake.id(), "cake already absent on delete");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn row(price: Decimal) -> CakeRow {
        CakeRow {
            id: 4,
            name: "Lemon".to_owned(),
            price,
            description: None,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, CakeRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, CakeRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rows_convert_to_cakes() {
        let cake = row_to_cake(row(Decimal::new(350, 2))).expect("valid row");

        assert_eq!(cake.id(), CakeId::new(4));
        assert_eq!(cake.name(), "Lemon");
        assert_eq!(cake.price().amount(), Decimal::new(350, 2));
        assert_eq!(cake.description(), None);
    }

    #[rstest]
    #[case(Decimal::ZERO)]
    #[case(Decimal::new(-1, 0))]
    fn non_positive_stored_price_is_a_query_error(#[case] price: Decimal) {
        let err = row_to_cake(row(price)).expect_err("invalid price rejected");

        assert!(matches!(err, CakeRepositoryError::Query { .. }));
    }
}

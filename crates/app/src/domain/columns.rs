//! Column decoding helpers shared by repositories.

use std::num::TryFromIntError;

use sqlx::{Row, postgres::PgRow};

fn column_decode(col: &str, error: TryFromIntError) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(error),
    }
}

/// Read a non-negative `BIGINT` amount in minor units.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| column_decode(col, e))
}

pub(crate) fn try_get_optional_amount(row: &PgRow, col: &str) -> Result<Option<u64>, sqlx::Error> {
    row.try_get::<Option<i64>, _>(col)?
        .map(|amount| u64::try_from(amount).map_err(|e| column_decode(col, e)))
        .transpose()
}

/// Read a non-negative `INTEGER` count.
pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let count_i32: i32 = row.try_get(col)?;

    u32::try_from(count_i32).map_err(|e| column_decode(col, e))
}

/// Convert an amount into its `BIGINT` column representation.
pub(crate) fn amount_to_column(col: &str, amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| column_decode(col, e))
}

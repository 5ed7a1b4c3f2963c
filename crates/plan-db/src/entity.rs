//! Generic identity-keyed primitives shared by every table.
//!
//! An [`Entity`] names its table, its columns (ID first) and how to decode a
//! row selected with exactly those columns. `find_by` / `count_by` only
//! accept a column from that list, so caller text never reaches the SQL.

use crate::PlanDb;
use crate::error::DatabaseError;
use crate::helpers::get_count;

pub trait Entity: Sized {
    const TABLE: &'static str;
    /// Column list in `from_row` order. The first column is the ID.
    const COLUMNS: &'static [&'static str];

    /// Decode a row selected with [`Self::COLUMNS`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a column is missing or cannot be parsed.
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError>;

    /// `col_a, col_b, ...`
    #[must_use]
    fn select_cols() -> String {
        Self::COLUMNS.join(", ")
    }

    /// `alias.col_a, alias.col_b, ...` for joins.
    #[must_use]
    fn qualified_cols(alias: &str) -> String {
        Self::COLUMNS
            .iter()
            .map(|col| format!("{alias}.{col}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn checked_column<E: Entity>(column: &str) -> Result<&'static str, DatabaseError> {
    E::COLUMNS
        .iter()
        .copied()
        .find(|known| *known == column)
        .ok_or_else(|| {
            DatabaseError::Validation(format!("unknown column '{column}' on {}", E::TABLE))
        })
}

fn equality(column: &str, value: &libsql::Value) -> String {
    if matches!(value, libsql::Value::Null) {
        format!("{column} IS NULL")
    } else {
        format!("{column} = ?1")
    }
}

impl PlanDb {
    /// Fetch one record by ID. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row decoding fails.
    pub async fn find_by_id<E: Entity>(&self, id: &str) -> Result<Option<E>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            E::select_cols(),
            E::TABLE,
            E::COLUMNS[0]
        );
        let mut rows = self.conn.query(&sql, [id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(E::from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// All records whose `column` equals `value` (NULL matches NULL), in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a column `E` does not have.
    pub async fn find_by<E: Entity>(
        &self,
        column: &str,
        value: impl Into<libsql::Value>,
    ) -> Result<Vec<E>, DatabaseError> {
        let column = checked_column::<E>(column)?;
        let value = value.into();
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY rowid",
            E::select_cols(),
            E::TABLE,
            equality(column, &value)
        );
        self.query_entities(&sql, bind_unless_null(value)).await
    }

    /// Number of records whose `column` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a column `E` does not have.
    pub async fn count_by<E: Entity>(
        &self,
        column: &str,
        value: impl Into<libsql::Value>,
    ) -> Result<u64, DatabaseError> {
        let column = checked_column::<E>(column)?;
        let value = value.into();
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            E::TABLE,
            equality(column, &value)
        );
        self.query_count(&sql, bind_unless_null(value)).await
    }

    /// Hard-delete one record. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the DELETE fails.
    pub async fn delete_by_id<E: Entity>(&self, id: &str) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1", E::TABLE, E::COLUMNS[0]);
        let affected = self.conn.execute(&sql, [id]).await?;
        Ok(affected > 0)
    }

    /// Run a SELECT whose column list is `E::COLUMNS` and decode every row.
    pub(crate) async fn query_entities<E: Entity>(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<E>, DatabaseError> {
        let mut rows = self
            .conn
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(E::from_row(&row)?);
        }
        Ok(out)
    }

    /// Run a single-column `COUNT(*)` query.
    pub(crate) async fn query_count(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<u64, DatabaseError> {
        let mut rows = self
            .conn
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }
}

fn bind_unless_null(value: libsql::Value) -> Vec<libsql::Value> {
    if matches!(value, libsql::Value::Null) {
        Vec::new()
    } else {
        vec![value]
    }
}

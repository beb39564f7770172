use sqlx::{postgres::PgRow, FromRow, PgPool};

use crate::error::{Error, Result};

/// Boolean admin flags that can be flipped on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminFlag {
    Activated,
    Deleted,
}

impl AdminFlag {
    pub fn column(self) -> &'static str {
        match self {
            AdminFlag::Activated => "activated",
            AdminFlag::Deleted => "deleted",
        }
    }

    fn failure_label(self) -> &'static str {
        match self {
            AdminFlag::Activated => "Change Status",
            AdminFlag::Deleted => "Delete",
        }
    }
}

/// A child table that blocks a flag toggle while rows in it still
/// reference the parent record.
#[derive(Debug, Clone, Copy)]
pub struct DependentTable {
    pub table: &'static str,
    pub fk_column: &'static str,
    /// Human-readable name of the dependent rows, used in the
    /// conflict message.
    pub label: &'static str,
}

impl DependentTable {
    pub async fn references(&self, pool: &PgPool, id: i32) -> Result<bool> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = $1",
            self.table, self.fk_column
        );
        let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(pool).await?;
        Ok(count > 0)
    }
}

/// Flips `flag` on the row of `table` identified by `id`, refusing while any
/// of the `guards` still hold referencing rows. Table and column names are
/// static descriptors supplied by the owning service, never user input.
pub async fn toggle_flag<T>(
    pool: &PgPool,
    table: &'static str,
    flag: AdminFlag,
    id: i32,
    guards: &[DependentTable],
) -> Result<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    for guard in guards {
        if guard.references(pool, id).await? {
            return Err(Error::Conflict(format!(
                "{} failed: {} still reference this record",
                flag.failure_label(),
                guard.label
            )));
        }
    }

    let column = flag.column();
    let sql = format!(
        "UPDATE {table} SET {column} = NOT {column}, updated_at = NOW() WHERE id = $1 RETURNING *"
    );
    sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("{} failed: id {} not found", flag.failure_label(), id)))
}

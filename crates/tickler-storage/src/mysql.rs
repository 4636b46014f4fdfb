use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::{MySqlPool, Row};
use tickler_core::error::StorageError;
use tickler_core::repository::{ItemRepository, ReadRepository, Result};
use tickler_core::{ItemId, ToDoItem};
use tracing::{debug, info};

/// Embedded schema migrations for the `todo_items` table.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const SELECT_COLUMNS: &str =
    "SELECT id, expiration_date, title, description, completion_percentage FROM todo_items";

/// MySQL implementation of the repository contract.
///
/// Expiration dates are stored as unix microseconds, so sub-microsecond
/// precision is dropped on write. The table carries a `CHECK` constraint on
/// `completion_percentage` beneath the range check done by the entity.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Applies any pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Operation(format!("migration failed: {e}")))?;
        info!("todo_items schema is up to date");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn to_micros(at: Timestamp) -> i64 {
    at.as_microsecond()
}

fn parse_expiration_date(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros)
        .map_err(|e| StorageError::InvalidData(format!("invalid expiration_date {micros}: {e}")))
}

fn row_to_item(row: &MySqlRow) -> Result<ToDoItem> {
    let id: String = row.try_get("id").map_err(map_sqlx_error)?;
    let expiration_date: i64 = row.try_get("expiration_date").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let description: String = row.try_get("description").map_err(map_sqlx_error)?;
    let completion_percentage: u8 = row
        .try_get("completion_percentage")
        .map_err(map_sqlx_error)?;

    let id = id
        .parse::<ItemId>()
        .map_err(|e| StorageError::InvalidData(e.to_string()))?;

    ToDoItem::from_parts(
        id,
        parse_expiration_date(expiration_date)?,
        title,
        description,
        i64::from(completion_percentage),
    )
    .map_err(|e| StorageError::InvalidData(format!("item {id}: {e}")))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, id: &ItemId) -> Result<Option<ToDoItem>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ? LIMIT 1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_item).transpose()
    }

    async fn get_all(&self) -> Result<Vec<ToDoItem>> {
        let rows = sqlx::query(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_item).collect()
    }

    async fn exists(&self, id: &ItemId) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM todo_items
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }

    async fn get_by_expiration_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ToDoItem>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE expiration_date >= ? AND expiration_date < ? \
             ORDER BY expiration_date ASC"
        ))
        .bind(to_micros(start))
        .bind(to_micros(end))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_item).collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for MySqlRepository {
    async fn insert(&self, item: ToDoItem) -> Result<ItemId> {
        let id = item.id();

        let result = sqlx::query(
            r#"
            INSERT INTO todo_items (id, expiration_date, title, description, completion_percentage)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(to_micros(item.expiration_date()))
        .bind(item.title())
        .bind(item.description())
        .bind(item.completion_percentage().value())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(item_id = %id, "inserted todo item");
                Ok(id)
            }
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(id.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn update(&self, item: ToDoItem) -> Result<bool> {
        let id = item.id();

        let result = sqlx::query(
            r#"
            UPDATE todo_items
            SET expiration_date = ?,
                title = ?,
                description = ?,
                completion_percentage = ?
            WHERE id = ?
            "#,
        )
        .bind(to_micros(item.expiration_date()))
        .bind(item.title())
        .bind(item.description())
        .bind(item.completion_percentage().value())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        // MySQL may count only changed rows, so an unchanged row still needs a lookup.
        if result.rows_affected() > 0 {
            return Ok(true);
        }
        self.exists(&id).await
    }

    async fn delete(&self, id: &ItemId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM todo_items
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiration_date_survives_micros_column() {
        let at: Timestamp = "2025-10-18T14:30:15.123456Z".parse().unwrap();
        assert_eq!(parse_expiration_date(to_micros(at)).unwrap(), at);
    }

    #[test]
    fn out_of_range_micros_are_invalid_data() {
        let err = parse_expiration_date(i64::MAX).unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
    }
}

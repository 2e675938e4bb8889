//! Read-only access to arbitrary tables for the dashboard table browser.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, FromQueryResult, JsonValue, Statement, Value,
};

use crate::config::HIDDEN_TABLES;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Table repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// List browsable table names, sorted. Internal and credential tables
    /// are excluded.
    async fn list_tables(&self) -> AppResult<Vec<String>>;

    /// Count rows in a table
    async fn count_rows(&self, table: &str) -> AppResult<u64>;

    /// Fetch one page of rows as JSON objects
    async fn fetch_rows(&self, table: &str, limit: u64, offset: u64) -> AppResult<Vec<JsonValue>>;
}

/// Concrete implementation of TableRepository over SQLite's catalog
pub struct TableStore {
    db: DatabaseConnection,
}

impl TableStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(&self, sql: String, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }
}

/// SQLite integers are signed; larger values are clamped.
fn bind_u64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Quote an identifier for interpolation into SQL.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[async_trait]
impl TableRepository for TableStore {
    async fn list_tables(&self) -> AppResult<Vec<String>> {
        let stmt = self.statement(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name"
                .to_string(),
            vec![],
        );

        let rows = self.db.query_all(stmt).await?;
        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("", "name")?;
            if !HIDDEN_TABLES.contains(&name.as_str()) {
                tables.push(name);
            }
        }

        Ok(tables)
    }

    async fn count_rows(&self, table: &str) -> AppResult<u64> {
        let stmt = self.statement(
            format!("SELECT COUNT(*) AS count FROM {}", quote_identifier(table)),
            vec![],
        );

        let row = self
            .db
            .query_one(stmt)
            .await?
            .ok_or_else(|| AppError::internal("COUNT(*) returned no row"))?;
        let count: i64 = row.try_get("", "count")?;

        Ok(count.max(0) as u64)
    }

    async fn fetch_rows(&self, table: &str, limit: u64, offset: u64) -> AppResult<Vec<JsonValue>> {
        let stmt = self.statement(
            format!(
                "SELECT * FROM {} LIMIT ? OFFSET ?",
                quote_identifier(table)
            ),
            vec![
                Value::BigInt(Some(bind_u64(limit))),
                Value::BigInt(Some(bind_u64(offset))),
            ],
        );

        let rows = JsonValue::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows)
    }
}

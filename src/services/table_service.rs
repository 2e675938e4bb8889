//! Table browser service.

use async_trait::async_trait;
use sea_orm::JsonValue;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Table browser trait for dependency injection.
#[async_trait]
pub trait TableService: Send + Sync {
    /// List browsable tables
    async fn list_tables(&self) -> AppResult<Vec<String>>;

    /// Fetch one page of a table's rows
    async fn browse(&self, table: &str, params: &PaginationParams) -> AppResult<Paginated<JsonValue>>;
}

/// Concrete implementation using Unit of Work.
pub struct TableBrowser<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TableBrowser<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TableService for TableBrowser<U> {
    async fn list_tables(&self) -> AppResult<Vec<String>> {
        self.uow.tables().list_tables().await
    }

    async fn browse(&self, table: &str, params: &PaginationParams) -> AppResult<Paginated<JsonValue>> {
        let repo = self.uow.tables();

        // Only names from the catalog reach SQL
        let tables = repo.list_tables().await?;
        if !tables.iter().any(|t| t == table) {
            return Err(AppError::NotFound);
        }

        let total = repo.count_rows(table).await?;
        let rows = repo
            .fetch_rows(table, params.limit(), params.offset())
            .await?;

        Ok(Paginated::new(rows, params.page.max(1), params.limit(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        CredentialRepository, MockCredentialRepository, MockTableRepository, TableRepository,
    };

    struct TestUnitOfWork {
        tables: Arc<MockTableRepository>,
    }

    impl UnitOfWork for TestUnitOfWork {
        fn credentials(&self) -> Arc<dyn CredentialRepository> {
            Arc::new(MockCredentialRepository::new())
        }

        fn tables(&self) -> Arc<dyn TableRepository> {
            self.tables.clone()
        }
    }

    fn browser(repo: MockTableRepository) -> TableBrowser<TestUnitOfWork> {
        TableBrowser::new(Arc::new(TestUnitOfWork {
            tables: Arc::new(repo),
        }))
    }

    #[tokio::test]
    async fn test_browse_unknown_table_is_not_found() {
        let mut repo = MockTableRepository::new();
        repo.expect_list_tables()
            .returning(|| Ok(vec!["sales".to_string()]));
        repo.expect_fetch_rows().never();

        let result = browser(repo)
            .browse("users", &PaginationParams::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_browse_paginates() {
        let mut repo = MockTableRepository::new();
        repo.expect_list_tables()
            .returning(|| Ok(vec!["sales".to_string()]));
        repo.expect_count_rows().returning(|_| Ok(5));
        repo.expect_fetch_rows().returning(|_, limit, offset| {
            Ok((offset + 1..=offset + limit)
                .map(|id| serde_json::json!({ "id": id }))
                .collect())
        });

        let params = PaginationParams {
            page: 2,
            per_page: 2,
        };
        let page = browser(repo).browse("sales", &params).await.unwrap();

        assert_eq!(
            page.data,
            vec![serde_json::json!({"id": 3}), serde_json::json!({"id": 4})]
        );
        assert_eq!(page.meta.total, 5);
        assert_eq!(page.meta.total_pages, 3);
    }
}

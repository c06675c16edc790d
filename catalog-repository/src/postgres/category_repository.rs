//! PostgreSQL implementation of the category resolver.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CategoryRepositoryError;
use crate::interfaces::CategoryRepository;

/// PostgreSQL implementation of the read-only category lookup.
pub struct PostgresCategoryRepository {
    pool: sqlx::PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new resolver over an existing connection pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn resolve_name(&self, id: Uuid) -> Result<Option<String>, CategoryRepositoryError> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(name)
    }

    async fn name_map(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, CategoryRepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, name FROM categories WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}

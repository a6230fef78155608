use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{MenuCategory, MenuItem};

// ============================================================================
// Menu Repository
// ============================================================================

#[derive(Clone)]
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        price: Decimal,
        category: MenuCategory,
    ) -> Result<MenuItem, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(
            "INSERT INTO menu_items (id, name, description, price, category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .fetch_one(&self.pool)
        .await
    }

    /// Batch lookup used to resolve an order's referenced menu items in one
    /// round trip. Returns only the rows that exist; callers compare against
    /// the distinct requested set.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
    }

    /// Name-ascending listing with an optional category filter; returns the
    /// filtered total alongside the requested page.
    pub async fn list(
        &self,
        category: Option<MenuCategory>,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<MenuItem>), sqlx::Error> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM menu_items
             WHERE $1::menu_category IS NULL OR category = $1",
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, MenuItem>(
            "SELECT * FROM menu_items
             WHERE $1::menu_category IS NULL OR category = $1
             ORDER BY name ASC
             LIMIT $2 OFFSET $3",
        )
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, items))
    }
}

// Store-coupled behavior (creation, batch resolution, filtered pagination)
// is covered by integration tests against a real Postgres instance.

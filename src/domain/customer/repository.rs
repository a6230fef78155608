use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Customer;

// ============================================================================
// Customer Repository
// ============================================================================
//
// Raw store access; errors surface as sqlx::Error and are classified by the
// service layer.
//
// ============================================================================

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a customer; a duplicate email fails on the unique index.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Customer, sqlx::Error> {
        sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (id, name, email, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(phone)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, sqlx::Error> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}

// Store-coupled behavior (insert, unique-email violation, lookup) is covered
// by integration tests against a real Postgres instance.

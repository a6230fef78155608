use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::models::{MenuCategory, OrderStatus};

// ============================================================================
// Database Bootstrap
// ============================================================================

pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    tracing::info!("Connected to Postgres");
    Ok(pool)
}

fn enum_ddl(type_name: &str, values: &[&str]) -> String {
    let list = values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ");

    // CREATE TYPE has no IF NOT EXISTS; swallow the duplicate_object race.
    format!(
        "DO $$ BEGIN \
             CREATE TYPE {type_name} AS ENUM ({list}); \
         EXCEPTION WHEN duplicate_object THEN NULL; \
         END $$"
    )
}

/// Idempotent schema setup, run at startup. Enum DDL is generated from the
/// live Rust enums so the database and the code cannot drift apart.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    let category_values: Vec<&str> = MenuCategory::ALL.iter().map(|c| c.as_str()).collect();
    let status_values: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();

    sqlx::query(&enum_ddl("menu_category", &category_values))
        .execute(pool)
        .await?;
    sqlx::query(&enum_ddl("order_status", &status_values))
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS menu_items (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            price NUMERIC(10, 2) NOT NULL CHECK (price >= 0),
            category menu_category NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS orders (
            id UUID PRIMARY KEY,
            customer_id UUID NOT NULL REFERENCES customers(id),
            status order_status NOT NULL DEFAULT 'pending',
            total_amount NUMERIC(10, 2) NOT NULL DEFAULT 0 CHECK (total_amount >= 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS order_items (
            id UUID PRIMARY KEY,
            order_id UUID NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            menu_item_id UUID NOT NULL REFERENCES menu_items(id),
            quantity INTEGER NOT NULL CHECK (quantity >= 1),
            unit_price NUMERIC(10, 2) NOT NULL CHECK (unit_price >= 0),
            subtotal NUMERIC(10, 2) NOT NULL CHECK (subtotal >= 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_customer_id ON orders(customer_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id)")
        .execute(pool)
        .await?;

    tracing::info!("Schema initialized");
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_ddl_quotes_and_joins_values() {
        let ddl = enum_ddl("order_status", &["pending", "canceled"]);
        assert!(ddl.contains("CREATE TYPE order_status AS ENUM ('pending', 'canceled')"));
        assert!(ddl.contains("duplicate_object"));
    }

    #[test]
    fn test_enum_ddl_tracks_live_enums() {
        let values: Vec<&str> = MenuCategory::ALL.iter().map(|c| c.as_str()).collect();
        let ddl = enum_ddl("menu_category", &values);
        assert!(ddl.contains("'drink'"));
        assert!(!ddl.contains("'beverage'"));
    }
}

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{
    line_subtotal, MenuItem, Order, OrderItem, OrderItemDetail, OrderItemInput, OrderStatus,
    OrderWithItems,
};

use super::errors::OrderError;

// ============================================================================
// Order Repository
// ============================================================================
//
// Atomic operations over the Order + OrderItem aggregate. Methods that take
// a Transaction participate in the caller's write window; the caller commits
// or rolls back. Reads go straight to the pool.
//
// ============================================================================

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a fresh order: status pending, zero total, no items yet.
    pub async fn create_empty(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer_id: Uuid,
    ) -> Result<Order, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "INSERT INTO orders (id, customer_id, status, total_amount)
             VALUES ($1, $2, 'pending', 0)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(customer_id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Row-locked re-read inside a transaction. Holding the lock until
    /// commit keeps two concurrent modifications of the same order from
    /// interleaving their clear/insert sequences.
    pub async fn find_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// One order plus its lines joined to menu details. Absence is `None`,
    /// never an error.
    pub async fn find_with_items(
        &self,
        order_id: Uuid,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        let Some(order) = self.find_by_id(order_id).await? else {
            return Ok(None);
        };

        let items = self.items_of(order_id).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    async fn items_of(&self, order_id: Uuid) -> Result<Vec<OrderItemDetail>, sqlx::Error> {
        sqlx::query_as::<_, OrderItemDetail>(
            "SELECT oi.id, oi.menu_item_id, mi.name, mi.price, mi.category,
                    oi.quantity, oi.unit_price, oi.subtotal
             FROM order_items oi
             JOIN menu_items mi ON mi.id = oi.menu_item_id
             WHERE oi.order_id = $1
             ORDER BY oi.created_at, oi.id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Writes the given lines with fresh unit-price snapshots and sets the
    /// order's total to the sum of their subtotals, all in the caller's
    /// transaction.
    ///
    /// Every input must reference a menu item present in `resolved`; callers
    /// validate resolution completeness beforehand, and an unknown id here is
    /// a hard `MenuItemNotFound` failure rather than a silent skip, so the
    /// whole transaction unwinds instead of dropping a line.
    pub async fn replace_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
        items: &[OrderItemInput],
        resolved: &[MenuItem],
    ) -> Result<Vec<OrderItem>, OrderError> {
        let mut inserted = Vec::with_capacity(items.len());
        let mut total = Decimal::ZERO;

        for input in items {
            let menu_item = resolved
                .iter()
                .find(|mi| mi.id == input.menu_item_id)
                .ok_or(OrderError::MenuItemNotFound)?;

            let unit_price = menu_item.price;
            let subtotal = line_subtotal(input.quantity, unit_price);
            total += subtotal;

            let line = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_items (id, order_id, menu_item_id, quantity, unit_price, subtotal)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(order_id)
            .bind(input.menu_item_id)
            .bind(input.quantity)
            .bind(unit_price)
            .bind(subtotal)
            .fetch_one(&mut **tx)
            .await?;

            inserted.push(line);
        }

        // The total is written in the same transaction as the lines; readers
        // never observe one without the other.
        sqlx::query("UPDATE orders SET total_amount = $1, updated_at = now() WHERE id = $2")
            .bind(total)
            .bind(order_id)
            .execute(&mut **tx)
            .await?;

        Ok(inserted)
    }

    /// Deletes all of the order's lines; returns how many were removed
    /// (0 when there were none).
    pub async fn clear_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn set_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $1, updated_at = now()
             WHERE id = $2
             RETURNING *",
        )
        .bind(status)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Newest-first page of a customer's orders, each with its joined items,
    /// plus the customer's total order count.
    pub async fn list_for_customer(
        &self,
        customer_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<OrderWithItems>), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(&self.pool)
            .await?;

        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders
             WHERE customer_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.items_of(order.id).await?;
            out.push(OrderWithItems { order, items });
        }

        Ok((total, out))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuCategory;
    use chrono::Utc;

    fn menu_item(price: &str) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            name: "Burger".to_string(),
            description: "Beef".to_string(),
            price: price.parse().unwrap(),
            category: MenuCategory::MainCourse,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_accumulation_logic() {
        // Mirrors the fold replace_items performs before writing the total.
        let burger = menu_item("10.00");
        let fries = menu_item("5.00");

        let lines = [(2, burger.price), (1, fries.price)];
        let total: Decimal = lines
            .iter()
            .map(|(qty, price)| line_subtotal(*qty, *price))
            .sum();

        assert_eq!(total, "25.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_unresolved_id_lookup_fails_loudly() {
        let resolved = vec![menu_item("10.00")];
        let unknown = Uuid::new_v4();

        let found = resolved.iter().find(|mi| mi.id == unknown);
        assert!(found.is_none());
    }

    // Note: the repository's store-coupled behavior requires integration
    // testing against a real Postgres instance:
    //
    // - create_empty inserts status='pending', total_amount=0
    // - replace_items + total update are atomic (rollback leaves no lines
    //   and no stale total)
    // - clear_items returns the removed count and 0 on an empty order
    // - find_with_items returns None for an absent order
    // - find_for_update blocks a concurrent modification until commit
    // - list_for_customer orders newest first and paginates
}

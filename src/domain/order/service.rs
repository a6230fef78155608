use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::customer::CustomerRepository;
use crate::domain::menu::MenuRepository;
use crate::models::{MenuItem, Order, OrderItemInput, OrderStatus, OrderWithItems};

use super::errors::OrderError;
use super::repository::OrderRepository;

// ============================================================================
// Order Lifecycle Service
// ============================================================================
//
// The single authority that decides whether a mutation is legal and executes
// it transactionally. All validation runs before a transaction opens; the
// write window covers only the writes. Dropping an uncommitted sqlx
// transaction rolls it back, so every early return after `begin` unwinds
// cleanly.
//
// ============================================================================

pub struct OrderService {
    pool: PgPool,
    orders: OrderRepository,
    customers: CustomerRepository,
    menu: MenuRepository,
}

impl OrderService {
    pub fn new(
        pool: PgPool,
        orders: OrderRepository,
        customers: CustomerRepository,
        menu: MenuRepository,
    ) -> Self {
        Self {
            pool,
            orders,
            customers,
            menu,
        }
    }

    /// Creates an order and populates it with its initial lines in one
    /// transaction, then re-reads the committed aggregate.
    pub async fn create_order(
        &self,
        customer_id: Uuid,
        items: &[OrderItemInput],
    ) -> Result<OrderWithItems, OrderError> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(OrderError::CustomerNotFound);
        }
        ensure_non_empty(items)?;
        ensure_positive_quantities(items)?;
        let resolved = self.resolve_menu_items(items).await?;

        let mut tx = self.pool.begin().await?;
        let order = self.orders.create_empty(&mut tx, customer_id).await?;
        self.orders
            .replace_items(&mut tx, order.id, items, &resolved)
            .await?;
        tx.commit().await?;

        tracing::info!(
            order_id = %order.id,
            customer_id = %customer_id,
            item_count = items.len(),
            "Order created"
        );

        self.orders
            .find_with_items(order.id)
            .await?
            .ok_or(OrderError::NotFound)
    }

    /// Persists a new status. Any status may follow any other; no transition
    /// graph is enforced.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        status: &str,
    ) -> Result<Order, OrderError> {
        let status = OrderStatus::parse(status).ok_or_else(OrderError::invalid_status)?;

        let order = self
            .orders
            .set_status(order_id, status)
            .await?
            .ok_or(OrderError::NotFound)?;

        tracing::info!(order_id = %order.id, status = status.as_str(), "Order status updated");
        Ok(order)
    }

    /// Wholesale replacement of the order's item set: clear everything, then
    /// write the new lines with fresh price snapshots and a fresh total.
    pub async fn modify_order(
        &self,
        order_id: Uuid,
        items: &[OrderItemInput],
    ) -> Result<OrderWithItems, OrderError> {
        ensure_non_empty(items)?;
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;
        ensure_modifiable(order.status)?;
        ensure_positive_quantities(items)?;
        let resolved = self.resolve_menu_items(items).await?;

        let mut tx = self.pool.begin().await?;

        // Re-check under a row lock: the status may have advanced between
        // validation and here, and two modifications racing on the same
        // order must serialize on this lock.
        let locked = self
            .orders
            .find_for_update(&mut tx, order_id)
            .await?
            .ok_or(OrderError::NotFound)?;
        ensure_modifiable(locked.status)?;

        let removed = self.orders.clear_items(&mut tx, order_id).await?;
        self.orders
            .replace_items(&mut tx, order_id, items, &resolved)
            .await?;
        tx.commit().await?;

        tracing::info!(
            order_id = %order_id,
            removed,
            added = items.len(),
            "Order items replaced"
        );

        self.orders
            .find_with_items(order_id)
            .await?
            .ok_or(OrderError::NotFound)
    }

    /// One batch lookup for all referenced menu items; the resolved count
    /// must cover the distinct requested ids exactly.
    async fn resolve_menu_items(
        &self,
        items: &[OrderItemInput],
    ) -> Result<Vec<MenuItem>, OrderError> {
        let ids = distinct_ids(items);
        let resolved = self.menu.find_by_ids(&ids).await?;

        if resolved.len() != ids.len() {
            return Err(OrderError::MenuItemNotFound);
        }
        Ok(resolved)
    }
}

fn ensure_non_empty(items: &[OrderItemInput]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyItems);
    }
    Ok(())
}

fn ensure_positive_quantities(items: &[OrderItemInput]) -> Result<(), OrderError> {
    if items.iter().any(|item| item.quantity < 1) {
        return Err(OrderError::InvalidQuantity);
    }
    Ok(())
}

fn ensure_modifiable(status: OrderStatus) -> Result<(), OrderError> {
    if !status.is_modifiable() {
        return Err(OrderError::not_modifiable());
    }
    Ok(())
}

fn distinct_ids(items: &[OrderItemInput]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = items.iter().map(|item| item.menu_item_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

// ============================================================================
// Unit Tests
// ============================================================================

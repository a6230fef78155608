use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Domain Models
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: MenuCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order: a quantity of a menu item at a price snapshot.
/// `unit_price` is copied from the menu item when the line is written, so
/// later menu price changes never touch existing orders.
#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Enumerations
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "menu_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Starter,
    MainCourse,
    Dessert,
    Drink,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 4] = [
        MenuCategory::Starter,
        MenuCategory::MainCourse,
        MenuCategory::Dessert,
        MenuCategory::Drink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Starter => "starter",
            MenuCategory::MainCourse => "main_course",
            MenuCategory::Dessert => "dessert",
            MenuCategory::Drink => "drink",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// Comma-separated list of the live enum values, for user-facing errors.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    /// Statuses during which an order's item set may still be replaced.
    pub const MODIFIABLE: [OrderStatus; 2] = [OrderStatus::Pending, OrderStatus::Preparing];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn is_modifiable(&self) -> bool {
        Self::MODIFIABLE.contains(self)
    }

    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn modifiable_list() -> String {
        Self::MODIFIABLE
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// Inputs and Read Views
// ============================================================================

/// Caller's request for one order line; prices are never accepted from the
/// caller, they are snapshotted from the menu at write time.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderItemInput {
    pub menu_item_id: Uuid,
    pub quantity: i32,
}

/// One order line joined to its menu item for display.
#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct OrderItemDetail {
    pub id: Uuid,
    pub menu_item_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub category: MenuCategory,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// Decimal-exact line subtotal; money stays at 2-digit scale throughout.
pub fn line_subtotal(quantity: i32, unit_price: Decimal) -> Decimal {
    unit_price * Decimal::from(quantity)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_category_round_trip() {
        for category in MenuCategory::ALL {
            assert_eq!(MenuCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(MenuCategory::parse("beverage"), None);
        assert_eq!(MenuCategory::parse(""), None);
    }

    #[test]
    fn test_menu_category_allowed_lists_live_values() {
        assert_eq!(MenuCategory::allowed(), "starter, main_course, dessert, drink");
    }

    #[test]
    fn test_order_status_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("invalid"), None);
        assert_eq!(OrderStatus::parse("Pending"), None);
    }

    #[test]
    fn test_order_status_modifiability() {
        assert!(OrderStatus::Pending.is_modifiable());
        assert!(OrderStatus::Preparing.is_modifiable());
        assert!(!OrderStatus::Ready.is_modifiable());
        assert!(!OrderStatus::Delivered.is_modifiable());
        assert!(!OrderStatus::Canceled.is_modifiable());
    }

    #[test]
    fn test_status_serialization_uses_wire_names() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");

        let parsed: OrderStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Canceled);

        let json = serde_json::to_string(&MenuCategory::MainCourse).unwrap();
        assert_eq!(json, "\"main_course\"");
    }

    #[test]
    fn test_line_subtotal_is_exact() {
        let price: Decimal = "10.00".parse().unwrap();
        assert_eq!(line_subtotal(2, price), "20.00".parse::<Decimal>().unwrap());

        // 3 x 3.33 must be 9.99 exactly, with no float drift
        let price: Decimal = "3.33".parse().unwrap();
        assert_eq!(line_subtotal(3, price), "9.99".parse::<Decimal>().unwrap());

        let price: Decimal = "0.00".parse().unwrap();
        assert_eq!(line_subtotal(7, price), Decimal::ZERO);
    }

    #[test]
    fn test_order_item_input_deserialization() {
        let json = format!(
            "{{\"menu_item_id\":\"{}\",\"quantity\":2}}",
            Uuid::new_v4()
        );
        let input: OrderItemInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.quantity, 2);
    }
}

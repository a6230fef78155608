use crate::models::OrderStatus;

// ============================================================================
// Order Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Customer not found")]
    CustomerNotFound,

    #[error("Order not found")]
    NotFound,

    #[error("At least one item is required")]
    EmptyItems,

    #[error("Quantity must be a positive integer for all items")]
    InvalidQuantity,

    #[error("One or more menu items do not exist")]
    MenuItemNotFound,

    #[error("Only orders with status {0} can be modified")]
    NotModifiable(String),

    #[error("Status must be one of: {0}")]
    InvalidStatus(String),

    #[error("Operation failed: {0}")]
    Database(#[from] sqlx::Error),
}

impl OrderError {
    /// Both messages enumerate the live enum values rather than a hardcoded
    /// string, so they stay correct if the enums change.
    pub fn invalid_status() -> Self {
        OrderError::InvalidStatus(OrderStatus::allowed())
    }

    pub fn not_modifiable() -> Self {
        OrderError::NotModifiable(OrderStatus::modifiable_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_status_message_enumerates_all_values() {
        assert_eq!(
            OrderError::invalid_status().to_string(),
            "Status must be one of: pending, preparing, ready, delivered, canceled"
        );
    }

    #[test]
    fn test_not_modifiable_message_names_the_eligible_statuses() {
        assert_eq!(
            OrderError::not_modifiable().to_string(),
            "Only orders with status pending, preparing can be modified"
        );
    }
}

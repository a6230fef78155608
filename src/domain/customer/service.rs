use uuid::Uuid;

use crate::models::{Customer, OrderWithItems};
use crate::pagination::{Page, PageRequest};

use super::errors::CustomerError;
use super::repository::CustomerRepository;
use crate::domain::order::OrderRepository;

// ============================================================================
// Customer Service
// ============================================================================

pub struct CustomerService {
    customers: CustomerRepository,
    orders: OrderRepository,
}

impl CustomerService {
    pub fn new(customers: CustomerRepository, orders: OrderRepository) -> Self {
        Self { customers, orders }
    }

    /// Registers a customer. A uniqueness violation on the email column maps
    /// to `EmailAlreadyExists`; any other store failure is the catch-all
    /// variant carrying the cause.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Customer, CustomerError> {
        if any_blank(&[name, email, phone]) {
            return Err(CustomerError::MissingFields);
        }

        match self.customers.create(name, email, phone).await {
            Ok(customer) => {
                tracing::info!(customer_id = %customer.id, "Customer registered");
                Ok(customer)
            }
            Err(e) if is_unique_violation(&e) => Err(CustomerError::EmailAlreadyExists),
            Err(e) => Err(e.into()),
        }
    }

    /// Paginated order history, newest first, each order carrying its items
    /// joined to menu details.
    pub async fn list_orders(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<OrderWithItems>, CustomerError> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(CustomerError::NotFound);
        }

        let (total, orders) = self
            .orders
            .list_for_customer(customer_id, page.limit, page.offset())
            .await?;

        Ok(Page::new(orders, total, page))
    }
}

fn any_blank(fields: &[&str]) -> bool {
    fields.iter().any(|f| f.trim().is_empty())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_field_detection() {
        assert!(any_blank(&["", "ann@x.com", "555"]));
        assert!(any_blank(&["Ann", "   ", "555"]));
        assert!(any_blank(&["Ann", "ann@x.com", ""]));
        assert!(!any_blank(&["Ann", "ann@x.com", "555"]));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CustomerError::MissingFields.to_string(),
            "All fields are required: name, email, phone"
        );
        assert_eq!(
            CustomerError::EmailAlreadyExists.to_string(),
            "Email already exists"
        );
        assert_eq!(CustomerError::NotFound.to_string(), "Customer not found");
    }

    #[test]
    fn test_row_not_found_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    // Registration against a live store (duplicate email keeps the first
    // row retrievable, second call fails EmailAlreadyExists) is covered by
    // integration tests.
}

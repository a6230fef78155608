use rust_decimal::Decimal;

use crate::models::{MenuCategory, MenuItem};
use crate::pagination::{Page, PageRequest};

use super::errors::MenuError;
use super::repository::MenuRepository;

// ============================================================================
// Menu Service
// ============================================================================

pub struct MenuService {
    menu: MenuRepository,
}

impl MenuService {
    pub fn new(menu: MenuRepository) -> Self {
        Self { menu }
    }

    pub async fn add_item(
        &self,
        name: &str,
        description: &str,
        price: Decimal,
        category: &str,
    ) -> Result<MenuItem, MenuError> {
        validate_new_item(name, description, price)?;

        let category = MenuCategory::parse(category).ok_or_else(MenuError::invalid_category)?;

        let item = self.menu.create(name, description, price, category).await?;
        tracing::info!(menu_item_id = %item.id, name = %item.name, "Menu item added");
        Ok(item)
    }

    pub async fn list(
        &self,
        category: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<MenuItem>, MenuError> {
        let category = match category {
            Some(c) => Some(MenuCategory::parse(c).ok_or_else(MenuError::invalid_category)?),
            None => None,
        };

        let (total, items) = self.menu.list(category, page.limit, page.offset()).await?;
        Ok(Page::new(items, total, page))
    }
}

fn validate_new_item(name: &str, description: &str, price: Decimal) -> Result<(), MenuError> {
    if name.trim().is_empty() || description.trim().is_empty() {
        return Err(MenuError::MissingFields);
    }
    if price < Decimal::ZERO {
        return Err(MenuError::NegativePrice);
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn price(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(matches!(
            validate_new_item("", "Crispy", price("5.00")),
            Err(MenuError::MissingFields)
        ));
        assert!(matches!(
            validate_new_item("Fries", "  ", price("5.00")),
            Err(MenuError::MissingFields)
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(matches!(
            validate_new_item("Fries", "Crispy", price("-0.01")),
            Err(MenuError::NegativePrice)
        ));
    }

    #[test]
    fn test_zero_price_allowed() {
        assert!(validate_new_item("Water", "Tap", Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_valid_item_passes() {
        assert!(validate_new_item("Burger", "Beef", price("10.00")).is_ok());
    }
}

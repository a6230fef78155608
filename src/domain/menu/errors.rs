use crate::models::MenuCategory;

// ============================================================================
// Menu Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("All fields are required: name, description, price, category")]
    MissingFields,

    #[error("Price must be greater than or equal to zero")]
    NegativePrice,

    #[error("Category must be one of: {0}")]
    InvalidCategory(String),

    #[error("Operation failed: {0}")]
    Database(#[from] sqlx::Error),
}

impl MenuError {
    /// The category message enumerates the live enum values so it stays
    /// correct if the enum ever changes.
    pub fn invalid_category() -> Self {
        MenuError::InvalidCategory(MenuCategory::allowed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_category_message_enumerates_live_values() {
        assert_eq!(
            MenuError::invalid_category().to_string(),
            "Category must be one of: starter, main_course, dessert, drink"
        );
    }
}

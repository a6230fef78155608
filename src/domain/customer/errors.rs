// ============================================================================
// Customer Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("All fields are required: name, email, phone")]
    MissingFields,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Customer not found")]
    NotFound,

    #[error("Operation failed: {0}")]
    Database(#[from] sqlx::Error),
}

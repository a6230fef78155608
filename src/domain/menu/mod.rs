// ============================================================================
// Menu Domain - Catalog Curation and Listing
// ============================================================================

pub mod errors;
pub mod repository;
pub mod service;

pub use errors::*;
pub use repository::*;
pub use service::*;

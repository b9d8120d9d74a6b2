//! Repositories for database operations

pub mod admin;
pub mod product;

// Re-export for convenience
pub use admin::AdminRepository;
pub use product::ProductRepository;

//! Domain models for the admin API

pub mod admin;
pub mod product;

// Re-export for convenience
pub use admin::{Admin, AdminInfo, LoginRequest, LoginResponse, NewAdmin, RegisterRequest};
pub use product::{
    DashboardStats, Gender, ImageFile, ImageUpdate, NewProduct, Product, ProductPatch,
    ProductStatus, RecentProduct,
};

//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    repositories::{AdminRepository, ProductRepository},
    upload::ImageStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub admin_repository: AdminRepository,
    pub product_repository: ProductRepository,
    pub image_store: ImageStore,
}

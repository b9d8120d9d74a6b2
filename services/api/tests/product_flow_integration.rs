//! End-to-end flow against a live database
//!
//! Exercises the credential and product stores the way the handlers do:
//! provision an admin, issue and validate a token, then walk a product
//! through create → list → update → delete. These tests need a running
//! PostgreSQL (DATABASE_URL), so they are ignored by default; run with
//! `cargo test -- --ignored` against a disposable database.

use api::jwt::{JwtConfig, JwtService};
use api::models::{Gender, NewAdmin, NewProduct, ProductPatch, ProductStatus};
use api::repositories::{AdminRepository, ProductRepository, admin::verify_password};
use common::database::{DatabaseConfig, init_pool};
use serial_test::serial;
use sqlx::PgPool;
use uuid::Uuid;

async fn test_pool() -> Result<PgPool, Box<dyn std::error::Error>> {
    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

fn new_product(name: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: "Sports".to_string(),
        gender: Gender::Men,
        price: 129.99,
        sizes: vec![8.0, 9.0, 10.0],
        colors: vec!["Black".to_string(), "Red".to_string()],
        stock: 25,
        material: "Mesh".to_string(),
        status: ProductStatus::Active,
        created_by: None,
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_admin_credentials_and_token() -> Result<(), Box<dyn std::error::Error>> {
    let pool = test_pool().await?;
    let admins = AdminRepository::new(pool.clone());

    let email = format!("admin-{}@example.com", Uuid::new_v4());
    let admin = admins
        .create(&NewAdmin {
            email: email.clone(),
            password: "admin123".to_string(),
        })
        .await?;

    // The stored hash verifies the right password and only that password.
    let stored = admins.find_by_email(&email).await?.expect("admin readable");
    assert!(verify_password(&stored.password_hash, "admin123")?);
    assert!(!verify_password(&stored.password_hash, "admin124")?);

    // A freshly issued token round-trips to the same admin id.
    let jwt = JwtService::new(JwtConfig {
        secret: "integration-test-secret".to_string(),
        token_expiry: 3600,
    });
    let token = jwt.generate_token(&admin)?;
    let claims = jwt.validate_token(&token)?;
    assert_eq!(claims.sub, admin.id);
    assert_eq!(claims.role, "admin");

    sqlx::query("DELETE FROM admins WHERE email = $1")
        .bind(&email)
        .execute(&pool)
        .await?;

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_product_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let pool = test_pool().await?;
    let products = ProductRepository::new(pool.clone());

    let hosted = vec![
        "https://cdn.example.com/products/a.jpg".to_string(),
        "https://cdn.example.com/products/b.jpg".to_string(),
    ];
    let created = products.insert(&new_product("Trail Runner"), &hosted).await?;
    assert_eq!(created.images, hosted);
    assert_eq!(created.status, ProductStatus::Active);

    // Newest first: the product we just created leads the listing.
    let listed = products.find_all().await?;
    assert_eq!(listed.first().map(|p| p.id), Some(created.id));

    // Partial update: only stock changes, images stay untouched.
    let mut current = products
        .find_by_id(created.id)
        .await?
        .expect("created product readable");
    let patch = ProductPatch {
        stock: Some(42),
        ..Default::default()
    };
    patch.apply(&mut current);
    let updated = products
        .update(&current)
        .await?
        .expect("update hits the row");
    assert_eq!(updated.stock, 42);
    assert_eq!(updated.name, "Trail Runner");
    assert_eq!(updated.images, hosted);
    assert!(updated.updated_at >= created.updated_at);

    // Delete, then everything about the id is gone.
    assert!(products.delete(created.id).await?);
    assert!(!products.delete(created.id).await?);
    assert!(products.find_by_id(created.id).await?.is_none());

    Ok(())
}

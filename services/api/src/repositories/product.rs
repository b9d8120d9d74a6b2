//! Product repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{Gender, NewProduct, Product, ProductStatus};

fn product_from_row(row: &PgRow) -> Result<Product> {
    let gender: String = row.get("gender");
    let status: String = row.get("status");

    let product = Product {
        id: row.get("id"),
        name: row.get("name"),
        category: row.get("category"),
        gender: Gender::parse(&gender).map_err(|e| anyhow::anyhow!("Invalid stored gender: {}", e))?,
        price: row.get("price"),
        sizes: row.get("sizes"),
        colors: row.get("colors"),
        stock: row.get("stock"),
        material: row.get("material"),
        images: row.get("images"),
        status: ProductStatus::parse(&status)
            .map_err(|e| anyhow::anyhow!("Invalid stored status: {}", e))?,
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    };

    Ok(product)
}

/// Product repository
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product with its hosted image URLs
    pub async fn insert(&self, new_product: &NewProduct, images: &[String]) -> Result<Product> {
        info!("Creating product: {}", new_product.name);

        let row = sqlx::query(
            r#"
            INSERT INTO products (name, category, gender, price, sizes, colors,
                                  stock, material, images, status, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, name, category, gender, price, sizes, colors, stock,
                      material, images, status, created_by, created_at, updated_at
            "#,
        )
        .bind(&new_product.name)
        .bind(&new_product.category)
        .bind(new_product.gender.as_str())
        .bind(new_product.price)
        .bind(&new_product.sizes)
        .bind(&new_product.colors)
        .bind(new_product.stock)
        .bind(&new_product.material)
        .bind(images)
        .bind(new_product.status.as_str())
        .bind(new_product.created_by)
        .fetch_one(&self.pool)
        .await?;

        product_from_row(&row)
    }

    /// All products, newest first
    pub async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, gender, price, sizes, colors, stock,
                   material, images, status, created_by, created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(product_from_row).collect()
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, category, gender, price, sizes, colors, stock,
                   material, images, status, created_by, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(product_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Persist a merged record; returns None when the id is absent
    pub async fn update(&self, product: &Product) -> Result<Option<Product>> {
        info!("Updating product: {}", product.id);

        let row = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, category = $3, gender = $4, price = $5, sizes = $6,
                colors = $7, stock = $8, material = $9, images = $10,
                status = $11, updated_at = now()
            WHERE id = $1
            RETURNING id, name, category, gender, price, sizes, colors, stock,
                      material, images, status, created_by, created_at, updated_at
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.gender.as_str())
        .bind(product.price)
        .bind(&product.sizes)
        .bind(&product.colors)
        .bind(product.stock)
        .bind(&product.material)
        .bind(&product.images)
        .bind(product.status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(product_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete a product by ID; false when the id is absent
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        info!("Deleting product: {}", id);

        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

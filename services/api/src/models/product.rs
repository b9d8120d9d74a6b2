//! Product model and dashboard aggregates

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product with fewer units than this on hand counts as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Maximum number of hosted images per product.
pub const MAX_PRODUCT_IMAGES: usize = 4;

/// Target gender for a shoe line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
            Gender::Unisex => "Unisex",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "Men" => Ok(Gender::Men),
            "Women" => Ok(Gender::Women),
            "Unisex" => Ok(Gender::Unisex),
            other => Err(format!(
                "Gender must be one of Men, Women, Unisex (got {other:?})"
            )),
        }
    }
}

/// Whether a product is visible in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            other => Err(format!(
                "Status must be either active or inactive (got {other:?})"
            )),
        }
    }
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub gender: Gender,
    pub price: f64,
    pub sizes: Vec<f64>,
    pub colors: Vec<String>,
    pub stock: i32,
    pub material: String,
    pub images: Vec<String>,
    pub status: ProductStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating a product
///
/// `images` is filled in by the handler once the uploaded files have hosted
/// URLs.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub gender: Gender,
    pub price: f64,
    pub sizes: Vec<f64>,
    pub colors: Vec<String>,
    pub stock: i32,
    pub material: String,
    pub status: ProductStatus,
    pub created_by: Option<Uuid>,
}

/// Partial update over the editable fields of a product
///
/// This is an explicit allow-list: the record id, owner reference, and
/// timestamps are not here, so a request body can never overwrite them.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub gender: Option<Gender>,
    pub price: Option<f64>,
    pub sizes: Option<Vec<f64>>,
    pub colors: Option<Vec<String>>,
    pub stock: Option<i32>,
    pub material: Option<String>,
    pub status: Option<ProductStatus>,
}

impl ProductPatch {
    /// Merge the provided fields over an existing record. Unspecified
    /// fields retain their prior values.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(gender) = self.gender {
            product.gender = gender;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(sizes) = self.sizes {
            product.sizes = sizes;
        }
        if let Some(colors) = self.colors {
            product.colors = colors;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(material) = self.material {
            product.material = material;
        }
        if let Some(status) = self.status {
            product.status = status;
        }
    }
}

/// Raw image bytes received from a multipart request
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// What an update request wants done with the image list
#[derive(Debug, Clone, PartialEq)]
pub enum ImageUpdate {
    /// New files were uploaded; they replace the entire list.
    NewFiles(Vec<ImageFile>),
    /// The caller sent the exact list of URLs to keep.
    Retain(Vec<String>),
    /// Nothing was supplied; leave the list untouched.
    Unchanged,
}

/// Trimmed product view for the dashboard's recent-activity list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentProduct {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for RecentProduct {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            category: p.category.clone(),
            price: p.price,
            stock: p.stock,
            created_at: p.created_at,
        }
    }
}

/// Aggregates computed on demand over the full product set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub distinct_category_count: usize,
    pub total_inventory_value: f64,
    pub recent_products: Vec<RecentProduct>,
}

impl DashboardStats {
    /// Scan the full product set. The slice is expected newest-first (the
    /// order the repository lists in); the first five become the recent
    /// list.
    pub fn compute(products: &[Product]) -> Self {
        let total_products = products.len();
        let low_stock_count = products
            .iter()
            .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
            .count();
        let distinct_category_count = products
            .iter()
            .map(|p| p.category.as_str())
            .collect::<HashSet<_>>()
            .len();
        let total_inventory_value = products
            .iter()
            .map(|p| p.price * f64::from(p.stock))
            .sum();
        let recent_products = products.iter().take(5).map(RecentProduct::from).collect();

        Self {
            total_products,
            low_stock_count,
            distinct_category_count,
            total_inventory_value,
            recent_products,
        }
    }
}

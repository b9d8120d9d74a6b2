//! Product input handling for multipart and JSON requests
//!
//! The admin UI submits products as multipart form data: text fields plus
//! up to four `images` file parts. sizes and colors arrive either as JSON
//! arrays (JSON bodies) or as JSON-serialized text (form fields); both
//! forms are accepted everywhere a list is expected.

use std::collections::HashMap;

use axum::extract::Multipart;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Gender, ImageFile, ImageUpdate, NewProduct, ProductPatch, ProductStatus},
    validation,
};

/// Multipart field carrying image files
const IMAGES_FIELD: &str = "images";

/// Field naming the hosted URLs an update wants to keep
const EXISTING_IMAGES_FIELD: &str = "existing_images";

/// Raw product form: text fields plus image files
#[derive(Debug, Default)]
pub struct ProductForm {
    fields: HashMap<String, String>,
    images: Vec<ImageFile>,
}

/// Drain a multipart request into a [`ProductForm`]
pub async fn collect_product_form(mut multipart: Multipart) -> Result<ProductForm, ApiError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGES_FIELD {
            validation::validate_image_count(form.images.len() + 1)
                .map_err(ApiError::Validation)?;
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("Failed to read image field: {e}")))?;
            form.images.push(ImageFile {
                bytes: bytes.to_vec(),
                content_type,
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| ApiError::Validation(format!("Failed to read field {name}: {e}")))?;
            form.fields.insert(name, text);
        }
    }

    Ok(form)
}

impl ProductForm {
    /// Assemble a form directly from its parts
    pub fn from_parts(fields: HashMap<String, String>, images: Vec<ImageFile>) -> Self {
        Self { fields, images }
    }

    /// Validate the form into a creation payload plus the files to upload
    pub fn into_new_product(
        mut self,
        created_by: Uuid,
    ) -> Result<(NewProduct, Vec<ImageFile>), ApiError> {
        let name = self.require("name")?;
        let category = self.require("category")?;
        let gender = Gender::parse(&self.require("gender")?).map_err(ApiError::Validation)?;
        let price = parse_price(&self.require("price")?)?;
        let sizes = parse_sizes(&Value::String(self.require("sizes")?))?;
        let colors = parse_colors(&Value::String(self.require("colors")?))?;
        let material = self.require("material")?;

        let stock = match self.fields.remove("stock") {
            Some(s) if !s.trim().is_empty() => parse_stock(&s)?,
            _ => 0,
        };
        let status = match self.fields.remove("status") {
            Some(s) if !s.trim().is_empty() => {
                ProductStatus::parse(&s).map_err(ApiError::Validation)?
            }
            _ => ProductStatus::Active,
        };

        validation::validate_image_count(self.images.len()).map_err(ApiError::Validation)?;

        let new_product = NewProduct {
            name,
            category,
            gender,
            price,
            sizes,
            colors,
            stock,
            material,
            status,
            created_by: Some(created_by),
        };

        Ok((new_product, self.images))
    }

    /// Validate the form into a partial update plus the image policy
    pub fn into_update(mut self) -> Result<(ProductPatch, ImageUpdate), ApiError> {
        let gender = self
            .fields
            .remove("gender")
            .map(|s| Gender::parse(&s))
            .transpose()
            .map_err(ApiError::Validation)?;
        let status = self
            .fields
            .remove("status")
            .map(|s| ProductStatus::parse(&s))
            .transpose()
            .map_err(ApiError::Validation)?;
        let price = self
            .fields
            .remove("price")
            .map(|s| parse_price(&s))
            .transpose()?;
        let stock = self
            .fields
            .remove("stock")
            .map(|s| parse_stock(&s))
            .transpose()?;
        let sizes = self
            .fields
            .remove("sizes")
            .map(|s| parse_sizes(&Value::String(s)))
            .transpose()?;
        let colors = self
            .fields
            .remove("colors")
            .map(|s| parse_colors(&Value::String(s)))
            .transpose()?;

        let patch = ProductPatch {
            name: self.fields.remove("name"),
            category: self.fields.remove("category"),
            gender,
            price,
            sizes,
            colors,
            stock,
            material: self.fields.remove("material"),
            status,
        };

        let existing = self.fields.remove(EXISTING_IMAGES_FIELD).map(Value::String);
        let image_update = image_update_from_parts(self.images, existing.as_ref())?;

        Ok((patch, image_update))
    }

    fn require(&mut self, key: &str) -> Result<String, ApiError> {
        match self.fields.remove(key) {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ApiError::Validation(format!("Field {key} is required"))),
        }
    }
}

/// JSON body accepted by the update endpoint
///
/// Unknown keys are ignored; only this allow-list of fields can reach the
/// stored record.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub gender: Option<String>,
    pub price: Option<f64>,
    pub sizes: Option<Value>,
    pub colors: Option<Value>,
    pub stock: Option<i32>,
    pub material: Option<String>,
    pub status: Option<String>,
    pub existing_images: Option<Value>,
}

impl UpdateProductRequest {
    /// Validate the body into a partial update plus the image policy
    pub fn into_update(self) -> Result<(ProductPatch, ImageUpdate), ApiError> {
        let gender = self
            .gender
            .as_deref()
            .map(Gender::parse)
            .transpose()
            .map_err(ApiError::Validation)?;
        let status = self
            .status
            .as_deref()
            .map(ProductStatus::parse)
            .transpose()
            .map_err(ApiError::Validation)?;

        if let Some(price) = self.price {
            validation::validate_price(price).map_err(ApiError::Validation)?;
        }
        if let Some(stock) = self.stock {
            validation::validate_stock(stock).map_err(ApiError::Validation)?;
        }

        let sizes = self.sizes.as_ref().map(parse_sizes).transpose()?;
        let colors = self.colors.as_ref().map(parse_colors).transpose()?;

        let patch = ProductPatch {
            name: self.name,
            category: self.category,
            gender,
            price: self.price,
            sizes,
            colors,
            stock: self.stock,
            material: self.material,
            status,
        };

        // A JSON update carries no files; the policy is retain-or-untouched.
        let image_update = image_update_from_parts(Vec::new(), self.existing_images.as_ref())?;

        Ok((patch, image_update))
    }
}

/// Decide what happens to the image list on update
///
/// New files replace the whole list; an explicit retained list replaces it
/// verbatim (which is how images get dropped without adding new ones);
/// neither leaves the list untouched.
pub fn image_update_from_parts(
    files: Vec<ImageFile>,
    existing: Option<&Value>,
) -> Result<ImageUpdate, ApiError> {
    if !files.is_empty() {
        validation::validate_image_count(files.len()).map_err(ApiError::Validation)?;
        return Ok(ImageUpdate::NewFiles(files));
    }

    match existing {
        Some(value) => {
            let urls = parse_string_list(value, EXISTING_IMAGES_FIELD)?;
            validation::validate_image_count(urls.len()).map_err(ApiError::Validation)?;
            Ok(ImageUpdate::Retain(urls))
        }
        None => Ok(ImageUpdate::Unchanged),
    }
}

/// Parse a size list from a JSON array or JSON-serialized text
pub fn parse_sizes(value: &Value) -> Result<Vec<f64>, ApiError> {
    let sizes = parse_list(value, "sizes")?
        .into_iter()
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| ApiError::Validation("Sizes must be numeric".to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    validation::validate_sizes(&sizes).map_err(ApiError::Validation)?;
    Ok(sizes)
}

/// Parse a color list from a JSON array or JSON-serialized text
pub fn parse_colors(value: &Value) -> Result<Vec<String>, ApiError> {
    let colors = parse_string_list(value, "colors")?;

    validation::validate_colors(&colors).map_err(ApiError::Validation)?;
    Ok(colors)
}

fn parse_string_list(value: &Value, field: &str) -> Result<Vec<String>, ApiError> {
    parse_list(value, field)?
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Ok(s),
            _ => Err(ApiError::Validation(format!(
                "Field {field} must be a list of strings"
            ))),
        })
        .collect()
}

fn parse_list(value: &Value, field: &str) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => Ok(items),
            _ => Err(ApiError::Validation(format!(
                "Field {field} must be a JSON array"
            ))),
        },
        _ => Err(ApiError::Validation(format!(
            "Field {field} must be a JSON array"
        ))),
    }
}

fn parse_price(s: &str) -> Result<f64, ApiError> {
    let price: f64 = s
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation("Price must be a number".to_string()))?;

    validation::validate_price(price).map_err(ApiError::Validation)?;
    Ok(price)
}

fn parse_stock(s: &str) -> Result<i32, ApiError> {
    let stock: i32 = s
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation("Stock must be an integer".to_string()))?;

    validation::validate_stock(stock).map_err(ApiError::Validation)?;
    Ok(stock)
}

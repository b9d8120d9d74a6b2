//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::models::product::MAX_PRODUCT_IMAGES;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a product price
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err("Price must be a non-negative number".to_string());
    }

    Ok(())
}

/// Validate a stock count
pub fn validate_stock(stock: i32) -> Result<(), String> {
    if stock < 0 {
        return Err("Stock must be a non-negative integer".to_string());
    }

    Ok(())
}

/// Validate a size set
pub fn validate_sizes(sizes: &[f64]) -> Result<(), String> {
    if sizes.is_empty() {
        return Err("At least one size is required".to_string());
    }

    if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return Err("Sizes must be positive numbers".to_string());
    }

    Ok(())
}

/// Validate a color set
pub fn validate_colors(colors: &[String]) -> Result<(), String> {
    if colors.is_empty() {
        return Err("At least one color is required".to_string());
    }

    if colors.iter().any(|c| c.trim().is_empty()) {
        return Err("Color labels must not be empty".to_string());
    }

    Ok(())
}

/// Validate the number of images attached to a product
pub fn validate_image_count(count: usize) -> Result<(), String> {
    if count > MAX_PRODUCT_IMAGES {
        return Err(format!(
            "At most {MAX_PRODUCT_IMAGES} images are allowed per product"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@producthub.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("admin123").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(99.99).is_ok());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(500).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_sizes() {
        assert!(validate_sizes(&[8.0, 9.5]).is_ok());
        assert!(validate_sizes(&[]).is_err());
        assert!(validate_sizes(&[0.0]).is_err());
        assert!(validate_sizes(&[-7.0]).is_err());
    }

    #[test]
    fn test_validate_colors() {
        assert!(validate_colors(&["Black".to_string()]).is_ok());
        assert!(validate_colors(&[]).is_err());
        assert!(validate_colors(&["".to_string()]).is_err());
    }

    #[test]
    fn test_validate_image_count() {
        assert!(validate_image_count(0).is_ok());
        assert!(validate_image_count(4).is_ok());
        assert!(validate_image_count(5).is_err());
    }
}

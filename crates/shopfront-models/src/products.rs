//! Product models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{validate_name, validate_not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price in the smallest currency unit
    pub price: i32,
    pub is_available: bool,
    pub category_id: i64,
    pub sku: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for both creating and replacing a product.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductDto {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(range(min = 1, message = "price must be greater than 0"))]
    pub price: i32,
    #[serde(default)]
    pub is_available: bool,
    pub category_id: i64,
    #[validate(custom(function = "validate_not_blank"))]
    pub sku: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> ProductDto {
        ProductDto {
            name: "Rust in Action".into(),
            price: 4200,
            is_available: true,
            category_id: 1,
            sku: "BOOK-001".into(),
            description: None,
            image_url: None,
            stock_quantity: 10,
        }
    }

    #[test]
    fn valid_product() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn price_must_be_positive() {
        assert!(ProductDto { price: 0, ..dto() }.validate().is_err());
        assert!(ProductDto { price: -5, ..dto() }.validate().is_err());
    }

    #[test]
    fn sku_is_required() {
        assert!(ProductDto { sku: " ".into(), ..dto() }.validate().is_err());
    }

    #[test]
    fn optional_fields_default() {
        let parsed: ProductDto = serde_json::from_str(
            r#"{"name":"Pen","price":100,"category_id":2,"sku":"PEN-1"}"#,
        )
        .unwrap();
        assert!(!parsed.is_available);
        assert_eq!(parsed.stock_quantity, 0);
    }
}

use sqlx::PgPool;
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::{Product, ProductDto};

const PRODUCT_COLUMNS: &str = "id, name, price, is_available, category_id, sku, description, \
                               image_url, stock_quantity, created_at, updated_at";

pub struct ProductService;

fn product_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Product not found"))
}

/// Maps write failures: a taken SKU is a conflict, everything else is a 500.
fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!("SKU already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::conflict(anyhow::anyhow!("Product is referenced by a cart"));
        }
    }
    AppError::from(e)
}

impl ProductService {
    #[instrument(skip(db))]
    pub async fn list_products(db: &PgPool) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(db)
        .await?;

        Ok(products)
    }

    #[instrument(skip(db))]
    pub async fn get_product(db: &PgPool, id: i64) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(product_not_found)
    }

    async fn ensure_category_exists(db: &PgPool, category_id: i64) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
        )
        .bind(category_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Category not found")));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn create_product(db: &PgPool, dto: ProductDto) -> Result<Product, AppError> {
        Self::ensure_category_exists(db, dto.category_id).await?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"INSERT INTO products
                   (name, price, is_available, category_id, sku, description, image_url, stock_quantity)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {PRODUCT_COLUMNS}"#
        ))
        .bind(dto.name.trim())
        .bind(dto.price)
        .bind(dto.is_available)
        .bind(dto.category_id)
        .bind(dto.sku.trim())
        .bind(&dto.description)
        .bind(&dto.image_url)
        .bind(dto.stock_quantity)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        tracing::info!(product_id = product.id, sku = %product.sku, "product created");
        Ok(product)
    }

    #[instrument(skip(db))]
    pub async fn update_product(db: &PgPool, id: i64, dto: ProductDto) -> Result<Product, AppError> {
        Self::ensure_category_exists(db, dto.category_id).await?;

        sqlx::query_as::<_, Product>(&format!(
            r#"UPDATE products
               SET name = $2, price = $3, is_available = $4, category_id = $5, sku = $6,
                   description = $7, image_url = $8, stock_quantity = $9, updated_at = NOW()
               WHERE id = $1
               RETURNING {PRODUCT_COLUMNS}"#
        ))
        .bind(id)
        .bind(dto.name.trim())
        .bind(dto.price)
        .bind(dto.is_available)
        .bind(dto.category_id)
        .bind(dto.sku.trim())
        .bind(&dto.description)
        .bind(&dto.image_url)
        .bind(dto.stock_quantity)
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(product_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_product(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(product_not_found());
        }

        Ok(())
    }
}

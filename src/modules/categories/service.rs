use sqlx::PgPool;
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::{Category, CategoryDto};

pub struct CategoryService;

fn category_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Category not found"))
}

impl CategoryService {
    #[instrument(skip(db))]
    pub async fn list_categories(db: &PgPool) -> Result<Vec<Category>, AppError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories ORDER BY id")
                .fetch_all(db)
                .await?;

        Ok(categories)
    }

    #[instrument(skip(db))]
    pub async fn create_category(db: &PgPool, dto: CategoryDto) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories (name, description)
               VALUES ($1, $2)
               RETURNING id, name, description"#,
        )
        .bind(dto.name.trim())
        .bind(&dto.description)
        .fetch_one(db)
        .await?;

        Ok(category)
    }

    #[instrument(skip(db))]
    pub async fn update_category(
        db: &PgPool,
        id: i64,
        dto: CategoryDto,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"UPDATE categories SET name = $2, description = $3, updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, description"#,
        )
        .bind(id)
        .bind(dto.name.trim())
        .bind(&dto.description)
        .fetch_optional(db)
        .await?
        .ok_or_else(category_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_category(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    return AppError::conflict(anyhow::anyhow!(
                        "Category still has products"
                    ));
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(category_not_found());
        }

        Ok(())
    }
}

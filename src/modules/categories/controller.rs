use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::{CategoriesResponse, Category, CategoryDto};

use crate::state::AppState;
use crate::validator::{IdPath, ValidatedJson};

use super::service::CategoryService;

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = CategoriesResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = CategoryService::list_categories(&state.db).await?;
    Ok(Json(CategoriesResponse { categories }))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Name is required"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CategoryService::create_category(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category ID")),
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Name is required"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required"),
        (status = 404, description = "Category not found")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryService::update_category(&state.db, id, dto).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has products")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    CategoryService::delete_category(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

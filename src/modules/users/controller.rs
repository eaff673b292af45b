use axum::{Json, extract::State};
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::{SetUserRoleDto, User};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{IdPath, ValidatedJson};

use super::service::UserService;

/// Change a user's role (admin only)
#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    params(("id" = i64, Path, description = "User ID")),
    request_body = SetUserRoleDto,
    responses(
        (status = 200, description = "Role updated", body = User),
        (status = 400, description = "Invalid role, or attempt to change own role"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_user_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<SetUserRoleDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::set_user_role(&state.db, auth_user.id(), id, dto.role).await?;
    Ok(Json(user))
}

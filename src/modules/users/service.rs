use sqlx::PgPool;
use tracing::instrument;

use shopfront_auth::PrincipalId;
use shopfront_core::AppError;
use shopfront_models::{User, UserRole, UserRow};

pub struct UserService;

impl UserService {
    /// Changes another user's role. Admins cannot demote or re-grant
    /// themselves, so there is always at least the caller left as admin.
    #[instrument(skip(db))]
    pub async fn set_user_role(
        db: &PgPool,
        acting_admin: PrincipalId,
        user_id: i64,
        role: UserRole,
    ) -> Result<User, AppError> {
        if acting_admin == user_id {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "You cannot change your own role"
            )));
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"UPDATE users SET role = $2, updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, email, password_hash, role, created_at, updated_at"#,
        )
        .bind(user_id)
        .bind(role.as_str())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        tracing::info!(user_id, role = %role, "user role changed");
        Ok(row.into_user()?)
    }
}

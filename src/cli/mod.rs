//! Operator commands run outside the HTTP server.
//!
//! The API can only promote users once an admin exists, so the first admin
//! account is created here.

use anyhow::{Context, bail};
use sqlx::PgPool;
use validator::Validate;

use shopfront_core::hash_password;
use shopfront_models::{RegisterRequestDto, UserRole};

/// Inserts an admin account. Fails if the email is already registered.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i64> {
    let dto = RegisterRequestDto {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    dto.validate().context("Invalid admin details")?;

    let password_hash = hash_password(password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO users (name, email, password_hash, role)
           VALUES ($1, $2, $3, $4)
           ON CONFLICT (email) DO NOTHING
           RETURNING id"#,
    )
    .bind(dto.name.trim())
    .bind(&dto.email)
    .bind(&password_hash)
    .bind(UserRole::Admin.as_str())
    .fetch_optional(db)
    .await?;

    match id {
        Some(id) => Ok(id),
        None => bail!("User with this email already exists"),
    }
}

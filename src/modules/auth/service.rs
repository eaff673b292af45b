use sqlx::PgPool;
use tracing::instrument;

use shopfront_auth::{PrincipalId, TokenCodec};
use shopfront_core::{AppError, hash_password, verify_password};
use shopfront_models::{LoginRequest, LoginResponse, RegisterRequestDto, User, UserRow, UserSummary};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at, updated_at";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"INSERT INTO users (name, email, password_hash, role)
               VALUES ($1, $2, $3, 'member')
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(dto.name.trim())
        .bind(&dto.email)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Email is already registered"));
            }
            AppError::from(e)
        })?;

        let user = row.into_user()?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Checks the credentials and issues a bearer token. Unknown emails and
    /// wrong passwords get the same answer.
    #[instrument(skip(db, codec, dto), fields(email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        codec: &TokenCodec,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(&dto.password, &row.password_hash)? {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let user = row.into_user()?;
        let token = codec.issue(user.id)?;

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token,
            user: UserSummary::from(&user),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, id: PrincipalId) -> Result<UserSummary, AppError> {
        let summary = sqlx::query_as::<_, (i64, String, String)>(
            "SELECT id, name, email FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .map(|(id, name, email)| UserSummary { id, name, email })
        // The account vanished between the gate and this query.
        .ok_or_else(|| AppError::unauthorized(crate::middleware::gate::UNAUTHENTICATED_MESSAGE))?;

        Ok(summary)
    }
}

//! User domain models and DTOs.
//!
//! [`Principal`] is the slim view of an account the authorization gate
//! works with: an id and a role, nothing else. [`User`] is the public
//! account shape returned by the API; the password hash never leaves
//! the database layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfront_auth::PrincipalId;
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{validate_name, validate_password};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Member,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(UserRole::Member),
            "admin" => Ok(UserRole::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// An authenticated account as seen by the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub role: UserRole,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A `users` row as stored. The role column is free text until it is
/// checked with [`UserRow::into_user`].
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_user(self) -> Result<User, UnknownRole> {
        Ok(User {
            role: self.role.parse()?,
            id: self.id,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: UserSummary,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetUserRoleDto {
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [UserRole::Member, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
        assert_eq!(
            "superuser".parse::<UserRole>(),
            Err(UnknownRole("superuser".into()))
        );
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(UserRole::Admin).unwrap(), "admin");
        let dto: SetUserRoleDto = serde_json::from_str(r#"{"role":"member"}"#).unwrap();
        assert_eq!(dto.role, UserRole::Member);
        assert!(serde_json::from_str::<SetUserRoleDto>(r#"{"role":"root"}"#).is_err());
    }

    #[test]
    fn row_with_unknown_role_is_rejected() {
        let now = Utc::now();
        let row = UserRow {
            id: 3,
            name: "Hanako".into(),
            email: "hanako@example.com".into(),
            password_hash: "x".into(),
            role: "owner".into(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(row.clone().into_user().unwrap_err(), UnknownRole("owner".into()));

        let user = UserRow { role: "admin".into(), ..row }.into_user().unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn only_admin_role_is_admin() {
        assert!(Principal { id: 1, role: UserRole::Admin }.is_admin());
        assert!(!Principal { id: 1, role: UserRole::Member }.is_admin());
    }

    #[test]
    fn register_dto_validation() {
        let valid = RegisterRequestDto {
            name: "Taro".into(),
            email: "taro@example.com".into(),
            password: "password123".into(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequestDto {
            email: "not-an-email".into(),
            ..valid_clone(&valid)
        };
        assert!(bad_email.validate().is_err());

        let bad_password = RegisterRequestDto {
            password: "pass word".into(),
            ..valid_clone(&valid)
        };
        assert!(bad_password.validate().is_err());

        let blank_name = RegisterRequestDto {
            name: "  ".into(),
            ..valid_clone(&valid)
        };
        assert!(blank_name.validate().is_err());
    }

    fn valid_clone(dto: &RegisterRequestDto) -> RegisterRequestDto {
        RegisterRequestDto {
            name: dto.name.clone(),
            email: dto.email.clone(),
            password: dto.password.clone(),
        }
    }
}

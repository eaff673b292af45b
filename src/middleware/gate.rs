//! The per-request authorization gate.
//!
//! [`AuthorizationGate::authorize`] runs a fixed sequence of stages against
//! the request headers:
//!
//! | Stage | Check | Rejection |
//! |-------|-------|-----------|
//! | [`read_authorization`] | `Authorization` header present | `Unauthenticated` |
//! | [`parse_bearer`] | `Bearer <token>` shape | `Unauthenticated` |
//! | `verify_token` | signature, algorithm, expiry | `Unauthenticated` |
//! | [`expect_claim_map`] | payload is a JSON object | `Unauthenticated` |
//! | [`extract_principal_id`] | subject claim decodes to an id | `Unauthenticated` |
//! | `load_principal` | principal still exists | `Unauthenticated`, or `Internal` on store failure |
//! | [`check_role`] | admin role, in [`GateMode::AdminOnly`] only | `Forbidden` |
//!
//! Every authentication failure produces the same response, so a caller
//! cannot tell a missing header from a forged, expired or orphaned token.
//! The principal is loaded from the store on every request; nothing about
//! the role is read from the token.

use std::sync::Arc;

use axum::{
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use shopfront_auth::{ClaimSet, PrincipalId, TokenVerifier, extract_subject};
use shopfront_core::AppError;
use shopfront_models::Principal;

use crate::stores::PrincipalStore;

pub const UNAUTHENTICATED_MESSAGE: &str = "Authentication required";
pub const FORBIDDEN_MESSAGE: &str = "Administrator privileges required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    AuthenticatedOnly,
    AdminOnly,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("principal lookup failed")]
    Internal,
}

impl GateRejection {
    pub fn into_app_error(self) -> AppError {
        match self {
            GateRejection::Unauthenticated => AppError::unauthorized(UNAUTHENTICATED_MESSAGE),
            GateRejection::Forbidden => AppError::forbidden(FORBIDDEN_MESSAGE),
            GateRejection::Internal => AppError::internal(self),
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        self.into_app_error().into_response()
    }
}

/// Identity published into request extensions once the gate lets a request
/// through. Read it in handlers with [`AuthUser`](super::auth::AuthUser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPrincipal {
    pub id: PrincipalId,
}

#[derive(Clone)]
pub struct AuthorizationGate {
    verifier: Arc<dyn TokenVerifier>,
    principals: Arc<dyn PrincipalStore>,
}

impl AuthorizationGate {
    pub fn new(verifier: Arc<dyn TokenVerifier>, principals: Arc<dyn PrincipalStore>) -> Self {
        Self {
            verifier,
            principals,
        }
    }

    #[instrument(skip(self, headers))]
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        mode: GateMode,
    ) -> Result<AuthPrincipal, GateRejection> {
        let header = read_authorization(headers)?;
        let token = parse_bearer(header)?;
        let payload = self.verify_token(token)?;
        let claims = expect_claim_map(payload)?;
        let subject = extract_principal_id(&claims)?;
        let principal = self.load_principal(subject).await?;
        check_role(&principal, mode)?;

        Ok(AuthPrincipal { id: principal.id })
    }

    pub fn verify_token(&self, token: &str) -> Result<Value, GateRejection> {
        self.verifier.verify(token).map_err(|_| {
            tracing::debug!(stage = "verify_token", "request rejected");
            GateRejection::Unauthenticated
        })
    }

    pub async fn load_principal(&self, id: PrincipalId) -> Result<Principal, GateRejection> {
        match self.principals.find_principal(id).await {
            Ok(Some(principal)) => Ok(principal),
            Ok(None) => {
                tracing::debug!(stage = "load_principal", principal_id = id, "request rejected");
                Err(GateRejection::Unauthenticated)
            }
            Err(e) => {
                tracing::error!(principal_id = id, error = %e, "principal lookup failed");
                Err(GateRejection::Internal)
            }
        }
    }
}

pub fn read_authorization(headers: &HeaderMap) -> Result<&str, GateRejection> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!(stage = "read_authorization", "request rejected");
            GateRejection::Unauthenticated
        })
}

/// Accepts `<scheme> <token>` where the scheme is `bearer` in any case and
/// the token is non-empty with no further spaces.
pub fn parse_bearer(header: &str) -> Result<&str, GateRejection> {
    let reject = || {
        tracing::debug!(stage = "parse_bearer", "request rejected");
        GateRejection::Unauthenticated
    };

    let (scheme, token) = header.split_once(' ').ok_or_else(reject)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
        return Err(reject());
    }

    Ok(token)
}

pub fn expect_claim_map(payload: Value) -> Result<ClaimSet, GateRejection> {
    match payload {
        Value::Object(claims) => Ok(claims),
        _ => {
            tracing::debug!(stage = "expect_claim_map", "request rejected");
            Err(GateRejection::Unauthenticated)
        }
    }
}

pub fn extract_principal_id(claims: &ClaimSet) -> Result<PrincipalId, GateRejection> {
    extract_subject(claims).map_err(|_| {
        tracing::debug!(stage = "extract_principal_id", "request rejected");
        GateRejection::Unauthenticated
    })
}

pub fn check_role(principal: &Principal, mode: GateMode) -> Result<(), GateRejection> {
    match mode {
        GateMode::AdminOnly if !principal.is_admin() => {
            tracing::debug!(principal_id = principal.id, "admin role required");
            Err(GateRejection::Forbidden)
        }
        _ => Ok(()),
    }
}

//! Signed bearer tokens.
//!
//! [`TokenCodec`] issues HMAC-signed JWTs carrying a principal id and an
//! absolute expiry, and verifies them back into an untyped claim payload.
//!
//! Verification only accepts the HMAC family (`HS256`, `HS384`, `HS512`).
//! A token whose header names any other algorithm is rejected before its
//! signature is looked at. Every failure, whether malformed input, bad
//! signature, wrong algorithm or expiry, collapses into
//! [`TokenError::Invalid`] so callers cannot tell them apart.
//!
//! # Example
//!
//! ```ignore
//! use shopfront_auth::{TokenCodec, TokenVerifier};
//!
//! let codec = TokenCodec::from_config(&jwt_config);
//! let token = codec.issue(42)?;
//! let claims = codec.verify(&token)?;
//! ```

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;
use thiserror::Error;

use shopfront_config::JwtConfig;

use crate::claims::{IssuedClaims, PrincipalId};

const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to sign token")]
    Signing,
    #[error("invalid token")]
    Invalid,
}

/// Turns a presented token string into its verified claim payload.
///
/// The gate depends on this capability rather than on [`TokenCodec`]
/// directly, so tests can hand it a fake.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Value, TokenError>;
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            config.secret.as_bytes(),
            Duration::seconds(config.token_ttl_secs),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `principal_id`, valid from now for one window.
    pub fn issue(&self, principal_id: PrincipalId) -> Result<String, TokenError> {
        self.issue_at(principal_id, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        principal_id: PrincipalId,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = IssuedClaims {
            user_id: principal_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            TokenError::Signing
        })
    }
}

impl TokenVerifier for TokenCodec {
    fn verify(&self, token: &str) -> Result<Value, TokenError> {
        let data = decode::<Value>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            TokenError::Invalid
        })?;

        // jsonwebtoken accepts `exp == now`; a token is only good strictly before it.
        let exp = data
            .claims
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or(TokenError::Invalid)?;
        if Utc::now().timestamp() >= exp {
            tracing::debug!(exp, "token rejected: expired");
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithms", &self.validation.algorithms)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::{SUBJECT_CLAIM, extract_subject};

    fn codec() -> TokenCodec {
        TokenCodec::new(b"unit-test-secret", Duration::hours(24))
    }

    #[test]
    fn issued_token_round_trips_subject() {
        let codec = codec();
        let token = codec.issue(42).unwrap();

        let claims = codec.verify(&token).unwrap();
        let map = claims.as_object().unwrap();

        assert_eq!(extract_subject(map), Ok(42));
        assert_eq!(map["exp"].as_i64().unwrap() - map["iat"].as_i64().unwrap(), 86_400);
    }

    #[test]
    fn token_is_rejected_once_window_has_elapsed() {
        let codec = codec();
        let token = codec
            .issue_at(1, Utc::now() - Duration::hours(25))
            .unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn token_is_rejected_at_exact_expiry() {
        let codec = codec();
        let token = codec.issue_at(1, Utc::now() - codec.ttl()).unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn unsigned_token_is_rejected() {
        // {"alg":"none","typ":"JWT"}.{"user.id":1,"exp":9999999999,"iat":1700000000}.
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                     eyJ1c2VyLmlkIjoxLCJleHAiOjk5OTk5OTk5OTksImlhdCI6MTcwMDAwMDAwMH0.";

        assert_eq!(codec().verify(token), Err(TokenError::Invalid));
    }

    #[test]
    fn non_hmac_algorithm_header_is_rejected() {
        let codec = codec();
        let token = codec.issue(1).unwrap();
        let (_, rest) = token.split_once('.').unwrap();
        // {"alg":"RS256","typ":"JWT"}
        let forged = format!("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.{rest}");

        assert_eq!(codec.verify(&forged), Err(TokenError::Invalid));
    }

    #[test]
    fn other_hmac_variants_are_accepted() {
        let codec = codec();
        let claims = IssuedClaims {
            user_id: 5,
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        let verified = codec.verify(&token).unwrap();
        assert_eq!(verified[SUBJECT_CLAIM], 5);
    }

    #[test]
    fn debug_output_omits_keys() {
        let rendered = format!("{:?}", codec());
        assert!(!rendered.contains("unit-test-secret"));
    }
}

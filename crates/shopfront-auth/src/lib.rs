//! # Shopfront Auth
//!
//! Stateless bearer-token primitives for the Shopfront API.
//!
//! - [`jwt`]: [`TokenCodec`] issues and verifies HMAC-signed tokens
//! - [`claims`]: claim structures and [`extract_subject`], which decodes
//!   the principal id from a verified payload
//!
//! Nothing here touches the database. Resolving the id into a principal
//! and checking its role happens in the server's authorization gate.
//!
//! # Example
//!
//! ```ignore
//! use shopfront_auth::{TokenCodec, TokenVerifier, extract_subject};
//!
//! let codec = TokenCodec::from_config(&jwt_config);
//! let token = codec.issue(7)?;
//!
//! let payload = codec.verify(&token)?;
//! let id = extract_subject(payload.as_object().unwrap())?;
//! assert_eq!(id, 7);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{ClaimError, ClaimSet, IssuedClaims, PrincipalId, SUBJECT_CLAIM, extract_subject};
pub use jwt::{TokenCodec, TokenError, TokenVerifier};

//! Token claim structures and subject decoding.
//!
//! Tokens are verified into an untyped [`ClaimSet`]. The principal id is
//! then pulled out of it with [`extract_subject`], which accepts the id
//! either as a JSON number or as a decimal string. Both spellings must
//! resolve to the same principal.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

/// Claim key carrying the principal id.
pub const SUBJECT_CLAIM: &str = "user.id";

/// Canonical principal identifier, used end-to-end from token to handler.
pub type PrincipalId = i64;

/// Untyped claim payload of a verified token.
pub type ClaimSet = serde_json::Map<String, Value>;

/// Claims written into every token at issuance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssuedClaims {
    #[serde(rename = "user.id")]
    pub user_id: PrincipalId,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClaimError {
    #[error("subject claim is missing or malformed")]
    Invalid,
}

/// The wire representations accepted for the subject claim.
#[derive(Debug, Clone, Copy)]
enum SubjectRepr<'a> {
    Number(&'a Number),
    Text(&'a str),
}

impl<'a> SubjectRepr<'a> {
    fn classify(value: Option<&'a Value>) -> Result<Self, ClaimError> {
        match value {
            Some(Value::Number(n)) => Ok(Self::Number(n)),
            Some(Value::String(s)) => Ok(Self::Text(s)),
            _ => Err(ClaimError::Invalid),
        }
    }

    fn resolve(self) -> Result<PrincipalId, ClaimError> {
        match self {
            // Whole numbers decode exactly. Anything else is truncated toward
            // zero; `as` saturates at the i64 bounds.
            Self::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .ok_or(ClaimError::Invalid),
            Self::Text(s) => s.parse::<i64>().map_err(|_| ClaimError::Invalid),
        }
    }
}

/// Reads the principal id from a verified claim set.
pub fn extract_subject(claims: &ClaimSet) -> Result<PrincipalId, ClaimError> {
    SubjectRepr::classify(claims.get(SUBJECT_CLAIM))?.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> ClaimSet {
        let mut map = ClaimSet::new();
        map.insert(SUBJECT_CLAIM.to_string(), value);
        map
    }

    #[test]
    fn integer_subject() {
        assert_eq!(extract_subject(&claims(json!(1))), Ok(1));
        assert_eq!(extract_subject(&claims(json!(-42))), Ok(-42));
    }

    #[test]
    fn float_subject_is_truncated_toward_zero() {
        assert_eq!(extract_subject(&claims(json!(1.0))), Ok(1));
        assert_eq!(extract_subject(&claims(json!(7.9))), Ok(7));
        assert_eq!(extract_subject(&claims(json!(-7.9))), Ok(-7));
    }

    #[test]
    fn out_of_range_number_saturates() {
        assert_eq!(extract_subject(&claims(json!(1e30))), Ok(i64::MAX));
        assert_eq!(extract_subject(&claims(json!(u64::MAX))), Ok(i64::MAX));
    }

    #[test]
    fn decimal_string_subject() {
        assert_eq!(extract_subject(&claims(json!("1"))), Ok(1));
        assert_eq!(extract_subject(&claims(json!("+15"))), Ok(15));
        assert_eq!(extract_subject(&claims(json!("-3"))), Ok(-3));
    }

    #[test]
    fn number_and_string_resolve_to_same_id() {
        assert_eq!(
            extract_subject(&claims(json!(1.0))),
            extract_subject(&claims(json!("1")))
        );
    }

    #[test]
    fn unparseable_strings_are_invalid() {
        for s in ["", " 1", "1.0", "0x10", "abc", "99999999999999999999"] {
            assert_eq!(
                extract_subject(&claims(json!(s))),
                Err(ClaimError::Invalid),
                "{s:?}"
            );
        }
    }

    #[test]
    fn other_shapes_are_invalid() {
        for value in [json!(true), json!(null), json!([1]), json!({"id": 1})] {
            assert_eq!(extract_subject(&claims(value)), Err(ClaimError::Invalid));
        }
    }

    #[test]
    fn missing_subject_is_invalid() {
        let mut map = ClaimSet::new();
        map.insert("sub".to_string(), json!(1));
        assert_eq!(extract_subject(&map), Err(ClaimError::Invalid));
    }

    #[test]
    fn issued_claims_use_the_subject_key() {
        let value = serde_json::to_value(IssuedClaims {
            user_id: 9,
            exp: 2,
            iat: 1,
        })
        .unwrap();
        assert_eq!(value[SUBJECT_CLAIM], json!(9));
    }
}

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::json;

use shopfront_auth::{TokenCodec, TokenError, TokenVerifier, extract_subject};

const SECRET: &[u8] = b"unit-jwt-secret";

fn codec() -> TokenCodec {
    TokenCodec::new(SECRET, Duration::hours(24))
}

#[test]
fn test_issued_token_subject_round_trips() {
    let codec = codec();
    for id in [1, 42, i64::from(i32::MAX) + 1] {
        let token = codec.issue(id).unwrap();
        let claims = codec.verify(&token).unwrap();
        assert_eq!(extract_subject(claims.as_object().unwrap()), Ok(id));
    }
}

#[test]
fn test_token_has_three_segments_and_hs256_header() {
    let token = codec().issue(1).unwrap();
    assert_eq!(token.split('.').count(), 3);

    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::HS256);
}

#[test]
fn test_every_flipped_signature_position_is_invalid() {
    let codec = codec();
    let token = codec.issue(9).unwrap();
    let (head, signature) = token.rsplit_once('.').unwrap();

    // The last character carries padding bits, so it is left alone.
    for i in 0..signature.len() - 1 {
        let mut bytes = signature.as_bytes().to_vec();
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = format!("{head}.{}", String::from_utf8(bytes).unwrap());
        assert_eq!(codec.verify(&tampered), Err(TokenError::Invalid), "position {i}");
    }
}

#[test]
fn test_string_subject_from_foreign_issuer() {
    let now = Utc::now().timestamp();
    let token = encode(
        &Header::new(Algorithm::HS256),
        &json!({ "user.id": "17", "iat": now, "exp": now + 60 }),
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    let claims = codec().verify(&token).unwrap();
    assert_eq!(extract_subject(claims.as_object().unwrap()), Ok(17));
}

#[test]
fn test_token_without_expiry_is_invalid() {
    let token = encode(
        &Header::new(Algorithm::HS256),
        &json!({ "user.id": 1 }),
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    assert_eq!(codec().verify(&token), Err(TokenError::Invalid));
}

#[test]
fn test_garbage_is_invalid() {
    for token in ["", "abc", "a.b.c", "....."] {
        assert_eq!(codec().verify(token), Err(TokenError::Invalid), "{token:?}");
    }
}

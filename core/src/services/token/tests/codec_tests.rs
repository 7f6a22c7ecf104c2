//! Unit tests for the token codec and key ring

use chrono::Duration;
use jsonwebtoken::{decode_header, encode, EncodingKey, Header};
use serde_json::json;
use tl_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, TokenType};
use crate::errors::TokenError;
use crate::services::token::{key_id, SigningKeyRing, TokenCodec};

use super::{hs256_codec, start_time, ISSUER, SECRET};

fn sample_claims(token_type: TokenType) -> Claims {
    Claims::new("u1", token_type, start_time(), 300, ISSUER, None)
}

#[test]
fn test_decode_of_encode_returns_same_claims() {
    let codec = hs256_codec(SECRET);
    let claims = sample_claims(TokenType::Access);

    let token = codec.encode(&claims).unwrap();
    let decoded = codec.decode(&token, start_time()).unwrap();

    assert_eq!(decoded, claims);
}

#[test]
fn test_round_trip_keeps_audience() {
    let codec = TokenCodec::new(SigningKeyRing::hs256(SECRET), ISSUER, Some("web"));
    let claims = Claims::new("u1", TokenType::Refresh, start_time(), 60, ISSUER, Some("web".to_string()));

    let token = codec.encode(&claims).unwrap();
    assert_eq!(codec.decode(&token, start_time()).unwrap(), claims);
}

#[test]
fn test_header_names_current_key() {
    let codec = hs256_codec(SECRET);
    let token = codec.encode(&sample_claims(TokenType::Access)).unwrap();

    let header = decode_header(&token).unwrap();
    assert_eq!(header.kid.as_deref(), Some(key_id(SECRET.as_bytes()).as_str()));
    assert_eq!(header.kid.as_deref(), Some(codec.keys().current_kid()));
}

#[test]
fn test_key_id_is_stable_and_distinct() {
    assert_eq!(key_id(b"alpha"), key_id(b"alpha"));
    assert_ne!(key_id(b"alpha"), key_id(b"beta"));
    assert_eq!(key_id(b"alpha").len(), 16);
}

#[test]
fn test_garbage_is_malformed() {
    let codec = hs256_codec(SECRET);

    assert_eq!(codec.decode("not-a-token", start_time()), Err(TokenError::Malformed));
    assert_eq!(codec.decode("", start_time()), Err(TokenError::Malformed));
    assert_eq!(codec.decode("a.b.c", start_time()), Err(TokenError::Malformed));
}

#[test]
fn test_missing_claims_are_malformed() {
    let codec = hs256_codec(SECRET);
    let mut header = Header::default();
    header.kid = Some(codec.keys().current_kid().to_string());

    let payload = json!({ "exp": start_time().timestamp() + 60, "iss": ISSUER });
    let token = encode(&header, &payload, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();

    assert_eq!(codec.decode(&token, start_time()), Err(TokenError::Malformed));
}

#[test]
fn test_signature_from_another_secret_is_rejected() {
    let codec = hs256_codec(SECRET);
    let claims = sample_claims(TokenType::Access);

    // Same kid, wrong key material
    let mut header = Header::default();
    header.kid = Some(codec.keys().current_kid().to_string());
    let forged = encode(&header, &claims, &EncodingKey::from_secret(b"attacker-secret")).unwrap();
    assert_eq!(codec.decode(&forged, start_time()), Err(TokenError::InvalidSignature));

    // Unknown kid
    let foreign = hs256_codec("attacker-secret").encode(&claims).unwrap();
    assert_eq!(codec.decode(&foreign, start_time()), Err(TokenError::InvalidSignature));
}

#[test]
fn test_token_without_kid_is_checked_against_current_key() {
    let codec = hs256_codec(SECRET);
    let claims = sample_claims(TokenType::Access);

    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
    assert_eq!(codec.decode(&token, start_time()).unwrap(), claims);
}

#[test]
fn test_wrong_issuer_is_rejected() {
    let codec = hs256_codec(SECRET);
    let claims = Claims::new("u1", TokenType::Access, start_time(), 300, "someone-else", None);

    let token = codec.encode(&claims).unwrap();
    assert_eq!(codec.decode(&token, start_time()), Err(TokenError::InvalidSignature));
}

#[test]
fn test_codec_does_not_check_expiry() {
    let codec = hs256_codec(SECRET);
    let claims = sample_claims(TokenType::Access);
    let token = codec.encode(&claims).unwrap();

    let much_later = start_time() + Duration::days(30);
    assert_eq!(codec.decode(&token, much_later).unwrap(), claims);
}

#[test]
fn test_previous_key_verifies_inside_overlap_window() {
    let retired_at = start_time();
    let old_codec = hs256_codec("old-secret");
    let token = old_codec.encode(&sample_claims(TokenType::Refresh)).unwrap();

    let ring = SigningKeyRing::hs256("new-secret")
        .with_previous_secret("old-secret", retired_at)
        .with_overlap_window(Duration::hours(1));
    let codec = TokenCodec::new(ring, ISSUER, None);

    assert!(codec.decode(&token, retired_at + Duration::minutes(30)).is_ok());
    assert!(codec.decode(&token, retired_at + Duration::hours(1)).is_ok());
    assert_eq!(
        codec.decode(&token, retired_at + Duration::hours(1) + Duration::seconds(1)),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn test_rotation_signs_with_current_key_only() {
    let ring = SigningKeyRing::hs256("new-secret")
        .with_previous_secret("old-secret", start_time())
        .with_overlap_window(Duration::hours(1));
    let codec = TokenCodec::new(ring, ISSUER, None);

    let token = codec.encode(&sample_claims(TokenType::Access)).unwrap();
    let header = decode_header(&token).unwrap();

    assert_eq!(header.kid.as_deref(), Some(key_id(b"new-secret").as_str()));
    assert_eq!(codec.keys().previous_kid(), Some(key_id(b"old-secret").as_str()));
}

#[test]
fn test_retired_key_without_ring_entry_is_rejected() {
    let token = hs256_codec("old-secret")
        .encode(&sample_claims(TokenType::Access))
        .unwrap();

    let codec = hs256_codec("new-secret");
    assert_eq!(codec.decode(&token, start_time()), Err(TokenError::InvalidSignature));
}

#[test]
fn test_overlap_window_out_of_range_is_a_key_load_error() {
    let config = JwtConfig::new("new-secret")
        .with_previous_secret("old-secret", 1_700_000_000)
        .with_key_overlap_window(i64::MAX);

    let result = SigningKeyRing::from_config(&config, start_time());
    assert!(result.is_err());
}

#[test]
fn test_overlap_window_past_representable_time_stays_open() {
    let token = hs256_codec("old-secret")
        .encode(&sample_claims(TokenType::Access))
        .unwrap();

    let ring = SigningKeyRing::hs256("new-secret")
        .with_previous_secret("old-secret", start_time())
        .with_overlap_window(Duration::milliseconds(i64::MAX));
    let codec = TokenCodec::new(ring, ISSUER, None);

    assert!(codec.decode(&token, start_time() + Duration::days(365)).is_ok());
}

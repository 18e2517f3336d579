use super::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;

fn set_env_vars() {
    unsafe {
        env::set_var("SERVER_PORT", "8080");
        env::set_var("SERVER_BODY_LIMIT", "10");
        env::set_var("SERVER_TIMEOUT", "30");
        env::set_var("SUPABASE_PROJECT_URL", "https://example.supabase.co");
        env::set_var("SUPABASE_SERVICE_KEY", "service-key-for-unit-testing");
        env::set_var("SUPABASE_JWT_SECRET", "supersecretjwtsecretforunittesting123");
    }
}

fn claims(exp: usize) -> SupabaseClaims {
    SupabaseClaims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        aud: "authenticated".to_string(),
        role: "authenticated".to_string(),
        exp,
    }
}

#[test]
fn test_validate_supabase_jwt_success() {
    set_env_vars();
    let secret = "supersecretjwtsecretforunittesting123";
    let my_claims = claims(9999999999);

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    let validated = validate_supabase_jwt(&token).expect("Valid token should pass");
    assert_eq!(validated.sub, my_claims.sub);
    assert_eq!(validated.role, my_claims.role);
}

#[test]
fn test_validate_supabase_jwt_expired() {
    set_env_vars();
    let secret = "supersecretjwtsecretforunittesting123";
    let my_claims = claims(1);

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    assert!(validate_supabase_jwt(&token).is_err());
}

#[test]
fn test_validate_supabase_jwt_invalid_signature() {
    set_env_vars();
    let secret = "wrongsecret";
    let my_claims = claims(9999999999);

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    assert!(validate_supabase_jwt(&token).is_err());
}

#[test]
fn test_validate_supabase_jwt_wrong_audience() {
    set_env_vars();
    let secret = "supersecretjwtsecretforunittesting123";
    let mut my_claims = claims(9999999999);
    my_claims.aud = "anon".to_string();

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    assert!(validate_supabase_jwt(&token).is_err());
}

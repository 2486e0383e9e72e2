use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::env;

use super::models::Claims;

const DEFAULT_JWT_SECRET: &str = "renu-internship-jwt-secret-change-in-production";
const AUTH_TOKEN_EXPIRY_SECONDS: i64 = 5 * 24 * 60 * 60; // 5 days
const RESET_TOKEN_EXPIRY_SECONDS: i64 = 60 * 60; // 1 hour

fn get_jwt_secret() -> String {
    env::var("JWT_SECRET_KEY").unwrap_or_else(|_| {
        log::warn!("JWT_SECRET_KEY not set, using default secret. SET THIS IN PRODUCTION!");
        DEFAULT_JWT_SECRET.to_string()
    })
}

fn issue_token(user_id: &str, token_type: &str, expiry_seconds: i64) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + expiry_seconds as usize,
        iat: now,
        token_type: token_type.to_string(),
    };

    let secret = get_jwt_secret();
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Generate the session token carried in the `authToken` cookie.
pub fn generate_auth_token(user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
    issue_token(user_id, "auth", AUTH_TOKEN_EXPIRY_SECONDS)
}

/// Generate the short-lived token embedded in password-reset links.
pub fn generate_reset_token(user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
    issue_token(user_id, "reset", RESET_TOKEN_EXPIRY_SECONDS)
}

/// Validate and decode a token
pub fn validate_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_jwt_secret();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Reset-token lifetime, for the stored expiry column.
pub fn reset_token_expiry_seconds() -> i64 {
    RESET_TOKEN_EXPIRY_SECONDS
}

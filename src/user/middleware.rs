use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, HttpRequest};
use uuid::Uuid;

use super::jwt::validate_token;
use super::models::Claims;

const AUTH_COOKIE: &str = "authToken";

/// Extract the session token from the auth cookie, falling back to a Bearer
/// header for non-browser clients.
fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(AUTH_COOKIE) {
        return Some(cookie.value().to_string());
    }
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|t| t.to_string()))
}

/// Validate the request's token and return its claims.
pub fn validate_request_token(req: &HttpRequest) -> Result<Claims, Error> {
    let token =
        extract_token(req).ok_or_else(|| ErrorUnauthorized("Authentication required"))?;

    let claims = validate_token(&token).map_err(|e| {
        log::warn!("Token validation failed: {:?}", e);
        ErrorUnauthorized("Invalid or expired token")
    })?;

    if claims.token_type != "auth" {
        return Err(ErrorUnauthorized("Invalid token type"));
    }

    Ok(claims)
}

/// Validate the token and parse the authenticated user's id.
pub fn authenticated_user_id(req: &HttpRequest) -> Result<Uuid, Error> {
    let claims = validate_request_token(req)?;
    Uuid::parse_str(&claims.sub).map_err(|_| ErrorUnauthorized("Invalid token subject"))
}

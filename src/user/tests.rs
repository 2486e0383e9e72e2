//! Unit tests for the authentication primitives.

use uuid::Uuid;

use super::jwt::{generate_auth_token, generate_reset_token, validate_token};
use super::models::{User, UserResponse};

#[test]
fn test_generate_and_validate_auth_token() {
    let user_id = Uuid::new_v4().to_string();

    let token = generate_auth_token(&user_id).expect("Failed to generate auth token");
    let claims = validate_token(&token).expect("Failed to validate token");

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.token_type, "auth");
}

#[test]
fn test_generate_and_validate_reset_token() {
    let user_id = Uuid::new_v4().to_string();

    let token = generate_reset_token(&user_id).expect("Failed to generate reset token");
    let claims = validate_token(&token).expect("Failed to validate token");

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.token_type, "reset");
}

#[test]
fn test_token_contains_correct_claims() {
    let token = generate_auth_token("test-user-id").expect("Failed to generate token");
    let claims = validate_token(&token).expect("Failed to validate token");

    assert!(!claims.sub.is_empty());
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_invalid_token_returns_error() {
    let result = validate_token("invalid.token.here");
    assert!(result.is_err());
}

#[test]
fn test_user_to_user_response_conversion() {
    let user = User {
        id: Uuid::new_v4(),
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        password_hash: "hash".to_string(),
        phone_number: "9876543210".to_string(),
        college: "Example College".to_string(),
        city: "Gurugram".to_string(),
        state: "Haryana".to_string(),
        department_name: "Web Development".to_string(),
        department_id: None,
        start_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2026, 4, 5).unwrap(),
        reset_token: None,
        reset_token_expiry: None,
        created_at: None,
        updated_at: None,
    };

    let response = UserResponse::from(&user);
    assert_eq!(response.name, user.name);
    assert_eq!(response.department, user.department_name);
    assert_eq!(response.start_date, user.start_date);
}

//! Registration, login and password-lifecycle handlers.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use bcrypt::{hash, verify, DEFAULT_COST};
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use super::middleware::authenticated_user_id;
use super::jwt::{generate_auth_token, generate_reset_token, reset_token_expiry_seconds, validate_token};
use super::models::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, SendResetRequest,
    UserResponse,
};
use crate::db::AppState;
use crate::docgen::CandidateDetails;
use crate::ErrorResponse;

const MIN_PASSWORD_LENGTH: usize = 5;
const AUTH_COOKIE: &str = "authToken";

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[\w\-.]+@([\w-]+\.)+[\w-]{2,4}$").expect("email regex");
}

fn auth_cookie(token: String) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(5))
        .finish()
}

/// Registration endpoint. A successful registration also generates and stores
/// the candidate's offer letter; a failure there is logged but does not fail
/// the registration.
#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    post,
    path = "/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> impl Responder {
    let payload = body.into_inner();

    if payload.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Name is required"));
    }
    if !EMAIL_RE.is_match(&payload.email) {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("A valid email is required"));
    }
    if payload.password.len() < MIN_PASSWORD_LENGTH {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(
            "Password must be at least 5 characters long",
        ));
    }
    if payload.end_date <= payload.start_date {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("End date must be after start date"));
    }

    match state.get_user_by_email(&payload.email).await {
        Ok(Some(_)) => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("Email already exists"));
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Database error during registration: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Registration failed"));
        }
    }

    let password_hash = match hash(&payload.password, DEFAULT_COST) {
        Ok(hash) => hash,
        Err(e) => {
            log::error!("Password hashing failed: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Registration failed"));
        }
    };

    let user = match state.insert_user(&payload, &password_hash).await {
        Ok(user) => user,
        Err(e) => {
            log::error!("Failed to insert user: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Registration failed"));
        }
    };

    let candidate = CandidateDetails {
        name: user.name.clone(),
        email: user.email.clone(),
        department_name: user.department_name.clone(),
        start_date: user.start_date,
        end_date: user.end_date,
        tenure_months: 3,
    };
    if let Err(e) = crate::letter::handlers::generate_and_store_offer_letter(&state, candidate).await
    {
        log::error!("Offer letter generation failed for {}: {e}", user.email);
    }

    let token = match generate_auth_token(&user.id.to_string()) {
        Ok(token) => token,
        Err(e) => {
            log::error!("Failed to generate auth token: {e:?}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Registration failed"));
        }
    };

    HttpResponse::Created()
        .cookie(auth_cookie(token))
        .json(UserResponse::from(&user))
}

#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    post,
    path = "/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> impl Responder {
    let user = match state.get_user_by_email(&body.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(ErrorResponse::new("Unauthorized", "Invalid credentials"));
        }
        Err(e) => {
            log::error!("Database error during login: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Login failed"));
        }
    };

    let password_valid = verify(&body.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return HttpResponse::Unauthorized()
            .json(ErrorResponse::new("Unauthorized", "Invalid credentials"));
    }

    let token = match generate_auth_token(&user.id.to_string()) {
        Ok(token) => token,
        Err(e) => {
            log::error!("Failed to generate auth token: {e:?}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Login failed"));
        }
    };

    HttpResponse::Ok()
        .cookie(auth_cookie(token))
        .json(UserResponse::from(&user))
}

#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    post,
    path = "/user/send-reset-password",
    request_body = SendResetRequest,
    responses(
        (status = 200, description = "Password reset email sent"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn send_reset_password(
    state: web::Data<AppState>,
    body: web::Json<SendResetRequest>,
) -> impl Responder {
    let user = match state.get_user_by_email(&body.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse::not_found("User not found"));
        }
        Err(e) => {
            log::error!("Database error during password reset: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to send password reset email"));
        }
    };

    let Some(mailer) = state.mailer.clone() else {
        log::error!("Password reset requested but no mailer is configured");
        return HttpResponse::InternalServerError()
            .json(ErrorResponse::internal_error("Mail delivery is not configured"));
    };

    let token = match generate_reset_token(&user.id.to_string()) {
        Ok(token) => token,
        Err(e) => {
            log::error!("Failed to generate reset token: {e:?}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to send password reset email"));
        }
    };

    let expiry = chrono::Utc::now() + chrono::Duration::seconds(reset_token_expiry_seconds());
    if let Err(e) = state.set_reset_token(user.id, &token, expiry).await {
        log::error!("Failed to store reset token: {e}");
        return HttpResponse::InternalServerError()
            .json(ErrorResponse::internal_error("Failed to send password reset email"));
    }

    if let Err(e) = mailer.send_password_reset(&user.email, user.id, &token).await {
        log::error!("Failed to send reset mail to {}: {e}", user.email);
        return HttpResponse::InternalServerError()
            .json(ErrorResponse::internal_error("Failed to send password reset email"));
    }

    HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Password reset email sent"
    }))
}

#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    post,
    path = "/user/reset-password/{id}/{token}",
    request_body = ResetPasswordRequest,
    params(
        ("id" = Uuid, Path, description = "User id from the reset link"),
        ("token" = String, Path, description = "Reset token from the reset link")
    ),
    responses(
        (status = 200, description = "Password reset successful"),
        (status = 401, description = "Invalid or expired reset link", body = ErrorResponse)
    )
)]
pub async fn reset_password(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
    body: web::Json<ResetPasswordRequest>,
) -> impl Responder {
    let (user_id, token) = path.into_inner();

    if body.new_password.len() < MIN_PASSWORD_LENGTH {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(
            "Password must be at least 5 characters long",
        ));
    }

    let claims = match validate_token(&token) {
        Ok(claims) if claims.token_type == "reset" => claims,
        _ => {
            return HttpResponse::Unauthorized()
                .json(ErrorResponse::new("Unauthorized", "Invalid or expired token"));
        }
    };
    if claims.sub != user_id.to_string() {
        return HttpResponse::Unauthorized()
            .json(ErrorResponse::new("Unauthorized", "Invalid or expired reset link"));
    }

    let user = match state.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(ErrorResponse::new("Unauthorized", "Invalid or expired reset link"));
        }
        Err(e) => {
            log::error!("Database error during password reset: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to reset password"));
        }
    };

    let token_matches = user.reset_token.as_deref() == Some(token.as_str());
    let token_fresh = user
        .reset_token_expiry
        .map(|expiry| expiry > chrono::Utc::now())
        .unwrap_or(false);
    if !token_matches || !token_fresh {
        return HttpResponse::Unauthorized()
            .json(ErrorResponse::new("Unauthorized", "Invalid or expired reset link"));
    }

    let password_hash = match hash(&body.new_password, DEFAULT_COST) {
        Ok(hash) => hash,
        Err(e) => {
            log::error!("Password hashing failed: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to reset password"));
        }
    };

    if let Err(e) = state.update_user_password(user.id, &password_hash).await {
        log::error!("Failed to update password: {e}");
        return HttpResponse::InternalServerError()
            .json(ErrorResponse::internal_error("Failed to reset password"));
    }
    if let Err(e) = state.clear_reset_token(user.id).await {
        log::error!("Failed to clear reset token: {e}");
    }

    HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Password reset successful"
    }))
}

#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    post,
    path = "/user/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed successfully"),
        (status = 401, description = "Current password is incorrect", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn change_password(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ChangePasswordRequest>,
) -> actix_web::Result<HttpResponse> {
    let user_id = authenticated_user_id(&req)?;

    if body.new_password.len() < MIN_PASSWORD_LENGTH {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::bad_request(
            "Password must be at least 5 characters long",
        )));
    }

    let user = match state.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ErrorResponse::not_found("User not found")));
        }
        Err(e) => {
            log::error!("Database error during password change: {e}");
            return Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to change password")));
        }
    };

    let current_valid = verify(&body.current_password, &user.password_hash).unwrap_or(false);
    if !current_valid {
        return Ok(HttpResponse::Unauthorized()
            .json(ErrorResponse::new("Unauthorized", "Current password is incorrect")));
    }

    let password_hash = match hash(&body.new_password, DEFAULT_COST) {
        Ok(hash) => hash,
        Err(e) => {
            log::error!("Password hashing failed: {e}");
            return Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to change password")));
        }
    };

    if let Err(e) = state.update_user_password(user.id, &password_hash).await {
        log::error!("Failed to update password: {e}");
        return Ok(HttpResponse::InternalServerError()
            .json(ErrorResponse::internal_error("Failed to change password")));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Password changed successfully"
    })))
}

#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    get,
    path = "/user",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let user_id = authenticated_user_id(&req)?;

    match state.get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(UserResponse::from(&user))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorResponse::not_found("User not found"))),
        Err(e) => {
            log::error!("Database error fetching user: {e}");
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to fetch user")))
        }
    }
}

//! Authentication handlers: registration, login, logout, profile.

use actix_web::cookie::{Cookie, time::Duration as CookieDuration};
use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_core::ports::{AuthError, PasswordService, TokenService};
use quill_shared::dto::{
    LoginRequest, LoginResponse, MessageResponse, ProfileResponse, RegisterRequest, UserResponse,
};

use crate::middleware::auth::{Identity, TOKEN_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        created_at: user.created_at,
    }
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if !User::username_is_valid(&req.username) {
        return Err(AppError::BadRequest(
            "Username must be at least 4 characters".to_string(),
        ));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    // Check if the username is already taken
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AuthError::DuplicateUsername.into());
    }

    // Hashing is CPU-bound; run it on the blocking pool, off the event loop.
    // The plaintext moves into the closure and is never logged or echoed.
    let service = password_service.get_ref().clone();
    let password = req.password;
    let password_hash = web::block(move || service.hash(&password)).await??;

    let user = User::new(req.username, password_hash);
    let saved = state.users.save(user).await.map_err(|e| match e {
        // The uniqueness constraint may still fire under a concurrent
        // registration race; surface it the same way.
        RepoError::Constraint(_) => AppError::from(AuthError::DuplicateUsername),
        other => other.into(),
    })?;

    tracing::info!(username = %saved.username, user_id = %saved.id, "User registered");

    Ok(HttpResponse::Created().json(user_response(&saved)))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find user by exact username match
    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    // Verify password on the blocking pool
    let service = password_service.get_ref().clone();
    let password = req.password;
    let hash = user.password_hash.clone();
    let valid = web::block(move || service.verify(&password, &hash)).await??;

    if !valid {
        return Err(AuthError::InvalidPassword.into());
    }

    // Issue the credential token as an HTTP-only cookie
    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let cookie = Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(state.cookies.secure)
        .same_site(state.cookies.same_site.into())
        .max_age(CookieDuration::seconds(token_service.expiration_seconds()))
        .finish();

    tracing::info!(username = %user.username, "Login successful");

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        message: "Login successful".to_string(),
        user: user_response(&user),
    }))
}

/// GET /profile - Protected route returning the acting principal.
pub async fn profile(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ProfileResponse {
        id: identity.user_id,
        username: identity.username,
    }))
}

/// POST /logout - clears the credential cookie.
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(MessageResponse {
        message: "Logged out".to_string(),
    })
}

//! Signup and login handlers.

use actix_web::{HttpResponse, web};

use around_core::domain::User;
use around_shared::dto::{LoginRequest, SignupRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    tracing::info!(username = %req.username, "Received signup request");

    let user = User::new(req.username, req.password, req.age, req.gender);
    if !state.credentials.create(user).await? {
        return Err(AppError::Conflict(
            "Failed to add a new user: username already exists".to_string(),
        ));
    }

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("User added successfully."))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    tracing::info!(username = %req.username, "Received login request");

    if !state.credentials.verify(&req.username, &req.password).await {
        tracing::info!(username = %req.username, "Invalid password or username");
        return Err(AppError::Forbidden("Invalid password or username".to_string()));
    }

    let token = state
        .tokens
        .generate_token(&req.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(token))
}

//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod search;


use actix_web::{HttpRequest, error::JsonPayloadError, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // JSON bodies are decoded whatever Content-Type the client declares.
    let json = web::JsonConfig::default()
        .content_type(|_| true)
        .content_type_required(false)
        .error_handler(json_error);

    cfg.app_data(json)
        // Public routes
        .route("/health", web::get().to(health::health_check))
        .route("/signup", web::post().to(auth::signup))
        .route("/login", web::post().to(auth::login))
        // Bearer-token routes
        .route("/post", web::post().to(posts::create_post))
        .route("/search", web::get().to(search::search));
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Request body is not valid JSON: {}", err)).into()
}

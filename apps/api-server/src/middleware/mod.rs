//! Middleware modules.

pub mod auth;
pub mod error;

use actix_cors::Cors;

/// Any origin, method and header; responses carry `Access-Control-Allow-Origin: *`.
pub fn permissive_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

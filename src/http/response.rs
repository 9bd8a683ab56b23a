//! Response construction.
//!
//! # Responsibilities
//! - Build redirects with an exact `Location`
//! - Build the JSON menu tree response
//!
//! # Design Decisions
//! - Redirects are 302 Found, matching what browsers and crawlers expect
//!   from moved documentation URLs
//! - The tree response keeps status 201 for compatibility with existing
//!   clients, even though nothing is created

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

use crate::http::error::AppError;

/// Content type of the JSON menu tree.
pub const VND_API_JSON: &str = "application/vnd.api+json";

/// 302 redirect to `target`, unmodified.
pub fn found(target: &str) -> Result<Response, AppError> {
    let location =
        HeaderValue::from_str(target).map_err(|e| AppError::Response(e.to_string()))?;

    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .map_err(|e| AppError::Response(e.to_string()))
}

/// Pretty-printed JSON tree with permissive CORS and status 201.
pub fn tree_json(menu: &serde_json::Value) -> Result<Response, AppError> {
    let body = serde_json::to_string_pretty(menu).map_err(|e| AppError::Response(e.to_string()))?;

    Response::builder()
        .status(StatusCode::CREATED)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::CONTENT_TYPE, VND_API_JSON)
        .body(Body::from(body))
        .map_err(|e| AppError::Response(e.to_string()))
}

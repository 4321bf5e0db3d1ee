//! Service-level endpoints: health, index, docs and the unknown-route fallback.

use std::any::Any;

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::errors::{ApiError, AppError, ErrorResponse};
use crate::models::{now_timestamp, Category};
use crate::AppState;

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    /// Seconds since the server started.
    pub uptime: f64,
    pub storage: &'static str,
}

/// GET /api/health - Liveness and uptime.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is running".to_string(),
        timestamp: now_timestamp(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        storage: state.store.mode().as_str(),
    })
}

/// GET / - Describe the API surface.
pub async fn service_index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the Coffee Lab menu API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "menu": "/api/menu-items",
            "categories": "/api/menu-items/category/{category}",
            "search": "/api/menu-items/search?q=",
            "stats": "/api/menu-items/stats",
            "specialOffer": "/api/special-offer",
            "health": "/api/health",
            "docs": "/api-docs"
        }
    }))
}

/// GET /api-docs - Endpoint reference with auth requirements and body shapes.
pub async fn api_docs() -> Json<serde_json::Value> {
    let categories = Category::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Json(json!({
        "title": "Coffee Lab menu API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            {
                "method": "GET",
                "path": "/api/menu-items",
                "description": "List active menu items, newest first",
                "authentication": "none"
            },
            {
                "method": "GET",
                "path": "/api/menu-items/category/{category}",
                "description": "List active items in one category, cheapest first",
                "authentication": "none",
                "pathParams": format!("category: {}", categories)
            },
            {
                "method": "GET",
                "path": "/api/menu-items/search",
                "description": "Case-insensitive search over name, description and tags",
                "authentication": "none",
                "queryParams": "q: at least 2 characters"
            },
            {
                "method": "GET",
                "path": "/api/menu-items/stats",
                "description": "Item counts and average price",
                "authentication": "basic"
            },
            {
                "method": "POST",
                "path": "/api/menu-items",
                "description": "Add a menu item",
                "authentication": "basic",
                "body": {
                    "name": "string, 2-100 characters",
                    "description": "string, 10-500 characters",
                    "price": "integer, 1000-1000000",
                    "category": categories,
                    "discount": "integer 0-100, optional (default 0)",
                    "tags": "array of strings or comma-separated string, optional",
                    "rating": "number 1-5, optional (default 4.5)",
                    "image": "data URI or URL, optional"
                }
            },
            {
                "method": "DELETE",
                "path": "/api/menu-items/{id}",
                "description": "Deactivate a menu item",
                "authentication": "basic"
            },
            {
                "method": "GET",
                "path": "/api/special-offer",
                "description": "Read the special offer banner",
                "authentication": "none"
            },
            {
                "method": "PUT",
                "path": "/api/special-offer",
                "description": "Replace the special offer banner",
                "authentication": "basic",
                "body": { "offer": "string, at least 5 characters" }
            },
            {
                "method": "GET",
                "path": "/api/health",
                "description": "Liveness, uptime and storage mode",
                "authentication": "none"
            }
        ],
        "authentication": {
            "type": "HTTP Basic",
            "header": "Authorization: Basic base64(username:password)"
        }
    }))
}

/// Fallback for routes and methods that do not exist.
pub async fn route_not_found(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> ApiError {
    state.api_error(AppError::NotFound(format!("Route {} not found", uri.path())))
}

/// Turn a handler panic into the 500 envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>, expose_internal: bool) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    let body = ErrorResponse::new(&AppError::Internal(detail), expose_internal);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

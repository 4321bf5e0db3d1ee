//! REST API module.
//!
//! Contains all API routes and handlers following the menu frontend contract.

mod menu_items;
mod service;
mod special_offer;

pub use menu_items::*;
pub use service::*;
pub use special_offer::*;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{ApiError, AppError};
use crate::models::Category;
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: None,
            count: None,
            category: None,
            search_term: None,
            data,
        }
    }

    pub fn created(mut self) -> Self {
        self.status = StatusCode::CREATED;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// A listing envelope carrying its item count.
    pub fn listing(data: Vec<T>) -> Self {
        let count = data.len();
        let mut response = Self::new(data);
        response.count = Some(count);
        response
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

impl AppState {
    /// Wrap an error with this deployment's disclosure policy.
    pub fn api_error(&self, error: AppError) -> ApiError {
        ApiError::new(error, !self.config.is_production())
    }
}

/// Unwrap a JSON body, turning extractor rejections into the error envelope.
pub(crate) fn json_body<T>(
    state: &AppState,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            state.api_error(AppError::BadRequest(format!(
                "Invalid JSON body: {}",
                rejection.body_text()
            )))
        })
}

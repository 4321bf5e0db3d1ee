//! Menu item API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{json_body, success, ApiResponse, ApiResult};
use crate::auth::validate_new_item;
use crate::models::{CreateMenuItemRequest, MenuItem, MenuStats};
use crate::query::{build_new_item, parse_category, ItemFilter, SearchTerm};
use crate::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text query; at least two characters once trimmed.
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/menu-items - List active menu items.
pub async fn list_menu_items(State(state): State<AppState>) -> ApiResult<Vec<MenuItem>> {
    let items = state
        .store
        .find_active(&ItemFilter::All)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(ApiResponse::listing(items))
}

/// GET /api/menu-items/category/:category - List active items in one category.
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Vec<MenuItem>> {
    let category = parse_category(&category).map_err(|e| state.api_error(e))?;

    let items = state
        .store
        .find_active(&ItemFilter::Category(category))
        .await
        .map_err(|e| state.api_error(e))?;

    let mut response = ApiResponse::listing(items);
    response.category = Some(category);
    Ok(response)
}

/// GET /api/menu-items/search - Substring search over active items.
pub async fn search_menu_items(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<MenuItem>> {
    let term = SearchTerm::parse(params.q.as_deref()).map_err(|e| state.api_error(e))?;
    let search_term = term.as_str().to_string();

    let items = state
        .store
        .find_active(&ItemFilter::Search(term))
        .await
        .map_err(|e| state.api_error(e))?;

    let mut response = ApiResponse::listing(items);
    response.search_term = Some(search_term);
    Ok(response)
}

/// GET /api/menu-items/stats - Aggregate statistics (admin).
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<MenuStats> {
    let stats = state
        .store
        .aggregate_stats()
        .await
        .map_err(|e| state.api_error(e))?;

    success(stats)
}

/// POST /api/menu-items - Create a new menu item (admin).
pub async fn create_menu_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateMenuItemRequest>, JsonRejection>,
) -> ApiResult<MenuItem> {
    let request = json_body(&state, payload)?;

    // Validate before anything touches the store
    validate_new_item(&request).map_err(|e| state.api_error(e))?;
    let candidate = build_new_item(&request).map_err(|e| state.api_error(e))?;

    let item = state
        .store
        .insert(candidate)
        .await
        .map_err(|e| state.api_error(e))?;

    tracing::info!("Added menu item {} ({})", item.id, item.name);
    Ok(ApiResponse::new(item)
        .created()
        .with_message("Menu item added"))
}

/// DELETE /api/menu-items/:id - Soft-delete a menu item (admin).
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MenuItem> {
    let item = state
        .store
        .soft_delete(&id)
        .await
        .map_err(|e| state.api_error(e))?;

    tracing::info!("Deactivated menu item {}", item.id);
    Ok(ApiResponse::new(item).with_message("Menu item deleted"))
}

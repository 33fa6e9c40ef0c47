//! HTTP handlers for grocery items

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::{Item, ItemId};
use crate::repository::Repository;
use crate::AppState;
use super::error::{ApiError, ApiJson};

/// Body of `POST /api/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    pub price: Option<f64>,
    pub store: Option<String>,
    pub category: Option<String>,
}

/// List all items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state
        .item_repo
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, "Error fetching items"))?;
    Ok(Json(items))
}

/// Get item by ID
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let item_id = ItemId::from(item_id);
    state
        .item_repo
        .find_by_id(&item_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Error fetching item"))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Item {} not found", item_id)))
}

/// Create a new item
pub async fn create_item(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let mut item = Item::new(request.name);
    item.price = request.price;
    item.store = request.store;
    item.category = request.category;

    let created = state
        .item_repo
        .create(&item)
        .await
        .map_err(|e| ApiError::from_domain(e, "Error creating item"))?;
    tracing::info!(item_id = %created.id, name = %created.name, "item created");
    Ok((StatusCode::CREATED, Json(created)))
}

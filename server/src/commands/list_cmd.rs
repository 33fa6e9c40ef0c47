//! HTTP handlers for grocery lists
//!
//! - `GET  /api/grocery-lists`
//! - `POST /api/grocery-lists`
//! - `GET  /api/grocery-lists/:listId`
//! - `POST /api/grocery-lists/:listId/add-item`

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::{ItemId, ListEntry, ListId, OwnerId, PopulatedList};
use crate::repository::{AddOutcome, GroceryListOperations};
use crate::AppState;
use super::error::{ApiError, ApiJson};

/// Body of `POST /api/grocery-lists`; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub name: Option<String>,
    pub created_by: Option<String>,
}

/// Body of `POST /api/grocery-lists/:listId/add-item`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub item_id: String,
    pub quantity: Option<u32>,
    pub item_name: Option<String>,
    pub price: Option<f64>,
    pub store: Option<String>,
}

impl AddItemRequest {
    fn into_entry(self) -> ListEntry<ItemId> {
        let mut entry = ListEntry::new(ItemId::from(self.item_id));
        if let Some(quantity) = self.quantity {
            entry.quantity = quantity;
        }
        entry.item_name = self.item_name;
        entry.price = self.price;
        entry.store = self.store;
        entry
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddItemResponse {
    pub message: String,
    pub list: PopulatedList,
}

/// List all grocery lists with items populated
pub async fn list_grocery_lists(
    State(state): State<AppState>,
) -> Result<Json<Vec<PopulatedList>>, ApiError> {
    let lists = state
        .list_repo
        .list_populated()
        .await
        .map_err(|e| ApiError::from_domain(e, "Error fetching grocery lists"))?;
    Ok(Json(lists))
}

/// Get one grocery list with items populated
pub async fn get_grocery_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<PopulatedList>, ApiError> {
    let list_id = ListId::from(list_id);
    state
        .list_repo
        .find_populated(&list_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Error fetching grocery list"))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Grocery list {} not found", list_id)))
}

/// Create a grocery list
///
/// An empty body is accepted and treated like `{}`.
pub async fn create_grocery_list(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<PopulatedList>), ApiError> {
    let request: CreateListRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateListRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))?
    };

    let created_by = match request.created_by {
        Some(owner) => OwnerId::new(&owner)?,
        None => state.default_owner.clone(),
    };

    let list = state
        .list_repo
        .create_list(request.name, created_by)
        .await
        .map_err(|e| ApiError::from_domain(e, "Error creating grocery list"))?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// Add an item to a grocery list
///
/// Adding an item the list already references changes nothing.
pub async fn add_item_to_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    ApiJson(request): ApiJson<AddItemRequest>,
) -> Result<Json<AddItemResponse>, ApiError> {
    let list_id = ListId::from(list_id);
    let outcome = state
        .list_repo
        .add_entry(&list_id, request.into_entry())
        .await
        .map_err(|e| ApiError::from_domain(e, "Error adding item to list"))?;

    let list = state
        .list_repo
        .find_populated(&list_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Error adding item to list"))?
        .ok_or_else(|| ApiError::NotFound(format!("Grocery list {} not found", list_id)))?;

    let message = match outcome {
        AddOutcome::Added => "Item added to list successfully",
        AddOutcome::AlreadyPresent => "Item already in list",
    };
    Ok(Json(AddItemResponse {
        message: message.to_string(),
        list,
    }))
}

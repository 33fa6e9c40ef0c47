//! API Bindings
//!
//! Thin wrappers over the grocery REST API.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{AddItemResponse, ErrorBody, GroceryList, Item};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message} ({status})")]
    Api {
        status: StatusCode,
        message: String,
        detail: Option<String>,
    },
}

// ========================
// Request Bodies
// ========================

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListArgs<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemArgs<'a> {
    pub item_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CreateItemArgs<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<&'a str>,
}

/// Unreserved characters stay as-is
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a single path segment
pub fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Client for one API server
pub struct GroceryApi {
    base: String,
    http: Client,
}

impl GroceryApi {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let text = response.text().await?;
        let (message, detail) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.message, body.error),
            Err(_) => (text, None),
        };
        Err(ClientError::Api {
            status,
            message,
            detail,
        })
    }

    // ========================
    // Grocery Lists
    // ========================

    pub async fn list_lists(&self) -> Result<Vec<GroceryList>, ClientError> {
        tracing::debug!("GET /api/grocery-lists");
        let response = self.http.get(self.url("/api/grocery-lists")).send().await?;
        Self::decode(response).await
    }

    pub async fn get_list(&self, list_id: &str) -> Result<GroceryList, ClientError> {
        let path = format!("/api/grocery-lists/{}", segment(list_id));
        let response = self.http.get(self.url(&path)).send().await?;
        Self::decode(response).await
    }

    pub async fn create_list(&self, args: &CreateListArgs<'_>) -> Result<GroceryList, ClientError> {
        let response = self
            .http
            .post(self.url("/api/grocery-lists"))
            .json(args)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn add_item(
        &self,
        list_id: &str,
        args: &AddItemArgs<'_>,
    ) -> Result<AddItemResponse, ClientError> {
        let path = format!("/api/grocery-lists/{}/add-item", segment(list_id));
        let response = self.http.post(self.url(&path)).json(args).send().await?;
        Self::decode(response).await
    }

    // ========================
    // Items
    // ========================

    pub async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let response = self.http.get(self.url("/api/items")).send().await?;
        Self::decode(response).await
    }

    pub async fn create_item(&self, args: &CreateItemArgs<'_>) -> Result<Item, ClientError> {
        let response = self
            .http
            .post(self.url("/api/items"))
            .json(args)
            .send()
            .await?;
        Self::decode(response).await
    }
}

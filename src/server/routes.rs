use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use url::Url;

use crate::error::ApiError;
use crate::extract;
use crate::models::{PricePoint, ProductSnapshot, WatchlistEntry, WatchlistId};
use crate::server::AppState;
use crate::storage::{ProductStore, WatchlistStore};
use crate::utils::http::fetch_with_retry;

#[derive(Deserialize)]
pub struct UrlQuery {
    url: Option<String>,
}

fn required_url(query: UrlQuery) -> Result<String, ApiError> {
    query
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("URL parameter is missing".to_string()))
}

/// Body must carry non-empty `url` and `shortName`; everything else is
/// preserved verbatim.
fn parse_entry(body: Value) -> Result<WatchlistEntry, ApiError> {
    let entry: WatchlistEntry = serde_json::from_value(body)
        .map_err(|_| ApiError::Validation("Invalid request body".to_string()))?;
    if !entry.is_valid() {
        return Err(ApiError::Validation("Invalid request body".to_string()));
    }
    Ok(entry)
}

pub async fn scrape(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<ProductSnapshot>, ApiError> {
    let url = required_url(query)?;
    let url = Url::parse(&url)
        .map_err(|_| ApiError::Validation("URL parameter is not a valid URL".to_string()))?;

    let response = fetch_with_retry(&state.client, url.as_str(), state.config.fetch_max_retries)
        .await
        .map_err(ApiError::Extraction)?;
    let html = response
        .text()
        .await
        .map_err(|e| ApiError::Extraction(e.into()))?;

    let snapshot =
        extract::scrape_product_page(url.as_str(), &html).map_err(ApiError::Extraction)?;

    state
        .storage
        .insert_snapshot(&snapshot)
        .await
        .map_err(|e| ApiError::storage("Failed to store product data", e))?;
    info!("Product snapshot stored for {}", url);

    Ok(Json(snapshot))
}

pub async fn add_to_bucket_list(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let entry = parse_entry(body)?;

    let id = state
        .storage
        .insert(&entry)
        .await
        .map_err(|e| ApiError::storage("Failed to add product to bucket list", e))?;
    info!("Product added to bucket list: {}", entry.short_name);

    Ok(Json(json!({
        "message": "Bucket item added successfully",
        "id": id.to_string(),
    })))
}

pub async fn get_bucket_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<WatchlistEntry>>, ApiError> {
    let entries = state
        .storage
        .list_all()
        .await
        .map_err(|e| ApiError::storage("Failed to retrieve bucket list", e))?;

    Ok(Json(entries))
}

pub async fn update_bucket_list(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = WatchlistId::parse(&raw_id)
        .ok_or_else(|| ApiError::Validation("Invalid bucket item id".to_string()))?;
    let entry = parse_entry(body)?;

    let updated = state
        .storage
        .update_by_id(id, &entry)
        .await
        .map_err(|e| ApiError::storage("Failed to update bucket item", e))?;
    if !updated {
        return Err(ApiError::NotFound("Failed to update bucket item".to_string()));
    }

    info!("Bucket item updated: {}", id);
    Ok(Json(json!({ "message": "Bucket item updated successfully" })))
}

pub async fn delete_from_bucket_list(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = WatchlistId::parse(&raw_id)
        .ok_or_else(|| ApiError::Validation("Invalid bucket item id".to_string()))?;

    let deleted = state
        .storage
        .delete_by_id(id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete bucket item", e))?;
    if !deleted {
        return Err(ApiError::NotFound("Failed to delete bucket item".to_string()));
    }

    info!("Bucket item deleted: {}", id);
    Ok(Json(json!({ "message": "Bucket item deleted successfully" })))
}

pub async fn price_history(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<Vec<PricePoint>>, ApiError> {
    let url = required_url(query)?;

    let history = state
        .storage
        .price_history(&url)
        .await
        .map_err(|e| ApiError::storage("Failed to retrieve price history", e))?;

    Ok(Json(history))
}

#[derive(Deserialize)]
pub struct EmailConfigBody {
    url: String,
    email: String,
}

pub async fn configure_email(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let body: EmailConfigBody = serde_json::from_value(body)
        .map_err(|_| ApiError::Validation("Invalid request body".to_string()))?;
    if body.url.trim().is_empty() || body.email.trim().is_empty() {
        return Err(ApiError::Validation("Invalid request body".to_string()));
    }

    state
        .storage
        .set_email_for_url(&body.url, &body.email)
        .await
        .map_err(|e| ApiError::storage("Failed to configure email", e))?;
    info!("Email configuration successful for URL: {}", body.url);

    Ok(Json(json!({ "message": "Email configuration successful" })))
}

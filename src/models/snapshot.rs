use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One captured extraction result for a product page at a point in time.
///
/// Immutable once assembled; either every field is populated (possibly with
/// a sentinel) or the whole extraction failed and no snapshot exists.
/// Wire field names follow the public API contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub url: String,
    pub description: String,
    /// Currency-formatted price text with a fixed 4-character suffix trim,
    /// applied only when the price element was found.
    #[serde(rename = "price")]
    pub display_price: String,
    pub customer_ratings: String,
    #[serde(rename = "number_of_reviews")]
    pub review_count: String,
    /// At most two image URLs in document order.
    pub image_urls: Vec<String>,
    pub specifications: HashMap<String, String>,
    /// Whole-number price with thousands separators removed.
    /// None when the element is absent, never zero.
    pub current_price: Option<f64>,
    /// Stamped at assembly time, not fetch time.
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
}

/// Two-field projection of a snapshot used for price history queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub current_price: Option<f64>,
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
}

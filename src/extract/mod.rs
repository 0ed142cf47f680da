//! Page-to-record extraction pipeline.
//!
//! Each field extractor independently locates one markup fragment and
//! converts it to a typed value; a missing element is a valid outcome,
//! not an error. The assembler merges the results into one immutable
//! [`ProductSnapshot`] and stamps the capture time.

mod fields;

use anyhow::Result;
use chrono::Utc;
use scraper::Html;

use crate::models::{
    ProductSnapshot, DESCRIPTION_NOT_FOUND, IMAGES_NOT_FOUND, PRICE_NOT_FOUND, RATINGS_NOT_FOUND,
    REVIEWS_NOT_FOUND,
};
use crate::parsers::{strip_leading_chars, trim_trailing_chars};

// Fixed slicing offsets for the reference page layout. Pure character
// offsets, not currency- or locale-aware.
const PRICE_SUFFIX_LEN: usize = 4;
const REVIEW_PREFIX_LEN: usize = 4;

/// Assemble a snapshot from raw page markup.
///
/// Extractors run independently over the same parsed document, in no
/// particular order. Fixed-offset trims are applied only when the
/// element was found, so sentinel strings pass through intact. Either
/// a complete snapshot is produced or the whole extraction fails;
/// there is no partial result.
pub fn scrape_product_page(url: &str, html: &str) -> Result<ProductSnapshot> {
    let doc = Html::parse_document(html);

    let display_price = fields::display_price(&doc)
        .map(|raw| trim_trailing_chars(&raw, PRICE_SUFFIX_LEN))
        .unwrap_or_else(|| PRICE_NOT_FOUND.to_string());

    let description = fields::title(&doc).unwrap_or_else(|| DESCRIPTION_NOT_FOUND.to_string());

    let customer_ratings =
        fields::customer_ratings(&doc).unwrap_or_else(|| RATINGS_NOT_FOUND.to_string());

    let review_count = fields::review_count(&doc)
        .map(|raw| strip_leading_chars(&raw, REVIEW_PREFIX_LEN))
        .unwrap_or_else(|| REVIEWS_NOT_FOUND.to_string());

    let mut image_urls = fields::image_urls(&doc);
    if image_urls.is_empty() {
        image_urls.push(IMAGES_NOT_FOUND.to_string());
    }

    let specifications = fields::specifications(&doc)?;
    let current_price = fields::current_price(&doc)?;

    Ok(ProductSnapshot {
        url: url.to_string(),
        description,
        display_price,
        customer_ratings,
        review_count,
        image_urls,
        specifications,
        current_price,
        captured_at: Utc::now(),
    })
}

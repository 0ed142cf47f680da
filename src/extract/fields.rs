use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;

use crate::parsers::{clean_text, parse_whole_price};

static SPAN_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span").expect("Invalid span selector"));
static PRICE_CLASS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"a-price").expect("Invalid price class regex"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span#productTitle").expect("Invalid title selector"));
static RATINGS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span#acrCustomerReviewText").expect("Invalid ratings selector")
});
static REVIEWS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span#acrPopover").expect("Invalid reviews selector"));
static IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img.a-dynamic-image").expect("Invalid image selector"));
static SPEC_CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#productOverview_feature_div").expect("Invalid overview selector")
});
static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Invalid row selector"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Invalid cell selector"));
static WHOLE_PRICE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.a-price-whole").expect("Invalid whole price selector"));

/// First span whose class attribute matches the price-indicator pattern.
/// The container span precedes its children in document order, so this
/// picks up the full currency-formatted text.
pub fn display_price(doc: &Html) -> Option<String> {
    doc.select(&SPAN_SELECTOR)
        .find(|el| {
            el.value()
                .attr("class")
                .map_or(false, |class| PRICE_CLASS_REGEX.is_match(class))
        })
        .map(|el| clean_text(&el.text().collect::<String>()))
}

pub fn title(doc: &Html) -> Option<String> {
    doc.select(&TITLE_SELECTOR)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
}

pub fn customer_ratings(doc: &Html) -> Option<String> {
    doc.select(&RATINGS_SELECTOR)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
}

pub fn review_count(doc: &Html) -> Option<String> {
    doc.select(&REVIEWS_SELECTOR)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
}

/// Source URLs of the first two dynamic images, in document order.
pub fn image_urls(doc: &Html) -> Vec<String> {
    doc.select(&IMAGE_SELECTOR)
        .filter_map(|img| img.value().attr("src"))
        .take(2)
        .map(String::from)
        .collect()
}

/// Label/value map from the product overview table.
///
/// A missing container yields an empty map. A row with fewer than two
/// data cells fails the whole extraction; partial specification maps
/// are never produced. Cells beyond the first two are ignored.
pub fn specifications(doc: &Html) -> Result<HashMap<String, String>> {
    let mut specs = HashMap::new();

    let container = match doc.select(&SPEC_CONTAINER_SELECTOR).next() {
        Some(container) => container,
        None => return Ok(specs),
    };

    for row in container.select(&ROW_SELECTOR) {
        let cells: Vec<_> = row.select(&CELL_SELECTOR).collect();
        if cells.len() < 2 {
            bail!(
                "Malformed specification row: expected 2 cells, found {}",
                cells.len()
            );
        }
        let label = clean_text(&cells[0].text().collect::<String>());
        let value = clean_text(&cells[1].text().collect::<String>());
        specs.insert(label, value);
    }

    Ok(specs)
}

/// Whole-number price parsed as a float. Absence is None, never zero;
/// an element that is present but unparseable fails the extraction.
pub fn current_price(doc: &Html) -> Result<Option<f64>> {
    match doc.select(&WHOLE_PRICE_SELECTOR).next() {
        Some(el) => {
            let text = clean_text(&el.text().collect::<String>());
            Ok(Some(parse_whole_price(&text)?))
        }
        None => Ok(None),
    }
}

pub mod snapshot;
pub mod watchlist;

pub use snapshot::*;
pub use watchlist::*;

// Sentinel strings returned when a page element is absent.
// These travel through the API verbatim, never trimmed or sliced.
pub const PRICE_NOT_FOUND: &str = "Price not found";
pub const DESCRIPTION_NOT_FOUND: &str = "Description not found";
pub const RATINGS_NOT_FOUND: &str = "Customer Ratings not found";
pub const REVIEWS_NOT_FOUND: &str = "Number of Reviews not found";
pub const IMAGES_NOT_FOUND: &str = "Product images not found";

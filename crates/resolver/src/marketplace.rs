//! Marketplace scraping API response handling.

use serde::Deserialize;
use serde_json::Value;

use crate::metadata::{Metadata, PRICE_UNAVAILABLE, UNTITLED};

/// Image file extensions accepted from the scraper's image list.
const RASTER_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// Top-level scraping API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeResponse {
    /// Scrape result envelope.
    pub data: Option<ScrapeData>,
}

/// Scrape result envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeData {
    /// Scrape status; anything other than "done" means no usable result.
    pub status: Option<String>,
    /// The scraped product, present when status is "done".
    pub value: Option<ProductValue>,
}

/// Scraped product fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductValue {
    pub title: Option<String>,
    pub price: Option<String>,
    pub url: Option<String>,
    pub extras: Option<ProductExtras>,
}

/// Product extras; the image list arrives either as a JSON array or as a
/// map keyed by variant, so it is kept loosely typed until normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductExtras {
    #[serde(rename = "imagesSmall", default)]
    pub images_small: Value,
}

/// Convert a scraping API response into metadata for `link`.
///
/// A missing envelope or a status other than "done" degrades to the
/// untitled-product placeholder.
pub fn process_response(response: ScrapeResponse, link: &str) -> Metadata {
    let data = match response.data {
        Some(data) if data.status.as_deref() == Some("done") => data,
        _ => return Metadata::untitled_product(link),
    };

    let product = data.value.unwrap_or(ProductValue {
        title: None,
        price: None,
        url: None,
        extras: None,
    });

    let images = product
        .extras
        .as_ref()
        .map(|extras| filter_raster_images(&extras.images_small))
        .unwrap_or_default();

    Metadata {
        title: product.title.unwrap_or_else(|| UNTITLED.to_string()),
        description: None,
        images,
        price: Some(
            product
                .price
                .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string()),
        ),
        url: product.url.unwrap_or_else(|| link.to_string()),
        site_name: None,
    }
}

/// Normalize the image field to a list and keep only string entries ending
/// in a raster-image extension.
pub fn filter_raster_images(images: &Value) -> Vec<String> {
    let entries: Vec<&Value> = match images {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(Value::as_str)
        .filter(|url| {
            let lower = url.to_ascii_lowercase();
            RASTER_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn done_payload() -> ScrapeResponse {
        serde_json::from_value(json!({
            "data": {
                "status": "done",
                "value": {
                    "title": "Widget",
                    "price": "19.99",
                    "url": "https://amazon.example/item/123",
                    "extras": { "imagesSmall": ["a.jpg", "b.svg", 42, "c.PNG"] }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_done_response() {
        let meta = process_response(done_payload(), "https://amazon.example/item/123");

        assert_eq!(meta.title, "Widget");
        assert_eq!(meta.price.as_deref(), Some("19.99"));
        assert_eq!(meta.url, "https://amazon.example/item/123");
        assert_eq!(meta.images, vec!["a.jpg".to_string(), "c.PNG".to_string()]);
    }

    #[test]
    fn test_non_done_status_degrades() {
        let response: ScrapeResponse =
            serde_json::from_value(json!({ "data": { "status": "pending" } })).unwrap();

        let meta = process_response(response, "https://amazon.example/item/9");
        assert_eq!(meta.title, UNTITLED);
        assert_eq!(meta.price.as_deref(), Some(PRICE_UNAVAILABLE));
        assert_eq!(meta.url, "https://amazon.example/item/9");
        assert!(meta.images.is_empty());
    }

    #[test]
    fn test_missing_envelope_degrades() {
        let response: ScrapeResponse = serde_json::from_value(json!({})).unwrap();

        let meta = process_response(response, "https://amazon.example/item/9");
        assert_eq!(meta.title, UNTITLED);
    }

    #[test]
    fn test_images_map_shape_is_normalized() {
        let images = json!({ "front": "f.jpg", "back": "b.jpeg", "video": "v.mp4" });
        let mut filtered = filter_raster_images(&images);
        filtered.sort();

        assert_eq!(filtered, vec!["b.jpeg".to_string(), "f.jpg".to_string()]);
    }

    #[test]
    fn test_images_missing_shape() {
        assert!(filter_raster_images(&Value::Null).is_empty());
        assert!(filter_raster_images(&json!("a.jpg")).is_empty());
    }
}

//! The normalized metadata record produced by resolution.

use serde::{Deserialize, Serialize};

/// Placeholder title for a marketplace item that could not be scraped.
pub const UNTITLED: &str = "Untitled";

/// Placeholder price when a marketplace item has none.
pub const PRICE_UNAVAILABLE: &str = "N/A";

/// Placeholder title for a page that could not be fetched or had no
/// Open-Graph title.
pub const NO_TITLE: &str = "No title found";

/// Placeholder description.
pub const NO_DESCRIPTION: &str = "No description found";

/// Placeholder site name.
pub const UNKNOWN_SITE: &str = "Unknown site name";

/// Normalized metadata describing a submitted link.
///
/// Resolution is total: every strategy produces one of these whether or not
/// scraping succeeded, with placeholder fields on the degraded paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page or product title.
    pub title: String,
    /// Page description, when the source provides one.
    pub description: Option<String>,
    /// Ordered image URLs.
    pub images: Vec<String>,
    /// Free-text price. `"N/A"` when a product has no usable price.
    pub price: Option<String>,
    /// Canonical URL (falls back to the submitted URL).
    pub url: String,
    /// Site name, when the source provides one.
    pub site_name: Option<String>,
}

impl Metadata {
    /// Degraded record for a marketplace item that could not be scraped.
    pub fn untitled_product(link: &str) -> Self {
        Self {
            title: UNTITLED.to_string(),
            description: None,
            images: Vec::new(),
            price: Some(PRICE_UNAVAILABLE.to_string()),
            url: link.to_string(),
            site_name: None,
        }
    }

    /// Degraded record for a page that could not be fetched.
    pub fn unresolved_page(link: &str) -> Self {
        Self {
            title: NO_TITLE.to_string(),
            description: Some(NO_DESCRIPTION.to_string()),
            images: Vec::new(),
            price: None,
            url: link.to_string(),
            site_name: Some(UNKNOWN_SITE.to_string()),
        }
    }

    /// Whether the price is present and renderable (not the `"N/A"`
    /// placeholder).
    pub fn has_price(&self) -> bool {
        matches!(self.price.as_deref(), Some(p) if p != PRICE_UNAVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_records_are_fully_populated() {
        let product = Metadata::untitled_product("https://amazon.example/x");
        assert_eq!(product.title, UNTITLED);
        assert_eq!(product.price.as_deref(), Some(PRICE_UNAVAILABLE));
        assert_eq!(product.url, "https://amazon.example/x");
        assert!(product.images.is_empty());

        let page = Metadata::unresolved_page("https://example.com/x");
        assert_eq!(page.title, NO_TITLE);
        assert_eq!(page.description.as_deref(), Some(NO_DESCRIPTION));
        assert_eq!(page.site_name.as_deref(), Some(UNKNOWN_SITE));
        assert_eq!(page.url, "https://example.com/x");
    }

    #[test]
    fn test_has_price() {
        let mut m = Metadata::untitled_product("https://a");
        assert!(!m.has_price());

        m.price = Some("19.99".to_string());
        assert!(m.has_price());

        m.price = None;
        assert!(!m.has_price());
    }
}

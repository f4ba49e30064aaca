//! Open-Graph metadata extraction from fetched HTML.

use scraper::{Html, Selector};

use crate::metadata::{Metadata, NO_DESCRIPTION, NO_TITLE, UNKNOWN_SITE};

/// Extract Open-Graph metadata from a page for `link`.
///
/// Matches `<meta property="og:...">` first and falls back to
/// `<meta name="og:...">`. Missing properties fall back per-field to the
/// unresolved-page placeholders.
pub fn extract_opengraph(html: &str, link: &str) -> Metadata {
    let document = Html::parse_document(html);

    let title = get_meta(&document, "og:title");
    let description = get_meta(&document, "og:description");
    let url = get_meta(&document, "og:url");
    let image = get_meta(&document, "og:image");
    let site_name = get_meta(&document, "og:site_name");

    Metadata {
        title: title.unwrap_or_else(|| NO_TITLE.to_string()),
        description: Some(description.unwrap_or_else(|| NO_DESCRIPTION.to_string())),
        images: image.into_iter().collect(),
        price: None,
        url: url.unwrap_or_else(|| link.to_string()),
        site_name: Some(site_name.unwrap_or_else(|| UNKNOWN_SITE.to_string())),
    }
}

/// Content of a `<meta>` tag matched by `property`, falling back to `name`.
fn get_meta(document: &Html, property: &str) -> Option<String> {
    for attr in ["property", "name"] {
        let selector = format!(r#"meta[{}="{}"]"#, attr, property);
        let Ok(sel) = Selector::parse(&selector) else {
            continue;
        };
        if let Some(el) = document.select(&sel).next() {
            if let Some(content) = el.value().attr("content") {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }
    }
    None
}

//! View building: stored state projected into template inputs.

use chrono::{DateTime, Utc};
use database::LinkWithTags;

/// Maximum description length on a card before truncation.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// One bookmark card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub link_id: i64,
    pub title: String,
    pub target_url: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price_line: Option<String>,
    pub tags: Vec<String>,
    pub age: String,
}

impl CardView {
    /// Build a card from a stored link, with `now` fixed by the caller so a
    /// whole render shares one clock reading.
    pub fn from_link(entry: &LinkWithTags, now: DateTime<Utc>) -> Self {
        let link = &entry.link;

        Self {
            link_id: link.id,
            title: link
                .title
                .clone()
                .unwrap_or_else(|| link.link.clone()),
            target_url: link.target_url().to_string(),
            image: link.images.0.first().cloned(),
            description: link
                .description
                .as_deref()
                .map(|d| truncate_description(d, MAX_DESCRIPTION_CHARS)),
            price_line: price_line(link.price.as_deref()),
            tags: entry.tags.clone(),
            age: age_label(&link.created_at, now),
        }
    }
}

/// Sorted, deduplicated tag names across all cards, for the filter bar.
pub fn collect_tags(links: &[LinkWithTags]) -> Vec<String> {
    let mut tags: Vec<String> = links.iter().flat_map(|l| l.tags.iter().cloned()).collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Truncate to at most `max` characters, appending an ellipsis when
/// anything was cut.
pub fn truncate_description(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(max).collect();
    truncated.push_str("...");
    truncated
}

/// The card's price line, only when a renderable price is present.
pub fn price_line(price: Option<&str>) -> Option<String> {
    match price {
        Some(p) if !p.is_empty() && p != "N/A" => Some(format!("Price: ${}", p)),
        _ => None,
    }
}

/// Relative-age label for a stored timestamp.
///
/// Same calendar day renders the time of day, exactly one day prior a short
/// date, everything older a day count.
pub fn age_label(created_at: &str, now: DateTime<Utc>) -> String {
    let created = match DateTime::parse_from_rfc3339(created_at) {
        Ok(dt) => dt.with_timezone(&Utc),
        // Unparseable timestamp: fall back to the raw date prefix.
        Err(_) => return created_at.split('T').next().unwrap_or(created_at).to_string(),
    };

    let days = now
        .date_naive()
        .signed_duration_since(created.date_naive())
        .num_days();

    match days {
        d if d <= 0 => created.format("%H:%M").to_string(),
        1 => created.format("%b %d").to_string(),
        d => format!("{} days ago", d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use database::Link;
    use sqlx::types::Json;

    fn entry(price: Option<&str>, description: Option<&str>) -> LinkWithTags {
        LinkWithTags {
            link: Link {
                id: 7,
                chat_id: "chat-1".to_string(),
                link: "https://example.com/raw".to_string(),
                title: Some("Widget".to_string()),
                description: description.map(str::to_string),
                url: Some("https://example.com/canonical".to_string()),
                price: price.map(str::to_string),
                images: Json(vec!["a.jpg".to_string(), "b.jpg".to_string()]),
                site_name: None,
                created_at: "2026-08-07T09:30:00.000Z".to_string(),
            },
            tags: vec!["gift".to_string(), "tech".to_string()],
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_card_fields() {
        let card = CardView::from_link(&entry(Some("19.99"), Some("desc")), noon());

        assert_eq!(card.title, "Widget");
        assert_eq!(card.target_url, "https://example.com/canonical");
        assert_eq!(card.image.as_deref(), Some("a.jpg"));
        assert_eq!(card.price_line.as_deref(), Some("Price: $19.99"));
        assert_eq!(card.tags.len(), 2);
    }

    #[test]
    fn test_price_line_suppressed() {
        assert!(price_line(Some("N/A")).is_none());
        assert!(price_line(None).is_none());
        assert!(price_line(Some("")).is_none());
        assert_eq!(price_line(Some("5")).as_deref(), Some("Price: $5"));
    }

    #[test]
    fn test_truncate_description() {
        let short = truncate_description("short", 200);
        assert_eq!(short, "short");

        let long_input = "x".repeat(250);
        let truncated = truncate_description(&long_input, 200);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_age_same_day_is_time() {
        assert_eq!(age_label("2026-08-07T09:30:00.000Z", noon()), "09:30");
    }

    #[test]
    fn test_age_one_day_prior_is_short_date() {
        assert_eq!(age_label("2026-08-06T23:59:00.000Z", noon()), "Aug 06");
    }

    #[test]
    fn test_age_older_is_day_count() {
        assert_eq!(age_label("2026-08-01T00:00:00.000Z", noon()), "6 days ago");
    }

    #[test]
    fn test_collect_tags_sorted_deduplicated() {
        let links = vec![entry(None, None), entry(None, None)];
        assert_eq!(
            collect_tags(&links),
            vec!["gift".to_string(), "tech".to_string()]
        );
    }
}

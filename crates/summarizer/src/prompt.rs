//! Projection of link history into the model prompt.

use database::LinkWithTags;
use serde::Serialize;

/// System prompt requesting a structured recommendation response.
pub const SYSTEM_PROMPT: &str = "\
You are a marketing strategist analyzing a user's saved bookmarks. \
Given their link history, identify what the user is interested in and \
suggest further pages or products for them. \
Respond with a single JSON object of the shape \
{\"general\": string, \"recommendations\": [{\"destination_tag\": string, \
\"title\": string, \"link\": string}]} and nothing else. \
Each destination_tag must be one of the tags appearing in the history.";

/// Compact projection of one saved link for the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct LinkDigest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub saved_on: String,
}

impl LinkDigest {
    /// Project a stored link into its prompt form.
    pub fn from_link(entry: &LinkWithTags) -> Self {
        Self {
            title: entry.link.title.clone(),
            description: entry.link.description.clone(),
            tags: entry.tags.clone(),
            saved_on: date_of(&entry.link.created_at),
        }
    }
}

/// Build the user prompt from the chat's link history.
pub fn build_user_prompt(links: &[LinkWithTags]) -> String {
    let digests: Vec<LinkDigest> = links.iter().map(LinkDigest::from_link).collect();
    let history = serde_json::to_string_pretty(&digests).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Based on the user's saved links below, produce your analysis.\n\n{}",
        history
    )
}

/// Calendar-date prefix (`YYYY-MM-DD`) of a stored timestamp.
fn date_of(created_at: &str) -> String {
    created_at
        .split('T')
        .next()
        .unwrap_or(created_at)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{Link, LinkWithTags};
    use sqlx::types::Json;

    fn entry() -> LinkWithTags {
        LinkWithTags {
            link: Link {
                id: 1,
                chat_id: "chat-1".to_string(),
                link: "https://example.com/a".to_string(),
                title: Some("An article".to_string()),
                description: Some("Worth reading.".to_string()),
                url: Some("https://example.com/a".to_string()),
                price: None,
                images: Json(vec![]),
                site_name: None,
                created_at: "2026-08-07T10:15:00.000Z".to_string(),
            },
            tags: vec!["reading".to_string()],
        }
    }

    #[test]
    fn test_digest_projection() {
        let digest = LinkDigest::from_link(&entry());

        assert_eq!(digest.title.as_deref(), Some("An article"));
        assert_eq!(digest.saved_on, "2026-08-07");
        assert_eq!(digest.tags, vec!["reading".to_string()]);
    }

    #[test]
    fn test_user_prompt_includes_history() {
        let prompt = build_user_prompt(&[entry()]);

        assert!(prompt.contains("An article"));
        assert!(prompt.contains("2026-08-07"));
        assert!(prompt.contains("reading"));
    }
}

//! Parsing of inbound chat messages into submissions.

use crate::error::{PipelineError, Result};

/// A parsed link submission: the URL plus its hashtags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSubmission {
    pub url: String,
    pub tags: Vec<String>,
}

/// Parse a chat message of the form `<url> #tag1 #tag2 ...`.
///
/// The first whitespace token is the URL; remaining tokens starting with
/// `#` become tags with the marker stripped. Other trailing tokens are
/// ignored.
pub fn parse_submission(text: &str) -> Result<ParsedSubmission> {
    let mut parts = text.split_whitespace();

    let url = parts
        .next()
        .ok_or_else(|| PipelineError::InvalidSubmission("empty message".to_string()))?
        .to_string();

    let tags = parts
        .filter(|part| part.starts_with('#'))
        .map(|part| part.trim_start_matches('#').to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    Ok(ParsedSubmission { url, tags })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_with_tags() {
        let parsed = parse_submission("https://example.com/a #gift #tech").unwrap();

        assert_eq!(parsed.url, "https://example.com/a");
        assert_eq!(parsed.tags, vec!["gift".to_string(), "tech".to_string()]);
    }

    #[test]
    fn test_untagged_tokens_are_ignored() {
        let parsed = parse_submission("https://example.com/a #gift check this out").unwrap();

        assert_eq!(parsed.tags, vec!["gift".to_string()]);
    }

    #[test]
    fn test_url_only() {
        let parsed = parse_submission("https://example.com/a").unwrap();

        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_bare_hash_is_dropped() {
        let parsed = parse_submission("https://example.com/a # #ok").unwrap();

        assert_eq!(parsed.tags, vec!["ok".to_string()]);
    }

    #[test]
    fn test_empty_message() {
        assert!(parse_submission("   ").is_err());
    }
}

//! Parsing of model output into a recommendation set.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Synopsis text used when model output cannot be parsed.
pub const PARSE_ERROR_GENERAL: &str = "Error in parsing";

/// A single recommendation produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Tag the recommendation belongs under.
    pub destination_tag: String,
    /// Recommendation title.
    pub title: String,
    /// Recommended URL.
    pub link: String,
}

/// The full recommendation artifact for one chat: a general synopsis plus
/// an ordered list of recommendations. Replaced wholesale on each run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Free-text synopsis of the user's interests.
    #[serde(default)]
    pub general: String,
    /// Ordered recommendations.
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationSet {
    /// The degraded set returned when model output is unusable.
    pub fn parse_error() -> Self {
        Self {
            general: PARSE_ERROR_GENERAL.to_string(),
            recommendations: Vec::new(),
        }
    }
}

/// Strip a leading ```` ```json ````/```` ``` ```` fence and a trailing
/// ```` ``` ```` fence, if present.
pub fn clean_json_block(raw: &str) -> &str {
    let mut cleaned = raw.trim();

    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest.trim_start();
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.trim_start();
    }

    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest.trim_end();
    }

    cleaned
}

/// Parse model output into a [`RecommendationSet`].
///
/// The output is untrusted: it may be fenced and may not be the expected
/// structure. Parse failures return the degraded set instead of erroring.
pub fn parse_analysis(raw: &str) -> RecommendationSet {
    let cleaned = clean_json_block(raw);

    match serde_json::from_str::<RecommendationSet>(cleaned) {
        Ok(set) => set,
        Err(e) => {
            warn!("Failed to parse model output as recommendations: {}", e);
            RecommendationSet::parse_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_fenced_block() {
        let raw = "```json\n{\"general\": \"hi\"}\n```";
        assert_eq!(clean_json_block(raw), "{\"general\": \"hi\"}");

        let bare_fence = "```\n[1, 2]\n```";
        assert_eq!(clean_json_block(bare_fence), "[1, 2]");

        let unfenced = "{\"general\": \"hi\"}";
        assert_eq!(clean_json_block(unfenced), unfenced);
    }

    #[test]
    fn test_parse_well_formed() {
        let raw = r#"```json
        {
            "general": "You like gadgets.",
            "recommendations": [
                {"destination_tag": "tech", "title": "A gadget", "link": "https://shop.example/g"}
            ]
        }
        ```"#;

        let set = parse_analysis(raw);
        assert_eq!(set.general, "You like gadgets.");
        assert_eq!(set.recommendations.len(), 1);
        assert_eq!(set.recommendations[0].destination_tag, "tech");
    }

    #[test]
    fn test_parse_malformed_degrades() {
        let set = parse_analysis("```json\n{not valid json\n```");
        assert_eq!(set.general, PARSE_ERROR_GENERAL);
        assert!(set.recommendations.is_empty());
    }

    #[test]
    fn test_parse_missing_fields_defaults() {
        let set = parse_analysis("{}");
        assert_eq!(set.general, "");
        assert!(set.recommendations.is_empty());
    }
}

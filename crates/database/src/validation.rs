//! Input validation for submitted identifiers and URLs.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid chat identifier.
    InvalidChatId(String),
    /// Invalid URL.
    InvalidUrl(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidChatId(msg) => write!(f, "Invalid chat id: {}", msg),
            ValidationError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for chat identifiers.
pub const MAX_CHAT_ID_LENGTH: usize = 64;

/// Maximum allowed length for tag names.
pub const MAX_TAG_LENGTH: usize = 64;

/// Maximum allowed length for submitted URLs.
pub const MAX_URL_LENGTH: usize = 2048;

/// Validate a chat identifier.
///
/// Chat IDs name an on-disk snapshot artifact, so they must not contain
/// path separators or traversal sequences.
pub fn validate_chat_id(chat_id: &str) -> Result<(), ValidationError> {
    let chat_id = chat_id.trim();

    if chat_id.is_empty() {
        return Err(ValidationError::Empty("chat id".to_string()));
    }

    if chat_id.len() > MAX_CHAT_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "chat id".to_string(),
            max: MAX_CHAT_ID_LENGTH,
            actual: chat_id.len(),
        });
    }

    if chat_id.contains('/') || chat_id.contains('\\') {
        return Err(ValidationError::InvalidChatId(
            "must not contain path separators".to_string(),
        ));
    }

    if chat_id.contains("..") {
        return Err(ValidationError::InvalidChatId(
            "must not contain traversal sequences".to_string(),
        ));
    }

    Ok(())
}

/// Validate a tag name.
pub fn validate_tag_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty("tag name".to_string()));
    }

    if name.len() > MAX_TAG_LENGTH {
        return Err(ValidationError::TooLong {
            field: "tag name".to_string(),
            max: MAX_TAG_LENGTH,
            actual: name.len(),
        });
    }

    Ok(())
}

/// Validate a submitted URL (http or https, bounded length).
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::Empty("url".to_string()));
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "url".to_string(),
            max: MAX_URL_LENGTH,
            actual: url.len(),
        });
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(
            "must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}

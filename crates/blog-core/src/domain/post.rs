use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Minimum title length, in characters, after trimming.
pub const TITLE_MIN_CHARS: usize = 3;
/// Minimum content length, in characters, after trimming.
pub const CONTENT_MIN_CHARS: usize = 10;

/// Server-assigned post identifier.
pub type PostId = i64;

/// Post entity - a short text post as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated title/content pair, already trimmed.
///
/// The only way to obtain one is [`PostDraft::parse`], so anything handed to a
/// repository has passed the length rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    /// Trim and validate raw request fields.
    pub fn parse(title: Option<String>, content: Option<String>) -> Result<Self, DomainError> {
        let errors = validate_post_fields(title.as_deref(), content.as_deref());
        if !errors.is_empty() {
            return Err(DomainError::InvalidArgument(errors.join(", ")));
        }

        Ok(Self {
            title: title.unwrap_or_default().trim().to_string(),
            content: content.unwrap_or_default().trim().to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (String, String) {
        (self.title, self.content)
    }
}

/// Human-readable problems with a title/content pair. Empty when valid.
pub fn validate_post_fields(title: Option<&str>, content: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();

    match title.map(str::trim) {
        None | Some("") => errors.push("Title is required".to_string()),
        Some(t) if t.chars().count() < TITLE_MIN_CHARS => errors.push(format!(
            "Title must be at least {TITLE_MIN_CHARS} characters"
        )),
        Some(_) => {}
    }

    match content.map(str::trim) {
        None | Some("") => errors.push("Content is required".to_string()),
        Some(c) if c.chars().count() < CONTENT_MIN_CHARS => errors.push(format!(
            "Content must be at least {CONTENT_MIN_CHARS} characters"
        )),
        Some(_) => {}
    }

    errors
}

/// Parse a path segment into a post id.
pub fn parse_post_id(raw: &str) -> Result<PostId, DomainError> {
    raw.parse::<PostId>()
        .map_err(|_| DomainError::InvalidArgument("Invalid post ID".to_string()))
}

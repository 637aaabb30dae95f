//! Content item enums and field validation.

use std::collections::BTreeSet;

use crate::error::CoreError;

define_text_enum! {
    /// Editorial lifecycle of a content item. Transitions are governed by
    /// [`crate::publishing`].
    ContentStatus("content status") {
        Draft => "DRAFT",
        Review => "REVIEW",
        Published => "PUBLISHED",
        Archived => "ARCHIVED",
    }
}

impl Default for ContentStatus {
    fn default() -> Self {
        ContentStatus::Draft
    }
}

define_text_enum! {
    /// Kind of publishable material.
    ContentType("content type") {
        Page => "PAGE",
        BlogPost => "BLOG_POST",
        Product => "PRODUCT",
        Category => "CATEGORY",
        LandingPage => "LANDING_PAGE",
        PressRelease => "PRESS_RELEASE",
        Custom => "CUSTOM",
    }
}

impl Default for ContentType {
    fn default() -> Self {
        ContentType::Page
    }
}

/// Maximum length of a content title, in characters.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Maximum length of a single tag, in characters.
pub const MAX_TAG_LENGTH: usize = 64;

/// Maximum number of distinct tags on one item.
pub const MAX_TAGS: usize = 50;

/// Require a non-blank text field and return it trimmed.
pub fn require_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Validate the title length.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title exceeds maximum length of {MAX_TITLE_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Normalise a tag list into a set: trimmed, blanks dropped, duplicates
/// removed, sorted.
///
/// Tags are compared case-sensitively.
pub fn normalize_tags<I, S>(tags: I) -> Result<Vec<String>, CoreError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: BTreeSet<String> = tags
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if let Some(long) = set.iter().find(|t| t.chars().count() > MAX_TAG_LENGTH) {
        return Err(CoreError::Validation(format!(
            "Tag '{long}' exceeds maximum length of {MAX_TAG_LENGTH} characters"
        )));
    }
    if set.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_TAGS} tags are allowed (got {})",
            set.len()
        )));
    }

    Ok(set.into_iter().collect())
}

/// Metadata must be a JSON object when present.
pub fn validate_metadata(metadata: &serde_json::Value) -> Result<(), CoreError> {
    if metadata.is_object() {
        Ok(())
    } else {
        Err(CoreError::Validation("metadata must be a JSON object".into()))
    }
}

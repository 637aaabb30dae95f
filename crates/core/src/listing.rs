//! Sorting and pagination parameters for content listings.
//!
//! Everything here is pure so the repository layer only has to turn the
//! resolved values into SQL.

use std::str::FromStr;

use crate::error::CoreError;

/// Default page size when `limit` is omitted.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Sortable content columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    CreatedAt,
    #[default]
    UpdatedAt,
    PublishedAt,
    Title,
    Status,
    Type,
}

impl SortField {
    /// Column name in the `contents` table. Always a fixed identifier, never
    /// user input.
    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::PublishedAt => "published_at",
            SortField::Title => "title",
            SortField::Status => "status",
            SortField::Type => "content_type",
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    /// Accepts snake_case and camelCase (`created_at`, `createdAt`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "createdat" => Ok(SortField::CreatedAt),
            "updatedat" => Ok(SortField::UpdatedAt),
            "publishedat" => Ok(SortField::PublishedAt),
            "title" => Ok(SortField::Title),
            "status" => Ok(SortField::Status),
            "type" | "contenttype" => Ok(SortField::Type),
            _ => Err(CoreError::Validation(format!(
                "Invalid sort field '{s}'. Must be one of: created_at, updated_at, \
                 published_at, title, status, type"
            ))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(CoreError::Validation(format!(
                "Invalid sort order '{s}'. Must be 'asc' or 'desc'"
            ))),
        }
    }
}

/// A resolved 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Clamp user input: `page >= 1`, `1 <= limit <= MAX_PAGE_LIMIT`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Number of pages needed for `total` items: `ceil(total / limit)`.
pub fn page_count(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Merge repeated `tag` parameters with a comma-separated `tags` parameter.
pub fn collect_tags(tag: &[String], tags: Option<&str>) -> Vec<String> {
    let mut all: Vec<String> = tag.iter().map(|t| t.trim().to_string()).collect();
    if let Some(list) = tags {
        all.extend(list.split(',').map(|t| t.trim().to_string()));
    }
    all.retain(|t| !t.is_empty());
    all.sort();
    all.dedup();
    all
}

/// Build an `ILIKE` pattern for a substring search, escaping the wildcard
/// characters in the user's term. Returns `None` for blank input.
pub fn like_pattern(search: &str) -> Option<String> {
    let term = search.trim();
    if term.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

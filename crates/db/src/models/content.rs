//! Content item entity model, DTOs, and listing filter.

use glocal_core::content::{ContentStatus, ContentType};
use glocal_core::listing::{PageRequest, SortField, SortOrder};
use glocal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::translation::Translation;
use crate::models::user::AuthorSummary;

/// A content item row from the `contents` table, joined with its author.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    #[sqlx(try_from = "String")]
    pub status: ContentStatus,
    #[sqlx(try_from = "String")]
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub language: String,
    pub locale: String,
    pub tags: Vec<String>,
    pub author_id: DbId,
    pub metadata: serde_json::Value,
    /// Optimistic concurrency counter, bumped on every update.
    pub version: i32,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(flatten)]
    pub author: AuthorSummary,
}

/// A content item with its nested translation subrecords.
#[derive(Debug, Clone, Serialize)]
pub struct ContentDetail {
    #[serde(flatten)]
    pub item: ContentItem,
    pub translations: Vec<Translation>,
}

/// DTO for inserting a content item. Defaults and `published_at` are
/// resolved by the caller.
#[derive(Debug, Clone)]
pub struct CreateContent {
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    pub status: ContentStatus,
    pub content_type: ContentType,
    pub language: String,
    pub locale: String,
    pub tags: Vec<String>,
    pub author_id: DbId,
    pub metadata: serde_json::Value,
    pub published_at: Option<Timestamp>,
}

/// DTO for patching a content item. `None` fields are left unchanged.
///
/// `status` and `published_at` must come from the publishing rule engine.
#[derive(Debug, Clone, Default)]
pub struct UpdateContent {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub body: Option<String>,
    pub status: Option<ContentStatus>,
    pub content_type: Option<ContentType>,
    pub language: Option<String>,
    pub locale: Option<String>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<serde_json::Value>,
    pub published_at: Option<Timestamp>,
}

/// Conjunctive listing filter. Empty fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    pub status: Option<ContentStatus>,
    pub content_type: Option<ContentType>,
    pub language: Option<String>,
    pub locale: Option<String>,
    pub author_id: Option<DbId>,
    /// Every tag must be present on the item.
    pub tags: Vec<String>,
    /// Escaped `ILIKE` pattern, see [`glocal_core::listing::like_pattern`].
    pub search_pattern: Option<String>,
    /// Also match the search pattern against `description`.
    pub search_description: bool,
}

/// A full listing request.
#[derive(Debug, Clone, Default)]
pub struct ContentQuery {
    pub filter: ContentFilter,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: PageRequest,
}

/// One page of a listing plus the unpaginated match count.
#[derive(Debug, Clone)]
pub struct ContentPage {
    pub items: Vec<ContentItem>,
    pub total: i64,
}

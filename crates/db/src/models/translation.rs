//! Translation subrecord model and DTOs.

use glocal_core::translation::{TranslatedFields, TranslationStatus};
use glocal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A translation row from the `translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Translation {
    pub id: DbId,
    pub content_id: DbId,
    pub language: String,
    pub locale: String,
    #[sqlx(try_from = "String")]
    pub status: TranslationStatus,
    pub translator_id: Option<DbId>,
    /// Sparse overlay; see [`TranslatedFields`].
    pub translated_fields: Json<TranslatedFields>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a translation.
#[derive(Debug, Clone)]
pub struct CreateTranslation {
    pub content_id: DbId,
    pub language: String,
    pub locale: String,
    pub status: TranslationStatus,
    pub translator_id: Option<DbId>,
    pub translated_fields: TranslatedFields,
}

/// DTO for patching a translation. `translated_fields`, when present, is
/// the already-merged overlay and replaces the stored one.
#[derive(Debug, Clone, Default)]
pub struct UpdateTranslation {
    pub status: Option<TranslationStatus>,
    /// `Some(None)` unassigns the translator.
    pub translator_id: Option<Option<DbId>>,
    pub translated_fields: Option<TranslatedFields>,
}

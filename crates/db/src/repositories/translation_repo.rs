//! Repository for the `translations` table.

use glocal_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::translation::{CreateTranslation, Translation, UpdateTranslation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, content_id, language, locale, status, translator_id, \
                       translated_fields, created_at, updated_at";

/// Provides CRUD operations for translation subrecords.
pub struct TranslationRepo;

impl TranslationRepo {
    /// Insert a new translation, returning the created row.
    ///
    /// A second translation for the same `(content_id, language, locale)`
    /// violates `uq_translations_content_language_locale`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTranslation,
    ) -> Result<Translation, sqlx::Error> {
        let query = format!(
            "INSERT INTO translations
                (content_id, language, locale, status, translator_id, translated_fields)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(input.content_id)
            .bind(&input.language)
            .bind(&input.locale)
            .bind(input.status.as_str())
            .bind(input.translator_id)
            .bind(Json(&input.translated_fields))
            .fetch_one(pool)
            .await
    }

    /// Find a translation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Translation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM translations WHERE id = $1");
        sqlx::query_as::<_, Translation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the translation of a content item for one language/locale pair.
    pub async fn find_for_locale(
        pool: &PgPool,
        content_id: DbId,
        language: &str,
        locale: &str,
    ) -> Result<Option<Translation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM translations
             WHERE content_id = $1 AND language = $2 AND locale = $3"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(content_id)
            .bind(language)
            .bind(locale)
            .fetch_optional(pool)
            .await
    }

    /// List all translations of a content item, ordered by language then locale.
    pub async fn list_by_content(
        pool: &PgPool,
        content_id: DbId,
    ) -> Result<Vec<Translation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM translations
             WHERE content_id = $1
             ORDER BY language, locale"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(content_id)
            .fetch_all(pool)
            .await
    }

    /// Update a translation. Only non-`None` fields in `input` are applied;
    /// `translator_id: Some(None)` unassigns the translator.
    ///
    /// The write is skipped when the parent content is `ARCHIVED`. Returns
    /// `None` if the translation is absent or its content is archived.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTranslation,
    ) -> Result<Option<Translation>, sqlx::Error> {
        let query = format!(
            "UPDATE translations SET
                status = COALESCE($2, status),
                translator_id = CASE WHEN $3 THEN $4 ELSE translator_id END,
                translated_fields = COALESCE($5, translated_fields)
             WHERE id = $1
               AND EXISTS (
                   SELECT 1 FROM contents c
                   WHERE c.id = translations.content_id AND c.status <> 'ARCHIVED'
               )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(id)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.translator_id.is_some())
            .bind(input.translator_id.flatten())
            .bind(input.translated_fields.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete a translation by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM translations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

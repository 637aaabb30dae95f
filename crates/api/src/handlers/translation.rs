//! Handlers for translation subrecords.
//!
//! Listing and creation are nested under `/contents/{id}/translations`;
//! single-record operations live at `/translations/{id}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use glocal_core::content::require_text;
use glocal_core::error::CoreError;
use glocal_core::locale::{resolve_locale, validate_language_code};
use glocal_core::publishing::{
    ensure_translations_editable, translation_progress, TranslationProgress,
};
use glocal_core::roles::Role;
use glocal_core::translation::{TranslatedFields, TranslationStatus};
use glocal_core::types::DbId;
use glocal_db::models::content::ContentItem;
use glocal_db::models::translation::{CreateTranslation, Translation, UpdateTranslation};
use glocal_db::repositories::{ContentRepo, TranslationRepo, UserRepo};
use serde::{Deserialize, Serialize};

use super::{deserialize_some, log_uncataloged, parse_optional};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireTranslationAdmin, RequireTranslator};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /contents/{id}/translations`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTranslationRequest {
    pub language: Option<String>,
    pub locale: Option<String>,
    pub status: Option<String>,
    pub translator_id: Option<DbId>,
    #[serde(default)]
    pub translated_fields: TranslatedFields,
}

/// Request body for `PUT /translations/{id}`.
///
/// `translated_fields` is merged into the stored overlay; a blank value
/// removes that field. `translator_id: null` unassigns the translator.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTranslationRequest {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub translator_id: Option<Option<DbId>>,
    pub translated_fields: Option<TranslatedFields>,
}

/// Response for the translation listing of one content item.
#[derive(Debug, Serialize)]
pub struct TranslationListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Translation>,
    pub progress: TranslationProgress,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/contents/{id}/translations
pub async fn list_by_content(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(content_id): AppPath<DbId>,
) -> AppResult<Json<TranslationListResponse>> {
    find_content(&state, content_id).await?;
    let translations = TranslationRepo::list_by_content(&state.pool, content_id).await?;
    let progress = translation_progress(translations.iter().map(|t| t.status));

    Ok(Json(TranslationListResponse {
        success: true,
        count: translations.len(),
        data: translations,
        progress,
    }))
}

/// POST /api/v1/contents/{id}/translations
pub async fn create(
    State(state): State<AppState>,
    RequireTranslator(user): RequireTranslator,
    AppPath(content_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateTranslationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Translation>>)> {
    let content = find_content(&state, content_id).await?;
    ensure_translations_editable(content.id, content.status)?;

    let language = require_text("language", input.language.as_deref())?;
    validate_language_code(language)?;
    let locale = resolve_locale(language, input.locale.as_deref())?;
    if language == content.language && locale == content.locale {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Content {content_id} is already written in {locale}"
        ))));
    }

    let status: TranslationStatus = parse_optional(input.status.as_deref())?.unwrap_or_default();
    let translated_fields = input.translated_fields.normalized();
    translated_fields.validate()?;
    let translator_id = assign_translator(&state, &user, input.translator_id).await?;
    log_uncataloged(language, &locale);

    if TranslationRepo::find_for_locale(&state.pool, content_id, language, &locale)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Content {content_id} already has a {locale} translation"
        ))));
    }

    let translation = TranslationRepo::create(
        &state.pool,
        &CreateTranslation {
            content_id,
            language: language.to_string(),
            locale,
            status,
            translator_id,
            translated_fields,
        },
    )
    .await?;

    tracing::info!(
        translation_id = translation.id,
        content_id,
        locale = %translation.locale,
        user_id = user.user_id,
        fields = ?translation.translated_fields.0.translated_field_names(),
        "Translation created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(translation))))
}

/// GET /api/v1/translations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Translation>>> {
    let translation = find_translation(&state, id).await?;
    Ok(Json(DataResponse::new(translation)))
}

/// PUT /api/v1/translations/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireTranslator(user): RequireTranslator,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTranslationRequest>,
) -> AppResult<Json<DataResponse<Translation>>> {
    let existing = find_translation(&state, id).await?;
    let content = find_content(&state, existing.content_id).await?;
    ensure_translations_editable(content.id, content.status)?;

    let status: Option<TranslationStatus> = parse_optional(input.status.as_deref())?;
    let translated_fields = input
        .translated_fields
        .map(|patch| merge_overlay(existing.translated_fields.0.clone(), patch))
        .transpose()?;
    let translator_id = match input.translator_id {
        Some(requested) => Some(assign_translator(&state, &user, requested).await?),
        None => None,
    };

    let patch = UpdateTranslation {
        status,
        translator_id,
        translated_fields,
    };
    let Some(updated) = TranslationRepo::update(&state.pool, id, &patch).await? else {
        // The content was archived between the check above and the write.
        if TranslationRepo::find_by_id(&state.pool, id).await?.is_some() {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Content {} is archived; its translations are read-only",
                existing.content_id
            ))));
        }
        return Err(translation_not_found(id));
    };

    if updated.status != existing.status {
        tracing::info!(
            translation_id = id,
            user_id = user.user_id,
            from = %existing.status,
            to = %updated.status,
            "Translation status changed"
        );
    }
    tracing::debug!(
        translation_id = id,
        fields = ?updated.translated_fields.0.translated_field_names(),
        "Translation updated"
    );
    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/translations/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireTranslationAdmin(user): RequireTranslationAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    if !TranslationRepo::delete(&state.pool, id).await? {
        return Err(translation_not_found(id));
    }
    tracing::info!(translation_id = id, user_id = user.user_id, "Translation deleted");
    Ok(Json(DataResponse::new(serde_json::json!({}))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn translation_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Translation",
        id,
    })
}

async fn find_content(state: &AppState, id: DbId) -> AppResult<ContentItem> {
    ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))
}

async fn find_translation(state: &AppState, id: DbId) -> AppResult<Translation> {
    TranslationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| translation_not_found(id))
}

fn merge_overlay(
    mut stored: TranslatedFields,
    patch: TranslatedFields,
) -> Result<TranslatedFields, CoreError> {
    stored.merge(patch);
    stored.validate()?;
    Ok(stored)
}

/// Translators always record themselves; other roles may assign anyone who
/// has an account, or nobody.
async fn assign_translator(
    state: &AppState,
    user: &AuthUser,
    requested: Option<DbId>,
) -> AppResult<Option<DbId>> {
    if user.role == Role::Translator {
        return Ok(Some(user.user_id));
    }
    let Some(translator_id) = requested else {
        return Ok(None);
    };
    if UserRepo::find_by_id(&state.pool, translator_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "translator_id {translator_id} does not match any user"
        ))));
    }
    Ok(Some(translator_id))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn stored() -> TranslatedFields {
        TranslatedFields {
            title: Some("Bonjour".into()),
            body: Some("Le corps".into()),
            ..Default::default()
        }
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let patch = TranslatedFields {
            description: Some("Résumé".into()),
            ..Default::default()
        };
        let merged = merge_overlay(stored(), patch).unwrap();
        assert_eq!(merged.title.as_deref(), Some("Bonjour"));
        assert_eq!(merged.description.as_deref(), Some("Résumé"));
        assert_eq!(merged.body.as_deref(), Some("Le corps"));
    }

    #[test]
    fn merge_blank_removes_field() {
        let patch = TranslatedFields {
            body: Some("   ".into()),
            ..Default::default()
        };
        let merged = merge_overlay(stored(), patch).unwrap();
        assert!(merged.body.is_none());
        assert_eq!(merged.title.as_deref(), Some("Bonjour"));
    }

    #[test]
    fn merge_rejects_non_object_metadata() {
        let patch = TranslatedFields {
            metadata: Some(json!(["not", "an", "object"])),
            ..Default::default()
        };
        assert_matches!(
            merge_overlay(stored(), patch),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn create_request_defaults_to_empty_overlay() {
        let request: CreateTranslationRequest =
            serde_json::from_value(json!({ "language": "fr" })).unwrap();
        assert!(request.translated_fields.is_empty());
        assert!(request.status.is_none());
    }

    #[test]
    fn update_request_tells_null_translator_from_absent() {
        let request: UpdateTranslationRequest =
            serde_json::from_value(json!({ "translator_id": null })).unwrap();
        assert_eq!(request.translator_id, Some(None));

        let request: UpdateTranslationRequest =
            serde_json::from_value(json!({ "translator_id": 7 })).unwrap();
        assert_eq!(request.translator_id, Some(Some(7)));

        let request: UpdateTranslationRequest =
            serde_json::from_value(json!({ "status": "COMPLETED" })).unwrap();
        assert!(request.translator_id.is_none());
    }
}

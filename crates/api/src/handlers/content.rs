//! Handlers for the `/contents` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use glocal_core::content::{
    normalize_tags, require_text, validate_metadata, validate_title, ContentStatus, ContentType,
};
use glocal_core::error::CoreError;
use glocal_core::locale::{resolve_locale, validate_language_code, validate_pair};
use glocal_core::publishing::{initial_published_at, plan_transition};
use glocal_core::translation::{localize, LocalizedContent, Overlay, SourceFields};
use glocal_core::types::{DbId, Timestamp};
use glocal_db::models::content::{ContentDetail, ContentItem, CreateContent, UpdateContent};
use glocal_db::repositories::{ContentRepo, TranslationRepo};
use serde::Deserialize;

use super::{deserialize_some, log_uncataloged, parse_optional};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::{
    RequireAuth, RequireContentAdmin, RequireContentCreator, RequireContentEditor,
};
use crate::query::ContentListParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /contents`. Enum fields arrive as text so parse
/// failures can name the accepted values.
#[derive(Debug, Default, Deserialize)]
pub struct CreateContentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub language: Option<String>,
    pub locale: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Request body for `PUT /contents/{id}`. Absent fields are left unchanged;
/// a `null` or blank `description` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    pub body: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub language: Option<String>,
    pub locale: Option<String>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<serde_json::Value>,
    /// The version the client last read. A mismatch is a conflict.
    pub version: Option<i32>,
}

/// Query parameters for `GET /contents/{id}/localized`.
#[derive(Debug, Deserialize)]
pub struct LocalizedParams {
    pub language: Option<String>,
    pub locale: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/contents
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppQuery(pairs): AppQuery<Vec<(String, String)>>,
) -> AppResult<Json<PaginatedResponse<ContentItem>>> {
    let query = ContentListParams::from_pairs(pairs).into_query()?;
    let page = ContentRepo::list(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::new(page.items, page.total, query.page)))
}

/// GET /api/v1/contents/{id}
///
/// The item with its translation subrecords nested.
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ContentDetail>>> {
    let item = find_content(&state, id).await?;
    let translations = TranslationRepo::list_by_content(&state.pool, id).await?;
    Ok(Json(DataResponse::new(ContentDetail { item, translations })))
}

/// POST /api/v1/contents
pub async fn create(
    State(state): State<AppState>,
    RequireContentCreator(user): RequireContentCreator,
    AppJson(input): AppJson<CreateContentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ContentItem>>)> {
    let new_item = build_create(input, user.user_id, Utc::now())?;
    log_uncataloged(&new_item.language, &new_item.locale);
    let item = ContentRepo::create(&state.pool, &new_item).await?;

    tracing::info!(
        content_id = item.id,
        user_id = user.user_id,
        status = %item.status,
        "Content created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(item))))
}

/// PUT /api/v1/contents/{id}
///
/// Partial update. Status changes go through the publishing rules; the
/// write is conditional on the version read here.
pub async fn update(
    State(state): State<AppState>,
    RequireContentEditor(user): RequireContentEditor,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateContentRequest>,
) -> AppResult<Json<DataResponse<ContentItem>>> {
    let current = find_content(&state, id).await?;

    if let Some(expected) = input.version {
        if expected != current.version {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Content {id} is at version {}, not {expected}",
                current.version
            ))));
        }
    }

    let patch = build_patch(&current, input, Utc::now())?;
    ensure_pair_untranslated(&state, &current, &patch).await?;
    let Some(updated) = ContentRepo::update(&state.pool, id, current.version, &patch).await? else {
        if ContentRepo::exists(&state.pool, id).await? {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Content {id} was modified concurrently"
            ))));
        }
        return Err(not_found(id));
    };

    if updated.status != current.status {
        tracing::info!(
            content_id = id,
            user_id = user.user_id,
            from = %current.status,
            to = %updated.status,
            "Content status changed"
        );
    }
    tracing::debug!(content_id = id, version = updated.version, "Content updated");

    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/contents/{id}
///
/// Hard delete; translations go with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireContentAdmin(user): RequireContentAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    if !ContentRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(content_id = id, user_id = user.user_id, "Content deleted");
    Ok(Json(DataResponse::new(serde_json::json!({}))))
}

/// GET /api/v1/contents/{id}/localized?language=&locale=
///
/// The item as seen in one language/locale, falling back field by field to
/// the original where no translation exists.
pub async fn localized(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<LocalizedParams>,
) -> AppResult<Json<DataResponse<LocalizedContent>>> {
    let content = find_content(&state, id).await?;

    let language = require_text("language", params.language.as_deref())?;
    validate_language_code(language)?;
    let requested_locale = params
        .locale
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());
    let locale = match requested_locale {
        None if language == content.language => content.locale.clone(),
        other => resolve_locale(language, other)?,
    };

    let is_original = language == content.language && locale == content.locale;
    let translation = if is_original {
        None
    } else {
        TranslationRepo::find_for_locale(&state.pool, id, language, &locale).await?
    };

    let overlay = translation.as_ref().map(|t| Overlay {
        translation_id: t.id,
        status: t.status,
        fields: &t.translated_fields.0,
    });
    let source = SourceFields {
        id: content.id,
        title: &content.title,
        description: content.description.as_deref(),
        body: &content.body,
        metadata: &content.metadata,
    };

    Ok(Json(DataResponse::new(localize(
        source, language, &locale, overlay,
    ))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Content",
        id,
    })
}

async fn find_content(state: &AppState, id: DbId) -> AppResult<ContentItem> {
    ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Trimmed description; blank counts as no description.
fn trimmed_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Moving the original onto a language/locale that already has a
/// translation would leave two sources for the same pair.
async fn ensure_pair_untranslated(
    state: &AppState,
    current: &ContentItem,
    patch: &UpdateContent,
) -> AppResult<()> {
    let language = patch.language.as_deref().unwrap_or(&current.language);
    let locale = patch.locale.as_deref().unwrap_or(&current.locale);
    if language == current.language && locale == current.locale {
        return Ok(());
    }
    if TranslationRepo::find_for_locale(&state.pool, current.id, language, locale)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Content {} already has a {locale} translation",
            current.id
        ))));
    }
    log_uncataloged(language, locale);
    Ok(())
}

/// Validate a create request and resolve its defaults.
fn build_create(
    input: CreateContentRequest,
    author_id: DbId,
    now: Timestamp,
) -> Result<CreateContent, CoreError> {
    let title = require_text("title", input.title.as_deref())?;
    validate_title(title)?;
    let body = require_text("body", input.body.as_deref())?;
    let language = require_text("language", input.language.as_deref())?;
    validate_language_code(language)?;
    let locale = resolve_locale(language, input.locale.as_deref())?;

    let status: ContentStatus = parse_optional(input.status.as_deref())?.unwrap_or_default();
    let content_type: ContentType =
        parse_optional(input.content_type.as_deref())?.unwrap_or_default();

    let metadata = input.metadata.unwrap_or_else(|| serde_json::json!({}));
    validate_metadata(&metadata)?;

    Ok(CreateContent {
        title: title.to_string(),
        description: trimmed_description(input.description),
        body: body.to_string(),
        status,
        content_type,
        language: language.to_string(),
        locale,
        tags: normalize_tags(&input.tags)?,
        author_id,
        metadata,
        published_at: initial_published_at(status, now),
    })
}

/// Validate an update request against the current row and turn it into a
/// repository patch.
fn build_patch(
    current: &ContentItem,
    input: UpdateContentRequest,
    now: Timestamp,
) -> Result<UpdateContent, CoreError> {
    let title = input
        .title
        .as_deref()
        .map(|t| require_text("title", Some(t)))
        .transpose()?
        .map(str::to_string);
    if let Some(title) = &title {
        validate_title(title)?;
    }
    let body = input
        .body
        .as_deref()
        .map(|b| require_text("body", Some(b)))
        .transpose()?
        .map(str::to_string);

    let language = input
        .language
        .as_deref()
        .map(|l| require_text("language", Some(l)))
        .transpose()?
        .map(str::to_string);
    if let Some(language) = &language {
        validate_language_code(language)?;
    }
    let requested_locale = input
        .locale
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());
    // A language change without a locale moves to the new language's default.
    let locale = match (requested_locale, &language) {
        (Some(l), _) => Some(l.to_string()),
        (None, Some(lang)) if *lang != current.language => Some(resolve_locale(lang, None)?),
        _ => None,
    };
    if language.is_some() || locale.is_some() {
        validate_pair(
            language.as_deref().unwrap_or(&current.language),
            locale.as_deref().unwrap_or(&current.locale),
        )?;
    }

    let requested_status: Option<ContentStatus> = parse_optional(input.status.as_deref())?;
    let change = plan_transition(current.status, current.published_at, requested_status, now)?;

    let content_type: Option<ContentType> = parse_optional(input.content_type.as_deref())?;
    let tags = input.tags.map(normalize_tags).transpose()?;
    if let Some(metadata) = &input.metadata {
        validate_metadata(metadata)?;
    }

    Ok(UpdateContent {
        title,
        description: input.description.map(trimmed_description),
        body,
        status: change.changed.then_some(change.status),
        content_type,
        language,
        locale,
        tags,
        metadata: input.metadata,
        published_at: change
            .published_at
            .filter(|_| change.published_at != current.published_at),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Duration;
    use serde_json::json;

    use glocal_db::models::user::AuthorSummary;

    use super::*;

    fn current(status: ContentStatus, published_at: Option<Timestamp>) -> ContentItem {
        let now = Utc::now();
        ContentItem {
            id: 1,
            title: "Hello".into(),
            description: None,
            body: "Hello, world".into(),
            status,
            content_type: ContentType::Page,
            language: "en".into(),
            locale: "en-US".into(),
            tags: vec![],
            author_id: 9,
            author: AuthorSummary {
                id: 9,
                first_name: "Ada".into(),
                last_name: "Author".into(),
                email: "ada@example.com".into(),
            },
            metadata: json!({}),
            version: 3,
            published_at,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request() -> CreateContentRequest {
        CreateContentRequest {
            title: Some("  Launch ".into()),
            body: Some("We launched".into()),
            language: Some("en".into()),
            ..Default::default()
        }
    }

    // -- create --

    #[test]
    fn create_applies_defaults() {
        let now = Utc::now();
        let item = build_create(create_request(), 5, now).unwrap();
        assert_eq!(item.title, "Launch");
        assert_eq!(item.status, ContentStatus::Draft);
        assert_eq!(item.content_type, ContentType::Page);
        assert_eq!(item.locale, "en-US");
        assert_eq!(item.metadata, json!({}));
        assert_eq!(item.author_id, 5);
        assert!(item.published_at.is_none());
    }

    #[test]
    fn create_requires_title_body_and_language() {
        for strip in ["title", "body", "language"] {
            let mut request = create_request();
            match strip {
                "title" => request.title = Some("   ".into()),
                "body" => request.body = None,
                _ => request.language = None,
            }
            let err = build_create(request, 1, Utc::now()).unwrap_err();
            assert_eq!(err.to_string(), format!("Validation failed: {strip} is required"));
        }
    }

    #[test]
    fn create_published_is_stamped() {
        let now = Utc::now();
        let request = CreateContentRequest {
            status: Some("PUBLISHED".into()),
            ..create_request()
        };
        let item = build_create(request, 1, now).unwrap();
        assert_eq!(item.published_at, Some(now));
    }

    #[test]
    fn create_rejects_mismatched_locale_and_bad_type() {
        let request = CreateContentRequest {
            locale: Some("fr-FR".into()),
            ..create_request()
        };
        assert_matches!(
            build_create(request, 1, Utc::now()),
            Err(CoreError::Validation(_))
        );

        let request = CreateContentRequest {
            content_type: Some("VIDEO".into()),
            ..create_request()
        };
        assert_matches!(
            build_create(request, 1, Utc::now()),
            Err(CoreError::Validation(_))
        );
    }

    // -- update --

    #[test]
    fn empty_patch_changes_nothing() {
        let patch = build_patch(
            &current(ContentStatus::Draft, None),
            UpdateContentRequest::default(),
            Utc::now(),
        )
        .unwrap();
        assert!(patch.status.is_none());
        assert!(patch.published_at.is_none());
        assert!(patch.title.is_none());
    }

    #[test]
    fn publishing_sets_status_and_timestamp() {
        let now = Utc::now();
        let patch = build_patch(
            &current(ContentStatus::Review, None),
            UpdateContentRequest {
                status: Some("published".into()),
                ..Default::default()
            },
            now,
        )
        .unwrap();
        assert_eq!(patch.status, Some(ContentStatus::Published));
        assert_eq!(patch.published_at, Some(now));
    }

    #[test]
    fn archiving_leaves_published_at_alone() {
        let published = Utc::now() - Duration::days(2);
        let patch = build_patch(
            &current(ContentStatus::Published, Some(published)),
            UpdateContentRequest {
                status: Some("ARCHIVED".into()),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(patch.status, Some(ContentStatus::Archived));
        assert!(patch.published_at.is_none(), "stored value must be kept");
    }

    #[test]
    fn illegal_transition_is_rejected() {
        let result = build_patch(
            &current(ContentStatus::Draft, None),
            UpdateContentRequest {
                status: Some("PUBLISHED".into()),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_matches!(result, Err(CoreError::InvalidTransition { .. }));
    }

    #[test]
    fn language_change_moves_to_default_locale() {
        let patch = build_patch(
            &current(ContentStatus::Draft, None),
            UpdateContentRequest {
                language: Some("de".into()),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(patch.language.as_deref(), Some("de"));
        assert_eq!(patch.locale.as_deref(), Some("de-DE"));
    }

    #[test]
    fn locale_must_match_stored_language() {
        let result = build_patch(
            &current(ContentStatus::Draft, None),
            UpdateContentRequest {
                locale: Some("fr-FR".into()),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_title_is_rejected_and_tags_are_normalized() {
        let item = current(ContentStatus::Draft, None);
        let result = build_patch(
            &item,
            UpdateContentRequest {
                title: Some(" ".into()),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_matches!(result, Err(CoreError::Validation(_)));

        let patch = build_patch(
            &item,
            UpdateContentRequest {
                tags: Some(vec!["b".into(), "a".into(), "b".into()]),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(patch.tags, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn description_null_or_blank_clears() {
        let item = current(ContentStatus::Draft, None);
        for body in [json!({ "description": null }), json!({ "description": "  " })] {
            let request: UpdateContentRequest = serde_json::from_value(body).unwrap();
            let patch = build_patch(&item, request, Utc::now()).unwrap();
            assert_eq!(patch.description, Some(None));
        }

        let request: UpdateContentRequest =
            serde_json::from_value(json!({ "description": " Short " })).unwrap();
        let patch = build_patch(&item, request, Utc::now()).unwrap();
        assert_eq!(patch.description, Some(Some("Short".to_string())));

        let request: UpdateContentRequest = serde_json::from_value(json!({})).unwrap();
        let patch = build_patch(&item, request, Utc::now()).unwrap();
        assert_eq!(patch.description, None);
    }
}

//! Translation overlays and localized resolution.
//!
//! A translation stores only the fields that have actually been translated.
//! Resolution layers that sparse overlay over the original item, falling back
//! field by field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::DbId;

define_text_enum! {
    /// Progress of a single translation. Any status may be set directly.
    TranslationStatus("translation status") {
        NotStarted => "NOT_STARTED",
        InProgress => "IN_PROGRESS",
        Review => "REVIEW",
        Completed => "COMPLETED",
    }
}

impl Default for TranslationStatus {
    fn default() -> Self {
        TranslationStatus::NotStarted
    }
}

/// Sparse overlay of the translatable fields of a content item.
///
/// `None` means "not translated, use the original".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslatedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_object(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    })
}

impl TranslatedFields {
    /// Drop blank strings and empty metadata so only real translations remain.
    pub fn normalized(self) -> Self {
        Self {
            title: non_blank(self.title),
            description: non_blank(self.description),
            body: non_blank(self.body),
            metadata: non_empty_object(self.metadata),
        }
    }

    /// Apply a partial update.
    ///
    /// Fields absent from `patch` are kept. A blank string (or empty/null
    /// metadata) in `patch` removes that field from the overlay.
    pub fn merge(&mut self, patch: TranslatedFields) {
        if let Some(title) = patch.title {
            self.title = non_blank(Some(title));
        }
        if let Some(description) = patch.description {
            self.description = non_blank(Some(description));
        }
        if let Some(body) = patch.body {
            self.body = non_blank(Some(body));
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = non_empty_object(Some(metadata));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.body.is_none()
            && self.metadata.is_none()
    }

    /// Names of the fields present in the overlay.
    pub fn translated_field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(4);
        if self.title.is_some() {
            names.push("title");
        }
        if self.description.is_some() {
            names.push("description");
        }
        if self.body.is_some() {
            names.push("body");
        }
        if self.metadata.is_some() {
            names.push("metadata");
        }
        names
    }

    /// Metadata overlays must be JSON objects.
    pub fn validate(&self) -> Result<(), crate::error::CoreError> {
        match &self.metadata {
            Some(meta) => crate::content::validate_metadata(meta),
            None => Ok(()),
        }
    }
}

/// Borrowed view of the original item's translatable fields.
#[derive(Debug, Clone, Copy)]
pub struct SourceFields<'a> {
    pub id: DbId,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub body: &'a str,
    pub metadata: &'a Value,
}

/// Overlay applied during resolution.
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    pub translation_id: DbId,
    pub status: TranslationStatus,
    pub fields: &'a TranslatedFields,
}

/// An item as seen in a particular language/locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedContent {
    /// Read-only back-reference to the owning content item.
    pub original_id: DbId,
    pub language: String,
    pub locale: String,
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    pub metadata: Value,
    pub translation_id: Option<DbId>,
    pub translation_status: Option<TranslationStatus>,
    /// Fields taken from the original because no translation exists.
    pub fallback_fields: Vec<&'static str>,
}

/// Resolve an overlay over the original fields.
///
/// Metadata is merged shallowly: translated keys replace original keys,
/// untranslated keys fall through.
pub fn localize(
    source: SourceFields<'_>,
    language: &str,
    locale: &str,
    overlay: Option<Overlay<'_>>,
) -> LocalizedContent {
    let empty = TranslatedFields::default();
    let fields = overlay.map(|o| o.fields).unwrap_or(&empty);
    let mut fallback_fields = Vec::new();

    let title = match &fields.title {
        Some(t) => t.clone(),
        None => {
            fallback_fields.push("title");
            source.title.to_string()
        }
    };
    let description = match &fields.description {
        Some(d) => Some(d.clone()),
        None => {
            fallback_fields.push("description");
            source.description.map(str::to_string)
        }
    };
    let body = match &fields.body {
        Some(b) => b.clone(),
        None => {
            fallback_fields.push("body");
            source.body.to_string()
        }
    };
    let metadata = match &fields.metadata {
        Some(Value::Object(translated)) => {
            let mut merged: Map<String, Value> =
                source.metadata.as_object().cloned().unwrap_or_default();
            for (key, value) in translated {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        Some(other) => other.clone(),
        None => {
            fallback_fields.push("metadata");
            source.metadata.clone()
        }
    };

    LocalizedContent {
        original_id: source.id,
        language: language.to_string(),
        locale: locale.to_string(),
        title,
        description,
        body,
        metadata,
        translation_id: overlay.map(|o| o.translation_id),
        translation_status: overlay.map(|o| o.status),
        fallback_fields,
    }
}

//! Public catalog of supported languages and locales.

use axum::Json;
use glocal_core::locale::{
    LanguageInfo, LocaleInfo, DEFAULT_LANGUAGE, DEFAULT_LOCALE, SUPPORTED_LANGUAGES,
    SUPPORTED_LOCALES,
};
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct LocaleCatalog {
    pub default_language: &'static str,
    pub default_locale: &'static str,
    pub languages: &'static [LanguageInfo],
    pub locales: &'static [LocaleInfo],
}

/// GET /api/v1/locales
pub async fn catalog() -> Json<DataResponse<LocaleCatalog>> {
    Json(DataResponse::new(LocaleCatalog {
        default_language: DEFAULT_LANGUAGE,
        default_locale: DEFAULT_LOCALE,
        languages: SUPPORTED_LANGUAGES,
        locales: SUPPORTED_LOCALES,
    }))
}

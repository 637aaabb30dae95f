pub mod auth;
pub mod content;
pub mod locales;
pub mod translation;

use std::str::FromStr;

use glocal_core::error::CoreError;

/// Parse an optional text enum; blank input counts as absent.
pub(crate) fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
}

/// Deserialize a present field (including `null`) as `Some`, so that
/// `Option<Option<T>>` tells an omitted key apart from an explicit `null`.
/// Pair with `#[serde(default)]`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Codes outside the catalog are accepted when well-formed; note them.
pub(crate) fn log_uncataloged(language: &str, locale: &str) {
    use glocal_core::locale::{is_supported_language, is_supported_locale};

    if !is_supported_language(language) || !is_supported_locale(locale) {
        tracing::debug!(language, locale, "Language/locale outside the catalog");
    }
}

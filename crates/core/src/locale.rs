//! Language and locale codes.
//!
//! Languages are ISO 639-1 codes (`en`); locales are a language plus an
//! ISO 3166-1 alpha-2 region (`en-US`). The catalog below lists the codes the
//! authoring client offers. It is advisory: well-formed codes outside it are
//! still accepted.

use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub is_rtl: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LocaleInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub country_code: &'static str,
    pub country_name: &'static str,
}

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_LOCALE: &str = "en-US";

macro_rules! lang {
    ($code:literal, $name:literal, $native:literal, $rtl:literal) => {
        LanguageInfo {
            code: $code,
            name: $name,
            native_name: $native,
            is_rtl: $rtl,
        }
    };
}

macro_rules! loc {
    ($code:literal, $name:literal, $cc:literal, $country:literal) => {
        LocaleInfo {
            code: $code,
            name: $name,
            country_code: $cc,
            country_name: $country,
        }
    };
}

pub const SUPPORTED_LANGUAGES: &[LanguageInfo] = &[
    lang!("en", "English", "English", false),
    lang!("es", "Spanish", "Español", false),
    lang!("fr", "French", "Français", false),
    lang!("de", "German", "Deutsch", false),
    lang!("it", "Italian", "Italiano", false),
    lang!("pt", "Portuguese", "Português", false),
    lang!("nl", "Dutch", "Nederlands", false),
    lang!("ru", "Russian", "Русский", false),
    lang!("zh", "Chinese", "中文", false),
    lang!("ja", "Japanese", "日本語", false),
    lang!("ko", "Korean", "한국어", false),
    lang!("ar", "Arabic", "العربية", true),
    lang!("hi", "Hindi", "हिन्दी", false),
];

pub const SUPPORTED_LOCALES: &[LocaleInfo] = &[
    loc!("en-US", "English (United States)", "US", "United States"),
    loc!("en-GB", "English (United Kingdom)", "GB", "United Kingdom"),
    loc!("en-CA", "English (Canada)", "CA", "Canada"),
    loc!("en-AU", "English (Australia)", "AU", "Australia"),
    loc!("fr-FR", "French (France)", "FR", "France"),
    loc!("fr-CA", "French (Canada)", "CA", "Canada"),
    loc!("fr-BE", "French (Belgium)", "BE", "Belgium"),
    loc!("es-ES", "Spanish (Spain)", "ES", "Spain"),
    loc!("es-MX", "Spanish (Mexico)", "MX", "Mexico"),
    loc!("es-AR", "Spanish (Argentina)", "AR", "Argentina"),
    loc!("es-CO", "Spanish (Colombia)", "CO", "Colombia"),
    loc!("de-DE", "German (Germany)", "DE", "Germany"),
    loc!("de-AT", "German (Austria)", "AT", "Austria"),
    loc!("de-CH", "German (Switzerland)", "CH", "Switzerland"),
    loc!("it-IT", "Italian (Italy)", "IT", "Italy"),
    loc!("pt-BR", "Portuguese (Brazil)", "BR", "Brazil"),
    loc!("pt-PT", "Portuguese (Portugal)", "PT", "Portugal"),
    loc!("nl-NL", "Dutch (Netherlands)", "NL", "Netherlands"),
    loc!("nl-BE", "Dutch (Belgium)", "BE", "Belgium"),
    loc!("ru-RU", "Russian (Russia)", "RU", "Russia"),
    loc!("zh-CN", "Chinese (Simplified)", "CN", "China"),
    loc!("zh-TW", "Chinese (Traditional)", "TW", "Taiwan"),
    loc!("ja-JP", "Japanese (Japan)", "JP", "Japan"),
    loc!("ko-KR", "Korean (South Korea)", "KR", "South Korea"),
    loc!("ar-SA", "Arabic (Saudi Arabia)", "SA", "Saudi Arabia"),
    loc!("ar-EG", "Arabic (Egypt)", "EG", "Egypt"),
    loc!("hi-IN", "Hindi (India)", "IN", "India"),
];

pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|l| l.code == code)
}

pub fn is_supported_locale(code: &str) -> bool {
    SUPPORTED_LOCALES.iter().any(|l| l.code == code)
}

/// First catalog locale for a language (`en` -> `en-US`).
pub fn default_locale_for(language: &str) -> Option<&'static str> {
    SUPPORTED_LOCALES
        .iter()
        .map(|l| l.code)
        .find(|code| code.split('-').next() == Some(language))
}

/// Validate an ISO 639-1 language code: exactly two lower-case ASCII letters.
pub fn validate_language_code(code: &str) -> Result<(), CoreError> {
    if code.len() == 2 && code.bytes().all(|b| b.is_ascii_lowercase()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid language code '{code}'. Expected ISO 639-1 (e.g. 'en')"
        )))
    }
}

/// Validate a locale code of the form `ll-RR`.
pub fn validate_locale_code(code: &str) -> Result<(), CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "Invalid locale code '{code}'. Expected language-REGION (e.g. 'en-US')"
        ))
    };
    let (language, region) = code.split_once('-').ok_or_else(invalid)?;
    validate_language_code(language).map_err(|_| invalid())?;
    if region.len() == 2 && region.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Validate a language/locale pair: both well formed and the locale belongs
/// to the language.
pub fn validate_pair(language: &str, locale: &str) -> Result<(), CoreError> {
    validate_language_code(language)?;
    validate_locale_code(locale)?;
    if !locale.starts_with(language) || locale.as_bytes().get(2) != Some(&b'-') {
        return Err(CoreError::Validation(format!(
            "Locale '{locale}' does not belong to language '{language}'"
        )));
    }
    Ok(())
}

/// Resolve the locale for new content: the explicit value, or the catalog
/// default for the language.
pub fn resolve_locale(language: &str, locale: Option<&str>) -> Result<String, CoreError> {
    let locale = match locale.map(str::trim).filter(|l| !l.is_empty()) {
        Some(l) => l.to_string(),
        None => default_locale_for(language)
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "locale is required for language '{language}'"
                ))
            })?,
    };
    validate_pair(language, &locale)?;
    Ok(locale)
}

//! Internationalization (i18n) module
//!
//! Picks the UI language and hands it to `rust-i18n`. Strings live in
//! `locales/*.yml`. Supports English and Indonesian.
//! Note: Log messages remain in English for consistency.

use std::sync::OnceLock;
use tracing::debug;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Indonesian,
}

impl Language {
    /// Locale code used by the translation files
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Indonesian => "id",
        }
    }

    /// Match a locale tag such as `id`, `id-ID`, `in_ID.UTF-8` or `en_US`
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lower = tag.trim().to_lowercase();
        let primary = lower.split(['-', '_', '.']).next().unwrap_or_default();
        match primary {
            // `in` is the legacy ISO code some platforms still report
            "id" | "in" | "indonesian" => Some(Language::Indonesian),
            "en" | "english" | "c" | "posix" => Some(Language::English),
            _ => None,
        }
    }
}

/// Global language instance
static LANGUAGE: OnceLock<Language> = OnceLock::new();

/// Current language; system detection if [`init_locale`] was never called
pub fn get_language() -> Language {
    *LANGUAGE.get_or_init(detect_language)
}

/// Detect the system language
fn detect_language() -> Language {
    sys_locale::get_locale()
        .as_deref()
        .and_then(Language::from_tag)
        .unwrap_or(Language::English)
}

/// Resolve the UI language and activate it
///
/// `preferred` comes from `--lang` or the config file. Unknown tags fall back
/// to system detection, then English. Only the first call takes effect.
pub fn init_locale(preferred: Option<&str>) -> Language {
    let language = *LANGUAGE.get_or_init(|| {
        preferred
            .and_then(Language::from_tag)
            .unwrap_or_else(detect_language)
    });
    rust_i18n::set_locale(language.code());
    debug!(locale = language.code(), "Locale initialized");
    language
}

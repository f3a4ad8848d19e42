//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry is built once on first access through a `OnceLock` and is
//! read-only afterwards. Every entry owns a pointer to its static message
//! bundle, so resolving a locale never allocates.

use crate::i18n::messages::{MessageBundle, CHINESE_MESSAGES, ENGLISH_MESSAGES};
use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Locale identifier as it appears in headers (e.g., "en", "zh_Hans")
    pub code: &'static str,

    /// English name of the locale (e.g., "English", "Chinese")
    pub name: &'static str,

    /// Native name of the locale (e.g., "English", "中文")
    pub native_name: &'static str,

    /// Whether this is the canonical locale (only one should be true)
    pub is_canonical: bool,

    /// Whether this locale may be selected by requests
    pub enabled: bool,

    /// Validation message templates for this locale
    pub messages: &'static MessageBundle,
}

impl LanguageConfig {
    /// Human-readable label used in the startup log, e.g. `zh (Chinese, 中文)`.
    pub fn label(&self) -> String {
        format!("{} ({}, {})", self.code, self.name, self.native_name)
    }
}

/// Global locale registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a locale configuration by its exact code.
    ///
    /// Matching is case-insensitive and treats `-` and `_` as the same
    /// separator, so `zh-hans` finds `zh_Hans`.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages
            .iter()
            .find(|lang| same_tag(lang.code, code))
    }

    /// Look up a language tag, retrying with its primary subtag.
    ///
    /// `zh-CN` is not registered, so this falls back to `zh`. Disabled
    /// locales are skipped.
    pub fn lookup(&self, tag: &str) -> Option<&LanguageConfig> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }

        if let Some(config) = self.get_by_code(tag).filter(|c| c.enabled) {
            return Some(config);
        }

        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        if primary.len() == tag.len() {
            return None;
        }
        self.get_by_code(primary).filter(|c| c.enabled)
    }

    /// Get all enabled locales.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical locale configuration.
    ///
    /// # Panics
    /// Panics if zero or several canonical locales are registered. The table
    /// is static, so this is a programming error.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical locale found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical locales found in registry"),
        }
    }
}

fn same_tag(registered: &str, requested: &str) -> bool {
    registered.len() == requested.len()
        && registered
            .chars()
            .zip(requested.chars())
            .all(|(a, b)| match (a, b) {
                ('-' | '_', '-' | '_') => true,
                _ => a.eq_ignore_ascii_case(&b),
            })
}

/// Supported locales: English (canonical), Chinese and Simplified Chinese.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
            messages: &ENGLISH_MESSAGES,
        },
        LanguageConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            is_canonical: false,
            enabled: true,
            messages: &CHINESE_MESSAGES,
        },
        LanguageConfig {
            code: "zh_Hans",
            name: "Simplified Chinese",
            native_name: "简体中文",
            is_canonical: false,
            enabled: true,
            messages: &CHINESE_MESSAGES,
        },
    ]
}

//! Language type: a locale validated against the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry, MessageBundle};
use anyhow::{bail, Result};

/// A validated locale.
///
/// Only supported, enabled locales can be constructed, so every accessor can
/// rely on the registry entry being present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Registered locale code (e.g., "en", "zh_Hans")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const CHINESE: Language = Language { code: "zh" };

    /// Create a Language from a locale code.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered and enabled
    /// * `Err` if the code is unknown or disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Locale '{}' is not enabled", code),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// Negotiate a Language from a free-form language tag.
    ///
    /// Unlike [`Language::from_code`], this accepts regional variants such as
    /// `zh-CN` by retrying with the primary subtag.
    pub fn negotiate(tag: &str) -> Option<Language> {
        LanguageRegistry::get()
            .lookup(tag)
            .map(|config| Language { code: config.code })
    }

    /// Get the canonical locale, used when nothing else matches.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not registered, which cannot happen for values
    /// built through the constructors above.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the message templates for this locale.
    pub fn messages(&self) -> &'static MessageBundle {
        self.config().messages
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::canonical()
    }
}

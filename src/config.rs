use crate::i18n::Language;
use anyhow::{Context, Result};
use axum::http::HeaderName;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub port: u16,

    // Locale negotiation
    pub locale_header: HeaderName,
    pub default_locale: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            locale_header: HeaderName::from_static("locale"),
            default_locale: Language::canonical(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let default_locale = match std::env::var("DEFAULT_LOCALE") {
            Ok(code) => Language::from_code(&code)
                .with_context(|| format!("DEFAULT_LOCALE '{}' is not supported", code))?,
            Err(_) => defaults.default_locale,
        };

        Ok(Self {
            // Server
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: match std::env::var("PORT") {
                Ok(port) => port
                    .parse()
                    .with_context(|| format!("PORT '{}' is not a valid port", port))?,
                Err(_) => defaults.port,
            },

            // Locale negotiation
            locale_header: match std::env::var("LOCALE_HEADER") {
                Ok(name) if !name.trim().is_empty() => HeaderName::from_str(name.trim())
                    .with_context(|| format!("LOCALE_HEADER '{}' is not a valid header name", name))?,
                _ => defaults.locale_header,
            },
            default_locale,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

//! Locale-aware request validation.
//!
//! A locale middleware picks a [`i18n::Translator`] per request, and
//! [`binding::bind_and_valid`] turns validation failures into field errors
//! rendered in that locale.

pub mod binding;
pub mod config;
pub mod i18n;
pub mod request;
pub mod server;

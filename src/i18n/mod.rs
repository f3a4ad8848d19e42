//! Internationalization (i18n) of validation messages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and their bundles
//! - `language`: Type-safe `Language` validated against the registry
//! - `messages`: Static per-locale message templates
//! - `translator`: Request-scoped locale negotiation and message rendering
//! - `audit`: Startup check that every bundle matches the canonical placeholders
//! - `metrics`: Counters for negotiation fallbacks and binding failures
//!
//! # Example
//!
//! ```rust
//! use localized_validation::i18n::{Language, Translator};
//!
//! let resolution = Translator::resolve(Some("zh-CN"), None, Language::canonical());
//! assert_eq!(resolution.translator.locale(), "zh");
//! assert!(!resolution.fallback);
//! ```

mod audit;
mod language;
pub(crate) mod messages;
mod metrics;
mod registry;
mod translator;

pub use audit::{AuditReport, BundleAuditor};
pub use language::Language;
pub use messages::MessageBundle;
pub use metrics::{LocaleMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use translator::{Resolution, Translator};

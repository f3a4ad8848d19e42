//! Request-scoped translator: locale negotiation and validation message
//! rendering.

use crate::binding::{ValidError, ValidErrors};
use crate::i18n::messages::placeholder_regex;
use crate::i18n::Language;
use regex::Captures;
use serde_json::Value;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// A read-only handle that renders validation errors in one locale.
///
/// Cheap to copy; one is resolved per request and stored in the request
/// extensions by the locale middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    language: Language,
}

/// Outcome of locale negotiation for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub translator: Translator,

    /// True when no requested locale matched and the default was used
    pub fallback: bool,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn locale(&self) -> &'static str {
        self.language.code()
    }

    /// Pick a translator from the explicit locale header, then from
    /// `Accept-Language`, then the default.
    ///
    /// An explicit header that names an unsupported locale still consults
    /// `Accept-Language` before falling back.
    pub fn resolve(
        locale_header: Option<&str>,
        accept_language: Option<&str>,
        default: Language,
    ) -> Resolution {
        let negotiated = locale_header
            .and_then(Language::negotiate)
            .or_else(|| accept_language.and_then(negotiate_accept_language));

        match negotiated {
            Some(language) => Resolution {
                translator: Translator::new(language),
                fallback: false,
            },
            None => Resolution {
                translator: Translator::new(default),
                fallback: true,
            },
        }
    }

    /// Render one engine error for `field`.
    ///
    /// An explicit message attached to the error wins over the templates.
    pub fn translate(&self, field: &str, error: &ValidationError) -> String {
        if let Some(message) = &error.message {
            return message.to_string();
        }

        let messages = self.language.messages();
        let min = param(error, "min");
        let max = param(error, "max");
        let equal = param(error, "equal");
        let values = param(error, "values");

        let template = match error.code.as_ref() {
            "required" => messages.required,
            "length" => match (&equal, &min, &max) {
                (Some(_), _, _) => messages.length_equal,
                (None, Some(_), Some(_)) => messages.length_between,
                (None, Some(_), None) => messages.length_min,
                (None, None, Some(_)) => messages.length_max,
                (None, None, None) => messages.invalid,
            },
            "range" => match (&min, &max) {
                (Some(_), Some(_)) => messages.range_between,
                (Some(_), None) => messages.range_min,
                (None, Some(_)) => messages.range_max,
                (None, None) => messages.invalid,
            },
            "email" => messages.email,
            "url" => messages.url,
            "one_of" if values.is_some() => messages.one_of,
            _ => messages.invalid,
        };

        render(
            template,
            &[
                ("field", Some(Cow::Borrowed(field))),
                ("min", min),
                ("max", max),
                ("equal", equal),
                ("values", values),
            ],
        )
    }

    /// Render every error in `errors`, ordered by field key.
    ///
    /// Nested structs produce `parent.child` keys and lists produce
    /// `parent[index]` keys.
    pub fn translate_all(&self, errors: &ValidationErrors) -> ValidErrors {
        let mut out = Vec::new();
        self.collect("", errors, &mut out);
        out.sort_by(|a, b| a.key.cmp(&b.key));
        ValidErrors::from(out)
    }

    /// The message used when a body cannot be decoded at all.
    pub fn malformed_body(&self) -> ValidErrors {
        ValidErrors::from(vec![ValidError {
            key: "body".to_string(),
            message: self.language.messages().malformed_body.to_string(),
        }])
    }

    fn collect(&self, prefix: &str, errors: &ValidationErrors, out: &mut Vec<ValidError>) {
        for (field, kind) in errors.errors() {
            let key = if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{}.{}", prefix, field)
            };

            match kind {
                ValidationErrorsKind::Field(field_errors) => {
                    for error in field_errors {
                        out.push(ValidError {
                            message: self.translate(&key, error),
                            key: key.clone(),
                        });
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.collect(&key, inner, out),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect(&format!("{}[{}]", key, index), inner, out);
                    }
                }
            }
        }
    }
}

/// First entry of an `Accept-Language` value that names a supported locale.
///
/// Entries are taken in the order sent; quality weights are ignored and
/// `*` never matches.
fn negotiate_accept_language(header: &str) -> Option<Language> {
    header
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .find_map(Language::negotiate)
}

fn param<'a>(error: &'a ValidationError, name: &str) -> Option<Cow<'a, str>> {
    error.params.get(name).map(|value| match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    })
}

/// Fill placeholders in one pass; substituted values are never rescanned.
fn render(template: &str, params: &[(&str, Option<Cow<'_, str>>)]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| {
            params
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .and_then(|(_, value)| value.as_deref())
                .unwrap_or(&caps[0])
                .to_string()
        })
        .into_owned()
}

//! Request binding: decode a body into a typed payload, validate it, and
//! turn failures into localized field errors.

use crate::i18n::{LocaleMetrics, Translator};
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};
use validator::{Validate, ValidationErrors};

/// One localized failure, keyed by the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidError {
    pub key: String,
    pub message: String,
}

impl fmt::Display for ValidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered localized failures for one request. Serializes as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidErrors(Vec<ValidError>);

impl ValidErrors {
    /// The messages alone, in order.
    pub fn errors(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ValidError>> for ValidErrors {
    fn from(errors: Vec<ValidError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.errors().join(","))
    }
}

impl std::error::Error for ValidErrors {}

impl IntoResponse for ValidErrors {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// Why a request could not be bound to a payload.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("failed to decode JSON body: {0}")]
    Json(#[from] JsonRejection),

    #[error("failed to decode form body: {0}")]
    Form(#[from] FormRejection),

    #[error("failed to decode query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Decode the request by its content type and validate the result.
///
/// `application/json` (and `+json` suffixes) is decoded as JSON. Without a
/// `Content-Type` the body is ignored and fields come from the query string.
/// Anything else goes through the URL-encoded form decoder.
pub async fn bind<T>(request: Request) -> Result<T, BindError>
where
    T: DeserializeOwned + Validate + Send,
{
    let value: T = match body_kind(request.headers()) {
        BodyKind::Json => {
            let Json(value) = Json::<T>::from_request(request, &()).await?;
            value
        }
        BodyKind::Form => {
            let Form(value) = Form::<T>::from_request(request, &()).await?;
            value
        }
        BodyKind::Absent => {
            let (mut parts, _) = request.into_parts();
            let Query(value) = Query::<T>::from_request_parts(&mut parts, &()).await?;
            value
        }
    };

    value.validate()?;
    Ok(value)
}

/// Bind and validate, reporting failures in the translator's locale.
///
/// Validation failures yield one entry per violated constraint. Any other
/// bind failure yields a single `body` entry, so a failed bind never comes
/// back with an empty list.
pub async fn bind_and_valid<T>(request: Request, translator: &Translator) -> Result<T, ValidErrors>
where
    T: DeserializeOwned + Validate + Send,
{
    match bind(request).await {
        Ok(value) => Ok(value),
        Err(BindError::Validation(errors)) => {
            LocaleMetrics::global().record_validation_failure();
            let translated = translator.translate_all(&errors);
            debug!(
                locale = translator.locale(),
                count = translated.len(),
                "Validation failed"
            );
            Err(translated)
        }
        Err(err) => {
            LocaleMetrics::global().record_rejected_body();
            warn!(locale = translator.locale(), error = %err, "Request body rejected");
            Err(translator.malformed_body())
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Absent,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(content_type) = headers.get(CONTENT_TYPE) else {
        return BodyKind::Absent;
    };

    let mime = content_type
        .to_str()
        .unwrap_or_default()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::request::CountRequest;
    use axum::body::Body;
    use axum::http::HeaderValue;

    fn json_request(body: &str) -> Request {
        axum::http::Request::post("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(body: &str) -> Request {
        axum::http::Request::post("/")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ==================== Content Type Tests ====================

    #[test]
    fn test_body_kind() {
        let mut headers = HeaderMap::new();
        assert_eq!(body_kind(&headers), BodyKind::Absent);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        assert_eq!(body_kind(&headers), BodyKind::Json);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/problem+json"));
        assert_eq!(body_kind(&headers), BodyKind::Json);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-www-form-urlencoded"));
        assert_eq!(body_kind(&headers), BodyKind::Form);
    }

    // ==================== bind Tests ====================

    #[tokio::test]
    async fn test_bind_json_applies_default_state() {
        let payload: CountRequest = bind(json_request(r#"{"name":"widgets"}"#)).await.unwrap();
        assert_eq!(payload.name, "widgets");
        assert_eq!(payload.state, 1);
    }

    #[tokio::test]
    async fn test_bind_form() {
        let payload: CountRequest = bind(form_request("name=widgets&state=0")).await.unwrap();
        assert_eq!(payload.name, "widgets");
        assert_eq!(payload.state, 0);
    }

    #[tokio::test]
    async fn test_bind_form_empty_state_is_zero() {
        let payload: CountRequest = bind(form_request("name=x&state=")).await.unwrap();
        assert_eq!(payload.state, 0);
    }

    #[tokio::test]
    async fn test_bind_json_null_name() {
        let payload: CountRequest = bind(json_request(r#"{"name":null,"state":0}"#)).await.unwrap();
        assert_eq!(payload.name, "");
    }

    #[tokio::test]
    async fn test_bind_without_content_type_reads_query() {
        let request = axum::http::Request::post("/?name=widgets&state=0")
            .body(Body::from("name=ignored"))
            .unwrap();

        let payload: CountRequest = bind(request).await.unwrap();
        assert_eq!(payload.name, "widgets");
        assert_eq!(payload.state, 0);
    }

    #[tokio::test]
    async fn test_bind_without_content_type_bad_query() {
        let request = axum::http::Request::post("/?state=abc").body(Body::empty()).unwrap();
        let result = bind::<CountRequest>(request).await;
        assert!(matches!(result, Err(BindError::Query(_))));
    }

    #[tokio::test]
    async fn test_bind_validation_error() {
        let result = bind::<CountRequest>(json_request(r#"{"name":"x","state":2}"#)).await;
        assert!(matches!(result, Err(BindError::Validation(_))));
    }

    #[tokio::test]
    async fn test_bind_malformed_json() {
        let result = bind::<CountRequest>(json_request("{not json")).await;
        assert!(matches!(result, Err(BindError::Json(_))));
    }

    #[tokio::test]
    async fn test_bind_form_type_mismatch() {
        let result = bind::<CountRequest>(form_request("state=abc")).await;
        assert!(matches!(result, Err(BindError::Form(_))));
    }

    // ==================== bind_and_valid Tests ====================

    #[tokio::test]
    async fn test_bind_and_valid_localizes_errors() {
        let body = format!(r#"{{"name":"{}","state":2}}"#, "a".repeat(101));
        let translator = Translator::new(Language::CHINESE);

        let errors = bind_and_valid::<CountRequest>(json_request(&body), &translator)
            .await
            .unwrap_err();

        assert_eq!(
            errors.errors(),
            vec![
                "name长度不能超过100个字符".to_string(),
                "state必须是[0 1]中的一个".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_bind_and_valid_malformed_body_is_not_empty() {
        let translator = Translator::new(Language::ENGLISH);

        let errors = bind_and_valid::<CountRequest>(json_request("{\"name\":"), &translator)
            .await
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().key, "body");
    }

    // ==================== ValidErrors Tests ====================

    #[test]
    fn test_valid_errors_display_joins_messages() {
        let errors = ValidErrors::from(vec![
            ValidError {
                key: "a".to_string(),
                message: "first".to_string(),
            },
            ValidError {
                key: "b".to_string(),
                message: "second".to_string(),
            },
        ]);

        assert_eq!(errors.to_string(), "first,second");
        assert_eq!(errors.iter().next().unwrap().to_string(), "first");
    }

    #[test]
    fn test_valid_errors_serialize_as_array() {
        let errors = ValidErrors::from(vec![ValidError {
            key: "name".to_string(),
            message: "too long".to_string(),
        }]);

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!([{"key": "name", "message": "too long"}]));
    }

    #[test]
    fn test_valid_errors_default_is_empty() {
        assert!(ValidErrors::default().is_empty());
    }
}

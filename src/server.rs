//! HTTP wiring: locale middleware, the validation endpoint, and the server
//! loop.

use crate::binding::bind_and_valid;
use crate::config::Config;
use crate::i18n::{BundleAuditor, LanguageRegistry, LocaleMetrics, MetricsReport, Translator};
use crate::request::CountRequest;
use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    http::{header::ACCEPT_LANGUAGE, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Build the application router.
pub fn router(config: Config) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/", post(count))
        .route("/metrics", get(metrics))
        .layer(middleware::from_fn_with_state(state.clone(), translations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the request's translator and store it in the request extensions.
///
/// Unsupported or missing locales fall back to the configured default; the
/// fallback is logged and counted rather than passed silently.
pub async fn translations(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let headers = request.headers();
    let requested = headers
        .get(&state.config.locale_header)
        .and_then(|value| value.to_str().ok());
    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    let resolution = Translator::resolve(requested, accept_language, state.config.default_locale);
    LocaleMetrics::global().record_resolution(resolution.fallback);

    if resolution.fallback {
        debug!(
            requested = ?requested,
            accept_language = ?accept_language,
            locale = resolution.translator.locale(),
            "No supported locale requested, using default"
        );
    }

    request.extensions_mut().insert(resolution.translator);
    next.run(request).await
}

async fn count(
    State(state): State<AppState>,
    translator: Option<Extension<Translator>>,
    request: Request,
) -> Response {
    let translator = translator
        .map(|Extension(translator)| translator)
        .unwrap_or_else(|| Translator::new(state.config.default_locale));

    match bind_and_valid::<CountRequest>(request, &translator).await {
        Ok(payload) => {
            info!(name = %payload.name, state = payload.state, "Accepted count request");
            StatusCode::OK.into_response()
        }
        Err(errors) => errors.into_response(),
    }
}

async fn metrics() -> Json<MetricsReport> {
    Json(LocaleMetrics::global().report())
}

/// Log the supported locales and the outcome of the startup bundle audit.
fn audit_bundles() {
    for config in LanguageRegistry::get().list_enabled() {
        info!(canonical = config.is_canonical, "Locale available: {}", config.label());
    }

    for (code, report) in BundleAuditor::audit_registry() {
        for error in &report.errors {
            warn!(locale = code, "Message bundle error: {}", error);
        }
        for warning in &report.warnings {
            warn!(locale = code, "Message bundle warning: {}", warning);
        }
        if report.is_clean() {
            debug!(locale = code, "Message bundle audit passed");
        }
    }
}

/// Bind the listener and serve until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    audit_bundles();

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        addr = %addr,
        locale_header = %config.locale_header,
        default_locale = config.default_locale.code(),
        "Listening"
    );

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

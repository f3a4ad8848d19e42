//! Locale resolution and validation counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Process-wide counters for locale negotiation and request binding.
#[derive(Debug, Default)]
pub struct LocaleMetrics {
    /// Requests whose locale was negotiated (including fallbacks)
    resolutions: AtomicUsize,

    /// Requests that fell back to the default locale
    fallbacks: AtomicUsize,

    /// Requests rejected by field validation
    validation_failures: AtomicUsize,

    /// Requests whose body could not be decoded
    rejected_bodies: AtomicUsize,
}

static METRICS: OnceLock<LocaleMetrics> = OnceLock::new();

impl LocaleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global metrics instance.
    pub fn global() -> &'static LocaleMetrics {
        METRICS.get_or_init(LocaleMetrics::new)
    }

    /// Record a negotiated locale. `fallback` marks a default-locale result.
    pub fn record_resolution(&self, fallback: bool) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        if fallback {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_validation_failure(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_body(&self) {
        self.rejected_bodies.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn validation_failures(&self) -> usize {
        self.validation_failures.load(Ordering::Relaxed)
    }

    pub fn rejected_bodies(&self) -> usize {
        self.rejected_bodies.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let resolutions = self.resolutions();
        let fallbacks = self.fallbacks();
        let fallback_rate = if resolutions > 0 {
            (fallbacks as f64 / resolutions as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            resolutions,
            fallbacks,
            fallback_rate,
            validation_failures: self.validation_failures(),
            rejected_bodies: self.rejected_bodies(),
        }
    }
}

/// Snapshot of the counters, served by `GET /metrics`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub resolutions: usize,
    pub fallbacks: usize,

    /// Fallbacks as a percentage of resolutions (0-100)
    pub fallback_rate: f64,

    pub validation_failures: usize,
    pub rejected_bodies: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_resolution() {
        let metrics = LocaleMetrics::new();

        metrics.record_resolution(false);
        metrics.record_resolution(true);

        assert_eq!(metrics.resolutions(), 2);
        assert_eq!(metrics.fallbacks(), 1);
    }

    #[test]
    fn test_record_binding_failures() {
        let metrics = LocaleMetrics::new();

        metrics.record_validation_failure();
        metrics.record_validation_failure();
        metrics.record_rejected_body();

        assert_eq!(metrics.validation_failures(), 2);
        assert_eq!(metrics.rejected_bodies(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = LocaleMetrics::new().report();

        assert_eq!(report.resolutions, 0);
        assert_eq!(report.fallbacks, 0);
        assert_eq!(report.fallback_rate, 0.0);
        assert_eq!(report.validation_failures, 0);
        assert_eq!(report.rejected_bodies, 0);
    }

    #[test]
    fn test_report_fallback_rate() {
        let metrics = LocaleMetrics::new();

        // 1 fallback out of 4 = 25%
        metrics.record_resolution(true);
        metrics.record_resolution(false);
        metrics.record_resolution(false);
        metrics.record_resolution(false);

        assert_eq!(metrics.report().fallback_rate, 25.0);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(LocaleMetrics::new().report()).unwrap();
        assert_eq!(json["fallbacks"], 0);
        assert!(json.get("fallback_rate").is_some());
    }

    // ==================== Singleton Tests ====================

    #[test]
    fn test_global_returns_same_instance() {
        assert!(std::ptr::eq(LocaleMetrics::global(), LocaleMetrics::global()));
    }

    #[test]
    #[serial]
    fn test_global_counts_persist_across_calls() {
        let before = LocaleMetrics::global().rejected_bodies();
        LocaleMetrics::global().record_rejected_body();
        assert!(LocaleMetrics::global().rejected_bodies() > before);
    }
}

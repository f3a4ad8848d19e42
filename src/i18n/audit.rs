//! Message bundle auditing.
//!
//! Every locale bundle must carry the same placeholders as the canonical
//! bundle, otherwise a rendered message silently loses the field name or a
//! bound. The audit runs once at startup.

use crate::i18n::messages::placeholder_regex;
use crate::i18n::{LanguageRegistry, MessageBundle};
use std::collections::BTreeSet;

/// Audit report containing errors and warnings about one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditReport {
    /// Problems that break rendering
    pub errors: Vec<String>,

    /// Suspicious but renderable templates
    pub warnings: Vec<String>,
}

impl AuditReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Compares locale bundles against the canonical bundle.
pub struct BundleAuditor;

impl BundleAuditor {
    /// Check `candidate` against `canonical`, template by template.
    ///
    /// - empty templates are errors
    /// - placeholder sets that differ from the canonical template are errors
    /// - templates identical to the canonical one are warnings (untranslated),
    ///   unless the two bundles are the same bundle
    pub fn audit(canonical: &MessageBundle, candidate: &MessageBundle) -> AuditReport {
        let mut report = AuditReport::new();
        let same_bundle = std::ptr::eq(canonical, candidate);

        for ((name, reference), (_, template)) in
            canonical.entries().into_iter().zip(candidate.entries())
        {
            if template.trim().is_empty() {
                report.errors.push(format!("Template '{}' is empty", name));
                continue;
            }

            let expected = Self::extract_placeholders(reference);
            let found = Self::extract_placeholders(template);
            if expected != found {
                report.errors.push(format!(
                    "Placeholder mismatch in '{}': expected {:?}, found {:?}",
                    name, expected, found
                ));
            }

            if !same_bundle && template == reference {
                report
                    .warnings
                    .push(format!("Template '{}' is identical to the canonical text", name));
            }
        }

        report
    }

    /// Audit every enabled locale in the registry.
    pub fn audit_registry() -> Vec<(&'static str, AuditReport)> {
        let registry = LanguageRegistry::get();
        let canonical = registry.canonical().messages;

        registry
            .list_enabled()
            .into_iter()
            .map(|config| (config.code, Self::audit(canonical, config.messages)))
            .collect()
    }

    fn extract_placeholders(template: &str) -> BTreeSet<String> {
        placeholder_regex()
            .captures_iter(template)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::messages::{CHINESE_MESSAGES, ENGLISH_MESSAGES};

    fn placeholders(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    // ==================== Extraction Tests ====================

    #[test]
    fn test_extract_placeholders() {
        assert_eq!(
            BundleAuditor::extract_placeholders("{field} between {min} and {max}"),
            placeholders(&["field", "min", "max"])
        );
    }

    #[test]
    fn test_extract_placeholders_none() {
        assert!(BundleAuditor::extract_placeholders("no placeholders").is_empty());
    }

    #[test]
    fn test_extract_placeholders_ignores_uppercase() {
        assert!(BundleAuditor::extract_placeholders("{Field}").is_empty());
    }

    // ==================== Audit Tests ====================

    #[test]
    fn test_canonical_against_itself_is_clean() {
        assert!(BundleAuditor::audit(&ENGLISH_MESSAGES, &ENGLISH_MESSAGES).is_clean());
    }

    #[test]
    fn test_copy_of_canonical_is_reported_untranslated() {
        let copy = ENGLISH_MESSAGES.clone();

        let report = BundleAuditor::audit(&ENGLISH_MESSAGES, &copy);
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 13);
    }

    #[test]
    fn test_chinese_bundle_is_clean() {
        let report = BundleAuditor::audit(&ENGLISH_MESSAGES, &CHINESE_MESSAGES);
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn test_missing_placeholder_is_error() {
        let broken = MessageBundle {
            length_max: "{field}长度太长",
            ..CHINESE_MESSAGES.clone()
        };

        let report = BundleAuditor::audit(&ENGLISH_MESSAGES, &broken);
        assert!(report.has_errors());
        assert!(report.errors[0].contains("length_max"));
    }

    #[test]
    fn test_empty_template_is_error() {
        let broken = MessageBundle {
            required: " ",
            ..CHINESE_MESSAGES.clone()
        };

        let report = BundleAuditor::audit(&ENGLISH_MESSAGES, &broken);
        assert!(report.errors[0].contains("empty"));
    }

    #[test]
    fn test_untranslated_template_is_warning() {
        let partial = MessageBundle {
            email: ENGLISH_MESSAGES.email,
            ..CHINESE_MESSAGES.clone()
        };

        let report = BundleAuditor::audit(&ENGLISH_MESSAGES, &partial);
        assert!(!report.has_errors());
        assert!(report.has_warnings());
        assert!(report.warnings[0].contains("email"));
    }

    #[test]
    fn test_audit_registry_is_clean() {
        let reports = BundleAuditor::audit_registry();

        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|(_, report)| report.is_clean()));
    }

    #[test]
    fn test_audit_report_new() {
        let report = AuditReport::new();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }
}

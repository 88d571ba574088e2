//! Localized document validation.
//!
//! Negotiation itself is lenient: variants it cannot read simply never match.
//! This module reports those problems so a host can surface them, e.g. when a
//! document is authored or imported.

use crate::i18n::document::{present_variant_keys, PRIMARY_LANGUAGE_KEY, VARIANT_KEYS};
use crate::i18n::{LanguageTag, LANGUAGE_KEY};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Problems found in a document's localization structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Problems that prevent variants from ever being selected
    pub errors: Vec<String>,

    /// Suspicious content that negotiation tolerates
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// At least one variant can never be selected.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Nothing to report for this document.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Validator for localized documents.
pub struct DocumentValidator;

impl DocumentValidator {
    /// Validate the localization structure of a document.
    ///
    /// This function checks that:
    /// - the variants key holds an array of objects
    /// - every variant carries a readable `Language.Code`
    /// - IETF tags agree with their code and region
    /// - `PrimaryLanguage` names one of the variants
    ///
    /// # Arguments
    /// * `document` - The document root
    ///
    /// # Returns
    /// A `ValidationReport` containing any errors or warnings found.
    pub fn validate(document: &Map<String, Value>) -> ValidationReport {
        let mut report = ValidationReport::default();

        let keys = present_variant_keys(document);
        if keys.len() > 1 {
            report.warnings.push(format!(
                "Both '{}' and '{}' are present; only '{}' is used",
                VARIANT_KEYS[0], VARIANT_KEYS[1], VARIANT_KEYS[0]
            ));
        }

        let primary = match document.get(PRIMARY_LANGUAGE_KEY) {
            None => None,
            Some(Value::String(primary)) => Some(primary.as_str()),
            Some(_) => {
                report
                    .warnings
                    .push(format!("'{}' is not a string", PRIMARY_LANGUAGE_KEY));
                None
            }
        };

        let Some(&key) = keys.first() else {
            return report;
        };
        let Some(array) = document.get(key).and_then(Value::as_array) else {
            report
                .errors
                .push(format!("'{}' must be an array of variants", key));
            return report;
        };
        if array.is_empty() {
            report
                .warnings
                .push(format!("'{}' is empty; no language can be negotiated", key));
        }

        let mut tags: Vec<LanguageTag> = Vec::new();
        for (index, entry) in array.iter().enumerate() {
            let Some(fields) = entry.as_object() else {
                report
                    .errors
                    .push(format!("{}[{}] is not an object", key, index));
                continue;
            };
            let Some(tag) = LanguageTag::from_variant(fields) else {
                report.errors.push(format!(
                    "{}[{}] has no readable '{}.Code'",
                    key, index, LANGUAGE_KEY
                ));
                continue;
            };
            Self::check_tag_consistency(&tag, key, index, &mut report);
            tags.push(tag);
        }

        let mut seen = HashSet::new();
        for tag in &tags {
            if !seen.insert(tag.ietf.to_ascii_lowercase()) {
                report
                    .warnings
                    .push(format!("Duplicate variant language '{}'", tag.ietf));
            }
        }

        if let Some(primary) = primary {
            if !tags.iter().any(|tag| tag.matches_ietf(primary)) {
                report.warnings.push(format!(
                    "'{}' is '{}' but no variant has that language",
                    PRIMARY_LANGUAGE_KEY, primary
                ));
            }
        }

        report
    }

    /// Warn when the IETF form disagrees with the decomposed code and region.
    fn check_tag_consistency(
        tag: &LanguageTag,
        key: &str,
        index: usize,
        report: &mut ValidationReport,
    ) {
        let Some(parsed) = LanguageTag::parse(&tag.ietf) else {
            report
                .warnings
                .push(format!("{}[{}] has an empty IETF tag", key, index));
            return;
        };

        let region_agrees = match (&tag.region, &parsed.region) {
            (Some(region), Some(_)) => parsed.has_region(region),
            (None, None) => true,
            _ => false,
        };

        if !parsed.has_code(&tag.code) || !region_agrees {
            report.warnings.push(format!(
                "{}[{}] IETF tag '{}' does not agree with Code '{}' and Region '{}'",
                key,
                index,
                tag.ietf,
                tag.code,
                tag.region.as_deref().unwrap_or("")
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("test value should be an object")
    }

    #[test]
    fn test_valid_document() {
        let doc = object(json!({
            "i18n": [
                { "Name": "A", "Language": { "IETF": "en-US", "Code": "en", "Region": "US" } },
                { "Name": "B", "Language": { "IETF": "ja", "Code": "ja" } }
            ],
            "PrimaryLanguage": "en-US"
        }));

        let report = DocumentValidator::validate(&doc);
        assert!(report.is_clean(), "Unexpected report: {:?}", report);
    }

    #[test]
    fn test_unlocalized_document_is_clean() {
        let doc = object(json!({ "AField": 123 }));
        assert!(DocumentValidator::validate(&doc).is_clean());
    }

    #[test]
    fn test_variants_not_array() {
        let doc = object(json!({ "I18n": { "Name": "A" } }));
        let report = DocumentValidator::validate(&doc);

        assert!(report.has_errors());
        assert!(report.errors[0].contains("'I18n' must be an array"));
    }

    #[test]
    fn test_variant_not_object() {
        let doc = object(json!({ "i18n": [ "en-US" ] }));
        let report = DocumentValidator::validate(&doc);

        assert_eq!(report.errors, vec!["i18n[0] is not an object".to_string()]);
    }

    #[test]
    fn test_variant_missing_code() {
        let doc = object(json!({ "i18n": [ { "Language": { "IETF": "en-US" } } ] }));
        let report = DocumentValidator::validate(&doc);

        assert!(report.has_errors());
        assert!(report.errors[0].contains("Language.Code"));
    }

    #[test]
    fn test_both_keys_warning() {
        let doc = object(json!({ "i18n": [], "I18n": [] }));
        let report = DocumentValidator::validate(&doc);

        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("only 'i18n' is used"));
    }

    #[test]
    fn test_empty_variants_warning() {
        let doc = object(json!({ "i18n": [] }));
        let report = DocumentValidator::validate(&doc);

        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("'i18n' is empty"));
    }

    #[test]
    fn test_primary_language_not_string() {
        let doc = object(json!({ "PrimaryLanguage": 1 }));
        let report = DocumentValidator::validate(&doc);
        assert!(report.warnings[0].contains("not a string"));
    }

    #[test]
    fn test_primary_language_without_variant() {
        let doc = object(json!({
            "i18n": [ { "Language": { "IETF": "en-GB", "Code": "en", "Region": "GB" } } ],
            "PrimaryLanguage": "en-US"
        }));
        let report = DocumentValidator::validate(&doc);

        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("en-US"));
    }

    #[test]
    fn test_primary_language_case_insensitive() {
        let doc = object(json!({
            "i18n": [ { "Language": { "IETF": "en-GB", "Code": "en", "Region": "GB" } } ],
            "PrimaryLanguage": "EN-gb"
        }));
        assert!(DocumentValidator::validate(&doc).is_clean());
    }

    #[test]
    fn test_duplicate_languages() {
        let doc = object(json!({
            "i18n": [
                { "Language": { "IETF": "en-US", "Code": "en", "Region": "US" } },
                { "Language": { "IETF": "EN-US", "Code": "en", "Region": "US" } }
            ]
        }));
        let report = DocumentValidator::validate(&doc);

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Duplicate"));
    }

    #[test]
    fn test_inconsistent_tag() {
        let doc = object(json!({
            "i18n": [ { "Language": { "IETF": "en-US", "Code": "fr", "Region": "US" } } ]
        }));
        let report = DocumentValidator::validate(&doc);

        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("does not agree"));
    }

    #[test]
    fn test_missing_region_in_ietf() {
        let doc = object(json!({
            "i18n": [ { "Language": { "IETF": "en", "Code": "en", "Region": "US" } } ]
        }));
        let report = DocumentValidator::validate(&doc);
        assert!(report.has_warnings());
    }

    #[test]
    fn test_validation_report_default() {
        let report = ValidationReport::default();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }
}

//! Locale resolution entry points.
//!
//! Both entry points run the same pipeline (rank, select, merge) and differ
//! only in how they report the outcome:
//! - [`transform`] returns `None` when no variant matches
//! - [`transform_destination`] writes into a caller-owned object and reports
//!   failure through a callback

use crate::error::NegotiationError;
use crate::i18n::document::{
    locate_variants, present_variant_keys, primary_language, variants, PRIMARY_LANGUAGE_KEY,
};
use crate::i18n::matcher::{select, Selection};
use crate::i18n::{rank, AcceptEntry};
use serde_json::{Map, Value};
use tracing::debug;

/// How the selected variant is merged into the document root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Drop the root `PrimaryLanguage` field from the result.
    ///
    /// Off by default: the field is ordinary root content and is kept.
    pub strip_primary_language: bool,
}

/// Resolves localized documents with a fixed set of merge options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer {
    options: MergeOptions,
}

impl Transformer {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> MergeOptions {
        self.options
    }

    /// Resolve `document` for `accept`, returning the merged object.
    ///
    /// # Returns
    /// * `Ok(Map)` with the root fields, overlaid by the selected variant's
    ///   fields, and without the variants array
    /// * `Err(NegotiationError::NoMatchingLanguage)` if no accepted language
    ///   is satisfied by any variant
    pub fn try_transform(
        &self,
        document: &Map<String, Value>,
        accept: &[AcceptEntry],
    ) -> Result<Map<String, Value>, NegotiationError> {
        let mut merged = Map::new();
        self.merge_into(document, &mut merged, accept)?;
        Ok(merged)
    }

    /// Resolve `document` for `accept`.
    ///
    /// Returns `None` when no variant matches.
    pub fn transform(
        &self,
        document: &Map<String, Value>,
        accept: &[AcceptEntry],
    ) -> Option<Map<String, Value>> {
        self.try_transform(document, accept).ok()
    }

    /// Resolve `document` for `accept` into `destination`.
    ///
    /// Root fields and then the selected variant's fields are written over
    /// `destination`. On failure `destination` is left untouched and
    /// `on_error` is invoked with the error.
    pub fn transform_destination<F>(
        &self,
        document: &Map<String, Value>,
        destination: &mut Map<String, Value>,
        accept: &[AcceptEntry],
        on_error: F,
    ) where
        F: FnOnce(NegotiationError),
    {
        if let Err(err) = self.merge_into(document, destination, accept) {
            on_error(err);
        }
    }

    fn merge_into(
        &self,
        document: &Map<String, Value>,
        destination: &mut Map<String, Value>,
        accept: &[AcceptEntry],
    ) -> Result<(), NegotiationError> {
        let ranked = rank(accept);
        let selected = match locate_variants(document) {
            Some((_, array)) => {
                let variants = variants(array);
                match select(&variants, primary_language(document), &ranked) {
                    Selection::Found(variant) => Some(variant.fields),
                    Selection::NotFound => {
                        let requested = ranked
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ");
                        debug!("No variant satisfies [{}]", requested);
                        return Err(NegotiationError::NoMatchingLanguage { requested });
                    }
                }
            }
            None => {
                debug!("Document has no variants array, keeping root fields");
                None
            }
        };

        let erased = present_variant_keys(document);
        for (key, value) in document {
            if erased.contains(&key.as_str()) {
                continue;
            }
            if self.options.strip_primary_language && key == PRIMARY_LANGUAGE_KEY {
                continue;
            }
            destination.insert(key.clone(), value.clone());
        }

        if let Some(fields) = selected {
            for (key, value) in fields {
                destination.insert(key.clone(), value.clone());
            }
        }

        Ok(())
    }
}

/// Resolve `document` for `accept` with default options.
///
/// Returns `None` when no variant matches.
pub fn transform(
    document: &Map<String, Value>,
    accept: &[AcceptEntry],
) -> Option<Map<String, Value>> {
    Transformer::default().transform(document, accept)
}

/// Resolve `document` for `accept` with default options, as a `Result`.
pub fn try_transform(
    document: &Map<String, Value>,
    accept: &[AcceptEntry],
) -> Result<Map<String, Value>, NegotiationError> {
    Transformer::default().try_transform(document, accept)
}

/// Resolve `document` for `accept` into `destination` with default options.
///
/// `on_error` is the only failure signal.
pub fn transform_destination<F>(
    document: &Map<String, Value>,
    destination: &mut Map<String, Value>,
    accept: &[AcceptEntry],
    on_error: F,
) where
    F: FnOnce(NegotiationError),
{
    Transformer::default().transform_destination(document, destination, accept, on_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Map<String, Value> {
        json!({
            "DomainId": 123,
            "Name": "root name",
            "i18n": [
                {
                    "Name": "A",
                    "Language": { "IETF": "en-US", "Code": "en", "Region": "US" }
                },
                {
                    "Name": "B",
                    "Language": { "IETF": "en-GB", "Code": "en", "Region": "GB" }
                }
            ],
            "PrimaryLanguage": "en-US"
        })
        .as_object()
        .cloned()
        .expect("document should be an object")
    }

    // ==================== Merge Tests ====================

    #[test]
    fn test_variant_fields_override_root_fields() {
        let accept = vec![AcceptEntry::with_region("en", "GB", 1.0)];
        let result = transform(&document(), &accept).expect("Should match");

        assert_eq!(result["Name"], "B");
        assert_eq!(result["Language"]["IETF"], "en-GB");
        assert_eq!(result["DomainId"], 123);
    }

    #[test]
    fn test_variants_key_erased() {
        let accept = vec![AcceptEntry::wildcard(1.0)];
        let result = transform(&document(), &accept).expect("Should match");
        assert!(!result.contains_key("i18n"));
    }

    #[test]
    fn test_both_variant_keys_erased() {
        let mut doc = document();
        doc.insert("I18n".to_string(), json!("ignored"));

        let result = transform(&doc, &[]).expect("Should match");
        assert!(!result.contains_key("i18n"));
        assert!(!result.contains_key("I18n"));
    }

    #[test]
    fn test_primary_language_kept_by_default() {
        assert_eq!(Transformer::default().options(), MergeOptions::default());
        let result = transform(&document(), &[]).expect("Should match");
        assert_eq!(result["PrimaryLanguage"], "en-US");
    }

    #[test]
    fn test_primary_language_stripped_when_configured() {
        let transformer = Transformer::new(MergeOptions {
            strip_primary_language: true,
        });
        assert!(transformer.options().strip_primary_language);
        let result = transformer.transform(&document(), &[]).expect("Should match");

        assert!(!result.contains_key("PrimaryLanguage"));
        assert_eq!(result["Language"]["IETF"], "en-US");
    }

    #[test]
    fn test_input_document_untouched() {
        let doc = document();
        let before = doc.clone();
        let _ = transform(&doc, &[AcceptEntry::new("en", 1.0)]);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_unlocalized_document_keeps_root() {
        let doc = json!({ "AField": 123, "PrimaryLanguage": "en" })
            .as_object()
            .cloned()
            .expect("object");
        let accept = vec![AcceptEntry::with_region("En", "US", 1.0)];

        let result = transform(&doc, &accept).expect("Should keep root");
        assert_eq!(result["AField"], 123);
        assert!(!result.contains_key("Language"));
    }

    #[test]
    fn test_empty_variants_array_does_not_match() {
        let doc = json!({ "AField": 1, "i18n": [] })
            .as_object()
            .cloned()
            .expect("object");

        assert!(transform(&doc, &[AcceptEntry::with_region("de", "DE", 1.0)]).is_none());
    }

    #[test]
    fn test_empty_variants_array_fails_for_wildcard() {
        let doc = json!({ "AField": 1, "I18n": [] })
            .as_object()
            .cloned()
            .expect("object");

        let err = try_transform(&doc, &[AcceptEntry::wildcard(1.0)]).expect_err("Should not match");
        assert!(err.to_string().contains("*;q=1"));
        assert!(transform(&doc, &[]).is_none());
    }

    // ==================== Failure Reporting Tests ====================

    #[test]
    fn test_try_transform_error_lists_requested() {
        let accept = vec![
            AcceptEntry::new("fr", 0.5),
            AcceptEntry::with_region("de", "DE", 1.0),
        ];
        let err = try_transform(&document(), &accept).expect_err("Should not match");

        assert_eq!(
            err,
            NegotiationError::NoMatchingLanguage {
                requested: "de-DE;q=1, fr;q=0.5".to_string()
            }
        );
    }

    #[test]
    fn test_transform_returns_none_on_failure() {
        let accept = vec![AcceptEntry::new("de", 1.0)];
        assert!(transform(&document(), &accept).is_none());
    }

    #[test]
    fn test_transform_destination_writes_in_place() {
        let mut destination = Map::new();
        destination.insert("Existing".to_string(), json!(true));
        let mut error = None;

        transform_destination(
            &document(),
            &mut destination,
            &[AcceptEntry::with_region("en", "US", 1.0)],
            |err| error = Some(err),
        );

        assert!(error.is_none());
        assert_eq!(destination["Existing"], true);
        assert_eq!(destination["Name"], "A");
        assert_eq!(destination["DomainId"], 123);
        assert!(!destination.contains_key("i18n"));
    }

    #[test]
    fn test_transform_destination_failure_leaves_destination() {
        let mut destination = Map::new();
        destination.insert("Existing".to_string(), json!(1));
        let mut error = None;

        transform_destination(
            &document(),
            &mut destination,
            &[AcceptEntry::with_region("de", "DE", 1.0)],
            |err| error = Some(err),
        );

        assert!(error.is_some());
        assert_eq!(destination.len(), 1);
        assert_eq!(destination["Existing"], 1);
    }
}

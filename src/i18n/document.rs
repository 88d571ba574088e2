//! Read-only views over a localized document.
//!
//! A document is a JSON object whose localized variants live in an array under
//! `i18n` or `I18n`. This module is the only place that knows about those key
//! spellings.

use crate::i18n::{LanguageTag, LANGUAGE_KEY};
use serde_json::{Map, Value};
use tracing::warn;

/// Accepted spellings of the variants-array key, in priority order.
pub const VARIANT_KEYS: [&str; 2] = ["i18n", "I18n"];

/// Root field naming the document's canonical language.
pub const PRIMARY_LANGUAGE_KEY: &str = "PrimaryLanguage";

/// One localized rendition of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant<'a> {
    /// Position in the document's variants array
    pub index: usize,

    /// All fields of the variant, `Language` included
    pub fields: &'a Map<String, Value>,

    /// The variant's language, if its `Language` field is readable
    pub language: Option<LanguageTag>,
}

/// Collect the variants of a variants array, in document order.
///
/// Entries that are not objects cannot be merged and are skipped. Skipped
/// entries and variants without a readable `Language.Code` are logged at
/// warn level.
pub fn variants(array: &[Value]) -> Vec<Variant<'_>> {
    array
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let Some(fields) = value.as_object() else {
                warn!("Skipping variant #{}: not an object", index);
                return None;
            };

            let language = LanguageTag::from_variant(fields);
            if language.is_none() {
                warn!("Variant #{} has no readable {}.Code", index, LANGUAGE_KEY);
            }

            Some(Variant {
                index,
                fields,
                language,
            })
        })
        .collect()
}

/// Locate the variants array of `document`.
///
/// Keys are tried in [`VARIANT_KEYS`] order; a key whose value is not an array
/// does not count.
///
/// # Returns
/// The key that was found and its array, or `None` when the document carries
/// no localization.
pub fn locate_variants(document: &Map<String, Value>) -> Option<(&'static str, &Vec<Value>)> {
    VARIANT_KEYS.iter().find_map(|&key| {
        document
            .get(key)
            .and_then(Value::as_array)
            .map(|array| (key, array))
    })
}

/// Every variants-array key present in `document`, whatever its value.
pub fn present_variant_keys(document: &Map<String, Value>) -> Vec<&'static str> {
    VARIANT_KEYS
        .iter()
        .copied()
        .filter(|key| document.contains_key(*key))
        .collect()
}

/// The document's `PrimaryLanguage`, when it is a string.
pub fn primary_language(document: &Map<String, Value>) -> Option<&str> {
    document.get(PRIMARY_LANGUAGE_KEY).and_then(Value::as_str)
}

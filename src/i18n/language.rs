//! Language tag: the `Language` object carried by every document variant.
//!
//! A tag keeps the combined IETF form (e.g. "en-US") next to its decomposed
//! code and optional region. Nothing beyond code/region splitting is done.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key under which a variant stores its language tag.
pub const LANGUAGE_KEY: &str = "Language";

/// A language tag as it appears in a variant's `Language` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTag {
    /// Canonical combined tag (e.g., "en-US")
    #[serde(rename = "IETF")]
    pub ietf: String,

    /// Language code (e.g., "en")
    #[serde(rename = "Code")]
    pub code: String,

    /// Optional region (e.g., "US")
    #[serde(rename = "Region", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl LanguageTag {
    /// Create a tag from a code and an optional region.
    ///
    /// The IETF form is built as `code-region`, or just `code` when there is
    /// no region.
    pub fn new(code: impl Into<String>, region: Option<String>) -> Self {
        let code = code.into();
        let ietf = match &region {
            Some(region) => format!("{}-{}", code, region),
            None => code.clone(),
        };
        Self { ietf, code, region }
    }

    /// Split an IETF tag such as "en-US" or "pt_BR" into code and region.
    ///
    /// Only the first two subtags are looked at; anything after the region is
    /// kept in `ietf` but otherwise ignored.
    ///
    /// # Returns
    /// * `Some(LanguageTag)` for a non-empty tag
    /// * `None` if the tag is empty or starts with a separator
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let mut subtags = tag.split(['-', '_']);

        let code = subtags.next().filter(|code| !code.is_empty())?;
        let region = subtags
            .next()
            .filter(|region| !region.is_empty())
            .map(str::to_string);

        Some(Self {
            ietf: tag.to_string(),
            code: code.to_string(),
            region,
        })
    }

    /// Read the `Language` object of a variant.
    ///
    /// `Code` is required. A missing `IETF` is rebuilt from code and region,
    /// and an empty `Region` counts as no region.
    pub fn from_variant(variant: &Map<String, Value>) -> Option<Self> {
        let language = variant.get(LANGUAGE_KEY)?.as_object()?;

        let code = language.get("Code")?.as_str()?.trim();
        if code.is_empty() {
            return None;
        }

        let region = language
            .get("Region")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|region| !region.is_empty())
            .map(str::to_string);

        match language.get("IETF").and_then(Value::as_str) {
            Some(ietf) => Some(Self {
                ietf: ietf.to_string(),
                code: code.to_string(),
                region,
            }),
            None => Some(Self::new(code, region)),
        }
    }

    /// Case-insensitive comparison of the code with `code`.
    pub fn has_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }

    /// Case-insensitive comparison of the region with `region`.
    ///
    /// A tag without a region never equals a region.
    pub fn has_region(&self, region: &str) -> bool {
        self.region
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(region))
    }

    /// Case-insensitive comparison of the IETF form with `ietf`.
    pub fn matches_ietf(&self, ietf: &str) -> bool {
        self.ietf.eq_ignore_ascii_case(ietf)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ietf)
    }
}

//! Accepted languages: client preferences and their ranking.
//!
//! An accept list is an ordered, quality-weighted set of language preferences,
//! the document-level counterpart of an HTTP `Accept-Language` header.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tracing::warn;

/// Code that accepts any language.
pub const WILDCARD: &str = "*";

/// One ranked client preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptEntry {
    /// Language code (e.g., "en") or the wildcard `*`
    pub code: String,

    /// Optional region (e.g., "US")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Relative preference weight; higher is preferred
    #[serde(default = "default_quality")]
    pub quality: f64,
}

fn default_quality() -> f64 {
    1.0
}

impl AcceptEntry {
    /// Accept any region of `code`.
    pub fn new(code: impl Into<String>, quality: f64) -> Self {
        Self {
            code: code.into(),
            region: None,
            quality,
        }
    }

    /// Accept `code` in `region`, or a variant of `code` that declares no region.
    pub fn with_region(code: impl Into<String>, region: impl Into<String>, quality: f64) -> Self {
        Self {
            code: code.into(),
            region: Some(region.into()),
            quality,
        }
    }

    /// Accept anything.
    pub fn wildcard(quality: f64) -> Self {
        Self::new(WILDCARD, quality)
    }

    pub fn is_wildcard(&self) -> bool {
        self.code == WILDCARD
    }

    fn normalized(&self) -> Self {
        let region = self
            .region
            .as_deref()
            .map(str::trim)
            .filter(|region| !region.is_empty())
            .map(str::to_string);
        // -0.0 folds into 0.0 so the two tie under total_cmp
        let quality = if self.quality.is_finite() && self.quality != 0.0 {
            self.quality
        } else {
            0.0
        };

        Self {
            code: self.code.trim().to_string(),
            region,
            quality,
        }
    }
}

impl fmt::Display for AcceptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{};q={}", self.code, region, self.quality),
            None => write!(f, "{};q={}", self.code, self.quality),
        }
    }
}

/// Normalize an accept list and order it by descending quality.
///
/// Entries of equal quality keep their original relative order (`sort_by` is
/// stable). Normalization trims code and region, drops empty regions and
/// turns a non-finite quality or `-0.0` into 0.
pub fn rank(entries: &[AcceptEntry]) -> Vec<AcceptEntry> {
    let mut ranked: Vec<AcceptEntry> = entries.iter().map(AcceptEntry::normalized).collect();
    ranked.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    ranked
}

static LANGUAGE_RANGE_REGEX: OnceLock<Regex> = OnceLock::new();

fn language_range_regex() -> &'static Regex {
    LANGUAGE_RANGE_REGEX.get_or_init(|| {
        Regex::new(r"^(?:\*|[A-Za-z]{1,8}(?:[-_][A-Za-z0-9]{1,8})*)$")
            .expect("language range regex should compile")
    })
}

/// Parse an HTTP `Accept-Language` value into accept entries.
///
/// `en-US,en;q=0.8,*;q=0.1` yields three entries in header order. Ranges that
/// are not well formed, or carry an unparsable `q`, are skipped with a warning
/// so one bad range does not discard the whole header. Quality is clamped to
/// `[0, 1]` and defaults to 1.
pub fn parse_accept_language(header: &str) -> Vec<AcceptEntry> {
    header
        .split(',')
        .map(str::trim)
        .filter(|range| !range.is_empty())
        .filter_map(parse_language_range)
        .collect()
}

fn parse_language_range(range: &str) -> Option<AcceptEntry> {
    let mut parts = range.split(';').map(str::trim);
    let tag = parts.next().unwrap_or_default();

    if !language_range_regex().is_match(tag) {
        warn!("Skipping malformed language range '{}'", range);
        return None;
    }

    let mut quality = default_quality();
    for param in parts {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        if !key.trim().eq_ignore_ascii_case("q") {
            continue;
        }
        match value.trim().parse::<f64>() {
            Ok(q) if q.is_finite() => quality = q.clamp(0.0, 1.0),
            _ => {
                warn!("Skipping language range '{}' with invalid quality", range);
                return None;
            }
        }
    }

    if tag == WILDCARD {
        return Some(AcceptEntry::wildcard(quality));
    }

    let mut subtags = tag.split(['-', '_']);
    let code = subtags.next().unwrap_or_default();
    Some(match subtags.next() {
        Some(region) => AcceptEntry::with_region(code, region, quality),
        None => AcceptEntry::new(code, quality),
    })
}

//! Variant matching: walk the ranked accept list and pick one variant.

use crate::i18n::{AcceptEntry, Variant};
use tracing::debug;

/// Outcome of a matching run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'v, 'a> {
    /// A variant satisfied one of the accepted languages
    Found(&'v Variant<'a>),

    /// No variant satisfies any accepted language
    NotFound,
}

/// Select the variant that best satisfies `ranked`.
///
/// `ranked` must already be ordered (see [`crate::i18n::rank`]); the first
/// entry that yields a variant wins. An empty accept list accepts anything,
/// like a wildcard. With no variants at all, nothing is ever selected, not
/// even by a wildcard.
pub fn select<'v, 'a>(
    variants: &'v [Variant<'a>],
    primary_language: Option<&str>,
    ranked: &[AcceptEntry],
) -> Selection<'v, 'a> {
    if ranked.is_empty() {
        debug!("Empty accept list, falling back to primary language");
        return match primary_or_first(variants, primary_language) {
            Some(variant) => Selection::Found(variant),
            None => Selection::NotFound,
        };
    }

    for entry in ranked {
        let selected = if entry.is_wildcard() {
            primary_or_first(variants, primary_language)
        } else {
            match entry.region.as_deref() {
                Some(region) => match_region(variants, &entry.code, region),
                None => match_code(variants, &entry.code, primary_language),
            }
        };

        if let Some(variant) = selected {
            debug!(
                "Accept entry {} selected variant #{} ({})",
                entry,
                variant.index,
                variant
                    .language
                    .as_ref()
                    .map(|tag| tag.ietf.as_str())
                    .unwrap_or("unknown")
            );
            return Selection::Found(variant);
        }
    }

    Selection::NotFound
}

fn is_primary(variant: &Variant<'_>, primary_language: Option<&str>) -> bool {
    match (&variant.language, primary_language) {
        (Some(tag), Some(primary)) => tag.matches_ietf(primary),
        _ => false,
    }
}

/// The primary-language variant, or the first variant in document order.
fn primary_or_first<'v, 'a>(
    variants: &'v [Variant<'a>],
    primary_language: Option<&str>,
) -> Option<&'v Variant<'a>> {
    variants
        .iter()
        .find(|variant| is_primary(variant, primary_language))
        .or_else(|| variants.first())
}

/// A variant with the same code and either the same region or no region.
///
/// An exact region match beats a region-less variant; document order breaks
/// the remaining ties. A variant with a different region never matches.
fn match_region<'v, 'a>(
    variants: &'v [Variant<'a>],
    code: &str,
    region: &str,
) -> Option<&'v Variant<'a>> {
    let same_code = || {
        variants.iter().filter(move |variant| {
            variant
                .language
                .as_ref()
                .is_some_and(|tag| tag.has_code(code))
        })
    };

    same_code()
        .find(|variant| {
            variant
                .language
                .as_ref()
                .is_some_and(|tag| tag.has_region(region))
        })
        .or_else(|| {
            same_code().find(|variant| {
                variant
                    .language
                    .as_ref()
                    .is_some_and(|tag| tag.region.is_none())
            })
        })
}

/// A variant with the same code in any region, preferring the primary language.
fn match_code<'v, 'a>(
    variants: &'v [Variant<'a>],
    code: &str,
    primary_language: Option<&str>,
) -> Option<&'v Variant<'a>> {
    let candidates: Vec<&Variant<'a>> = variants
        .iter()
        .filter(|variant| {
            variant
                .language
                .as_ref()
                .is_some_and(|tag| tag.has_code(code))
        })
        .collect();

    candidates
        .iter()
        .copied()
        .find(|variant| is_primary(variant, primary_language))
        .or_else(|| candidates.first().copied())
}

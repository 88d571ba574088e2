//! Document-level language negotiation.
//!
//! Picks, from a document carrying several localized variants, the one that
//! best satisfies a client's ranked language preferences, and merges it into
//! the document root.
//!
//! # Architecture
//!
//! - `language`: `LanguageTag`, the `Language` object of a variant
//! - `accept`: accept entries, ranking and `Accept-Language` parsing
//! - `document`: variants-array lookup and `PrimaryLanguage`
//! - `matcher`: variant selection for a ranked accept list
//! - `transform`: merging and the public entry points
//! - `validator`: advisory document structure checks
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{transform, AcceptEntry};
//!
//! let accept = vec![
//!     AcceptEntry::with_region("es", "MX", 1.0),
//!     AcceptEntry::wildcard(0.4),
//! ];
//! let localized = transform(&document, &accept);
//! ```

mod accept;
pub mod document;
mod language;
pub mod matcher;
mod transform;
mod validator;

pub use accept::{parse_accept_language, rank, AcceptEntry, WILDCARD};
pub use document::{locate_variants, variants, Variant, PRIMARY_LANGUAGE_KEY, VARIANT_KEYS};
pub use language::{LanguageTag, LANGUAGE_KEY};
pub use matcher::{select, Selection};
pub use transform::{transform, transform_destination, try_transform, MergeOptions, Transformer};
pub use validator::{DocumentValidator, ValidationReport};

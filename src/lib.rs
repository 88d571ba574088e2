//! Locale resolution for documents carrying multiple localized variants.
//!
//! Given a document with an `i18n` (or `I18n`) array of language-tagged
//! variants and a ranked list of accepted languages, pick the single best
//! variant and merge its fields into the document root.
//!
//! ```rust,ignore
//! use i18n_transform::{parse_accept_language, transform};
//!
//! let accept = parse_accept_language("fr-CA,en;q=0.8,*;q=0.1");
//! if let Some(localized) = transform(&document, &accept) {
//!     println!("{}", localized["Name"]);
//! }
//! ```

pub mod config;
pub mod error;
pub mod i18n;

pub use error::NegotiationError;
pub use i18n::{
    parse_accept_language, rank, transform, transform_destination, try_transform, AcceptEntry,
    DocumentValidator, LanguageTag, MergeOptions, Transformer, ValidationReport,
};

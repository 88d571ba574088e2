//! Resolve a localized JSON document from the command line.
//!
//! Usage:
//!   i18n-transform <document.json> [accept-language]
//!
//! The merged document is printed to stdout as JSON. Logs go to stderr.
//!
//! Optional environment variables:
//! - I18N_ACCEPT_LANGUAGE (used when no accept-language argument is given, defaults to "*")
//! - I18N_STRIP_PRIMARY_LANGUAGE (defaults to false)
//! - RUST_LOG

use anyhow::{bail, Context, Result};
use i18n_transform::{config::Config, parse_accept_language, DocumentValidator, Transformer};
use serde_json::Value;
use std::fs;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_transform=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.first() else {
        bail!("Usage: i18n-transform <document.json> [accept-language]");
    };

    let config = Config::from_env()?;

    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read document {}", path))?;
    let document: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse document {}", path))?;
    let Some(document) = document.as_object() else {
        bail!("Document {} must be a JSON object", path);
    };

    let report = DocumentValidator::validate(document);
    for error in &report.errors {
        warn!("Document error: {}", error);
    }
    for warning in &report.warnings {
        warn!("Document warning: {}", warning);
    }

    let accept_language = args.get(1).unwrap_or(&config.accept_language);
    let accept = parse_accept_language(accept_language);
    info!("Resolving {} for '{}'", path, accept_language);

    let transformer = Transformer::new(config.merge_options());
    let localized = transformer
        .try_transform(document, &accept)
        .with_context(|| format!("Failed to localize {}", path))?;

    if let Some(language) = localized
        .get("Language")
        .and_then(|language| language.get("IETF"))
        .and_then(Value::as_str)
    {
        info!("Selected variant {}", language);
    }

    println!("{}", serde_json::to_string_pretty(&localized)?);
    Ok(())
}

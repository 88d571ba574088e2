use crate::i18n::MergeOptions;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Accept-Language value used when the caller gives none
    pub accept_language: String,

    // Merge
    pub strip_primary_language: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            accept_language: std::env::var("I18N_ACCEPT_LANGUAGE")
                .unwrap_or_else(|_| "*".to_string()),

            strip_primary_language: match std::env::var("I18N_STRIP_PRIMARY_LANGUAGE") {
                Ok(value) => parse_bool(&value)
                    .context("I18N_STRIP_PRIMARY_LANGUAGE must be a boolean")?,
                Err(_) => false,
            },
        })
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            strip_primary_language: self.strip_primary_language,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => bail!("Invalid boolean value: '{}'", other),
    }
}

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Literal terms that must never be split across two cues
    #[serde(default = "default_preserved_terms")]
    pub preserved_terms: Vec<String>,

    /// Copy the original file aside before any destructive rewrite
    #[serde(default = "default_backup_original")]
    pub backup_original: bool,

    /// Language code used when filename inference finds no token
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    // @level: Error
    Error,
    // @level: Warn
    Warn,
    // @level: Info (default)
    #[default]
    Info,
    // @level: Debug
    Debug,
    // @level: Trace
    Trace,
}

fn default_preserved_terms() -> Vec<String> {
    vec!["Photoroom".to_string(), "AI".to_string(), "App".to_string()]
}

fn default_backup_original() -> bool {
    true
}

fn default_language() -> String {
    "EN".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            preserved_terms: default_preserved_terms(),
            backup_original: default_backup_original(),
            default_language: default_language(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(anyhow!("default_language must not be empty"));
        }

        if self.preserved_terms.iter().any(|term| term.trim().is_empty()) {
            return Err(anyhow!("preserved_terms must not contain empty entries"));
        }

        Ok(())
    }
}

//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TILEQUOTE_CATALOG_URL`: Base URL of the product/config API
//! - `TILEQUOTE_STORAGE_URL`: Base URL of the document object store
//! - `TILEQUOTE_MESSAGING_URL`: Base URL of the WhatsApp gateway
//! - `TILEQUOTE_HTTP_TIMEOUT_SECS`: External-call timeout (default 30)
//! - `TILEQUOTE_COMPANY_NAME`: Optional heading printed on documents
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./tilequote.json` or `./tilequote.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tilequote_domain::{QuoteError, Result};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application configuration for the infrastructure adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog_url: String,
    pub storage_url: String,
    pub messaging_url: String,
    #[serde(default = "default_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default)]
    pub company_name: Option<String>,
}

fn default_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `QuoteError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<AppConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `QuoteError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<AppConfig> {
    let catalog_url = env_var("TILEQUOTE_CATALOG_URL")?;
    let storage_url = env_var("TILEQUOTE_STORAGE_URL")?;
    let messaging_url = env_var("TILEQUOTE_MESSAGING_URL")?;

    let http_timeout_secs = match std::env::var("TILEQUOTE_HTTP_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| QuoteError::Config(format!("Invalid timeout: {e}")))?,
        Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
    };
    let company_name = std::env::var("TILEQUOTE_COMPANY_NAME").ok().filter(|v| !v.is_empty());

    Ok(AppConfig { catalog_url, storage_url, messaging_url, http_timeout_secs, company_name })
}

/// Load configuration from a file, probing default locations when no path
/// is given.
///
/// # Errors
/// Returns `QuoteError::Config` if no file is found or the file cannot be
/// parsed.
pub fn load_from_file(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(explicit) => explicit.to_path_buf(),
        None => probe_config_paths()
            .into_iter()
            .find(|candidate| candidate.exists())
            .ok_or_else(|| QuoteError::Config("no configuration file found".into()))?,
    };

    let raw = std::fs::read_to_string(&path).map_err(|e| {
        QuoteError::Config(format!("failed to read {}: {e}", path.display()))
    })?;

    let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str(&raw)
            .map_err(|e| QuoteError::Config(format!("invalid TOML in {}: {e}", path.display())))
    } else {
        serde_json::from_str(&raw)
            .map_err(|e| QuoteError::Config(format!("invalid JSON in {}: {e}", path.display())))
    }
}

/// Candidate config file paths, most specific first.
pub fn probe_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for dir in [".", "..", "../.."] {
        for name in ["config", "tilequote"] {
            for ext in ["json", "toml"] {
                paths.push(PathBuf::from(dir).join(format!("{name}.{ext}")));
            }
        }
    }
    paths
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| QuoteError::Config(format!("missing environment variable {name}")))
        .and_then(|value| {
            if value.trim().is_empty() {
                Err(QuoteError::Config(format!("environment variable {name} is empty")))
            } else {
                Ok(value)
            }
        })
}

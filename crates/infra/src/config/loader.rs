//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Pre-populates the environment from a `.env` file, if one exists
//! 2. Attempts to load from environment variables
//! 3. If incomplete, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `COURIER_API_HOST`: API server host (required)
//! - `COURIER_API_SCHEME`: API server scheme (default `https`)
//! - `COURIER_API_PORT`: API server port (optional)
//! - `COURIER_KEYCHAIN_HOST`: Host the credentials are stored under (required)
//! - `COURIER_KEYCHAIN_SCHEME`: Scheme the credentials are stored under
//!   (default `https`)
//! - `COURIER_KEY_LOGIN`, `COURIER_KEY_ACCESS`, `COURIER_KEY_USER_ID`:
//!   Secure store key names (default `login`, `access`, `user_id`)
//! - `COURIER_HTTP_TIMEOUT_SECS`: Request timeout in seconds (default 30)
//! - `COURIER_HTTP_USER_AGENT`: User agent header (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./courier.json` or `./courier.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use courier_domain::{CourierConfig, CourierError, CredentialStoreConfig, HttpConfig, Result, Target};

const DEFAULT_SCHEME: &str = "https";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CourierError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<CourierConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

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
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `CourierError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<CourierConfig> {
    let api_host = env_var("COURIER_API_HOST")?;
    let api_scheme = env_or("COURIER_API_SCHEME", DEFAULT_SCHEME);
    let api_port = env_opt("COURIER_API_PORT")
        .map(|s| {
            s.parse::<u16>().map_err(|e| CourierError::Config(format!("Invalid API port: {}", e)))
        })
        .transpose()?;

    let keychain_host = env_var("COURIER_KEYCHAIN_HOST")?;
    let keychain_scheme = env_or("COURIER_KEYCHAIN_SCHEME", DEFAULT_SCHEME);
    let defaults = CredentialStoreConfig::new(keychain_scheme, keychain_host);
    let credentials = CredentialStoreConfig {
        login_key: env_or("COURIER_KEY_LOGIN", &defaults.login_key),
        access_key: env_or("COURIER_KEY_ACCESS", &defaults.access_key),
        user_id_key: env_or("COURIER_KEY_USER_ID", &defaults.user_id_key),
        ..defaults
    };

    let mut http = HttpConfig::default();
    if let Some(timeout) = env_opt("COURIER_HTTP_TIMEOUT_SECS") {
        http.timeout_seconds = timeout
            .parse::<u64>()
            .map_err(|e| CourierError::Config(format!("Invalid HTTP timeout: {}", e)))?;
    }
    http.user_agent = env_opt("COURIER_HTTP_USER_AGENT");

    Ok(CourierConfig { api: Target::new(api_scheme, api_host, api_port), credentials, http })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CourierError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<CourierConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CourierError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CourierError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CourierError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, detecting the format from the file extension.
fn parse_config(contents: &str, path: &Path) -> Result<CourierConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CourierError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CourierError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CourierError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_paths(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_paths(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_paths(base: &Path) -> Vec<PathBuf> {
    vec![
        base.join("config.json"),
        base.join("config.toml"),
        base.join("courier.json"),
        base.join("courier.toml"),
        base.join("../config.json"),
        base.join("../config.toml"),
        base.join("../../config.json"),
        base.join("../../config.toml"),
    ]
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CourierError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Non-empty value of `key`, if set.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

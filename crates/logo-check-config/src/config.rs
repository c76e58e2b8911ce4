// crates/logo-check-config/src/config.rs
// ============================================================================
// Module: Logo Check Configuration
// Description: Canonical config model, file loading, and validation.
// Purpose: Load TOML configuration with strict guards and fail closed.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! [`LogoCheckConfig`] is the single source of truth for how the verification
//! service is reached, how long an activation may wait, and where contained
//! failures are written. Loading enforces path, size, and encoding limits and
//! always validates before returning.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "LOGO_CHECK_CONFIG";
/// Default config file name used when no path is provided.
pub const DEFAULT_CONFIG_NAME: &str = "logo-check.toml";
/// Maximum config file size in bytes.
pub const MAX_CONFIG_FILE_BYTES: u64 = 1024 * 1024;
/// Maximum total config path length in bytes.
pub const MAX_CONFIG_PATH_BYTES: usize = 4096;
/// Maximum length of a single config path component in bytes.
pub const MAX_CONFIG_PATH_COMPONENT_BYTES: usize = 255;
/// Upper bound for any configured timeout in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 120_000;

/// Default connect timeout in milliseconds.
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2_000;
/// Default request timeout in milliseconds.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
/// Default user agent for outbound requests.
const DEFAULT_USER_AGENT: &str = "logo-check/0.1";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Config file could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Config values failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Top-level logo check configuration.
///
/// # Invariants
/// - Values returned by [`LogoCheckConfig::load`] are validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogoCheckConfig {
    /// Remote verification service settings.
    pub service: ServiceConfig,
    /// Activation settings.
    #[serde(default)]
    pub trigger: TriggerConfig,
    /// Diagnostic channel settings.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Remote verification service settings.
///
/// # Invariants
/// - `base_url` uses https unless `allow_http` is set.
/// - `request_timeout_ms >= connect_timeout_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Service base URL.
    pub base_url: String,
    /// Optional bearer token.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Full request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Allow cleartext HTTP (disabled by default).
    #[serde(default)]
    pub allow_http: bool,
    /// User agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Activation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerConfig {
    /// Optional per-activation deadline in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Diagnostic sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticsSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Discard diagnostics.
    None,
}

/// Diagnostic channel settings.
///
/// # Invariants
/// - `path` is set if and only if `sink` is [`DiagnosticsSinkKind::File`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Selected sink.
    #[serde(default)]
    pub sink: DiagnosticsSinkKind,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

/// Returns the default connect timeout.
const fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

/// Returns the default request timeout.
const fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

/// Returns the default user agent.
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl LogoCheckConfig {
    /// Loads and validates configuration.
    ///
    /// Resolution order: explicit `path`, then [`CONFIG_ENV_VAR`], then
    /// [`DEFAULT_CONFIG_NAME`] in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the path is unsafe, the file is unreadable,
    /// oversized, not UTF-8, unparsable, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = resolve_path(path);
        validate_path(&path)?;
        let metadata = fs::metadata(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let bytes = fs::read(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
        let content = String::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all sections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service.validate()?;
        self.trigger.validate()?;
        self.diagnostics.validate()
    }
}

/// Resolves the config path from the argument, environment, or default.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    std::env::var_os(CONFIG_ENV_VAR)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from)
}

/// Enforces path length limits before touching the filesystem.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_CONFIG_PATH_BYTES {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    if path.components().any(|component| {
        component.as_os_str().len() > MAX_CONFIG_PATH_COMPONENT_BYTES
    }) {
        return Err(ConfigError::Invalid("config path component too long".to_string()));
    }
    Ok(())
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl ServiceConfig {
    /// Creates service settings with defaults for everything but the URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            allow_http: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Validates service settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a constraint is violated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|_| ConfigError::Invalid("service.base_url is not a valid url".to_string()))?;
        match url.scheme() {
            "https" => {}
            "http" if self.allow_http => {}
            "http" => {
                return Err(ConfigError::Invalid(
                    "service.base_url uses http without allow_http".to_string(),
                ));
            }
            _ => {
                return Err(ConfigError::Invalid(
                    "service.base_url scheme must be http or https".to_string(),
                ));
            }
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(ConfigError::Invalid(
                "service.base_url must not embed credentials".to_string(),
            ));
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid("service.base_url requires a host".to_string()));
        }
        if let Some(token) = &self.auth_token
            && token.trim().is_empty()
        {
            return Err(ConfigError::Invalid("service.auth_token must be non-empty".to_string()));
        }
        validate_timeout("service.connect_timeout_ms", self.connect_timeout_ms)?;
        validate_timeout("service.request_timeout_ms", self.request_timeout_ms)?;
        if self.request_timeout_ms < self.connect_timeout_ms {
            return Err(ConfigError::Invalid(
                "service.request_timeout_ms must be >= connect_timeout_ms".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("service.user_agent must be non-empty".to_string()));
        }
        Ok(())
    }
}

impl TriggerConfig {
    /// Validates activation settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the deadline is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(timeout_ms) = self.timeout_ms {
            validate_timeout("trigger.timeout_ms", timeout_ms)?;
        }
        Ok(())
    }
}

impl DiagnosticsConfig {
    /// Validates diagnostic settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the path does not fit the sink.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (DiagnosticsSinkKind::File, Some(path)) if !path.trim().is_empty() => Ok(()),
            (DiagnosticsSinkKind::File, _) => {
                Err(ConfigError::Invalid("diagnostics.path required for file sink".to_string()))
            }
            (DiagnosticsSinkKind::Stderr | DiagnosticsSinkKind::None, Some(_)) => Err(
                ConfigError::Invalid("diagnostics.path only allowed for file sink".to_string()),
            ),
            (DiagnosticsSinkKind::Stderr | DiagnosticsSinkKind::None, None) => Ok(()),
        }
    }
}

/// Validates a timeout is non-zero and bounded.
fn validate_timeout(field: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{field} must be greater than zero")));
    }
    if value > MAX_TIMEOUT_MS {
        return Err(ConfigError::Invalid(format!("{field} exceeds {MAX_TIMEOUT_MS} ms")));
    }
    Ok(())
}

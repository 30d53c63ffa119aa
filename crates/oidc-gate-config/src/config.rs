// crates/oidc-gate-config/src/config.rs
// ============================================================================
// Module: OIDC Gate Configuration
// Description: Configuration model and loading for the realm registry.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, serde_json, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML or JSON file with strict size and path
//! limits. Missing or invalid configuration fails closed so a misconfigured
//! deployment is rejected before it serves traffic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fmt;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::validation::FieldError;
use crate::validation::RealmField;
use crate::validation::validate_abs_url;
use crate::validation::validate_realm;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "oidc-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "OIDC_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Placeholder rendered instead of client secrets.
const REDACTED: &str = "<redacted>";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// A single OIDC realm the policy may redirect clients to.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RealmConfig {
    /// Realm identifier referenced by policy decisions.
    pub name: String,
    /// Absolute `http`/`https` URL of the realm login endpoint.
    pub login_url: String,
    /// OIDC client identifier.
    pub client_id: String,
    /// OIDC client secret.
    pub client_secret: String,
}

impl fmt::Debug for RealmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealmConfig")
            .field("name", &self.name)
            .field("login_url", &self.login_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &REDACTED)
            .finish()
    }
}

/// Realm registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OidcConfig {
    /// Absolute `http`/`https` URL the login flow returns to.
    pub callback_url: String,
    /// Ordered realm definitions. Lookups resolve to the first match.
    #[serde(default)]
    pub realms: Vec<RealmConfig>,
}

/// Serialized configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Selects the format from a file extension, defaulting to TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl OidcConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        check_path_limits(&resolved)?;
        let bytes = read_with_limit(&resolved, MAX_CONFIG_FILE_SIZE).map_err(|err| match err {
            ReadLimitError::Io(err) => ConfigError::Io(err.to_string()),
            ReadLimitError::TooLarge {
                ..
            } => ConfigError::Invalid("config file exceeds size limit".to_string()),
        })?;
        let content = String::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(&content, ConfigFormat::from_path(&resolved))
    }

    /// Parses and validates configuration text in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Self = match format {
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?
            }
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration, stopping at the first failure.
    ///
    /// The callback URL is checked first, then each realm in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the offending field (and realm index).
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_abs_url(&self.callback_url).map_err(ConfigError::CallbackUrl)?;
        for (index, realm) in self.realms.iter().enumerate() {
            validate_realm(index, realm)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML or JSON parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration input outside a specific field.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// The callback URL failed validation.
    #[error("invalid callback URL: {0}")]
    CallbackUrl(FieldError),
    /// A realm field failed validation.
    #[error("invalid realm[{index}] {field}: {cause}")]
    Realm {
        /// Zero-based index of the realm in the configuration.
        index: usize,
        /// Field that failed.
        field: RealmField,
        /// Underlying cause.
        cause: FieldError,
    },
}

impl ConfigError {
    /// Returns the realm index when the error is realm-scoped.
    #[must_use]
    pub const fn realm_index(&self) -> Option<usize> {
        match self {
            Self::Realm {
                index, ..
            } => Some(*index),
            _ => None,
        }
    }

    /// Returns the serialized field path of the offending field, if any.
    #[must_use]
    pub fn field_path(&self) -> Option<String> {
        match self {
            Self::CallbackUrl(_) => Some("callback-url".to_string()),
            Self::Realm {
                index,
                field,
                ..
            } => Some(format!("realms[{index}].{}", field.key())),
            Self::Io(_) | Self::Parse(_) | Self::Invalid(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Picks the config path: explicit argument, then `OIDC_GATE_CONFIG`, then
/// `oidc-gate.toml` in the working directory.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Rejects paths over the total or per-component length limits.
fn check_path_limits(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    if path.components().any(|part| part.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH) {
        return Err(ConfigError::Invalid("config path component too long".to_string()));
    }
    Ok(())
}

/// Bounded file read failures.
#[derive(Debug, Error)]
pub enum ReadLimitError {
    /// File could not be opened or read.
    #[error("{0}")]
    Io(#[from] io::Error),
    /// File holds more than the allowed number of bytes.
    #[error("file is {size} bytes (limit {limit})")]
    TooLarge {
        /// Reported size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads at most `limit` bytes from `path`, failing if the file holds more.
///
/// At most `limit + 1` bytes are pulled from the file, so growth between the
/// size query and the read cannot force an unbounded allocation.
///
/// # Errors
///
/// Returns [`ReadLimitError`] when the file cannot be read or exceeds `limit`.
pub fn read_with_limit(path: &Path, limit: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path)?;
    let reported = file.metadata()?.len();
    let cap = u64::try_from(limit).unwrap_or(u64::MAX);
    let mut bytes = Vec::new();
    file.take(cap.saturating_add(1)).read_to_end(&mut bytes)?;
    if bytes.len() > limit {
        let read = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: reported.max(read),
            limit,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/oidc-gate-config/src/validation.rs
// ============================================================================
// Module: Config Validation Checks
// Description: Field-level checks for the realm registry configuration.
// Purpose: Keep each rule an independent, ordered, reusable check.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Validation is purely syntactic: no network access and no side effects.
//! Realm rules live in an ordered table so each check stays independent and
//! the first failure short-circuits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;
use url::ParseError;
use url::Url;

use crate::config::ConfigError;
use crate::config::OidcConfig;
use crate::config::RealmConfig;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Realm fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealmField {
    /// Realm name.
    Name,
    /// OIDC client identifier.
    ClientId,
    /// OIDC client secret.
    ClientSecret,
    /// Realm login endpoint.
    LoginUrl,
}

impl RealmField {
    /// Returns the serialized key for the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ClientId => "client-id",
            Self::ClientSecret => "client-secret",
            Self::LoginUrl => "login-url",
        }
    }
}

impl fmt::Display for RealmField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::ClientId => "client ID",
            Self::ClientSecret => "client secret",
            Self::LoginUrl => "login URL",
        };
        f.write_str(label)
    }
}

/// Cause of a single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Value is empty after trimming whitespace.
    #[error("empty value")]
    Empty,
    /// Value could not be parsed as a URL.
    #[error("can't parse URL: '{url}'; error: {reason}")]
    Unparseable {
        /// Raw input.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// Value is a relative reference rather than an absolute URL.
    #[error("not an absolute URL: '{0}'")]
    NotAbsolute(String),
    /// Value is an absolute URL with a scheme other than `http`/`https`.
    #[error("not an HTTP URL: '{0}'")]
    NotHttp(String),
}

/// A single realm rule.
type RealmCheck = fn(&RealmConfig) -> Result<(), FieldError>;

/// Realm rules in evaluation order.
const REALM_CHECKS: [(RealmField, RealmCheck); 4] = [
    (RealmField::Name, check_name),
    (RealmField::ClientId, check_client_id),
    (RealmField::ClientSecret, check_client_secret),
    (RealmField::LoginUrl, check_login_url),
];

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates an optional configuration.
///
/// Absence of configuration is not misconfiguration: `None` is accepted.
///
/// # Errors
///
/// Returns [`ConfigError`] for the first field that fails validation.
pub fn validate_config(config: Option<&OidcConfig>) -> Result<(), ConfigError> {
    config.map_or(Ok(()), OidcConfig::validate)
}

/// Runs every realm rule in order, stopping at the first failure.
pub(crate) fn validate_realm(index: usize, realm: &RealmConfig) -> Result<(), ConfigError> {
    REALM_CHECKS.iter().try_for_each(|(field, check)| {
        check(realm).map_err(|cause| ConfigError::Realm {
            index,
            field: *field,
            cause,
        })
    })
}

/// Realm name must be non-empty. Configured names are not trimmed for lookup.
fn check_name(realm: &RealmConfig) -> Result<(), FieldError> {
    validate_non_empty(&realm.name)
}

/// Client identifier must be non-empty.
fn check_client_id(realm: &RealmConfig) -> Result<(), FieldError> {
    validate_non_empty(&realm.client_id)
}

/// Client secret must be non-empty.
fn check_client_secret(realm: &RealmConfig) -> Result<(), FieldError> {
    validate_non_empty(&realm.client_secret)
}

/// Login endpoint must be an absolute HTTP(S) URL.
fn check_login_url(realm: &RealmConfig) -> Result<(), FieldError> {
    validate_abs_url(&realm.login_url)
}

/// Checks that `raw` is an absolute URL with an `http` or `https` scheme.
///
/// Parsing follows the WHATWG URL standard, which is stricter than a bare
/// "has a scheme" test for special schemes: an empty host (`http://`) or an
/// out-of-range port (`http://h:99999/`) is unparseable. It also normalizes
/// before checking, so extra slashes are absorbed (`https:///path` parses with
/// host `path`) and is accepted.
///
/// # Errors
///
/// Returns [`FieldError`] when the value is unparseable, relative, or uses
/// another scheme.
pub fn validate_abs_url(raw: &str) -> Result<(), FieldError> {
    let parsed = Url::parse(raw).map_err(|err| match err {
        ParseError::RelativeUrlWithoutBase => FieldError::NotAbsolute(raw.to_string()),
        other => FieldError::Unparseable {
            url: raw.to_string(),
            reason: other.to_string(),
        },
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(FieldError::NotHttp(raw.to_string())),
    }
}

/// Checks that `value` is non-empty after trimming whitespace.
///
/// # Errors
///
/// Returns [`FieldError::Empty`] for empty or whitespace-only values.
pub fn validate_non_empty(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Empty);
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/oidc-gate-core/src/registry.rs
// ============================================================================
// Module: Realm Registry
// Description: Read-only lookup over the configured OIDC realms.
// Purpose: Resolve policy realm names to login endpoints without locking.
// Dependencies: oidc-gate-config
// ============================================================================

//! ## Overview
//! The registry wraps a realm configuration and is immutable after
//! construction, so one instance can serve concurrent requests. Validation is
//! the caller's job: [`RealmRegistry::new`] accepts any configuration
//! structurally, while [`RealmRegistry::validated`] checks it first.
//!
//! ## Invariants
//! - Lookups are exact and case-sensitive; neither side is trimmed.
//! - Duplicate names resolve to the first configured realm.
//! - A registry built without configuration has no realms and an empty
//!   callback URL.

// ============================================================================
// SECTION: Imports
// ============================================================================

use oidc_gate_config::ConfigError;
use oidc_gate_config::OidcConfig;
use oidc_gate_config::RealmConfig;

// ============================================================================
// SECTION: Interface
// ============================================================================

/// Read-only realm lookup capability.
pub trait RealmLookup: Send + Sync {
    /// Returns the first realm whose name equals `name` exactly.
    fn lookup_realm(&self, name: &str) -> Option<&RealmConfig>;

    /// Returns the configured callback URL, or `""` when unconfigured.
    fn callback_url(&self) -> &str;
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Realm registry backed by an [`OidcConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealmRegistry {
    /// Wrapped configuration (empty for the no-op registry).
    config: OidcConfig,
}

impl RealmRegistry {
    /// Builds a registry; `None` yields the no-op registry.
    #[must_use]
    pub fn new(config: Option<OidcConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
        }
    }

    /// Builds a registry after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid.
    pub fn validated(config: OidcConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
        })
    }

    /// Returns the no-op registry: lookups always miss.
    #[must_use]
    pub fn noop() -> Self {
        Self::default()
    }

    /// Returns the number of configured realms.
    #[must_use]
    pub const fn realm_count(&self) -> usize {
        self.config.realms.len()
    }

    /// Iterates realms in configuration order.
    pub fn realms(&self) -> impl Iterator<Item = &RealmConfig> {
        self.config.realms.iter()
    }
}

impl RealmLookup for RealmRegistry {
    fn lookup_realm(&self, name: &str) -> Option<&RealmConfig> {
        self.config.realms.iter().find(|realm| realm.name == name)
    }

    fn callback_url(&self) -> &str {
        &self.config.callback_url
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

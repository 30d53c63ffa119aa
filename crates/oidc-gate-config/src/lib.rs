// crates/oidc-gate-config/src/lib.rs
// ============================================================================
// Module: OIDC Gate Config Library
// Description: Realm registry config model, validation, and loading.
// Purpose: Single source of truth for oidc-gate.toml semantics.
// Dependencies: serde, serde_json, thiserror, toml, url
// ============================================================================

//! ## Overview
//! `oidc-gate-config` defines the realm registry configuration consumed by the
//! OIDC redirect trigger. It provides strict, fail-closed validation that
//! short-circuits on the first offending field and reports which realm and
//! which field failed.
//!
//! Security posture: config inputs are untrusted and client secrets are never
//! rendered by `Debug`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use validation::FieldError;
pub use validation::RealmField;
pub use validation::validate_abs_url;
pub use validation::validate_config;
pub use validation::validate_non_empty;

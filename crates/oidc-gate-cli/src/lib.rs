// crates/oidc-gate-cli/src/lib.rs
// ============================================================================
// Module: OIDC Gate CLI Library
// Description: Shared helpers for the `oidc-gate` binary.
// Purpose: Expose the message catalog to the binary and its tests.
// Dependencies: crate::i18n
// ============================================================================

//! ## Overview
//! Library half of the `oidc-gate` CLI. Only the message catalog lives here;
//! command dispatch stays in the binary.

pub mod i18n;

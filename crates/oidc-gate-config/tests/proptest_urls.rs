//! URL validation property-based tests.
//!
//! ## Purpose
//! Exercise callback and login URL validation with randomized inputs to prove
//! the scheme rules hold and malformed strings never panic.
// crates/oidc-gate-config/tests/proptest_urls.rs
// ============================================================================
// Module: URL Validation Property-Based Tests
// Description: Fuzz-like checks for absolute HTTP(S) URL validation.
// Purpose: Ensure only absolute http/https URLs are accepted.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use oidc_gate_config::FieldError;
use oidc_gate_config::OidcConfig;
use oidc_gate_config::validate_abs_url;
use proptest::prelude::*;

proptest! {
    #[test]
    fn http_and_https_hosts_are_accepted(
        scheme in prop::sample::select(vec!["http", "https"]),
        host in "[a-z][a-z0-9]{0,15}(\\.[a-z]{2,6})?",
        path in "(/[a-zA-Z0-9_-]{0,8}){0,4}",
    ) {
        let url = format!("{scheme}://{host}{path}");
        prop_assert_eq!(validate_abs_url(&url), Ok(()));
    }

    #[test]
    fn other_schemes_are_rejected(
        scheme in prop::sample::select(vec!["ftp", "file", "ws", "mailto", "gopher"]),
        host in "[a-z][a-z0-9]{0,15}",
    ) {
        let url = format!("{scheme}://{host}/path");
        prop_assert_eq!(validate_abs_url(&url), Err(FieldError::NotHttp(url.clone())));
    }

    #[test]
    fn rooted_paths_are_rejected(path in "(/[a-zA-Z0-9_-]{1,8}){1,4}") {
        prop_assert_eq!(validate_abs_url(&path), Err(FieldError::NotAbsolute(path.clone())));
    }

    #[test]
    fn arbitrary_callback_urls_never_panic(raw in ".{0,64}") {
        let config = OidcConfig {
            callback_url: raw,
            realms: Vec::new(),
        };
        let _ = config.validate();
    }
}

// crates/oidc-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared fixtures for realm configuration tests.
// Purpose: Reduce duplication across integration tests for oidc-gate-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use oidc_gate_config::ConfigError;
use oidc_gate_config::OidcConfig;
use oidc_gate_config::RealmConfig;

pub type TestResult = Result<(), String>;

/// Builds a valid realm whose fields derive from `name`.
pub fn realm(name: &str) -> RealmConfig {
    RealmConfig {
        name: name.to_string(),
        login_url: format!("http://log/in/{name}"),
        client_id: format!("id.{name}"),
        client_secret: format!("s.{name}"),
    }
}

/// Returns a valid config with realms `A` and `B`.
pub fn two_realm_config() -> OidcConfig {
    OidcConfig {
        callback_url: "http://wada/wada".to_string(),
        realms: vec![realm("A"), realm("B")],
    }
}

/// Asserts the result is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

// crates/oidc-gate-core/tests/common/mod.rs
// =============================================================================
// Module: Trigger Test Helpers
// Description: Shared fixtures for redirect trigger integration tests.
// Purpose: Build triggers with an inspectable audit sink.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Arc;

use oidc_gate_core::AuthCodeFlowTrigger;
use oidc_gate_core::DeniedHttpResponse;
use oidc_gate_core::EvaluationResult;
use oidc_gate_core::HeaderValueOption;
use oidc_gate_core::HttpStatus;
use oidc_gate_core::OidcConfig;
use oidc_gate_core::RealmConfig;
use serde_json::Value;

/// Builds a valid realm whose fields derive from `name`.
pub fn realm(name: &str) -> RealmConfig {
    RealmConfig {
        name: name.to_string(),
        login_url: format!("http://log/in/{name}"),
        client_id: format!("id.{name}"),
        client_secret: format!("s.{name}"),
    }
}

/// Returns a config with realms `A` and `B`.
pub fn two_realm_config() -> OidcConfig {
    OidcConfig {
        callback_url: "http://wada/wada".to_string(),
        realms: vec![realm("A"), realm("B")],
    }
}

/// Builds a trigger over realms `A` and `B` plus its in-memory sink.
pub fn build_trigger() -> (AuthCodeFlowTrigger, Arc<oidc_gate_core::InMemoryAuditSink>) {
    let sink = Arc::new(oidc_gate_core::InMemoryAuditSink::new());
    let trigger = AuthCodeFlowTrigger::new(Some(two_realm_config()), sink.clone());
    (trigger, sink)
}

/// Wraps a decision value.
pub fn eval(decision: Value) -> EvaluationResult {
    EvaluationResult::new(decision)
}

/// Returns an empty denial response.
pub fn empty_denied_response() -> DeniedHttpResponse {
    DeniedHttpResponse::default()
}

/// Returns a populated denial response with one header, a status, and a body.
pub fn populated_denied_response() -> DeniedHttpResponse {
    DeniedHttpResponse {
        status: Some(HttpStatus {
            code: 403,
        }),
        headers: vec![HeaderValueOption::new("x-header", "x")],
        body: "denied".to_string(),
    }
}

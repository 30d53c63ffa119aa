// crates/oidc-gate-core/src/trigger.rs
// ============================================================================
// Module: OIDC Redirect Trigger
// Description: Turns realm-bearing deny decisions into login redirects.
// Purpose: Enrich denial responses without corrupting them on failure paths.
// Dependencies: oidc-gate-config, thiserror
// ============================================================================

//! ## Overview
//! The trigger inspects a policy evaluation result and classifies it into one
//! of three outcomes:
//!
//! - no realm requested: the response is not touched and `None` is returned;
//! - realm found: a `Location` header is appended, the status becomes 303, and
//!   the caller's own response is returned;
//! - realm not found: an error event is recorded and the unchanged response is
//!   returned.
//!
//! ## Invariants
//! - Classification happens before the response is borrowed mutably; the
//!   redirect is fully built first, so applying it cannot fail half-way.
//! - No state is kept between invocations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use oidc_gate_config::OidcConfig;
use oidc_gate_config::RealmConfig;
use serde::Serialize;
use thiserror::Error;

use crate::audit::TriggerAuditEvent;
use crate::audit::TriggerAuditSink;
use crate::decision::EvaluationResult;
use crate::decision::PolicyDecision;
use crate::registry::RealmLookup;
use crate::registry::RealmRegistry;
use crate::response::DeniedHttpResponse;
use crate::response::HeaderValueOption;
use crate::response::HttpStatus;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A policy named a realm that the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "policy wants to redirect downstream client to realm login but no realm login endpoint \
     found in configuration for realm name: '{realm}'"
)]
pub struct RealmLookupError {
    /// Unresolved realm name.
    realm: String,
}

impl RealmLookupError {
    /// Creates a lookup error for `realm`.
    #[must_use]
    pub fn new(realm: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
        }
    }

    /// Returns the unresolved realm name.
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Classification label for a trigger invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The decision did not request a realm.
    NoRealm,
    /// The requested realm resolved and a redirect was produced.
    RealmFound,
    /// The requested realm is not configured.
    RealmNotFound,
}

/// Result of classifying an evaluation result against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome<'a> {
    /// No realm requested.
    NoRealm,
    /// Realm resolved.
    RealmFound {
        /// Matching realm definition.
        realm: &'a RealmConfig,
    },
    /// Realm requested but not configured.
    RealmNotFound {
        /// Lookup failure to report.
        error: RealmLookupError,
    },
}

impl TriggerOutcome<'_> {
    /// Returns the classification label.
    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::NoRealm => OutcomeKind::NoRealm,
            Self::RealmFound {
                ..
            } => OutcomeKind::RealmFound,
            Self::RealmNotFound {
                ..
            } => OutcomeKind::RealmNotFound,
        }
    }
}

// ============================================================================
// SECTION: Redirect
// ============================================================================

/// Fully built redirect, ready to apply to a denial response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Status to set.
    status: HttpStatus,
    /// Header to append.
    location: HeaderValueOption,
}

impl Redirect {
    /// Builds a 303 redirect to `url`.
    #[must_use]
    pub fn to(url: &str) -> Self {
        Self {
            status: HttpStatus::see_other(),
            location: HeaderValueOption::location(url),
        }
    }

    /// Appends the `Location` header after existing headers and sets the status.
    pub fn apply(self, response: &mut DeniedHttpResponse) {
        response.headers.push(self.location);
        response.status = Some(self.status);
    }
}

// ============================================================================
// SECTION: Trigger
// ============================================================================

/// Decision enrichment step invoked by the authorization server.
pub trait RedirectTrigger: Send + Sync {
    /// Processes a denial. Returns `None` when no redirect was requested,
    /// otherwise the caller's response (redirected, or unchanged when the
    /// requested realm is unknown).
    fn process<'r>(
        &self,
        result: &EvaluationResult,
        response: &'r mut DeniedHttpResponse,
    ) -> Option<&'r mut DeniedHttpResponse>;
}

/// Redirect trigger for the OIDC Authorization Code flow.
pub struct AuthCodeFlowTrigger<L = RealmRegistry> {
    /// Realm lookup capability.
    registry: L,
    /// Sink for unresolved-realm diagnostics.
    audit: Arc<dyn TriggerAuditSink>,
}

impl AuthCodeFlowTrigger<RealmRegistry> {
    /// Builds a trigger over `config`; `None` yields a trigger that never
    /// redirects but still reports requested realms as unknown.
    #[must_use]
    pub fn new(config: Option<OidcConfig>, audit: Arc<dyn TriggerAuditSink>) -> Self {
        Self::with_registry(RealmRegistry::new(config), audit)
    }
}

impl<L: RealmLookup> AuthCodeFlowTrigger<L> {
    /// Builds a trigger over an existing lookup implementation.
    #[must_use]
    pub fn with_registry(registry: L, audit: Arc<dyn TriggerAuditSink>) -> Self {
        Self {
            registry,
            audit,
        }
    }

    /// Classifies `result` without touching any response.
    #[must_use]
    pub fn evaluate(&self, result: &EvaluationResult) -> TriggerOutcome<'_> {
        let PolicyDecision::RealmRequest(name) = result.policy_decision() else {
            return TriggerOutcome::NoRealm;
        };
        match self.registry.lookup_realm(name) {
            Some(realm) => TriggerOutcome::RealmFound {
                realm,
            },
            None => TriggerOutcome::RealmNotFound {
                error: RealmLookupError::new(name),
            },
        }
    }

    /// Acts on an outcome previously returned by [`Self::evaluate`].
    ///
    /// Lets callers report the same classification that was applied.
    pub fn apply_outcome<'r>(
        &self,
        outcome: TriggerOutcome<'_>,
        response: &'r mut DeniedHttpResponse,
    ) -> Option<&'r mut DeniedHttpResponse> {
        match outcome {
            TriggerOutcome::NoRealm => None,
            TriggerOutcome::RealmFound {
                realm,
            } => {
                Redirect::to(&realm.login_url).apply(response);
                Some(response)
            }
            TriggerOutcome::RealmNotFound {
                error,
            } => {
                self.audit.record(&TriggerAuditEvent::realm_not_found(&error, response));
                Some(response)
            }
        }
    }
}

impl<L: RealmLookup> RedirectTrigger for AuthCodeFlowTrigger<L> {
    fn process<'r>(
        &self,
        result: &EvaluationResult,
        response: &'r mut DeniedHttpResponse,
    ) -> Option<&'r mut DeniedHttpResponse> {
        self.apply_outcome(self.evaluate(result), response)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use serde_json::json;

    use super::*;
    use crate::audit::InMemoryAuditSink;
    use crate::response::LOCATION_HEADER;
    use crate::response::SEE_OTHER;

    fn config() -> OidcConfig {
        OidcConfig {
            callback_url: "http://wada/wada".to_string(),
            realms: vec![RealmConfig {
                name: "A".to_string(),
                login_url: "http://log/in/A".to_string(),
                client_id: "id.A".to_string(),
                client_secret: "s.A".to_string(),
            }],
        }
    }

    fn trigger(sink: &Arc<InMemoryAuditSink>) -> AuthCodeFlowTrigger {
        AuthCodeFlowTrigger::new(Some(config()), sink.clone())
    }

    #[test]
    fn evaluate_classifies_each_outcome() {
        let sink = Arc::new(InMemoryAuditSink::new());
        let trigger = trigger(&sink);
        let cases = [
            (json!(false), OutcomeKind::NoRealm),
            (json!({"realm": "A"}), OutcomeKind::RealmFound),
            (json!({"realm": "ghost"}), OutcomeKind::RealmNotFound),
        ];
        for (decision, expected) in cases {
            let outcome = trigger.evaluate(&EvaluationResult::new(decision));
            assert_eq!(outcome.kind(), expected);
        }
        assert!(sink.is_empty(), "evaluate must not record events");
    }

    #[test]
    fn evaluate_carries_unresolved_realm_name() {
        let sink = Arc::new(InMemoryAuditSink::new());
        let trigger = trigger(&sink);
        let outcome = trigger.evaluate(&EvaluationResult::new(json!({"realm": " ghost "})));
        assert_eq!(
            outcome,
            TriggerOutcome::RealmNotFound {
                error: RealmLookupError::new("ghost"),
            }
        );
    }

    #[test]
    fn found_realm_redirects_to_its_login_url() {
        let sink = Arc::new(InMemoryAuditSink::new());
        let trigger = trigger(&sink);
        let outcome = trigger.evaluate(&EvaluationResult::new(json!({"realm": "A"})));
        let mut response = DeniedHttpResponse::default();
        let redirected = trigger.apply_outcome(outcome, &mut response).unwrap();
        assert_eq!(redirected.header(LOCATION_HEADER), Some("http://log/in/A"));
        assert_eq!(redirected.status_code(), Some(SEE_OTHER));
    }

    #[test]
    fn redirect_apply_appends_after_existing_headers() {
        let mut response = DeniedHttpResponse {
            headers: vec![HeaderValueOption::new("x-header", "x")],
            ..DeniedHttpResponse::default()
        };
        Redirect::to("http://log/in/A").apply(&mut response);
        assert_eq!(response.headers.len(), 2);
        assert_eq!(response.headers[0].header.key, "x-header");
        assert_eq!(response.headers[1], HeaderValueOption::location("http://log/in/A"));
        assert_eq!(response.status_code(), Some(SEE_OTHER));
    }

    #[test]
    fn apply_outcome_acts_on_the_given_classification() {
        let sink = Arc::new(InMemoryAuditSink::new());
        let trigger = trigger(&sink);
        let cases = [
            (json!(false), false, 0),
            (json!({"realm": "A"}), true, 0),
            (json!({"realm": "ghost"}), true, 1),
        ];
        for (decision, returned, events) in cases {
            let result = EvaluationResult::new(decision);
            let before = sink.len();
            let mut via_outcome = DeniedHttpResponse::default();
            let outcome = trigger.evaluate(&result);
            let got = trigger.apply_outcome(outcome, &mut via_outcome).is_some();
            let mut via_process = DeniedHttpResponse::default();
            let _ = trigger.process(&result, &mut via_process);
            assert_eq!(got, returned);
            assert_eq!(via_outcome, via_process);
            assert_eq!(sink.len() - before, events * 2);
        }
    }

    #[test]
    fn process_returns_callers_reference() {
        let sink = Arc::new(InMemoryAuditSink::new());
        let trigger = trigger(&sink);
        let mut response = DeniedHttpResponse::default();
        let expected: *const DeniedHttpResponse = &response;
        let returned = trigger
            .process(&EvaluationResult::new(json!({"realm": "A"})), &mut response)
            .unwrap();
        assert!(std::ptr::eq(returned, expected));
    }

    #[test]
    fn lookup_error_message_names_realm() {
        let err = RealmLookupError::new("ghost");
        assert_eq!(err.realm(), "ghost");
        assert!(err.to_string().ends_with("for realm name: 'ghost'"));
    }

    #[test]
    fn outcome_kinds_serialize_as_snake_case() {
        let rendered = serde_json::to_value([
            OutcomeKind::NoRealm,
            OutcomeKind::RealmFound,
            OutcomeKind::RealmNotFound,
        ])
        .unwrap();
        assert_eq!(rendered, json!(["no_realm", "realm_found", "realm_not_found"]));
    }
}

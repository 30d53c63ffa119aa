// crates/oidc-gate-core/src/decision.rs
// ============================================================================
// Module: Policy Decision Parsing
// Description: Boundary parse of opaque policy decisions.
// Purpose: Interpret the decision once, as a closed set of variants.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The policy engine emits a decision of unspecified JSON shape. The trigger
//! only understands one shape, an object with a string `realm` entry. Any other
//! shape is carried as [`PolicyDecision::Unstructured`] and means "no redirect
//! requested". Malformed decisions are not errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Decision key naming the realm to redirect to.
pub const REALM_KEY: &str = "realm";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Result of a policy evaluation, as produced by the upstream engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Opaque decision value.
    #[serde(default)]
    pub decision: Value,
}

impl EvaluationResult {
    /// Wraps a decision value.
    #[must_use]
    pub const fn new(decision: Value) -> Self {
        Self {
            decision,
        }
    }

    /// Parses the decision into its closed variant set.
    #[must_use]
    pub fn policy_decision(&self) -> PolicyDecision<'_> {
        PolicyDecision::parse(&self.decision)
    }
}

/// Interpreted policy decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolicyDecision<'a> {
    /// Any decision that does not request a realm login.
    Unstructured(&'a Value),
    /// The decision names a realm; the name is trimmed and non-empty.
    RealmRequest(&'a str),
}

impl<'a> PolicyDecision<'a> {
    /// Interprets `decision`, falling back to [`Self::Unstructured`].
    #[must_use]
    pub fn parse(decision: &'a Value) -> Self {
        let realm = decision
            .as_object()
            .and_then(|map| map.get(REALM_KEY))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty());
        realm.map_or(Self::Unstructured(decision), Self::RealmRequest)
    }

    /// Returns the requested realm name, if any.
    #[must_use]
    pub const fn realm(&self) -> Option<&'a str> {
        match *self {
            Self::RealmRequest(name) => Some(name),
            Self::Unstructured(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/oidc-gate-core/src/lib.rs
// ============================================================================
// Module: OIDC Gate Core Library
// Description: Public API surface for the OIDC redirect trigger.
// Purpose: Expose the realm registry, decision parsing, and trigger runtime.
// Dependencies: crate::{audit, decision, registry, response, trigger}
// ============================================================================

//! ## Overview
//! OIDC Gate core enriches authorization denials: when a policy decision names
//! a realm, the denial is rewritten into a 303 redirect to that realm's login
//! endpoint. Everything here is synchronous and in-memory; one registry and one
//! trigger can be shared across concurrent requests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod decision;
pub mod registry;
pub mod response;
pub mod trigger;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::InMemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::TriggerAuditEvent;
pub use audit::TriggerAuditSink;
pub use decision::EvaluationResult;
pub use decision::PolicyDecision;
pub use oidc_gate_config::ConfigError;
pub use oidc_gate_config::OidcConfig;
pub use oidc_gate_config::RealmConfig;
pub use registry::RealmLookup;
pub use registry::RealmRegistry;
pub use response::DeniedHttpResponse;
pub use response::HeaderValue;
pub use response::HeaderValueOption;
pub use response::HttpStatus;
pub use trigger::AuthCodeFlowTrigger;
pub use trigger::OutcomeKind;
pub use trigger::RealmLookupError;
pub use trigger::Redirect;
pub use trigger::RedirectTrigger;
pub use trigger::TriggerOutcome;

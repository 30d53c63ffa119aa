// crates/oidc-gate-core/src/audit.rs
// ============================================================================
// Module: Trigger Audit Logging
// Description: Structured error events for redirect trigger diagnostics.
// Purpose: Emit JSON-line events without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The trigger reports misconfiguration (a policy naming an unknown realm)
//! through an injected [`TriggerAuditSink`]. Events are plain serializable
//! structs so deployments can route them to their own logging pipeline.
//! Client secrets never reach an event: only the realm name, the lookup error,
//! and the denial response are recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::response::DeniedHttpResponse;
use crate::trigger::RealmLookupError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Message recorded when a requested realm cannot be resolved.
pub const TRIGGER_FAILED_MESSAGE: &str = "Failed to trigger OIDC Authorization Code flow.";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditLevel {
    /// Operator-visible error that did not abort the request.
    Error,
}

/// Redirect trigger audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event severity.
    pub level: AuditLevel,
    /// Human-readable message.
    pub message: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Realm name requested by the policy.
    pub realm: String,
    /// Rendered lookup error.
    pub error: String,
    /// Denial response as returned to the caller.
    pub response: DeniedHttpResponse,
}

impl TriggerAuditEvent {
    /// Builds the event for an unresolved realm.
    #[must_use]
    pub fn realm_not_found(error: &RealmLookupError, response: &DeniedHttpResponse) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "oidc_redirect_trigger",
            level: AuditLevel::Error,
            message: TRIGGER_FAILED_MESSAGE,
            timestamp_ms,
            realm: error.realm().to_string(),
            error: error.to_string(),
            response: response.clone(),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for redirect trigger events.
pub trait TriggerAuditSink: Send + Sync {
    /// Record a trigger event.
    fn record(&self, event: &TriggerAuditEvent);
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl TriggerAuditSink for StderrAuditSink {
    fn record(&self, event: &TriggerAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl TriggerAuditSink for FileAuditSink {
    fn record(&self, event: &TriggerAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that keeps events in memory for inspection.
#[derive(Default)]
pub struct InMemoryAuditSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<TriggerAuditEvent>>,
}

impl InMemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<TriggerAuditEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true when no events were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TriggerAuditSink for InMemoryAuditSink {
    fn record(&self, event: &TriggerAuditEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl TriggerAuditSink for NoopAuditSink {
    fn record(&self, _event: &TriggerAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================

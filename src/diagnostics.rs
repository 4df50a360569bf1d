//! This module contains the reporting channel for non-fatal simulation issues. Every component
//! that can degrade (sensors, vehicles, shape builders, importers) is handed a sink at
//! construction and reports through it instead of through a process-wide logger.

use crate::errors::{Severity, SimError};
use std::sync::{Arc, Mutex};
use tracing::{error, warn};

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, issue: &SimError);
}

/// Forwards every issue to `tracing` at a level matching its severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn shared() -> Arc<dyn DiagnosticSink> {
        Arc::new(TracingSink)
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&self, issue: &SimError) {
        match issue.severity() {
            Severity::Warning => warn!("{}", issue),
            Severity::Error => error!("{}", issue),
        }
    }
}

/// Keeps every reported issue in memory, in the order reported, while still forwarding them to
/// `tracing`. Intended to be scoped to one simulation run.
#[derive(Debug, Default)]
pub struct RecordingSink {
    issues: Mutex<Vec<SimError>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of all issues reported so far
    pub fn issues(&self) -> Vec<SimError> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Count of the reported issues which have the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.lock()
            .iter()
            .filter(|i| i.severity() == severity)
            .count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SimError>> {
        // Poisoning leaves the list intact
        self.issues.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, issue: &SimError) {
        TracingSink.report(issue);
        self.lock().push(issue.clone());
    }
}

//! Leveled diagnostic events, injected into the normalizer and preprocessor.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::Level;

use crate::types::{Component, LogMessage};

/// Sink for leveled events emitted by a named component.
///
/// `WARN` and `ERROR` are operator-visible; `INFO`, `DEBUG`, and `TRACE` are
/// trace-only.
pub trait Diagnostics: Send + Sync {
    /// Record one event.
    fn record(&self, level: Level, component: Component, message: &str);
}

/// Shared handle passed to every component of a run.
pub type SharedDiagnostics = Arc<dyn Diagnostics>;

/// Forwards events to the installed `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    /// Shared handle for a run.
    pub fn shared() -> SharedDiagnostics {
        Arc::new(Self)
    }
}

impl Diagnostics for TracingDiagnostics {
    fn record(&self, level: Level, component: Component, message: &str) {
        match level {
            Level::ERROR => tracing::error!(component, "{message}"),
            Level::WARN => tracing::warn!(component, "{message}"),
            Level::INFO => tracing::info!(component, "{message}"),
            Level::DEBUG => tracing::debug!(component, "{message}"),
            _ => tracing::trace!(component, "{message}"),
        }
    }
}

/// One captured diagnostic event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// Severity.
    pub level: Level,
    /// Emitting component, e.g. `textprep::preprocess`.
    pub component: Component,
    /// Rendered message.
    pub message: LogMessage,
}

/// Keeps every event in memory; used to assert on diagnostics in tests.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemoryDiagnostics {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of events recorded so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Events recorded at exactly `level`.
    pub fn at_level(&self, level: Level) -> Vec<DiagnosticEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.level == level)
            .collect()
    }

    /// True if an event at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.at_level(level)
            .iter()
            .any(|event| event.message.contains(needle))
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn record(&self, level: Level, component: Component, message: &str) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(DiagnosticEvent {
                level,
                component,
                message: message.to_string(),
            });
    }
}

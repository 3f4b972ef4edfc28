//! Logging capability handed to the operation handlers.
//!
//! Handlers report what happened through an [`EventSink`] held in the
//! application state instead of calling a process-wide logger, which lets
//! tests capture the events of a single router.

use log::Level;

use crate::model::PersonId;

/// One structured log record: an event name keyed on operation, person ID
/// and error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub level: Level,
    pub name: &'static str,
    pub operation: &'static str,
    pub id: Option<PersonId>,
    pub error: Option<String>,
}

impl Event {
    pub fn info(name: &'static str, operation: &'static str) -> Self {
        Self {
            level: Level::Info,
            name,
            operation,
            id: None,
            error: None,
        }
    }

    pub fn failure(level: Level, name: &'static str, operation: &'static str) -> Self {
        Self {
            level,
            ..Self::info(name, operation)
        }
    }

    pub fn with_id(mut self, id: PersonId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_error(mut self, err: &dyn std::error::Error) -> Self {
        self.error = Some(err.to_string());
        self
    }
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: Event);
}

/// Forwards events to the `log` facade as `key=value` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn record(&self, event: Event) {
        let status = if event.level <= Level::Warn { "error" } else { "ok" };
        match (event.id, event.error) {
            (Some(id), Some(err)) => log::log!(
                event.level,
                "event={} op={} id={} status={} error={}",
                event.name,
                event.operation,
                id,
                status,
                err
            ),
            (Some(id), None) => log::log!(
                event.level,
                "event={} op={} id={} status={}",
                event.name,
                event.operation,
                id,
                status
            ),
            (None, Some(err)) => log::log!(
                event.level,
                "event={} op={} status={} error={}",
                event.name,
                event.operation,
                status,
                err
            ),
            (None, None) => log::log!(
                event.level,
                "event={} op={} status={}",
                event.name,
                event.operation,
                status
            ),
        }
    }
}

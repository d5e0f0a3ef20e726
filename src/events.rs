//! Best-effort "unified log" events emitted after successful mutations.
//!
//! Publishing must never break a request: sinks report failures through
//! [`EventSinkError`], and [`publish_event`] swallows them after logging at
//! debug level.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const GROOMER_CREATED: &str = "groomer.created";
pub const GROOMER_UPDATED: &str = "groomer.updated";
pub const GROOMER_DELETED: &str = "groomer.deleted";
pub const GROOMER_BOOKING_RECORDED: &str = "groomer.booking_recorded";
pub const REVIEW_CREATED: &str = "review.created";
pub const REVIEW_DELETED: &str = "review.deleted";
pub const SERVICE_STARTUP: &str = "grooming-service.startup";
pub const SERVICE_SHUTDOWN: &str = "grooming-service.shutdown";

/// Severity attached to a unified log event.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Info,
}

/// A JSON-serializable unified log event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UnifiedLogEvent {
    pub level: EventLevel,
    pub event: String,
    pub message: String,
    pub timestamp: String,
    pub service: String,
    pub version: String,
    pub context: Value,
}

#[derive(Debug, Error)]
pub enum EventSinkError {
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("event sink unavailable: {0}")]
    Unavailable(String),
}

/// Destination for unified log events.
pub trait EventSink: Send + Sync {
    fn send(&self, event: &UnifiedLogEvent) -> Result<(), EventSinkError>;
}

/// Stamps events with the emitting service's identity and the current time.
#[derive(Debug, Clone)]
pub struct EventFactory {
    service: String,
    version: String,
}

impl EventFactory {
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
        }
    }

    pub fn info(&self, event: &str, message: impl Into<String>, context: Value) -> UnifiedLogEvent {
        UnifiedLogEvent {
            level: EventLevel::Info,
            event: event.to_string(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            service: self.service.clone(),
            version: self.version.clone(),
            context,
        }
    }
}

impl Default for EventFactory {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

/// Writes events as compact JSON lines to the `unified_log` log target.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn send(&self, event: &UnifiedLogEvent) -> Result<(), EventSinkError> {
        let body = serde_json::to_string(event)?;
        match event.level {
            EventLevel::Info => log::info!(target: "unified_log", "{body}"),
        }
        Ok(())
    }
}

/// Discards every event. Used when unified logging is disabled.
#[derive(Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn send(&self, _event: &UnifiedLogEvent) -> Result<(), EventSinkError> {
        Ok(())
    }
}

/// Sends `event` and absorbs any failure.
pub fn publish_event<S>(sink: &S, event: UnifiedLogEvent)
where
    S: EventSink + ?Sized,
{
    if let Err(e) = sink.send(&event) {
        log::debug!("Failed to send unified log event '{}': {e}", event.event);
    }
}

/// Sink plus event factory, shared by the service layer.
#[derive(Clone)]
pub struct EventPublisher {
    sink: Arc<dyn EventSink>,
    factory: EventFactory,
}

impl EventPublisher {
    pub fn new(sink: Arc<dyn EventSink>, factory: EventFactory) -> Self {
        Self { sink, factory }
    }

    /// Publisher that drops every event.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopEventSink), EventFactory::default())
    }

    /// Fire-and-forget an informational event.
    pub fn info(&self, event: &str, message: impl Into<String>, context: Value) {
        publish_event(self.sink.as_ref(), self.factory.info(event, message, context));
    }
}

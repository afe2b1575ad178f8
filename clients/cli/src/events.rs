//! Event System
//!
//! Activity events sent from background fetch tasks to the UI, optionally
//! carrying the fetched data.

use crate::cards::CardId;
use crate::logging::{LogLevel, should_log_with_env};
use crate::model::{Metric, SegmentGroup, SnapshotPoint};
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// Metric and segment catalog loading.
    Catalog,
    /// Per-card snapshot series fetching.
    Snapshot,
    /// Card list edits made by the user.
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
}

/// Data delivered alongside an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Metrics(Vec<Metric>),
    SegmentGroups(Vec<SegmentGroup>),
    Snapshot {
        card: CardId,
        generation: u64,
        points: Vec<SnapshotPoint>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    pub payload: Option<Payload>,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            payload: None,
        }
    }

    pub fn catalog_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Catalog, msg, event_type, log_level)
    }

    pub fn snapshot_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Snapshot, msg, event_type, log_level)
    }

    pub fn dashboard_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Dashboard, msg, event_type, log_level)
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn should_display(&self) -> bool {
        // Always show success and error events
        if matches!(self.event_type, EventType::Success | EventType::Error) {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}

/// Cloneable handle background tasks use to report to the UI.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send an event. A closed receiver means the UI has shut down.
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_type_source_and_message() {
        let event = Event::catalog_with_level(
            "Loaded 3 metrics".to_string(),
            EventType::Success,
            LogLevel::Info,
        );
        let rendered = event.to_string();
        assert!(rendered.starts_with("Success ["));
        assert!(rendered.ends_with("Catalog: Loaded 3 metrics"));
    }

    #[test]
    fn success_events_always_display() {
        let event = Event::snapshot_with_level(
            "quiet".to_string(),
            EventType::Success,
            LogLevel::Trace,
        );
        assert!(event.should_display());
    }

    #[test]
    fn error_events_display_below_threshold() {
        let event = Event::catalog_with_level(
            "HTTP 429".to_string(),
            EventType::Error,
            LogLevel::Trace,
        );
        assert!(event.should_display());
    }

    #[test]
    fn payload_is_attached() {
        let event = Event::catalog_with_level(
            "Loaded 0 metrics".to_string(),
            EventType::Success,
            LogLevel::Info,
        )
        .with_payload(Payload::Metrics(Vec::new()));
        assert_eq!(event.payload, Some(Payload::Metrics(Vec::new())));
    }
}

use parking_lot::Mutex;

use crate::domain::DomainEvent;
use crate::ports::EventSink;

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: DomainEvent) {
        match &event {
            DomainEvent::UploadProgress { .. } => {
                tracing::trace!(event = event.name(), ?event, "domain event");
            }
            DomainEvent::FileRejected { message, .. } => {
                tracing::warn!(event = event.name(), %message, "domain event");
            }
            _ => tracing::debug!(event = event.name(), ?event, "domain event"),
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().clone()
    }

    pub fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of recorded events with the given [`DomainEvent::name`].
    pub fn count(&self, name: &str) -> usize {
        self.events.lock().iter().filter(|e| e.name() == name).count()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: DomainEvent) {
        tracing::trace!(event = event.name(), "recorded");
        self.events.lock().push(event);
    }
}

/// Forwards to several sinks.
pub struct FanoutEventSink {
    sinks: Vec<std::sync::Arc<dyn EventSink>>,
}

impl FanoutEventSink {
    pub fn new(sinks: Vec<std::sync::Arc<dyn EventSink>>) -> Self {
        Self { sinks }
    }
}

impl EventSink for FanoutEventSink {
    fn emit(&self, event: DomainEvent) {
        for sink in &self.sinks {
            sink.emit(event.clone());
        }
    }
}

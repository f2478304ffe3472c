use std::sync::{Mutex, PoisonError};

use vin_logging::{vin_info, vin_warn};

use crate::{EventLevel, ScrapeEvent};

/// Receives run notices as they happen. Extraction never renders anything
/// itself; front ends decide how to present these.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ScrapeEvent);
}

/// Buffers events in memory for later rendering.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<ScrapeEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns everything collected so far.
    pub fn take(&self) -> Vec<ScrapeEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    pub fn snapshot(&self) -> Vec<ScrapeEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn warnings(&self) -> Vec<ScrapeEvent> {
        self.snapshot()
            .into_iter()
            .filter(ScrapeEvent::is_warning)
            .collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: ScrapeEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Forwards events to the global logger: warnings at warn level, progress
/// at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: ScrapeEvent) {
        match event.level() {
            EventLevel::Warning => vin_warn!("{event}"),
            EventLevel::Info => vin_info!("{event}"),
        }
    }
}

impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&self, event: ScrapeEvent) {
        self.0.emit(event.clone());
        self.1.emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: ScrapeEvent) {
        (**self).emit(event);
    }
}

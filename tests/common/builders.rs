//! Test data builders for creating test sessions

use replay_controls::config::ReplayConfig;
use replay_controls::controls::ControlSurface;
use replay_controls::session::{RawEvent, ReplaySession};

use super::{RecordingFullscreen, SESSION_START_MS};

/// Builder for creating test replay sessions
pub struct SessionBuilder {
    start_ms: i64,
    duration_ms: f64,
    events: Vec<RawEvent>,
}

impl SessionBuilder {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            start_ms: SESSION_START_MS,
            duration_ms,
            events: Vec::new(),
        }
    }

    pub fn start(mut self, start_ms: i64) -> Self {
        self.start_ms = start_ms;
        self
    }

    /// Add an event at an absolute timestamp
    pub fn event(mut self, event_type: &str, timestamp_ms: i64) -> Self {
        self.events.push(RawEvent::new(event_type, timestamp_ms));
        self
    }

    pub fn raw(mut self, event: RawEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn build(self) -> ReplaySession {
        ReplaySession::new(self.start_ms, self.duration_ms, self.events)
    }

    /// Load the session into a fresh surface with default config
    pub fn surface(self) -> ControlSurface<RecordingFullscreen> {
        let mut surface =
            ControlSurface::new(&ReplayConfig::default(), RecordingFullscreen::default());
        surface.load_session(&self.build());
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_controls::session::SessionSource;

    #[test]
    fn test_session_builder() {
        let session = SessionBuilder::new(2_000.0)
            .start(500)
            .event("ui", 700)
            .build();

        assert_eq!(session.start_timestamp_ms(), Some(500));
        assert_eq!(session.duration_ms(), 2_000.0);
        assert_eq!(session.raw_events().len(), 1);
    }
}

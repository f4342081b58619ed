//! Session data types

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{ReplayError, Result, ResultExt};

/// Supplies everything the control surface needs from a recorded session
///
/// The control surface treats the source as read-only input.
pub trait SessionSource {
    /// Raw, unordered events as recorded
    fn raw_events(&self) -> Vec<RawEvent>;

    /// Absolute session start (Unix milliseconds), if known
    fn start_timestamp_ms(&self) -> Option<i64>;

    /// Total replay length in milliseconds
    fn duration_ms(&self) -> f64;
}

/// Parse a raw timestamp into Unix milliseconds
///
/// Numbers are taken as milliseconds, strings as RFC 3339. Negative,
/// non-finite and unparseable values have no usable timestamp.
pub fn parse_timestamp_ms(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|ms| ms.is_finite() && *ms >= 0.0)
            .map(|ms| ms.round() as i64),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.timestamp_millis())
            .filter(|ms| *ms >= 0),
        _ => None,
    }
}

/// A recorded event before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Event type as recorded (`"error"`, `"navigation"`, `"ui"`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Finer-grained category (`"ui.click"`, `"replay.init"`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Timestamp in whatever shape the recorder produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
}

impl RawEvent {
    /// Create a raw event with a millisecond timestamp
    pub fn new(event_type: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            event_type: Some(event_type.into()),
            timestamp: Some(Value::from(timestamp_ms)),
            ..Default::default()
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Usable timestamp in Unix milliseconds
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.timestamp.as_ref().and_then(parse_timestamp_ms)
    }
}

/// A recorded session as stored on disk (JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplaySession {
    /// Absolute session start (Unix ms number or RFC 3339 string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<Value>,
    /// Explicit replay length; derived from the events when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    /// Events in recording order. Kept as JSON so one malformed entry
    /// cannot reject the whole file.
    #[serde(default)]
    pub events: Vec<Value>,
}

impl ReplaySession {
    /// Create a session from typed raw events
    pub fn new(start_timestamp_ms: i64, duration_ms: f64, events: Vec<RawEvent>) -> Self {
        Self {
            start_timestamp: Some(Value::from(start_timestamp_ms)),
            duration_ms: Some(duration_ms),
            events: events
                .into_iter()
                .filter_map(|e| serde_json::to_value(e).ok())
                .collect(),
        }
    }

    /// Load a session from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let session = serde_json::from_str::<Self>(&json)
            .map_err(ReplayError::from)
            .with_context(|| format!("Failed to parse session {}", path.display()))?;
        session.validate()?;
        tracing::info!(
            "Loaded session from {:?} ({} events)",
            path,
            session.events.len()
        );
        Ok(session)
    }

    /// Save the session to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject sessions whose duration cannot bound a playback cursor
    pub fn validate(&self) -> Result<()> {
        match self.duration_ms {
            Some(d) if !d.is_finite() || d < 0.0 => Err(ReplayError::InvalidSession(format!(
                "duration_ms must be a non-negative number, got {}",
                d
            ))),
            _ => Ok(()),
        }
    }
}

impl SessionSource for ReplaySession {
    fn raw_events(&self) -> Vec<RawEvent> {
        self.events
            .iter()
            .filter_map(|value| match serde_json::from_value(value.clone()) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::debug!("Skipping malformed event: {}", e);
                    None
                }
            })
            .collect()
    }

    fn start_timestamp_ms(&self) -> Option<i64> {
        self.start_timestamp.as_ref().and_then(parse_timestamp_ms)
    }

    fn duration_ms(&self) -> f64 {
        if let Some(duration) = self.duration_ms.filter(|d| d.is_finite() && *d >= 0.0) {
            return duration;
        }

        let Some(start) = self.start_timestamp_ms() else {
            return 0.0;
        };

        self.raw_events()
            .iter()
            .filter_map(RawEvent::timestamp_ms)
            .max()
            .map(|last| last.saturating_sub(start).max(0) as f64)
            .unwrap_or(0.0)
    }
}

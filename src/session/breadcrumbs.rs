//! Breadcrumb index: time-ordered, typed session events
//!
//! Raw recorder events arrive unordered and with free-form `type`/`category`
//! strings. [`BreadcrumbIndex::build`] maps them once into [`EventKind`]s,
//! drops events without a usable timestamp and sorts the rest. Lookups
//! ("first event of interest at or after T") binary search on the timestamp.

use super::types::RawEvent;

/// Category of a session event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An error was captured
    Error,
    /// The replay recording started
    Init,
    /// Page or route change
    Navigation,
    /// Click, input or other UI interaction
    Ui,
    /// Explicit user action
    User,
    /// Network request
    Http,
    /// Console output
    Console,
    /// Anything unrecognised
    Default,
}

/// Kinds the "next breadcrumb" control jumps between
pub const USER_ACTION_KINDS: [EventKind; 5] = [
    EventKind::Error,
    EventKind::Init,
    EventKind::Navigation,
    EventKind::Ui,
    EventKind::User,
];

impl EventKind {
    /// Classify a raw event from its recorded type and category
    pub fn classify(event_type: Option<&str>, category: Option<&str>) -> Self {
        match (event_type, category) {
            (Some("error"), _) | (_, Some("error")) => EventKind::Error,
            (Some("init"), _) | (_, Some("replay.init")) => EventKind::Init,
            (Some("navigation"), _) | (_, Some("navigation")) => EventKind::Navigation,
            (Some("ui"), _) => EventKind::Ui,
            (_, Some(c)) if c.starts_with("ui.") => EventKind::Ui,
            (Some("user"), _) => EventKind::User,
            (Some("http"), _) | (_, Some("xhr")) | (_, Some("fetch")) => EventKind::Http,
            (Some("debug"), _) | (_, Some("console")) => EventKind::Console,
            _ => EventKind::Default,
        }
    }

    /// Whether the "next breadcrumb" control stops at this kind
    pub fn is_user_action(&self) -> bool {
        USER_ACTION_KINDS.contains(self)
    }

    /// Display name for the kind
    pub fn display_name(&self) -> &'static str {
        match self {
            EventKind::Error => "Error",
            EventKind::Init => "Replay Start",
            EventKind::Navigation => "Navigation",
            EventKind::Ui => "UI",
            EventKind::User => "User Action",
            EventKind::Http => "Network",
            EventKind::Console => "Console",
            EventKind::Default => "Event",
        }
    }
}

/// A normalized, immutable session event
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    pub kind: EventKind,
    /// Absolute time (Unix milliseconds)
    pub timestamp_ms: i64,
    pub category: Option<String>,
    pub message: Option<String>,
}

impl SessionEvent {
    /// Normalize a raw event; `None` when it has no usable timestamp
    pub fn from_raw(raw: &RawEvent) -> Option<Self> {
        let timestamp_ms = raw.timestamp_ms()?;
        Some(Self {
            kind: EventKind::classify(raw.event_type.as_deref(), raw.category.as_deref()),
            timestamp_ms,
            category: raw.category.clone(),
            message: raw.message.clone(),
        })
    }
}

/// Session events sorted ascending by timestamp
///
/// Sorting is stable: events sharing a timestamp keep their input order.
#[derive(Debug, Clone, Default)]
pub struct BreadcrumbIndex {
    events: Vec<SessionEvent>,
}

impl BreadcrumbIndex {
    /// Normalize and sort raw events, dropping those without a usable timestamp
    pub fn build(raw_events: &[RawEvent]) -> Self {
        let mut events: Vec<SessionEvent> =
            raw_events.iter().filter_map(SessionEvent::from_raw).collect();

        let dropped = raw_events.len() - events.len();
        if dropped > 0 {
            tracing::debug!("Dropped {} events without a usable timestamp", dropped);
        }

        events.sort_by_key(|e| e.timestamp_ms);
        Self { events }
    }

    /// Number of indexed events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in timestamp order
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Earliest event of one of `kinds` at or after `target_timestamp_ms`
    ///
    /// `None` means there are no more such events ahead.
    pub fn next_event_of_interest(
        &self,
        kinds: &[EventKind],
        target_timestamp_ms: i64,
    ) -> Option<&SessionEvent> {
        let start = self
            .events
            .partition_point(|e| e.timestamp_ms < target_timestamp_ms);

        self.events[start..].iter().find(|e| kinds.contains(&e.kind))
    }

    /// Earliest event of any kind strictly after `timestamp_ms`
    pub fn next_event_after(&self, timestamp_ms: i64) -> Option<&SessionEvent> {
        let idx = self.events.partition_point(|e| e.timestamp_ms <= timestamp_ms);
        self.events.get(idx)
    }
}

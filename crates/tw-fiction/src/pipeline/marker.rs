use std::fmt;

use tw_core::{Component, EntityId};

/// Which kind of transient marker an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Raw player input awaiting a handler.
    CommandInput,
    /// A resolved command whose action is running.
    CommandAction,
    /// A description queued for rendering.
    ShowDescription,
    /// Text queued for the presentation layer.
    Output,
    /// A request to end the session.
    Quit,
}

impl MarkerKind {
    /// Lowercase label, also used as the component name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommandInput => "command input",
            Self::CommandAction => "command action",
            Self::ShowDescription => "show description",
            Self::Output => "output",
            Self::Quit => "quit",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component that only lives for part of a turn, passing information from
/// one system to a later one.
pub trait Marker: Component {
    /// The kind recorded in the marker log.
    const KIND: MarkerKind;
}

/// Whether a marker was queued or consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAction {
    /// A system or action attached the marker.
    Produced,
    /// A system removed the marker after handling it.
    Consumed,
}

/// One produce or consume step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerEvent {
    /// Turn number, starting at 1.
    pub turn: u64,
    /// Name of the system running at the time.
    pub system: String,
    /// Produced or consumed.
    pub action: MarkerAction,
    /// The marker type.
    pub kind: MarkerKind,
    /// The entity carrying the marker.
    pub entity: EntityId,
}

/// Record of every marker produced and consumed, for auditing a turn.
#[derive(Debug, Default)]
pub struct MarkerLog {
    events: Vec<MarkerEvent>,
    max_events: usize,
}

impl MarkerLog {
    /// Create a log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: MarkerEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// All recorded events.
    pub fn events(&self) -> &[MarkerEvent] {
        &self.events
    }

    /// Events from one turn.
    pub fn events_in_turn(&self, turn: u64) -> Vec<&MarkerEvent> {
        self.events.iter().filter(|e| e.turn == turn).collect()
    }

    /// Events recorded while `system` was running.
    pub fn events_by_system(&self, system: &str) -> Vec<&MarkerEvent> {
        self.events.iter().filter(|e| e.system == system).collect()
    }

    /// Markers of `kind` produced in `turn` minus those consumed in it. Zero
    /// when every producer has a matching consumer.
    pub fn unconsumed(&self, turn: u64, kind: MarkerKind) -> i64 {
        self.events
            .iter()
            .filter(|e| e.turn == turn && e.kind == kind)
            .map(|e| match e.action {
                MarkerAction::Produced => 1,
                MarkerAction::Consumed => -1,
            })
            .sum()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

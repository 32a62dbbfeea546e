//! Page events
//!
//! Input events are broadcast to every unit listening for their
//! [`EventKind`]; timer, frame and intersection events go only to the unit
//! that scheduled or created them.

use folio_dom::NodeId;

use crate::{IntersectionObserverEntry, ObserverId, TimerId};

/// Event types a unit can listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DomContentLoaded,
    Scroll,
    Resize,
    Click,
    KeyDown,
    MouseMove,
    MouseEnter,
    MouseLeave,
    Submit,
}

/// Keyboard event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// Key identifier (`"ArrowUp"`, `"a"`, ...)
    pub key: String,
}

impl KeyboardEvent {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

/// Mouse position event
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseEvent {
    pub client_x: f64,
    pub client_y: f64,
}

/// A page event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DomContentLoaded,
    Scroll { scroll_y: f64 },
    Resize { width: f64, height: f64 },
    Click { target: NodeId },
    KeyDown(KeyboardEvent),
    MouseMove(MouseEvent),
    MouseEnter { target: NodeId },
    MouseLeave { target: NodeId },
    Submit { form: NodeId },
    Intersection {
        observer: ObserverId,
        entries: Vec<IntersectionObserverEntry>,
    },
    Timer { timer: TimerId, token: u64 },
    AnimationFrame { token: u64, timestamp: f64 },
}

impl Event {
    /// Listener kind for broadcast events; None for targeted ones
    pub fn kind(&self) -> Option<EventKind> {
        Some(match self {
            Self::DomContentLoaded => EventKind::DomContentLoaded,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Resize { .. } => EventKind::Resize,
            Self::Click { .. } => EventKind::Click,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::MouseMove(_) => EventKind::MouseMove,
            Self::MouseEnter { .. } => EventKind::MouseEnter,
            Self::MouseLeave { .. } => EventKind::MouseLeave,
            Self::Submit { .. } => EventKind::Submit,
            Self::Intersection { .. } | Self::Timer { .. } | Self::AnimationFrame { .. } => {
                return None;
            }
        })
    }

    /// Whether a listener may prevent the default action
    pub fn is_cancelable(&self) -> bool {
        matches!(self, Self::Click { .. } | Self::KeyDown(_) | Self::Submit { .. })
    }
}

/// Result of dispatching an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    /// Number of listeners the event reached
    pub listeners: usize,
}

//! Folio page runtime
//!
//! A host-driven, single-threaded stand-in for the browser side of a page:
//! the behavior units of a site attach to a [`Page`], register listeners,
//! schedule timeouts and animation frames, and observe element visibility.
//! Time only moves when the host calls [`Page::advance`], which makes every
//! run reproducible.
//!
//! Features:
//! - Event listeners (scroll, resize, click, keydown, mouse, submit)
//! - Timers and animation frames on a virtual clock
//! - Intersection observers with thresholds and root margins
//! - Console with `%c` styled messages
//! - Smooth scrolling and alert dialogs

mod console;
mod events;
mod intersection_observer;
mod page;
mod scroll;
mod timers;
mod window;

pub use console::{Console, ConsoleEntry, ConsoleLevel, ConsoleSegment};
pub use events::{DispatchOutcome, Event, EventKind, KeyboardEvent, MouseEvent};
pub use intersection_observer::{
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverManager,
    IntersectionObserverOptions, Length, ObserverId, RootMargin,
};
pub use page::{Behavior, Page, Scope, UnitId};
pub use scroll::{ScrollAnimation, ScrollBehavior, same_document_fragment};
pub use timers::{FrameRequest, Timer, TimerId, TimerManager};
pub use window::{Window, WindowConfig};

/// Runtime error
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Dom(#[from] folio_dom::DomError),

    #[error("{0} is not supported by this window")]
    Unsupported(&'static str),

    #[error("invalid root margin `{0}`")]
    InvalidRootMargin(String),
}

//! Page host
//!
//! A [`Page`] owns the document, the window and every mounted [`Behavior`].
//! Units never call each other; they only see the page through a [`Scope`]
//! handed to them for the duration of one callback. Anything a callback
//! cannot do synchronously (mounting another unit, an instant scroll) is
//! queued and applied once the callback returns.

use std::collections::HashMap;

use folio_dom::{DOMRect, Document, NodeId, ReadyState};

use crate::{
    Console, DispatchOutcome, Event, EventKind, IntersectionObserverManager,
    IntersectionObserverOptions, KeyboardEvent, MouseEvent, ObserverId, RuntimeError,
    ScrollAnimation, ScrollBehavior, TimerId, TimerManager, Window, same_document_fragment,
};

/// Bound on observer notification rounds per settle; each round can only
/// be caused by a unit changing geometry from inside an observer callback.
const MAX_OBSERVER_ROUNDS: usize = 16;

/// Handle of a mounted unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(usize);

impl UnitId {
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

/// An independently attached piece of page behavior
pub trait Behavior {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Look up elements, register listeners and observers
    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError>;

    /// React to a listened-for event, or to a timer/frame/observer callback
    /// this unit scheduled
    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event);
}

/// Everything on the page except the units themselves
struct Host {
    document: Document,
    window: Window,
    console: Console,
    timers: TimerManager,
    observers: IntersectionObserverManager,
    listeners: HashMap<EventKind, Vec<UnitId>>,
    spawned: Vec<Box<dyn Behavior>>,
    scroll_animation: Option<ScrollAnimation>,
    pending_scroll: Option<f64>,
    navigations: Vec<String>,
    default_prevented: bool,
    now: f64,
}

/// A unit's view of the page during one callback
pub struct Scope<'a> {
    host: &'a mut Host,
    unit: UnitId,
}

impl Scope<'_> {
    pub fn document(&self) -> &Document {
        &self.host.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.host.document
    }

    pub fn window(&self) -> &Window {
        &self.host.window
    }

    pub fn console(&mut self) -> &mut Console {
        &mut self.host.console
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> f64 {
        self.host.now
    }

    /// Subscribe this unit to an event kind; repeated calls are no-ops
    pub fn listen(&mut self, kind: EventKind) {
        let units = self.host.listeners.entry(kind).or_default();
        if !units.contains(&self.unit) {
            units.push(self.unit);
        }
    }

    /// Schedule an [`Event::Timer`] carrying `token` for this unit
    pub fn set_timeout(&mut self, delay_ms: f64, token: u64) -> TimerId {
        self.host
            .timers
            .set_timeout(self.unit, token, delay_ms, self.host.now)
    }

    /// Schedule an [`Event::AnimationFrame`] carrying `token` for this unit
    pub fn request_animation_frame(&mut self, token: u64) {
        self.host.timers.request_frame(self.unit, token);
    }

    /// Create an intersection observer reporting to this unit
    pub fn create_intersection_observer(
        &mut self,
        options: IntersectionObserverOptions,
    ) -> Result<ObserverId, RuntimeError> {
        if !self.host.window.supports_intersection_observer() {
            return Err(RuntimeError::Unsupported("IntersectionObserver"));
        }
        Ok(self.host.observers.create(self.unit, options))
    }

    pub fn observe(&mut self, observer: ObserverId, target: NodeId) {
        if let Some(observer) = self.host.observers.get_mut(observer) {
            observer.observe(target);
        }
    }

    pub fn unobserve(&mut self, observer: ObserverId, target: NodeId) {
        if let Some(observer) = self.host.observers.get_mut(observer) {
            observer.unobserve(target);
        }
    }

    /// Cancel the default action of the event being dispatched
    pub fn prevent_default(&mut self) {
        self.host.default_prevented = true;
    }

    /// Scroll the window (`window.scrollTo`)
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let window = &self.host.window;
        let to = window.clamp_scroll(top);
        match behavior {
            ScrollBehavior::Smooth if window.smooth_scroll_duration() > 0.0 => {
                self.host.pending_scroll = None;
                self.host.scroll_animation = Some(ScrollAnimation::new(
                    window.scroll_y(),
                    to,
                    self.host.now,
                    window.smooth_scroll_duration(),
                ));
            }
            _ => {
                self.host.scroll_animation = None;
                self.host.pending_scroll = Some(to);
            }
        }
    }

    /// Show a blocking alert dialog; the host acknowledges it immediately
    pub fn alert(&mut self, message: &str) {
        tracing::info!(message, "alert");
        self.host.window.push_alert(message);
    }

    /// Mount another unit once the current callback returns
    pub fn spawn(&mut self, unit: Box<dyn Behavior>) {
        self.host.spawned.push(unit);
    }
}

/// A loaded page with its mounted behavior units
pub struct Page {
    host: Host,
    units: Vec<Box<dyn Behavior>>,
}

impl Page {
    pub fn new(document: Document, window: Window) -> Self {
        Self {
            host: Host {
                document,
                window,
                console: Console::new(),
                timers: TimerManager::new(),
                observers: IntersectionObserverManager::new(),
                listeners: HashMap::new(),
                spawned: Vec::new(),
                scroll_animation: None,
                pending_scroll: None,
                navigations: Vec::new(),
                default_prevented: false,
                now: 0.0,
            },
            units: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.host.document
    }

    /// Mutate the document from outside any unit (tests, the host)
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.host.document
    }

    pub fn window(&self) -> &Window {
        &self.host.window
    }

    pub fn console(&self) -> &Console {
        &self.host.console
    }

    pub fn now(&self) -> f64 {
        self.host.now
    }

    /// Names of mounted units, in mount order
    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.name()).collect()
    }

    /// Navigations triggered by un-prevented default actions
    pub fn navigations(&self) -> &[String] {
        &self.host.navigations
    }

    /// Whether timers, frames or a smooth scroll are still pending
    pub fn has_pending_work(&self) -> bool {
        self.host.timers.has_pending() || self.host.scroll_animation.is_some()
    }

    /// Mount and attach a unit
    pub fn mount(&mut self, unit: Box<dyn Behavior>) -> UnitId {
        let id = self.mount_unit(unit);
        self.settle();
        id
    }

    fn mount_unit(&mut self, unit: Box<dyn Behavior>) -> UnitId {
        let id = UnitId(self.units.len());
        self.units.push(unit);
        let behavior = &mut self.units[id.0];
        let name = behavior.name();
        let mut scope = Scope {
            host: &mut self.host,
            unit: id,
        };
        match behavior.attach(&mut scope) {
            Ok(()) => tracing::debug!(unit = name, "behavior attached"),
            Err(err) => tracing::warn!(unit = name, %err, "behavior failed to attach"),
        }
        id
    }

    fn dispatch_to(&mut self, unit: UnitId, event: &Event) {
        let Some(behavior) = self.units.get_mut(unit.0) else {
            return;
        };
        let mut scope = Scope {
            host: &mut self.host,
            unit,
        };
        behavior.handle(&mut scope, event);
    }

    /// Apply queued work: spawned units, instant scrolls, observer callbacks
    fn settle(&mut self) {
        for _ in 0..MAX_OBSERVER_ROUNDS {
            while !self.host.spawned.is_empty() {
                for unit in std::mem::take(&mut self.host.spawned) {
                    self.mount_unit(unit);
                }
            }
            if let Some(y) = self.host.pending_scroll.take() {
                self.set_scroll(y);
            }

            let viewport = DOMRect::from_xywh(
                0.0,
                0.0,
                self.host.window.inner_width(),
                self.host.window.inner_height(),
            );
            let batches = self.host.observers.process(
                viewport,
                &self.host.document,
                self.host.window.scroll_y(),
                self.host.now,
            );
            if batches.is_empty() && self.host.spawned.is_empty() && self.host.pending_scroll.is_none() {
                return;
            }
            for (owner, observer, entries) in batches {
                self.dispatch_to(owner, &Event::Intersection { observer, entries });
            }
        }
        tracing::warn!("intersection observers did not settle");
    }

    /// Broadcast an event to its listeners
    pub fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        let Some(kind) = event.kind() else {
            return DispatchOutcome::default();
        };
        let listeners = self.host.listeners.get(&kind).cloned().unwrap_or_default();

        self.host.default_prevented = false;
        for &unit in &listeners {
            self.dispatch_to(unit, &event);
        }
        let outcome = DispatchOutcome {
            default_prevented: event.is_cancelable() && self.host.default_prevented,
            listeners: listeners.len(),
        };
        self.host.default_prevented = false;

        self.settle();
        outcome
    }

    fn set_scroll(&mut self, y: f64) {
        if self.host.window.set_scroll_y(y) {
            let scroll_y = self.host.window.scroll_y();
            self.dispatch(Event::Scroll { scroll_y });
        }
    }

    /// Move `Loading` documents to `Interactive` and fire `DOMContentLoaded`,
    /// then mark the document complete
    pub fn finish_loading(&mut self) {
        if self.host.document.ready_state() != ReadyState::Loading {
            return;
        }
        self.host.document.set_ready_state(ReadyState::Interactive);
        self.dispatch(Event::DomContentLoaded);
        self.host.document.set_ready_state(ReadyState::Complete);
    }

    /// User scroll to an absolute offset
    pub fn scroll_to(&mut self, y: f64) {
        self.host.scroll_animation = None;
        self.set_scroll(y);
        self.settle();
    }

    /// User scroll by a delta
    pub fn scroll_by(&mut self, dy: f64) {
        let y = self.host.window.scroll_y() + dy;
        self.scroll_to(y);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.host.window.resize(width, height) {
            self.dispatch(Event::Resize { width, height });
        }
    }

    /// Click an element; un-prevented clicks on same-document links jump
    pub fn click(&mut self, target: NodeId) -> DispatchOutcome {
        let outcome = self.dispatch(Event::Click { target });
        if !outcome.default_prevented {
            self.follow_link(target);
        }
        outcome
    }

    fn follow_link(&mut self, target: NodeId) {
        let doc = &self.host.document;
        let link = std::iter::once(target)
            .chain(doc.tree().ancestors(target))
            .find(|&n| doc.element(n).is_some_and(|e| e.tag == "a" && e.has_attr("href")));
        let Some(href) = link.and_then(|l| doc.attr(l, "href")) else {
            return;
        };

        match same_document_fragment(doc.url(), href) {
            Some(fragment) => {
                if let Some(section) = doc.get_element_by_id(&fragment) {
                    let top = doc.geometry(section).offset_top;
                    self.scroll_to(top);
                }
            }
            None => {
                tracing::info!(href, "navigation");
                self.host.navigations.push(href.to_string());
            }
        }
    }

    pub fn key_down(&mut self, key: &str) -> DispatchOutcome {
        self.dispatch(Event::KeyDown(KeyboardEvent::new(key)))
    }

    /// Press each key in turn
    pub fn type_keys<S: AsRef<str>>(&mut self, keys: &[S]) {
        for key in keys {
            self.key_down(key.as_ref());
        }
    }

    pub fn mouse_move(&mut self, x: f64, y: f64) {
        self.dispatch(Event::MouseMove(MouseEvent {
            client_x: x,
            client_y: y,
        }));
    }

    pub fn mouse_enter(&mut self, target: NodeId) {
        self.dispatch(Event::MouseEnter { target });
    }

    pub fn mouse_leave(&mut self, target: NodeId) {
        self.dispatch(Event::MouseLeave { target });
    }

    /// Submit a form; un-prevented submissions navigate to the form action
    pub fn submit(&mut self, form: NodeId) -> DispatchOutcome {
        let outcome = self.dispatch(Event::Submit { form });
        if !outcome.default_prevented {
            let doc = &self.host.document;
            let action = doc.attr(form, "action").unwrap_or(doc.url()).to_string();
            tracing::info!(%action, "form submitted natively");
            self.host.navigations.push(action);
        }
        outcome
    }

    fn needs_frame(&self) -> bool {
        self.host.timers.has_frame_requests() || self.host.scroll_animation.is_some()
    }

    fn next_frame_time(&self) -> f64 {
        let interval = self.host.window.frame_interval();
        ((self.host.now / interval).floor() + 1.0) * interval
    }

    /// Time of the next timer or frame, if any
    pub fn next_wakeup(&self) -> Option<f64> {
        let frame = self.needs_frame().then(|| self.next_frame_time());
        match (self.host.timers.next_due(), frame) {
            (Some(t), Some(f)) => Some(t.min(f)),
            (t, f) => t.or(f),
        }
    }

    /// Move virtual time forward, running every timer and frame that falls
    /// inside the window in order
    pub fn advance(&mut self, ms: f64) {
        let end = self.host.now + ms.max(0.0);
        while let Some(next) = self.next_wakeup() {
            if next > end {
                break;
            }
            let is_frame = self.needs_frame() && next == self.next_frame_time();
            self.host.now = self.host.now.max(next);
            if is_frame {
                self.run_frame();
            } else if let Some(timer) = self.host.timers.pop_due(self.host.now) {
                let event = Event::Timer {
                    timer: timer.id,
                    token: timer.token,
                };
                self.dispatch_to(timer.owner, &event);
                self.settle();
            }
        }
        self.host.now = end;
    }

    /// Advance until nothing is pending or `max_ms` has passed; returns true
    /// if the page went idle
    pub fn run_until_idle(&mut self, max_ms: f64) -> bool {
        let deadline = self.host.now + max_ms;
        while let Some(next) = self.next_wakeup() {
            if next > deadline {
                return false;
            }
            let step = next - self.host.now;
            self.advance(step);
        }
        true
    }

    fn run_frame(&mut self) {
        let timestamp = self.host.now;
        if let Some(animation) = self.host.scroll_animation {
            let (y, done) = animation.sample(timestamp);
            if done {
                self.host.scroll_animation = None;
            }
            self.set_scroll(y);
        }
        for request in self.host.timers.take_frame_requests() {
            let event = Event::AnimationFrame {
                token: request.token,
                timestamp,
            };
            self.dispatch_to(request.owner, &event);
        }
        self.settle();
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.host.document.url())
            .field("units", &self.unit_names())
            .field("now", &self.host.now)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::ElementGeometry;

    /// Records everything it receives
    #[derive(Default)]
    struct Recorder {
        seen: std::rc::Rc<std::cell::RefCell<Vec<Event>>>,
        prevent: bool,
    }

    impl Behavior for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
            scope.listen(EventKind::Scroll);
            scope.listen(EventKind::Click);
            scope.listen(EventKind::Click);
            scope.listen(EventKind::KeyDown);
            scope.set_timeout(100.0, 1);
            scope.set_timeout(50.0, 2);
            scope.request_animation_frame(3);
            Ok(())
        }

        fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
            if self.prevent && matches!(event, Event::Click { .. }) {
                scope.prevent_default();
            }
            if let Event::KeyDown(key) = event {
                if key.key == "j" {
                    scope.scroll_to(500.0, ScrollBehavior::Smooth);
                }
            }
            self.seen.borrow_mut().push(event.clone());
        }
    }

    fn page_with_section() -> (Page, NodeId, NodeId) {
        let mut doc = Document::new("https://folio.test/");
        let section = doc.create_element("section");
        doc.set_attr(section, "id", "work");
        doc.set_geometry(section, ElementGeometry::new(1500.0, 400.0));
        let link = doc.create_element("a");
        doc.set_attr(link, "href", "#work");
        let body = doc.body();
        doc.append_child(body, section).unwrap();
        doc.append_child(body, link).unwrap();
        (Page::new(doc, Window::default()), section, link)
    }

    #[test]
    fn test_timers_and_frames_fire_in_time_order() {
        let (mut page, _, _) = page_with_section();
        let recorder = Recorder::default();
        let seen = recorder.seen.clone();
        page.mount(Box::new(recorder));

        page.advance(16.0);
        page.advance(200.0);
        let tokens: Vec<u64> = seen
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Timer { token, .. } | Event::AnimationFrame { token, .. } => Some(*token),
                _ => None,
            })
            .collect();
        assert_eq!(tokens, vec![3, 2, 1]);
        assert_eq!(page.now(), 216.0);
        assert!(!page.has_pending_work());
    }

    #[test]
    fn test_listen_is_idempotent() {
        let (mut page, _, link) = page_with_section();
        page.mount(Box::new(Recorder::default()));
        assert_eq!(page.click(link).listeners, 1);
    }

    #[test]
    fn test_unprevented_link_click_jumps() {
        let (mut page, _, link) = page_with_section();
        let outcome = page.click(link);
        assert!(!outcome.default_prevented);
        assert_eq!(page.window().scroll_y(), 1500.0);
    }

    #[test]
    fn test_prevented_link_click_stays() {
        let (mut page, _, link) = page_with_section();
        page.mount(Box::new(Recorder {
            prevent: true,
            ..Recorder::default()
        }));
        assert!(page.click(link).default_prevented);
        assert_eq!(page.window().scroll_y(), 0.0);
    }

    #[test]
    fn test_smooth_scroll_animates_over_frames() {
        let (mut page, _, _) = page_with_section();
        let recorder = Recorder::default();
        let seen = recorder.seen.clone();
        page.mount(Box::new(recorder));

        page.key_down("j");
        page.advance(100.0);
        let mid = page.window().scroll_y();
        assert!(mid > 0.0 && mid < 500.0, "mid-animation offset {mid}");

        assert!(page.run_until_idle(2000.0));
        assert_eq!(page.window().scroll_y(), 500.0);
        let scrolls = seen
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Scroll { .. }))
            .count();
        assert!(scrolls > 5);
    }

    #[test]
    fn test_unsupported_observer() {
        struct NeedsObserver;
        impl Behavior for NeedsObserver {
            fn name(&self) -> &'static str {
                "needs-observer"
            }
            fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
                scope.create_intersection_observer(IntersectionObserverOptions::default())?;
                Ok(())
            }
            fn handle(&mut self, _: &mut Scope<'_>, _: &Event) {}
        }

        let window = Window::new(crate::WindowConfig {
            intersection_observer: false,
            ..crate::WindowConfig::default()
        });
        let mut page = Page::new(Document::default(), window);
        page.mount(Box::new(NeedsObserver));
        assert_eq!(page.unit_names(), vec!["needs-observer"]);
    }

    #[test]
    fn test_finish_loading_only_once() {
        let mut page = Page::new(Document::empty("about:blank"), Window::default());
        page.finish_loading();
        assert_eq!(page.document().ready_state(), ReadyState::Complete);
        page.finish_loading();
    }
}

//! Animated statistics counters
//!
//! Counters start the first time the stats region is at least half visible.
//! Each one climbs by a fixed increment per animation frame, showing the
//! floored value, and lands exactly on its target.

use folio_dom::NodeId;
use folio_runtime::{Behavior, Event, IntersectionObserverOptions, ObserverId, RuntimeError, Scope};

use crate::SiteConfig;

/// Parse the leading integer of `text` the way `parseInt` does
/// (`"150+"` is 150, `"abc"` is nothing)
pub fn parse_target(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Counter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    Idle,
    Counting,
    Done,
}

/// One animated number
#[derive(Debug, Clone)]
pub struct Counter {
    pub node: NodeId,
    pub target: i64,
    pub current: f64,
    pub increment: f64,
    pub phase: CounterPhase,
}

impl Counter {
    /// Frames shorter than 1ms are treated as 1ms; a non-positive duration
    /// lands on the target in one step
    pub fn new(node: NodeId, target: i64, duration_ms: f64, frame_ms: f64) -> Self {
        let frames = duration_ms.max(0.0) / frame_ms.max(1.0);
        Self {
            node,
            target,
            current: 0.0,
            increment: target as f64 / frames,
            phase: CounterPhase::Idle,
        }
    }

    /// Advance one frame; returns the text to display
    pub fn step(&mut self) -> String {
        self.current += self.increment;
        if self.current < self.target as f64 {
            self.phase = CounterPhase::Counting;
            (self.current.floor() as i64).to_string()
        } else {
            self.phase = CounterPhase::Done;
            self.target.to_string()
        }
    }
}

/// Stat counter unit
pub struct StatCounter {
    counters_selector: String,
    stats_selector: String,
    threshold: f64,
    duration_ms: f64,
    frame_ms: f64,
    counters: Vec<Counter>,
    observer: Option<ObserverId>,
    has_animated: bool,
}

impl StatCounter {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            counters_selector: config.selectors.counters.clone(),
            stats_selector: config.selectors.stats.clone(),
            threshold: config.counter_threshold,
            duration_ms: config.counter_duration_ms,
            frame_ms: config.counter_frame_ms,
            counters: Vec::new(),
            observer: None,
            has_animated: false,
        }
    }

    fn start(&mut self, scope: &mut Scope<'_>) {
        if self.has_animated {
            return;
        }
        self.has_animated = true;
        tracing::debug!(counters = self.counters.len(), "counting up");
        for index in 0..self.counters.len() {
            self.update(scope, index);
        }
    }

    fn update(&mut self, scope: &mut Scope<'_>, index: usize) {
        let Some(counter) = self.counters.get_mut(index) else {
            return;
        };
        if counter.phase == CounterPhase::Done {
            return;
        }
        let text = counter.step();
        let (node, phase) = (counter.node, counter.phase);
        if let Err(err) = scope.document_mut().set_text_content(node, &text) {
            tracing::warn!(%err, "counter element vanished");
            return;
        }
        if phase == CounterPhase::Counting {
            scope.request_animation_frame(index as u64);
        }
    }

    /// Show every target at once
    fn snap(&mut self, scope: &mut Scope<'_>) {
        self.has_animated = true;
        for counter in &mut self.counters {
            counter.current = counter.target as f64;
            counter.phase = CounterPhase::Done;
            if let Err(err) = scope
                .document_mut()
                .set_text_content(counter.node, &counter.target.to_string())
            {
                tracing::warn!(%err, "counter element vanished");
            }
        }
    }
}

impl Behavior for StatCounter {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        let doc = scope.document();
        for node in doc.query_selector_all(&self.counters_selector)? {
            match doc.attr(node, "data-target").and_then(parse_target) {
                Some(target) => self.counters.push(Counter::new(node, target, self.duration_ms, self.frame_ms)),
                None => tracing::warn!(?node, "counter without a numeric data-target"),
            }
        }
        if self.counters.is_empty() {
            return Ok(());
        }
        let stats = doc.query_selector(&self.stats_selector)?;

        match scope.create_intersection_observer(IntersectionObserverOptions::with_threshold(self.threshold)) {
            Ok(observer) => {
                self.observer = Some(observer);
                if let Some(stats) = stats {
                    scope.observe(observer, stats);
                }
            }
            Err(RuntimeError::Unsupported(_)) => self.snap(scope),
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
        match event {
            Event::Intersection { observer, entries } if Some(*observer) == self.observer => {
                if entries.iter().any(|e| e.is_intersecting) {
                    self.start(scope);
                }
            }
            Event::AnimationFrame { token, .. } => self.update(scope, *token as usize),
            _ => {}
        }
    }
}

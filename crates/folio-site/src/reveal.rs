//! Scroll-triggered reveal of content blocks

use std::collections::HashSet;

use folio_dom::NodeId;
use folio_runtime::{Behavior, Event, IntersectionObserverOptions, ObserverId, RuntimeError, Scope};

use crate::SiteConfig;

/// CSS `transition-delay` for the element at `index`
pub fn transition_delay(index: usize, stagger: f64) -> String {
    let seconds = (index as f64 * stagger * 1000.0).round() / 1000.0;
    format!("{seconds}s")
}

/// Adds `visible` to each watched element the first time it enters the
/// viewport, then stops watching it
pub struct RevealOnScroll {
    selector: String,
    threshold: f64,
    root_margin: String,
    stagger: f64,
    observer: Option<ObserverId>,
    handled: HashSet<NodeId>,
}

impl RevealOnScroll {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            selector: config.selectors.reveal.clone(),
            threshold: config.reveal_threshold,
            root_margin: config.reveal_root_margin.clone(),
            stagger: config.reveal_stagger,
            observer: None,
            handled: HashSet::new(),
        }
    }

    fn reveal(&mut self, scope: &mut Scope<'_>, target: NodeId) {
        if !self.handled.insert(target) {
            return;
        }
        scope.document_mut().add_class(target, "visible");
        if let Some(observer) = self.observer {
            scope.unobserve(observer, target);
        }
        tracing::debug!(?target, "revealed");
    }
}

impl Behavior for RevealOnScroll {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        let elements = scope.document().query_selector_all(&self.selector)?;
        for (i, &el) in elements.iter().enumerate() {
            let delay = transition_delay(i, self.stagger);
            scope.document_mut().set_style(el, "transition-delay", &delay);
        }

        let options = IntersectionObserverOptions::with_threshold(self.threshold).root_margin(&self.root_margin)?;
        match scope.create_intersection_observer(options) {
            Ok(observer) => {
                self.observer = Some(observer);
                for &el in &elements {
                    scope.observe(observer, el);
                }
            }
            Err(RuntimeError::Unsupported(_)) => {
                tracing::debug!("no intersection observer, revealing everything");
                for el in elements {
                    self.reveal(scope, el);
                }
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
        let Event::Intersection { observer, entries } = event else {
            return;
        };
        if Some(*observer) != self.observer {
            return;
        }
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            self.reveal(scope, entry.target);
        }
    }
}

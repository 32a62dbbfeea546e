//! Deferred image loading

use std::collections::HashSet;

use folio_dom::NodeId;
use folio_runtime::{Behavior, Event, IntersectionObserverOptions, ObserverId, RuntimeError, Scope};

use crate::SiteConfig;

/// Promotes `data-src` to `src` once an image nears the viewport
pub struct LazyImages {
    selector: String,
    observer: Option<ObserverId>,
    handled: HashSet<NodeId>,
}

impl LazyImages {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            selector: config.selectors.lazy_images.clone(),
            observer: None,
            handled: HashSet::new(),
        }
    }

    fn load(&mut self, scope: &mut Scope<'_>, img: NodeId) {
        if !self.handled.insert(img) {
            return;
        }
        if let Some(observer) = self.observer {
            scope.unobserve(observer, img);
        }
        let doc = scope.document_mut();
        if let Some(src) = doc.attr(img, "data-src").map(str::to_string) {
            doc.set_attr(img, "src", &src);
            doc.remove_attr(img, "data-src");
            tracing::debug!(%src, "image loaded");
        }
    }
}

impl Behavior for LazyImages {
    fn name(&self) -> &'static str {
        "lazy-images"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        let images = scope.document().query_selector_all(&self.selector)?;
        let observer = match scope.create_intersection_observer(IntersectionObserverOptions::default()) {
            Ok(observer) => observer,
            Err(RuntimeError::Unsupported(_)) => {
                tracing::debug!("no intersection observer, images stay deferred");
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        self.observer = Some(observer);
        for img in images {
            scope.observe(observer, img);
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
            self.load(scope, entry.target);
        }
    }
}

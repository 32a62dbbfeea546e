//! Custom cursor
//!
//! A dot that tracks the pointer exactly and a ring that follows it after a
//! short delay. Both grow over interactive elements. Touch devices keep the
//! native cursor.

use std::collections::HashMap;

use folio_dom::NodeId;
use folio_runtime::{Behavior, Event, EventKind, RuntimeError, Scope};

use crate::SiteConfig;

const DOT_CSS: &str = "width: 10px; height: 10px; border: 2px solid rgba(167, 139, 250, 0.8); \
    border-radius: 50%; position: fixed; pointer-events: none; z-index: 9999; \
    transition: transform 0.2s ease; display: none;";

const RING_CSS: &str = "width: 40px; height: 40px; border: 1px solid rgba(167, 139, 250, 0.3); \
    border-radius: 50%; position: fixed; pointer-events: none; z-index: 9998; \
    transition: all 0.3s ease; display: none;";

pub struct CustomCursor {
    interactive_selector: String,
    follow_delay_ms: f64,
    follower_offset: f64,
    dot: Option<NodeId>,
    ring: Option<NodeId>,
    interactive: Vec<NodeId>,
    /// Delayed ring positions keyed by timer token
    pending: HashMap<u64, (f64, f64)>,
    next_token: u64,
}

impl CustomCursor {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            interactive_selector: config.selectors.interactive.clone(),
            follow_delay_ms: config.cursor_follow_delay_ms,
            follower_offset: config.cursor_follower_offset,
            dot: None,
            ring: None,
            interactive: Vec::new(),
            pending: HashMap::new(),
            next_token: 0,
        }
    }

    fn create(scope: &mut Scope<'_>, class: &str, css: &str) -> Result<NodeId, RuntimeError> {
        let doc = scope.document_mut();
        let node = doc.create_element("div");
        doc.set_attr(node, "class", class);
        doc.set_css_text(node, css);
        let body = doc.body();
        doc.append_child(body, node)?;
        Ok(node)
    }

    fn set_scale(&self, scope: &mut Scope<'_>, dot: &str, ring: &str) {
        let doc = scope.document_mut();
        if let Some(node) = self.dot {
            doc.set_style(node, "transform", dot);
        }
        if let Some(node) = self.ring {
            doc.set_style(node, "transform", ring);
        }
    }
}

impl Behavior for CustomCursor {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        if scope.window().is_touch_capable() {
            tracing::debug!("touch device, keeping the native cursor");
            return Ok(());
        }
        self.interactive = scope.document().query_selector_all(&self.interactive_selector)?;
        self.dot = Some(Self::create(scope, "custom-cursor", DOT_CSS)?);
        self.ring = Some(Self::create(scope, "custom-cursor-follower", RING_CSS)?);

        scope.listen(EventKind::MouseMove);
        scope.listen(EventKind::MouseEnter);
        scope.listen(EventKind::MouseLeave);
        Ok(())
    }

    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
        let (Some(dot), Some(ring)) = (self.dot, self.ring) else {
            return;
        };
        match event {
            Event::MouseMove(mouse) => {
                let doc = scope.document_mut();
                doc.set_style(dot, "display", "block");
                doc.set_style(ring, "display", "block");
                doc.set_style(dot, "left", &format!("{}px", mouse.client_x));
                doc.set_style(dot, "top", &format!("{}px", mouse.client_y));

                let token = self.next_token;
                self.next_token += 1;
                self.pending.insert(
                    token,
                    (mouse.client_x - self.follower_offset, mouse.client_y - self.follower_offset),
                );
                scope.set_timeout(self.follow_delay_ms, token);
            }
            Event::Timer { token, .. } => {
                if let Some((x, y)) = self.pending.remove(token) {
                    let doc = scope.document_mut();
                    doc.set_style(ring, "left", &format!("{x}px"));
                    doc.set_style(ring, "top", &format!("{y}px"));
                }
            }
            Event::MouseEnter { target } if self.interactive.contains(target) => {
                self.set_scale(scope, "scale(2)", "scale(1.5)");
            }
            Event::MouseLeave { target } if self.interactive.contains(target) => {
                self.set_scale(scope, "scale(1)", "scale(1)");
            }
            _ => {}
        }
    }
}

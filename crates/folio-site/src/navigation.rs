//! Header state, in-page link scrolling and the mobile menu

use folio_dom::NodeId;
use folio_runtime::{Behavior, Event, EventKind, RuntimeError, Scope, ScrollBehavior, same_document_fragment};

use crate::SiteConfig;

/// Whether the header should carry the `scrolled` class at `scroll_y`
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Navigation controller
pub struct Navigation {
    threshold: f64,
    navbar_selector: String,
    button_selector: String,
    menu_selector: String,
    links_selector: String,
    navbar: Option<NodeId>,
    button: Option<NodeId>,
    menu: Option<NodeId>,
    links: Vec<NodeId>,
}

impl Navigation {
    pub fn new(config: &SiteConfig) -> Self {
        let selectors = &config.selectors;
        Self {
            threshold: config.scroll_threshold,
            navbar_selector: selectors.navbar.clone(),
            button_selector: selectors.mobile_menu_button.clone(),
            menu_selector: selectors.nav_menu.clone(),
            links_selector: selectors.nav_links.clone(),
            navbar: None,
            button: None,
            menu: None,
            links: Vec::new(),
        }
    }

    fn handle_scroll(&self, scope: &mut Scope<'_>) {
        let Some(navbar) = self.navbar else {
            return;
        };
        let scrolled = is_scrolled(scope.window().scroll_y(), self.threshold);
        scope.document_mut().toggle_class(navbar, "scrolled", Some(scrolled));
    }

    /// Scroll so the section named by `href` sits just below the header
    fn smooth_scroll_to(&self, scope: &mut Scope<'_>, href: &str) {
        let doc = scope.document();
        let Some(target) = same_document_fragment(doc.url(), href)
            .and_then(|fragment| doc.get_element_by_id(&fragment))
        else {
            tracing::debug!(href, "link target not found");
            return;
        };
        let header_height = self.navbar.map_or(0.0, |n| doc.geometry(n).offset_height);
        let top = doc.geometry(target).offset_top - header_height;
        tracing::debug!(href, top, "smooth scroll");
        scope.scroll_to(top, ScrollBehavior::Smooth);

        if self.menu.is_some_and(|m| scope.document().has_class(m, "active")) {
            self.toggle_mobile_menu(scope);
        }
    }

    fn toggle_mobile_menu(&self, scope: &mut Scope<'_>) {
        let doc = scope.document_mut();
        if let Some(button) = self.button {
            doc.toggle_class(button, "active", None);
        }
        let open = self.menu.is_some_and(|m| doc.toggle_class(m, "active", None));
        let body = doc.body();
        doc.set_style(body, "overflow", if open { "hidden" } else { "" });
        tracing::debug!(open, "mobile menu toggled");
    }
}

impl Behavior for Navigation {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        let doc = scope.document();
        self.navbar = doc.query_selector(&self.navbar_selector)?;
        self.button = doc.query_selector(&self.button_selector)?;
        self.menu = doc.query_selector(&self.menu_selector)?;
        self.links = doc.query_selector_all(&self.links_selector)?;

        self.handle_scroll(scope);
        scope.listen(EventKind::Scroll);
        if self.button.is_some() || !self.links.is_empty() {
            scope.listen(EventKind::Click);
        }
        Ok(())
    }

    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
        match event {
            Event::Scroll { .. } => self.handle_scroll(scope),
            Event::Click { target } => {
                let doc = scope.document();
                if self.button.is_some_and(|b| doc.is_inclusive_descendant(*target, b)) {
                    self.toggle_mobile_menu(scope);
                    return;
                }
                let Some(link) = self
                    .links
                    .iter()
                    .copied()
                    .find(|&l| doc.is_inclusive_descendant(*target, l))
                else {
                    return;
                };
                let href = doc.attr(link, "href").unwrap_or_default().to_string();
                scope.prevent_default();
                self.smooth_scroll_to(scope, &href);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!is_scrolled(0.0, 100.0));
        assert!(!is_scrolled(100.0, 100.0));
        assert!(is_scrolled(100.5, 100.0));
    }
}

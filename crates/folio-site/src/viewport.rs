//! `--vh` custom property

use folio_runtime::{Behavior, Event, EventKind, RuntimeError, Scope};

/// Keeps `--vh` on the root element at 1% of the viewport height
#[derive(Debug, Default)]
pub struct ViewportHeight;

impl ViewportHeight {
    pub fn new() -> Self {
        Self
    }

    fn update(scope: &mut Scope<'_>) {
        let vh = scope.window().inner_height() / 100.0;
        let doc = scope.document_mut();
        let root = doc.document_element();
        doc.set_style(root, "--vh", &format!("{vh}px"));
    }
}

impl Behavior for ViewportHeight {
    fn name(&self) -> &'static str {
        "viewport-height"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        Self::update(scope);
        scope.listen(EventKind::Resize);
        Ok(())
    }

    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
        if let Event::Resize { .. } = event {
            Self::update(scope);
        }
    }
}

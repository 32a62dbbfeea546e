//! Konami code easter egg

use std::collections::VecDeque;

use folio_runtime::{Behavior, Event, EventKind, RuntimeError, Scope};

use crate::SiteConfig;

const KEYFRAMES_ID: &str = "folio-rainbow-keyframes";
const KEYFRAMES: &str = "@keyframes rainbow { 0% { filter: hue-rotate(0deg); } 100% { filter: hue-rotate(360deg); } }";

/// The most recent keys, oldest first, never longer than its capacity
#[derive(Debug, Clone, Default)]
pub struct KonamiBuffer {
    keys: VecDeque<String>,
    capacity: usize,
}

impl KonamiBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, key: &str) {
        if self.capacity == 0 {
            return;
        }
        if self.keys.len() == self.capacity {
            self.keys.pop_front();
        }
        self.keys.push_back(key.to_string());
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Exact ordered comparison with `sequence`
    pub fn matches(&self, sequence: &[String]) -> bool {
        !sequence.is_empty() && self.keys.iter().eq(sequence.iter())
    }
}

pub struct EasterEgg {
    secret: Vec<String>,
    buffer: KonamiBuffer,
    duration_ms: f64,
    message: String,
}

impl EasterEgg {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            secret: config.secret_sequence.clone(),
            buffer: KonamiBuffer::new(config.secret_sequence.len()),
            duration_ms: config.easter_egg_duration_ms,
            message: config.easter_egg_message.clone(),
        }
    }

    fn activate(&self, scope: &mut Scope<'_>) {
        tracing::info!("easter egg activated");
        let doc = scope.document_mut();
        let body = doc.body();
        let animation = format!("rainbow {}s linear infinite", self.duration_ms / 1000.0);
        doc.set_style(body, "animation", &animation);

        if doc.get_element_by_id(KEYFRAMES_ID).is_none() {
            let style = doc.create_element("style");
            doc.set_attr(style, "id", KEYFRAMES_ID);
            let head = doc.head();
            let installed = doc
                .set_text_content(style, KEYFRAMES)
                .and_then(|()| doc.append_child(head, style));
            if let Err(err) = installed {
                tracing::warn!(%err, "could not install keyframes");
            }
        }
        scope.set_timeout(self.duration_ms, 0);
    }
}

impl Behavior for EasterEgg {
    fn name(&self) -> &'static str {
        "easter-egg"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        scope.listen(EventKind::KeyDown);
        Ok(())
    }

    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
        match event {
            Event::KeyDown(key) => {
                self.buffer.push(&key.key);
                if self.buffer.matches(&self.secret) {
                    self.activate(scope);
                }
            }
            Event::Timer { .. } => {
                let body = scope.document().body();
                scope.document_mut().set_style(body, "animation", "");
                scope.alert(&self.message);
            }
            _ => {}
        }
    }
}

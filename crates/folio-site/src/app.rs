//! Bootstrapper
//!
//! Waits for the document to be ready, mounts every unit in a fixed order
//! and fades out the loading overlay.

use folio_dom::{NodeId, ReadyState};
use folio_runtime::{Behavior, Event, EventKind, RuntimeError, Scope};

use crate::{
    ConsoleBranding, ContactForm, CustomCursor, EasterEgg, LazyImages, Navigation, Parallax,
    RevealOnScroll, SiteConfig, StatCounter, SubmissionStrategy, ViewportHeight, default_strategy,
};

const LOADER_FADE: u64 = 0;
const LOADER_REMOVE: u64 = 1;

pub struct App {
    config: SiteConfig,
    strategy: Option<Box<dyn SubmissionStrategy>>,
    started: bool,
    loader: Option<NodeId>,
}

impl App {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            strategy: None,
            started: false,
            loader: None,
        }
    }

    /// Use `strategy` for contact form submissions instead of the one the
    /// configuration implies
    pub fn with_submitter(mut self, strategy: Box<dyn SubmissionStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    fn initialize(&mut self, scope: &mut Scope<'_>) {
        if self.started {
            return;
        }
        self.started = true;

        let config = &self.config;
        let strategy = self.strategy.take().unwrap_or_else(|| default_strategy(config));
        let mut units: Vec<Box<dyn Behavior>> = vec![
            Box::new(Navigation::new(config)),
            Box::new(RevealOnScroll::new(config)),
            Box::new(Parallax::new(config)),
            Box::new(ContactForm::new(config, strategy)),
            Box::new(ViewportHeight::new()),
            Box::new(LazyImages::new(config)),
            Box::new(StatCounter::new(config)),
            Box::new(ConsoleBranding::new(config)),
            Box::new(EasterEgg::new(config)),
        ];
        if config.enable_cursor {
            units.push(Box::new(CustomCursor::new(config)));
        }
        tracing::info!(units = units.len(), "initializing components");
        for unit in units {
            scope.spawn(unit);
        }

        match scope.document().query_selector(&config.selectors.loader) {
            Ok(Some(loader)) => {
                self.loader = Some(loader);
                scope.set_timeout(config.loader_delay_ms, LOADER_FADE);
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, "bad loader selector"),
        }
    }
}

impl Behavior for App {
    fn name(&self) -> &'static str {
        "app"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        if scope.document().ready_state() == ReadyState::Loading {
            scope.listen(EventKind::DomContentLoaded);
        } else {
            self.initialize(scope);
        }
        Ok(())
    }

    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
        match event {
            Event::DomContentLoaded => self.initialize(scope),
            Event::Timer { token, .. } => {
                let Some(loader) = self.loader else {
                    return;
                };
                match *token {
                    LOADER_FADE => {
                        scope.document_mut().set_style(loader, "opacity", "0");
                        scope.set_timeout(self.config.loader_fade_ms, LOADER_REMOVE);
                    }
                    LOADER_REMOVE => {
                        scope.document_mut().remove(loader);
                        tracing::debug!("loader removed");
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

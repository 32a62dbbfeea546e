//! Styled greeting for whoever opens the developer console

use folio_runtime::{Behavior, Event, RuntimeError, Scope};

use crate::{BrandingLine, SiteConfig};

pub struct ConsoleBranding {
    lines: Vec<BrandingLine>,
}

impl ConsoleBranding {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            lines: config.branding.clone(),
        }
    }
}

impl Behavior for ConsoleBranding {
    fn name(&self) -> &'static str {
        "branding"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        for line in &self.lines {
            scope.console().log_styled(&format!("%c{}", line.text), &[&line.css]);
        }
        Ok(())
    }

    fn handle(&mut self, _scope: &mut Scope<'_>, _event: &Event) {}
}

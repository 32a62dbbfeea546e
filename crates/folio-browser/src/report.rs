//! End-of-session page report

use std::fmt;

use folio_runtime::Page;
use folio_site::SiteConfig;
use serde::Serialize;

/// What a visitor would see after the session
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub url: String,
    pub elapsed_ms: f64,
    pub scroll_y: f64,
    pub units: Vec<&'static str>,
    pub header_scrolled: bool,
    pub menu_open: bool,
    pub revealed: usize,
    pub reveal_targets: usize,
    pub counters: Vec<String>,
    pub notifications: Vec<String>,
    pub vh: Option<String>,
    pub loader_present: bool,
    pub console: Vec<String>,
    pub alerts: Vec<String>,
    pub navigations: Vec<String>,
}

impl Report {
    pub fn collect(page: &Page, config: &SiteConfig) -> Self {
        let doc = page.document();
        let selectors = &config.selectors;
        // Bad selectors in a config override just produce empty sections.
        let all = |selector: &str| doc.query_selector_all(selector).unwrap_or_default();
        let first = |selector: &str| all(selector).into_iter().next();

        let reveal = all(&selectors.reveal);
        Self {
            url: doc.url().to_string(),
            elapsed_ms: page.now(),
            scroll_y: page.window().scroll_y(),
            units: page.unit_names(),
            header_scrolled: first(&selectors.navbar).is_some_and(|n| doc.has_class(n, "scrolled")),
            menu_open: first(&selectors.nav_menu).is_some_and(|n| doc.has_class(n, "active")),
            revealed: reveal.iter().filter(|&&n| doc.has_class(n, "visible")).count(),
            reveal_targets: reveal.len(),
            counters: all(&selectors.counters)
                .into_iter()
                .map(|n| doc.text_content(n))
                .collect(),
            notifications: all(".notification")
                .into_iter()
                .map(|n| doc.text_content(n))
                .collect(),
            vh: doc.style(doc.document_element(), "--vh").map(str::to_string),
            loader_present: first(&selectors.loader).is_some(),
            console: page.console().entries().iter().map(|e| e.text()).collect(),
            alerts: page.window().alerts().to_vec(),
            navigations: page.navigations().to_vec(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "page:          {}", self.url)?;
        writeln!(f, "elapsed:       {}ms", self.elapsed_ms)?;
        writeln!(f, "scroll:        {}px", self.scroll_y)?;
        writeln!(f, "units:         {}", self.units.join(", "))?;
        writeln!(f, "header:        {}", if self.header_scrolled { "scrolled" } else { "top" })?;
        writeln!(f, "mobile menu:   {}", if self.menu_open { "open" } else { "closed" })?;
        writeln!(f, "revealed:      {}/{}", self.revealed, self.reveal_targets)?;
        writeln!(f, "counters:      {}", self.counters.join(" "))?;
        writeln!(f, "--vh:          {}", self.vh.as_deref().unwrap_or("unset"))?;
        writeln!(f, "loader:        {}", if self.loader_present { "present" } else { "gone" })?;
        for notification in &self.notifications {
            writeln!(f, "notification:  {notification}")?;
        }
        for alert in &self.alerts {
            writeln!(f, "alert:         {alert}")?;
        }
        for navigation in &self.navigations {
            writeln!(f, "navigated:     {navigation}")?;
        }
        if !self.console.is_empty() {
            writeln!(f, "console:")?;
            for line in &self.console {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}

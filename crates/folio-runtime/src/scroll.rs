//! Scrolling
//!
//! Smooth scroll animation and same-document link resolution.

use url::Url;

/// Scroll behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// An in-progress smooth scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub duration: f64,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, start: f64, duration: f64) -> Self {
        Self { from, to, start, duration }
    }

    /// Offset at `now` and whether the animation has finished
    pub fn sample(&self, now: f64) -> (f64, bool) {
        if self.duration <= 0.0 || now >= self.start + self.duration {
            return (self.to, true);
        }
        let t = ((now - self.start) / self.duration).clamp(0.0, 1.0);
        // Cubic ease-in-out
        let eased = if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        };
        (self.from + (self.to - self.from) * eased, false)
    }
}

/// Fragment id of `href` if it points into the document at `document_url`
pub fn same_document_fragment(document_url: &str, href: &str) -> Option<String> {
    if let Some(fragment) = href.strip_prefix('#') {
        return (!fragment.is_empty()).then(|| fragment.to_string());
    }

    let base = Url::parse(document_url).ok()?;
    let target = base.join(href).ok()?;
    let fragment = target.fragment().filter(|f| !f.is_empty())?.to_string();

    let strip = |mut url: Url| {
        url.set_fragment(None);
        url
    };
    (strip(base) == strip(target.clone())).then_some(fragment)
}

//! Folio site behavior
//!
//! The interactive layer of the Folio portfolio page. Each unit is an
//! independent [`Behavior`](folio_runtime::Behavior) that owns one slice of
//! the page: header state, reveals, the parallax hero, counters, the contact
//! form, the custom cursor, the easter egg, console branding, `--vh` and lazy
//! images. [`App`] mounts them all once the document is ready.
//!
//! ```ignore
//! let document = folio_html::parse(&html)?;
//! let mut page = Page::new(document, Window::default());
//! folio_site::boot(&mut page, SiteConfig::default());
//! page.finish_loading();
//! ```

mod app;
mod branding;
mod config;
mod contact;
mod counter;
mod cursor;
mod easter_egg;
mod lazy_images;
mod navigation;
mod parallax;
mod reveal;
mod viewport;

pub use app::App;
pub use branding::ConsoleBranding;
pub use config::{BrandingLine, Selectors, SiteConfig};
#[cfg(feature = "network")]
pub use contact::HttpSubmitter;
pub use contact::{
    ContactForm, FormSnapshot, LocalSubmitter, NotificationKind, SubmissionStrategy, SubmitError,
    default_strategy,
};
pub use counter::{Counter, CounterPhase, StatCounter, parse_target};
pub use cursor::CustomCursor;
pub use easter_egg::{EasterEgg, KonamiBuffer};
pub use lazy_images::LazyImages;
pub use navigation::{Navigation, is_scrolled};
pub use parallax::{Parallax, ParallaxFrame, ParallaxParams, parallax_frame};
pub use reveal::{RevealOnScroll, transition_delay};
pub use viewport::ViewportHeight;

use folio_runtime::{Page, UnitId};

/// Mount the site on `page`
pub fn boot(page: &mut Page, config: SiteConfig) -> UnitId {
    page.mount(Box::new(App::new(config)))
}

//! Folio - headless page host
//!
//! Loads a portfolio page, boots the site behavior, optionally replays a
//! scripted session and prints what the page looks like afterwards.

mod report;
mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use folio_dom::BlockLayout;
use folio_runtime::{Page, Window, WindowConfig};
use folio_site::SiteConfig;
use tracing_subscriber::EnvFilter;

use report::Report;
use session::Session;

/// Longest the page may keep running after the session
const SETTLE_MS: f64 = 10_000.0;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Load a portfolio page, boot its behavior and report the result")]
struct Args {
    /// HTML page to load
    page: PathBuf,

    /// JSON session to replay after loading
    #[arg(long)]
    session: Option<PathBuf>,

    /// JSON overrides for the site configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in CSS pixels
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height in CSS pixels
    #[arg(long)]
    height: Option<f64>,

    /// Emulate a touch-only device
    #[arg(long)]
    touch: bool,

    /// Run without IntersectionObserver support
    #[arg(long)]
    no_observer: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn window_config(&self) -> WindowConfig {
        let defaults = WindowConfig::default();
        WindowConfig {
            inner_width: self.width.unwrap_or(defaults.inner_width),
            inner_height: self.height.unwrap_or(defaults.inner_height),
            touch: self.touch,
            intersection_observer: !self.no_observer,
            ..defaults
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SiteConfig> {
    let Some(path) = path else {
        return Ok(SiteConfig::default());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    SiteConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

fn page_url(path: &Path) -> String {
    std::fs::canonicalize(path)
        .ok()
        .and_then(|abs| url::Url::from_file_path(abs).ok())
        .map_or_else(|| "about:blank".to_string(), String::from)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let window_config = args.window_config();

    let html = std::fs::read_to_string(&args.page)
        .with_context(|| format!("reading {}", args.page.display()))?;
    let mut document = folio_html::HtmlParser::new().parse_with_url(&html, &page_url(&args.page))?;
    let content_height = BlockLayout::new(window_config.inner_width).run(&mut document);
    tracing::info!(page = %args.page.display(), content_height, "page loaded");

    let mut window = Window::new(window_config);
    window.set_content_height(Some(content_height));
    let mut page = Page::new(document, window);
    folio_site::boot(&mut page, config.clone());
    page.finish_loading();

    if let Some(path) = &args.session {
        let session = Session::load(path)?;
        tracing::info!(steps = session.steps.len(), "replaying session");
        session.replay(&mut page)?;
    }
    if !page.run_until_idle(SETTLE_MS) {
        tracing::warn!("page still busy after {SETTLE_MS}ms");
    }

    let report = Report::collect(&page, &config);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("folio").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["index.html", "--session", "s.json", "--height", "667", "--touch"]).unwrap();
        assert_eq!(parsed.page, PathBuf::from("index.html"));
        assert_eq!(parsed.session, Some(PathBuf::from("s.json")));
        assert_eq!(parsed.height, Some(667.0));
        assert!(parsed.touch);

        let window = parsed.window_config();
        assert_eq!(window.inner_height, 667.0);
        assert_eq!(window.inner_width, 1280.0);
        assert!(window.intersection_observer);

        let parsed = args(&["index.html", "--no-observer", "--width", "375", "--json"]).unwrap();
        assert!(parsed.json);
        let window = parsed.window_config();
        assert!(!window.intersection_observer);
        assert_eq!(window.inner_width, 375.0);
    }

    #[test]
    fn test_bad_args() {
        assert!(args(&[]).is_err());
        assert!(args(&["a.html", "--width"]).is_err());
        assert!(args(&["a.html", "--width", "wide"]).is_err());
        assert!(args(&["a.html", "--frobnicate"]).is_err());
        assert!(args(&["a.html", "b.html"]).is_err());
    }
}

//! End-to-end tests for the Folio site behavior
//!
//! Each test loads a real page through folio-html, lays it out, boots the
//! site and drives the page the way a visitor would.

use folio_dom::{BlockLayout, NodeId, ReadyState};
use folio_runtime::{Page, Window, WindowConfig};
use folio_site::{FormSnapshot, SiteConfig, SubmissionStrategy, SubmitError};
use serde_json::json;

const PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Folio</title></head>
<body>
  <div class="loader" style="position: fixed; height: 800px"></div>
  <nav id="navbar" style="position: fixed; height: 80px">
    <ul class="nav-menu">
      <li><a href="#about">About</a></li>
      <li><a href="#goals">Goals</a></li>
      <li><a href="#missing">Missing</a></li>
    </ul>
    <button class="mobile-menu-btn"><span>Menu</span></button>
  </nav>
  <section id="home" class="hero" style="min-height: 800px"><h1>Hello</h1></section>
  <section id="about" style="height: 600px">
    <div class="expertise-item">Rust</div>
    <div class="expertise-item">Web</div>
    <div class="expertise-item">Systems</div>
  </section>
  <section class="stats" style="height: 400px">
    <div class="stat-number" data-target="100">0</div>
    <div class="stat-number" data-target="25+">0</div>
  </section>
  <section id="goals" style="height: 600px">
    <div class="goal-item">Ship</div>
    <div class="goal-item">Learn</div>
  </section>
  <section id="gallery" style="height: 800px">
    <img loading="lazy" data-src="shot.png" alt="shot">
    <div class="project-card">Card</div>
  </section>
  <section id="contact" style="height: 600px">
    <form id="contactForm" action="/send">
      <input id="name" type="text">
      <input id="email" type="email">
      <textarea id="message"></textarea>
      <button type="submit">Send</button>
    </form>
  </section>
</body>
</html>"##;

fn load_with(config: SiteConfig, window: WindowConfig) -> Page {
    let mut doc = folio_html::HtmlParser::new()
        .parse_with_url(PAGE, "https://folio.test/")
        .unwrap();
    let height = BlockLayout::new(window.inner_width).run(&mut doc);
    let mut window = Window::new(window);
    window.set_content_height(Some(height));

    let mut page = Page::new(doc, window);
    folio_site::boot(&mut page, config);
    page.finish_loading();
    page
}

fn load() -> Page {
    load_with(SiteConfig::default(), WindowConfig::default())
}

fn one(page: &Page, selector: &str) -> NodeId {
    page.document().query_selector(selector).unwrap().unwrap()
}

fn all(page: &Page, selector: &str) -> Vec<NodeId> {
    page.document().query_selector_all(selector).unwrap()
}

fn has_class(page: &Page, selector: &str, class: &str) -> bool {
    page.document().has_class(one(page, selector), class)
}

fn style(page: &Page, selector: &str, property: &str) -> Option<String> {
    page.document()
        .style(one(page, selector), property)
        .map(str::to_string)
}

// ============================================================================
// BOOTSTRAP
// ============================================================================

#[test]
fn test_units_mount_after_dom_content_loaded() {
    let doc = folio_html::parse(PAGE).unwrap();
    assert_eq!(doc.ready_state(), ReadyState::Loading);

    let mut page = Page::new(doc, Window::default());
    folio_site::boot(&mut page, SiteConfig::default());
    assert_eq!(page.unit_names(), vec!["app"]);

    page.finish_loading();
    assert_eq!(page.document().ready_state(), ReadyState::Complete);
    assert_eq!(
        page.unit_names(),
        vec![
            "app",
            "navigation",
            "reveal",
            "parallax",
            "contact-form",
            "viewport-height",
            "lazy-images",
            "counter",
            "branding",
            "easter-egg",
        ]
    );
}

#[test]
fn test_ready_document_boots_immediately() {
    let mut page = Page::new(folio_dom::Document::new("about:blank"), Window::default());
    folio_site::boot(&mut page, SiteConfig::default());
    assert_eq!(page.unit_names().len(), 10);
}

#[test]
fn test_loader_fades_then_disappears() {
    let mut page = load();
    let loader = one(&page, ".loader");

    page.advance(499.0);
    assert_eq!(page.document().style(loader, "opacity"), None);
    page.advance(1.0);
    assert_eq!(page.document().style(loader, "opacity"), Some("0"));
    page.advance(300.0);
    assert!(!page.document().is_connected(loader));
    assert!(page.document().query_selector(".loader").unwrap().is_none());
}

#[test]
fn test_branding_lines_are_styled() {
    let page = load();
    let entries = page.console().entries();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].segments.len(), 1);
    assert!(entries[0].segments[0].css.as_deref().unwrap().contains("#a78bfa"));
    assert!(entries[2].text().contains("hello@example.com"));
}

// ============================================================================
// NAVIGATION
// ============================================================================

#[test]
fn test_header_scrolled_class_follows_threshold() {
    let mut page = load();
    assert!(!has_class(&page, "#navbar", "scrolled"));

    for y in [0.0, 50.0, 100.0] {
        page.scroll_to(y);
        assert!(!has_class(&page, "#navbar", "scrolled"), "offset {y}");
    }
    for y in [100.5, 101.0, 2500.0] {
        page.scroll_to(y);
        assert!(has_class(&page, "#navbar", "scrolled"), "offset {y}");
    }
    page.scroll_to(10.0);
    assert!(!has_class(&page, "#navbar", "scrolled"));
}

#[test]
fn test_nav_link_scrolls_below_header() {
    let mut page = load();
    let link = one(&page, ".nav-menu a");

    let outcome = page.click(link);
    assert!(outcome.default_prevented);
    assert_eq!(page.window().scroll_y(), 0.0);

    assert!(page.run_until_idle(5_000.0));
    // #about starts at 800, header is 80 tall
    assert_eq!(page.window().scroll_y(), 720.0);
    assert!(has_class(&page, "#navbar", "scrolled"));
}

#[test]
fn test_link_to_missing_section_does_nothing() {
    let mut page = load();
    let missing = all(&page, ".nav-menu a")[2];

    let outcome = page.click(missing);
    assert!(outcome.default_prevented);
    page.run_until_idle(5_000.0);
    assert_eq!(page.window().scroll_y(), 0.0);
    assert!(page.navigations().is_empty());
}

#[test]
fn test_mobile_menu_toggle() {
    let mut page = load();
    let label = one(&page, ".mobile-menu-btn span");
    let body = page.document().body();

    page.click(label);
    assert!(has_class(&page, ".mobile-menu-btn", "active"));
    assert!(has_class(&page, ".nav-menu", "active"));
    assert_eq!(page.document().style(body, "overflow"), Some("hidden"));

    page.click(label);
    assert!(!has_class(&page, ".mobile-menu-btn", "active"));
    assert!(!has_class(&page, ".nav-menu", "active"));
    assert_eq!(page.document().style(body, "overflow"), None);
}

#[test]
fn test_nav_link_closes_open_menu() {
    let mut page = load();
    page.click(one(&page, ".mobile-menu-btn"));
    assert!(has_class(&page, ".nav-menu", "active"));

    let goals = all(&page, ".nav-menu a")[1];
    page.click(goals);
    assert!(!has_class(&page, ".nav-menu", "active"));
    assert_eq!(page.document().style(page.document().body(), "overflow"), None);

    page.run_until_idle(5_000.0);
    // #goals starts at 1800
    assert_eq!(page.window().scroll_y(), 1720.0);
}

// ============================================================================
// REVEAL
// ============================================================================

#[test]
fn test_reveal_items_get_staggered_delays() {
    let page = load();
    let delays: Vec<String> = all(&page, ".expertise-item, .goal-item")
        .into_iter()
        .map(|n| page.document().style(n, "transition-delay").unwrap().to_string())
        .collect();
    assert_eq!(delays, vec!["0s", "0.1s", "0.2s", "0.3s", "0.4s"]);
}

#[test]
fn test_reveal_respects_bottom_margin() {
    let mut page = load();
    let items = all(&page, ".expertise-item");
    assert!(items.iter().all(|&n| !page.document().has_class(n, "visible")));

    // first item at 800 sits at 750 on screen: inside the viewport but
    // below the 700px line the root margin draws
    page.scroll_to(50.0);
    assert!(!page.document().has_class(items[0], "visible"));

    page.scroll_to(200.0);
    assert!(items.iter().all(|&n| page.document().has_class(n, "visible")));
    assert!(!has_class(&page, ".goal-item", "visible"));
}

#[test]
fn test_reveal_happens_once() {
    let mut page = load();
    let item = one(&page, ".expertise-item");

    page.scroll_to(200.0);
    assert!(page.document().has_class(item, "visible"));

    page.document_mut().remove_class(item, "visible");
    page.scroll_to(0.0);
    page.scroll_to(200.0);
    assert!(!page.document().has_class(item, "visible"));
}

// ============================================================================
// PARALLAX
// ============================================================================

#[test]
fn test_parallax_within_first_viewport() {
    let mut page = load();
    page.scroll_to(350.0);
    assert_eq!(style(&page, ".hero", "transform").as_deref(), Some("translateY(175px)"));
    assert_eq!(style(&page, ".hero", "opacity").as_deref(), Some("0.5"));

    page.scroll_to(900.0);
    assert_eq!(style(&page, ".hero", "transform").as_deref(), Some("translateY(175px)"));
}

#[test]
fn test_parallax_opacity_goes_negative_by_default() {
    let mut page = load();
    page.scroll_to(770.0);
    let opacity: f64 = style(&page, ".hero", "opacity").unwrap().parse().unwrap();
    assert!(opacity < 0.0);
}

// ============================================================================
// COUNTERS
// ============================================================================

#[test]
fn test_counters_start_when_stats_visible() {
    let mut page = load();
    let counters = all(&page, ".stat-number");

    page.scroll_to(300.0);
    page.advance(100.0);
    assert_eq!(page.document().text_content(counters[0]), "0");

    page.scroll_to(1000.0);
    let mut seen = Vec::new();
    for _ in 0..200 {
        seen.push(page.document().text_content(counters[0]).parse::<i64>().unwrap());
        page.advance(16.0);
    }
    seen.push(page.document().text_content(counters[0]).parse::<i64>().unwrap());

    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{seen:?}");
    assert_eq!(seen.last(), Some(&100));
    assert!(seen.iter().filter(|&&v| v > 0 && v < 100).count() > 50);
    assert_eq!(page.document().text_content(counters[1]), "25");
}

#[test]
fn test_counters_run_once() {
    let mut page = load();
    let counter = one(&page, ".stat-number");

    page.scroll_to(1000.0);
    page.run_until_idle(10_000.0);
    assert_eq!(page.document().text_content(counter), "100");

    page.document_mut().set_text_content(counter, "7").unwrap();
    page.scroll_to(0.0);
    page.scroll_to(1000.0);
    page.run_until_idle(10_000.0);
    assert_eq!(page.document().text_content(counter), "7");
}

// ============================================================================
// CONTACT FORM
// ============================================================================

fn fill(page: &mut Page) {
    for (selector, value) in [("#name", "Ada"), ("#email", "ada@example.com"), ("#message", "Hi")] {
        let field = one(page, selector);
        page.document_mut().set_control_value(field, value).unwrap();
    }
}

#[test]
fn test_submit_logs_notifies_and_resets() {
    let mut page = load();
    fill(&mut page);
    let form = one(&page, "#contactForm");

    let outcome = page.submit(form);
    assert!(outcome.default_prevented);
    assert!(page.navigations().is_empty());

    let entry = page.console().last().unwrap();
    assert_eq!(entry.segments[0].text, "Form submitted:");
    assert_eq!(
        entry.data,
        Some(json!({"name": "Ada", "email": "ada@example.com", "message": "Hi"}))
    );
    let sent = FormSnapshot {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        message: "Hi".into(),
    };
    assert_eq!(entry.data, Some(serde_json::to_value(&sent).unwrap()));

    let notification = one(&page, ".notification.notification-success");
    let body = page.document().body();
    assert_eq!(page.document().tree().ancestors(notification).next(), Some(body));
    assert_eq!(
        page.document().style(notification, "background"),
        Some("rgba(167, 139, 250, 0.9)")
    );
    for selector in ["#name", "#email", "#message"] {
        assert_eq!(page.document().control_value(one(&page, selector)), "");
    }

    page.advance(3_000.0);
    assert_eq!(
        page.document().style(notification, "animation"),
        Some("slideOutRight 0.3s ease")
    );
    assert!(page.document().is_connected(notification));
    page.advance(300.0);
    assert!(!page.document().is_connected(notification));
}

struct Rejecting;

impl SubmissionStrategy for Rejecting {
    fn submit(&mut self, _snapshot: &FormSnapshot) -> Result<(), SubmitError> {
        Err(SubmitError::Status(503))
    }
}

#[test]
fn test_failed_submit_keeps_fields() {
    let doc = folio_html::parse(PAGE).unwrap();
    let mut page = Page::new(doc, Window::default());
    page.mount(Box::new(
        folio_site::App::new(SiteConfig::default()).with_submitter(Box::new(Rejecting)),
    ));
    page.finish_loading();
    fill(&mut page);

    page.submit(one(&page, "#contactForm"));
    let notification = one(&page, ".notification");
    assert!(page.document().has_class(notification, "notification-error"));
    assert_eq!(
        page.document().style(notification, "background"),
        Some("rgba(239, 68, 68, 0.9)")
    );
    assert_eq!(page.document().control_value(one(&page, "#name")), "Ada");
}

// ============================================================================
// EASTER EGG
// ============================================================================

const KONAMI: [&str; 10] = [
    "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowLeft", "ArrowRight", "b", "a",
];

#[test]
fn test_konami_code_triggers_egg() {
    let mut page = load();
    let body = page.document().body();

    page.type_keys(&["x", "y"]);
    page.type_keys(&KONAMI);
    assert_eq!(
        page.document().style(body, "animation"),
        Some("rainbow 2s linear infinite")
    );
    assert!(page.document().get_element_by_id("folio-rainbow-keyframes").is_some());

    page.advance(2_000.0);
    assert_eq!(page.document().style(body, "animation"), None);
    assert_eq!(page.window().alerts().len(), 1);

    page.type_keys(&KONAMI);
    page.advance(2_000.0);
    assert_eq!(page.window().alerts().len(), 2);
    assert_eq!(all(&page, "style").len(), 1);
}

#[test]
fn test_near_miss_does_not_trigger() {
    let mut page = load();
    let mut keys = KONAMI;
    keys[4] = "ArrowRight";
    page.type_keys(&keys);
    page.advance(5_000.0);
    assert_eq!(page.document().style(page.document().body(), "animation"), None);
    assert!(page.window().alerts().is_empty());
}

// ============================================================================
// VIEWPORT, LAZY IMAGES
// ============================================================================

#[test]
fn test_vh_tracks_resize() {
    let mut page = load();
    let root = page.document().document_element();
    assert_eq!(page.document().style(root, "--vh"), Some("8px"));

    page.resize(375.0, 667.0);
    assert_eq!(page.document().style(root, "--vh"), Some("6.67px"));
    page.resize(1024.0, 900.0);
    assert_eq!(page.document().style(root, "--vh"), Some("9px"));
}

#[test]
fn test_lazy_image_loads_near_viewport() {
    let mut page = load();
    let img = one(&page, "img");

    page.scroll_to(1000.0);
    assert_eq!(page.document().attr(img, "src"), None);

    page.scroll_to(2000.0);
    assert_eq!(page.document().attr(img, "src"), Some("shot.png"));
    assert_eq!(page.document().attr(img, "data-src"), None);
}

#[test]
fn test_without_intersection_observer() {
    let window = WindowConfig {
        intersection_observer: false,
        ..WindowConfig::default()
    };
    let page = load_with(SiteConfig::default(), window);

    assert!(all(&page, ".expertise-item, .goal-item")
        .into_iter()
        .all(|n| page.document().has_class(n, "visible")));
    assert_eq!(page.document().attr(one(&page, "img"), "src"), None);
    assert_eq!(page.document().text_content(one(&page, ".stat-number")), "100");
}

// ============================================================================
// CUSTOM CURSOR
// ============================================================================

fn cursor_config() -> SiteConfig {
    SiteConfig {
        enable_cursor: true,
        ..SiteConfig::default()
    }
}

#[test]
fn test_cursor_dot_and_delayed_ring() {
    let mut page = load_with(cursor_config(), WindowConfig::default());
    assert_eq!(page.unit_names().last(), Some(&"cursor"));

    page.mouse_move(100.0, 200.0);
    assert_eq!(style(&page, ".custom-cursor", "display").as_deref(), Some("block"));
    assert_eq!(style(&page, ".custom-cursor", "left").as_deref(), Some("100px"));
    assert_eq!(style(&page, ".custom-cursor", "top").as_deref(), Some("200px"));
    assert_eq!(style(&page, ".custom-cursor-follower", "left"), None);

    page.advance(100.0);
    assert_eq!(style(&page, ".custom-cursor-follower", "left").as_deref(), Some("80px"));
    assert_eq!(style(&page, ".custom-cursor-follower", "top").as_deref(), Some("180px"));
}

#[test]
fn test_cursor_scales_over_interactive_elements() {
    let mut page = load_with(cursor_config(), WindowConfig::default());
    let card = one(&page, ".project-card");

    page.mouse_enter(card);
    assert_eq!(style(&page, ".custom-cursor", "transform").as_deref(), Some("scale(2)"));
    assert_eq!(style(&page, ".custom-cursor-follower", "transform").as_deref(), Some("scale(1.5)"));

    page.mouse_leave(card);
    assert_eq!(style(&page, ".custom-cursor", "transform").as_deref(), Some("scale(1)"));
    assert_eq!(style(&page, ".custom-cursor-follower", "transform").as_deref(), Some("scale(1)"));

    page.mouse_enter(one(&page, "h1"));
    assert_eq!(style(&page, ".custom-cursor", "transform").as_deref(), Some("scale(1)"));
}

#[test]
fn test_no_cursor_on_touch_devices() {
    let window = WindowConfig {
        touch: true,
        ..WindowConfig::default()
    };
    let page = load_with(cursor_config(), window);
    assert!(all(&page, ".custom-cursor, .custom-cursor-follower").is_empty());
}

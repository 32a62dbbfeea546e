//! Site configuration
//!
//! Every constant the behavior units use lives here so a deployment can
//! override any of them from a partial JSON file; omitted keys keep their
//! defaults.

use serde::Deserialize;

/// Selectors for the elements each unit manages
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub navbar: String,
    pub mobile_menu_button: String,
    pub nav_menu: String,
    pub nav_links: String,
    pub reveal: String,
    pub hero: String,
    pub stats: String,
    pub counters: String,
    pub contact_form: String,
    pub name_field: String,
    pub email_field: String,
    pub message_field: String,
    pub interactive: String,
    pub lazy_images: String,
    pub loader: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            navbar: "#navbar".into(),
            mobile_menu_button: ".mobile-menu-btn".into(),
            nav_menu: ".nav-menu".into(),
            nav_links: ".nav-menu a".into(),
            reveal: ".expertise-item, .goal-item".into(),
            hero: ".hero".into(),
            stats: ".stats".into(),
            counters: ".stat-number".into(),
            contact_form: "#contactForm".into(),
            name_field: "#name".into(),
            email_field: "#email".into(),
            message_field: "#message".into(),
            interactive: "a, button, .project-card".into(),
            lazy_images: "img[loading=\"lazy\"]".into(),
            loader: ".loader".into(),
        }
    }
}

/// One `%c` styled console line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrandingLine {
    pub text: String,
    pub css: String,
}

impl BrandingLine {
    fn new(text: &str, css: &str) -> Self {
        Self {
            text: text.to_string(),
            css: css.to_string(),
        }
    }
}

/// Site configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: Selectors,

    /// Scroll offset (px) past which the header gets `scrolled`
    pub scroll_threshold: f64,

    /// Visible fraction that reveals an element
    pub reveal_threshold: f64,
    /// CSS margin shorthand applied to the viewport for reveals
    pub reveal_root_margin: String,
    /// Transition delay added per reveal element (s)
    pub reveal_stagger: f64,

    /// Hero offset per scrolled pixel
    pub parallax_speed: f64,
    /// Scroll distance (px) over which the hero fades out
    pub parallax_fade_distance: f64,
    /// Keep hero opacity within `[0, 1]`
    pub clamp_parallax_opacity: bool,

    /// Visible fraction of the stats region that starts the counters
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    /// Frame length assumed when computing the per-frame increment
    pub counter_frame_ms: f64,

    pub notification_duration_ms: f64,
    pub notification_exit_ms: f64,
    pub success_message: String,
    pub error_message: String,
    /// Contact form endpoint; submissions stay local when unset
    pub submit_endpoint: Option<String>,

    pub enable_cursor: bool,
    pub cursor_follow_delay_ms: f64,
    /// Follower ring offset (px) so it centers on the pointer
    pub cursor_follower_offset: f64,

    pub secret_sequence: Vec<String>,
    pub easter_egg_duration_ms: f64,
    pub easter_egg_message: String,

    pub branding: Vec<BrandingLine>,

    pub loader_delay_ms: f64,
    pub loader_fade_ms: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let secret = [
            "ArrowUp",
            "ArrowUp",
            "ArrowDown",
            "ArrowDown",
            "ArrowLeft",
            "ArrowRight",
            "ArrowLeft",
            "ArrowRight",
            "b",
            "a",
        ];
        Self {
            selectors: Selectors::default(),
            scroll_threshold: 100.0,
            reveal_threshold: 0.2,
            reveal_root_margin: "0px 0px -100px 0px".into(),
            reveal_stagger: 0.1,
            parallax_speed: 0.5,
            parallax_fade_distance: 700.0,
            clamp_parallax_opacity: false,
            counter_threshold: 0.5,
            counter_duration_ms: 2000.0,
            counter_frame_ms: 16.0,
            notification_duration_ms: 3000.0,
            notification_exit_ms: 300.0,
            success_message: "Message sent successfully! 🚀".into(),
            error_message: "Could not send the message. Please try again.".into(),
            submit_endpoint: None,
            enable_cursor: false,
            cursor_follow_delay_ms: 100.0,
            cursor_follower_offset: 20.0,
            secret_sequence: secret.iter().map(|k| k.to_string()).collect(),
            easter_egg_duration_ms: 2000.0,
            easter_egg_message: "🎉 You found the Easter Egg! A true geek.".into(),
            branding: vec![
                BrandingLine::new(
                    "Hello, developer! 👋",
                    "color: #a78bfa;font-size: 20px;font-weight: bold;text-shadow: 2px 2px 0px rgba(0,0,0,0.2)",
                ),
                BrandingLine::new(
                    "Poking around the code? I like your style 😎",
                    "color: #888; font-size: 14px;",
                ),
                BrandingLine::new(
                    "Let's work together! Get in touch: hello@example.com",
                    "color: #a78bfa; font-size: 14px;",
                ),
                BrandingLine::new(
                    "Tip: try the Konami Code (↑ ↑ ↓ ↓ ← → ← → B A) 🎮",
                    "color: #666; font-size: 12px; font-style: italic;",
                ),
            ],
            loader_delay_ms: 500.0,
            loader_fade_ms: 300.0,
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override on top of the defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

//! Hero parallax

use folio_dom::NodeId;
use folio_runtime::{Behavior, Event, EventKind, RuntimeError, Scope};

use crate::SiteConfig;

/// Hero offset and opacity for one scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxFrame {
    pub translate_y: f64,
    pub opacity: f64,
}

/// Parallax settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxParams {
    pub speed: f64,
    pub fade_distance: f64,
    pub clamp_opacity: bool,
}

/// Hero state at `scroll_y`, or `None` once the hero is a full viewport away
pub fn parallax_frame(scroll_y: f64, viewport_height: f64, params: ParallaxParams) -> Option<ParallaxFrame> {
    if scroll_y >= viewport_height {
        return None;
    }
    let mut opacity = 1.0 - scroll_y / params.fade_distance;
    if params.clamp_opacity {
        opacity = opacity.clamp(0.0, 1.0);
    }
    Some(ParallaxFrame {
        translate_y: scroll_y * params.speed,
        opacity,
    })
}

/// Shifts and fades the hero while it is near the top of the page
pub struct Parallax {
    selector: String,
    params: ParallaxParams,
    hero: Option<NodeId>,
}

impl Parallax {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            selector: config.selectors.hero.clone(),
            params: ParallaxParams {
                speed: config.parallax_speed,
                fade_distance: config.parallax_fade_distance,
                clamp_opacity: config.clamp_parallax_opacity,
            },
            hero: None,
        }
    }
}

impl Behavior for Parallax {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        self.hero = scope.document().query_selector(&self.selector)?;
        if self.hero.is_some() {
            scope.listen(EventKind::Scroll);
        }
        Ok(())
    }

    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
        let (Event::Scroll { scroll_y }, Some(hero)) = (event, self.hero) else {
            return;
        };
        let Some(frame) = parallax_frame(*scroll_y, scope.window().inner_height(), self.params) else {
            return;
        };
        let doc = scope.document_mut();
        doc.set_style(hero, "transform", &format!("translateY({}px)", frame.translate_y));
        doc.set_style(hero, "opacity", &frame.opacity.to_string());
    }
}

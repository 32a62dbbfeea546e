//! Window state: viewport, scroll position, capabilities, dialogs

/// Window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Viewport width (px)
    pub inner_width: f64,
    /// Viewport height (px)
    pub inner_height: f64,
    /// Device reports touch input
    pub touch: bool,
    /// IntersectionObserver is available
    pub intersection_observer: bool,
    /// Time between animation frames (ms)
    pub frame_interval_ms: f64,
    /// Duration of a smooth scroll (ms)
    pub smooth_scroll_ms: f64,
    /// Total document height, if known; bounds the scroll offset
    pub content_height: Option<f64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            inner_width: 1280.0,
            inner_height: 800.0,
            touch: false,
            intersection_observer: true,
            frame_interval_ms: 16.0,
            smooth_scroll_ms: 400.0,
            content_height: None,
        }
    }
}

/// Browser window
#[derive(Debug, Clone)]
pub struct Window {
    config: WindowConfig,
    scroll_y: f64,
    alerts: Vec<String>,
}

impl Window {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            scroll_y: 0.0,
            alerts: Vec::new(),
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn inner_width(&self) -> f64 {
        self.config.inner_width
    }

    pub fn inner_height(&self) -> f64 {
        self.config.inner_height
    }

    /// Vertical scroll offset (`pageYOffset`)
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn is_touch_capable(&self) -> bool {
        self.config.touch
    }

    pub fn supports_intersection_observer(&self) -> bool {
        self.config.intersection_observer
    }

    pub fn frame_interval(&self) -> f64 {
        self.config.frame_interval_ms.max(1.0)
    }

    pub fn smooth_scroll_duration(&self) -> f64 {
        self.config.smooth_scroll_ms.max(0.0)
    }

    pub fn set_content_height(&mut self, height: Option<f64>) {
        self.config.content_height = height;
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        self.config
            .content_height
            .map_or(f64::INFINITY, |h| (h - self.config.inner_height).max(0.0))
    }

    /// Clamp an offset into the scrollable range
    pub fn clamp_scroll(&self, y: f64) -> f64 {
        if y.is_nan() {
            return 0.0;
        }
        y.clamp(0.0, self.max_scroll())
    }

    /// Move the viewport; returns true when the offset changed
    pub(crate) fn set_scroll_y(&mut self, y: f64) -> bool {
        let y = self.clamp_scroll(y);
        if y == self.scroll_y {
            return false;
        }
        self.scroll_y = y;
        true
    }

    /// Resize the viewport; returns true when the size changed
    pub(crate) fn resize(&mut self, width: f64, height: f64) -> bool {
        if width == self.config.inner_width && height == self.config.inner_height {
            return false;
        }
        self.config.inner_width = width;
        self.config.inner_height = height;
        self.scroll_y = self.clamp_scroll(self.scroll_y);
        true
    }

    /// Alert dialogs shown so far, oldest first
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub(crate) fn push_alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_unbounded_without_content_height() {
        let mut window = Window::default();
        assert!(window.set_scroll_y(5000.0));
        assert_eq!(window.scroll_y(), 5000.0);
        assert!(!window.set_scroll_y(5000.0));
        assert!(window.set_scroll_y(-10.0));
        assert_eq!(window.scroll_y(), 0.0);
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut window = Window::new(WindowConfig {
            content_height: Some(2000.0),
            ..WindowConfig::default()
        });
        window.set_scroll_y(5000.0);
        assert_eq!(window.scroll_y(), 1200.0);

        // Taller viewport shrinks the range and pulls the offset back.
        window.resize(1280.0, 1600.0);
        assert_eq!(window.scroll_y(), 400.0);
    }
}

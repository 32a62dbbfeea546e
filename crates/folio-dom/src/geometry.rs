//! Geometry APIs
//!
//! DOMRect plus the offset/scroll metrics of an element.

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Edge-inclusive overlap test
    pub fn intersects(&self, other: &DOMRect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    /// Get intersection rect
    pub fn intersection(&self, other: &DOMRect) -> Option<DOMRect> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(DOMRect::from_xywh(x, y, right - x, bottom - y))
    }
}

/// Element geometry in document coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementGeometry {
    pub offset_top: f64,
    pub offset_left: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

impl ElementGeometry {
    pub fn new(offset_top: f64, offset_height: f64) -> Self {
        Self {
            offset_top,
            offset_height,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, left: f64, width: f64) -> Self {
        self.offset_left = left;
        self.offset_width = width;
        self
    }

    /// Bounding rect relative to the viewport for a given scroll offset
    pub fn bounding_client_rect(&self, scroll_y: f64) -> DOMRect {
        DOMRect::from_xywh(
            self.offset_left,
            self.offset_top - scroll_y,
            self.offset_width,
            self.offset_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_rect_edges() {
        let rect = DOMRect::from_xywh(10.0, 20.0, 100.0, 50.0);

        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.left(), 10.0);
    }

    #[test]
    fn test_intersection() {
        let viewport = DOMRect::from_xywh(0.0, 0.0, 800.0, 600.0);
        let half_in = DOMRect::from_xywh(0.0, 500.0, 800.0, 200.0);
        let below = DOMRect::from_xywh(0.0, 700.0, 800.0, 100.0);

        let hit = half_in.intersection(&viewport).map(|r| r.area());
        assert_eq!(hit, Some(800.0 * 100.0));
        assert!(below.intersection(&viewport).is_none());
    }

    #[test]
    fn test_client_rect_follows_scroll() {
        let geometry = ElementGeometry::new(1200.0, 300.0).with_width(0.0, 1280.0);
        let rect = geometry.bounding_client_rect(1000.0);
        assert_eq!(rect.top(), 200.0);
        assert_eq!(rect.height, 300.0);
    }
}

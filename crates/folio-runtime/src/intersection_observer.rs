//! Intersection Observer API
//!
//! Observe element visibility against the viewport. Only the viewport root is
//! supported; `root_margin` grows or shrinks it before ratios are computed.

use std::str::FromStr;

use folio_dom::{DOMRect, Document, NodeId};

use crate::{RuntimeError, UnitId};

/// Observer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// A root margin component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    /// Percentage of the viewport's matching dimension
    Percent(f64),
}

impl Length {
    fn resolve(self, basis: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => basis * pct / 100.0,
        }
    }
}

impl FromStr for Length {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || RuntimeError::InvalidRootMargin(s.to_string());
        if let Some(px) = s.strip_suffix("px") {
            px.parse().map(Self::Px).map_err(|_| bad())
        } else if let Some(pct) = s.strip_suffix('%') {
            pct.parse().map(Self::Percent).map_err(|_| bad())
        } else if s == "0" {
            Ok(Self::Px(0.0))
        } else {
            Err(bad())
        }
    }
}

/// CSS-style margin around the root (`top right bottom left`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    /// Expand (or shrink, for negative values) a root rectangle
    pub fn apply(&self, root: DOMRect) -> DOMRect {
        let top = self.top.resolve(root.height);
        let right = self.right.resolve(root.width);
        let bottom = self.bottom.resolve(root.height);
        let left = self.left.resolve(root.width);
        DOMRect::from_xywh(
            root.x - left,
            root.y - top,
            (root.width + left + right).max(0.0),
            (root.height + top + bottom).max(0.0),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for RootMargin {
    type Err = RuntimeError;

    /// Shorthand with 1 to 4 values, like the CSS `margin` property
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(Length::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(RuntimeError::InvalidRootMargin(s.to_string())),
        };
        Ok(Self { top, right, bottom, left })
    }
}

/// Intersection observer options
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverOptions {
    pub root_margin: RootMargin,
    /// Ratios at which to notify, sorted ascending
    pub thresholds: Vec<f64>,
}

impl IntersectionObserverOptions {
    /// Single threshold, zero margin
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            root_margin: RootMargin::ZERO,
            thresholds: vec![threshold.clamp(0.0, 1.0)],
        }
    }

    /// Set the root margin from CSS shorthand
    pub fn root_margin(mut self, margin: &str) -> Result<Self, RuntimeError> {
        self.root_margin = margin.parse()?;
        Ok(self)
    }

    fn min_threshold(&self) -> f64 {
        self.thresholds.first().copied().unwrap_or(0.0)
    }
}

impl Default for IntersectionObserverOptions {
    fn default() -> Self {
        Self::with_threshold(0.0)
    }
}

/// Intersection observer entry
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverEntry {
    pub target: NodeId,
    pub bounding_client_rect: DOMRect,
    pub intersection_rect: DOMRect,
    pub root_bounds: DOMRect,
    pub intersection_ratio: f64,
    /// Target meets the observer's lowest threshold
    pub is_intersecting: bool,
    pub time: f64,
}

/// Intersection observer
#[derive(Debug)]
pub struct IntersectionObserver {
    id: ObserverId,
    owner: UnitId,
    options: IntersectionObserverOptions,
    /// Targets in observation order with the last reported threshold band
    observed: Vec<(NodeId, Option<usize>)>,
}

impl IntersectionObserver {
    pub fn new(id: ObserverId, owner: UnitId, mut options: IntersectionObserverOptions) -> Self {
        options.thresholds.sort_by(f64::total_cmp);
        options.thresholds.dedup();
        Self {
            id,
            owner,
            options,
            observed: Vec::new(),
        }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn owner(&self) -> UnitId {
        self.owner
    }

    /// Observe an element; the next check always reports it
    pub fn observe(&mut self, target: NodeId) {
        if !self.is_observing(target) {
            self.observed.push((target, None));
        }
    }

    /// Stop observing
    pub fn unobserve(&mut self, target: NodeId) {
        self.observed.retain(|(n, _)| *n != target);
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.observed.iter().any(|(n, _)| *n == target)
    }

    /// Check intersections; returns entries whose threshold band changed
    pub fn check_intersections(
        &mut self,
        viewport: DOMRect,
        document: &Document,
        scroll_y: f64,
        time: f64,
    ) -> Vec<IntersectionObserverEntry> {
        let root = self.options.root_margin.apply(viewport);
        let min_threshold = self.options.min_threshold();
        let mut entries = Vec::new();

        for (node, last_band) in &mut self.observed {
            if !document.is_connected(*node) {
                continue;
            }
            let rect = document.geometry(*node).bounding_client_rect(scroll_y);
            let intersection = rect.intersection(&root);

            // Zero-area targets count as fully visible once they touch the root.
            let ratio = match intersection {
                None => 0.0,
                Some(_) if rect.area() <= 0.0 => 1.0,
                Some(i) => (i.area() / rect.area()).clamp(0.0, 1.0),
            };
            let is_intersecting = intersection.is_some() && ratio >= min_threshold;
            let band = if is_intersecting {
                self.options.thresholds.iter().filter(|&&t| ratio >= t).count()
            } else {
                0
            };

            if *last_band != Some(band) {
                *last_band = Some(band);
                entries.push(IntersectionObserverEntry {
                    target: *node,
                    bounding_client_rect: rect,
                    intersection_rect: intersection.unwrap_or_default(),
                    root_bounds: root,
                    intersection_ratio: ratio,
                    is_intersecting,
                    time,
                });
            }
        }
        entries
    }
}

/// Intersection observer manager
#[derive(Debug, Default)]
pub struct IntersectionObserverManager {
    observers: Vec<IntersectionObserver>,
    next_id: u64,
}

impl IntersectionObserverManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create observer
    pub fn create(&mut self, owner: UnitId, options: IntersectionObserverOptions) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.push(IntersectionObserver::new(id, owner, options));
        id
    }

    /// Get observer
    pub fn get(&self, id: ObserverId) -> Option<&IntersectionObserver> {
        self.observers.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObserverId) -> Option<&mut IntersectionObserver> {
        self.observers.iter_mut().find(|o| o.id() == id)
    }

    /// Process all observers, returning non-empty batches in creation order
    pub fn process(
        &mut self,
        viewport: DOMRect,
        document: &Document,
        scroll_y: f64,
        time: f64,
    ) -> Vec<(UnitId, ObserverId, Vec<IntersectionObserverEntry>)> {
        self.observers
            .iter_mut()
            .filter_map(|observer| {
                let entries = observer.check_intersections(viewport, document, scroll_y, time);
                (!entries.is_empty()).then(|| (observer.owner(), observer.id(), entries))
            })
            .collect()
    }
}

//! Block layout
//!
//! A vertical block-flow pass good enough to give loaded pages usable
//! `offset_top`/`offset_height` values: every element is a block spanning its
//! container, children stack top to bottom, and a run of text takes one line.
//! Inline `height`/`min-height` in px override the content height; `display:
//! none` and out-of-flow (`fixed`/`absolute`) boxes do not advance the flow.

use crate::{Document, ElementGeometry, NodeData, NodeId};

/// Default height of a line of text
pub const DEFAULT_LINE_HEIGHT: f64 = 24.0;

const NON_RENDERED: [&str; 7] = ["head", "script", "style", "title", "meta", "link", "template"];

/// Block layout pass
#[derive(Debug, Clone, Copy)]
pub struct BlockLayout {
    pub viewport_width: f64,
    pub line_height: f64,
}

impl BlockLayout {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }

    /// Lay out the whole document; returns the total content height
    pub fn run(&self, doc: &mut Document) -> f64 {
        let root = doc.tree().root();
        let height = self.layout_children(doc, root, 0.0);
        tracing::debug!(height, "layout complete");
        height
    }

    fn layout_children(&self, doc: &mut Document, parent: NodeId, top: f64) -> f64 {
        let children: Vec<NodeId> = doc.tree().children(parent).map(|(id, _)| id).collect();
        let mut y = top;
        for child in children {
            let (is_element, is_text_line) = match doc.tree().get(child).map(|n| &n.data) {
                Some(NodeData::Element(_)) => (true, false),
                Some(NodeData::Text(text)) => (false, !text.trim().is_empty()),
                _ => (false, false),
            };
            if is_element {
                y += self.layout_element(doc, child, y);
            } else if is_text_line {
                y += self.line_height;
            }
        }
        y - top
    }

    /// Lay out one element at `top`; returns how far it advances the flow
    fn layout_element(&self, doc: &mut Document, id: NodeId, top: f64) -> f64 {
        let Some(elem) = doc.element(id) else {
            return 0.0;
        };
        if NON_RENDERED.contains(&elem.tag.as_str()) || elem.style.get_property_value("display") == Some("none") {
            return 0.0;
        }
        let out_of_flow = matches!(
            elem.style.get_property_value("position"),
            Some("fixed" | "absolute")
        );
        let height = px(elem.style.get_property_value("height"));
        let min_height = px(elem.style.get_property_value("min-height")).unwrap_or(0.0);

        let content = self.layout_children(doc, id, top);
        let height = height.unwrap_or(content).max(min_height);
        doc.set_geometry(
            id,
            ElementGeometry::new(top, height).with_width(0.0, self.viewport_width),
        );

        if out_of_flow { 0.0 } else { height }
    }
}

fn px(value: Option<&str>) -> Option<f64> {
    value?.trim().strip_suffix("px")?.trim().parse().ok()
}

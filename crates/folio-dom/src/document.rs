//! Document - High-level document API

use crate::{
    DOMTokenList, DomResult, DomTree, ElementData, ElementGeometry, NodeId, SelectorList,
};

/// Document loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    Loading,
    Interactive,
    #[default]
    Complete,
}

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    url: String,
    ready_state: ReadyState,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with the basic html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under the root can never form a cycle.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            ready_state: ReadyState::Complete,
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure) for a loader to fill in
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            ready_state: ReadyState::Loading,
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree has been populated
    pub fn finalize(&mut self) {
        let find = |tree: &DomTree, parent: NodeId, tag: &str| {
            tree.children(parent)
                .find(|(_, n)| n.as_element().is_some_and(|e| e.tag == tag))
                .map_or(NodeId::NONE, |(id, _)| id)
        };
        self.html_element = find(&self.tree, self.tree.root(), "html");
        self.head_element = find(&self.tree, self.html_element, "head");
        self.body_element = find(&self.tree, self.html_element, "body");
        tracing::debug!(
            nodes = self.tree.len(),
            has_body = self.body_element.is_valid(),
            "document finalized"
        );
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    /// Text of the first `<title>` in `<head>`
    pub fn title(&self) -> String {
        self.tree
            .children(self.head_element)
            .find(|(_, n)| n.as_element().is_some_and(|e| e.tag == "title"))
            .map(|(id, _)| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// `<head>` element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// `<body>` element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Append a child node
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)
    }

    /// Detach a node from the tree
    pub fn remove(&mut self, id: NodeId) {
        self.tree.detach(id);
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.tree.is_connected(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.element(id)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.tree.element_mut(id)
    }

    /// First connected element with the given id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id.as_deref()) == Some(id))
    }

    /// First connected element matching `selector`
    pub fn query_selector(&self, selector: &str) -> DomResult<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// Every connected element matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> DomResult<Vec<NodeId>> {
        self.query_selector_all_within(self.tree.root(), selector)
    }

    /// Matching descendants of `scope`, in document order
    pub fn query_selector_all_within(&self, scope: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .descendants(scope)
            .into_iter()
            .filter(|&n| list.matches(&self.tree, n))
            .collect())
    }

    /// Whether `node` is `ancestor` or one of its descendants
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        node == ancestor || self.tree.ancestors(node).any(|a| a == ancestor)
    }

    // ----- attributes -----

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.set_attr(name, value);
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.remove_attr(name))
    }

    // ----- classes -----

    pub fn class_list(&self, id: NodeId) -> Option<&DOMTokenList> {
        self.element(id).map(|e| &e.class_list)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.class_list.contains(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.class_list.add(class))
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.class_list.remove(class))
    }

    /// Toggle a class; returns the new state (false for non-elements)
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> bool {
        self.element_mut(id)
            .is_some_and(|e| e.class_list.toggle(class, force))
    }

    // ----- inline style -----

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id)?.style.get_property_value(property)
    }

    /// Set an inline style property; empty value removes it
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.style.set_property(property, value);
        }
    }

    pub fn set_css_text(&mut self, id: NodeId, text: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.style.set_css_text(text);
        }
    }

    // ----- text & geometry -----

    pub fn text_content(&self, id: NodeId) -> String {
        self.tree.text_content(id)
    }

    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        self.tree.set_text_content(id, text)
    }

    /// Element geometry (zeroed for non-elements)
    pub fn geometry(&self, id: NodeId) -> ElementGeometry {
        self.element(id).map(|e| e.geometry).unwrap_or_default()
    }

    pub fn set_geometry(&mut self, id: NodeId, geometry: ElementGeometry) {
        if let Some(elem) = self.element_mut(id) {
            elem.geometry = geometry;
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

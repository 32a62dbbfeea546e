//! DOM Node
//!
//! Nodes link to their relatives through [`NodeId`]s instead of pointers so
//! the whole tree lives in one `Vec`.

use std::borrow::Cow;

use crate::{CssStyleDeclaration, DOMTokenList, ElementGeometry, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a doctype node
    pub fn doctype(name: impl Into<String>) -> Self {
        Self::with_data(NodeData::Doctype { name: name.into() })
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `class` and `style` are not kept in `attrs`; they live in their parsed
/// forms and are serialized on demand by [`ElementData::attribute`].
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Plain attributes in insertion order
    pub attrs: Vec<Attribute>,
    /// Cached id attribute
    pub id: Option<String>,
    /// Parsed class attribute
    pub class_list: DOMTokenList,
    /// Parsed inline style attribute
    pub style: CssStyleDeclaration,
    /// Layout geometry
    pub geometry: ElementGeometry,
    /// Dirty value of a form control (None = default value)
    pub(crate) value: Option<String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            class_list: DOMTokenList::new(),
            style: CssStyleDeclaration::new(),
            geometry: ElementGeometry::default(),
            value: None,
        }
    }

    /// Get a plain attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Get any attribute, including the derived `class` and `style`
    pub fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "class" if self.class_list.length() > 0 => Some(Cow::Owned(self.class_list.value())),
            "style" if !self.style.is_empty() => Some(Cow::Owned(self.style.css_text())),
            "class" | "style" => None,
            _ => self.get_attr(name).map(Cow::Borrowed),
        }
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match name.as_str() {
            "class" => {
                self.class_list.set_value(&value);
                return;
            }
            "style" => {
                self.style.set_css_text(&value);
                return;
            }
            "id" => self.id = Some(value.clone()),
            _ => {}
        }

        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value;
        } else {
            self.attrs.push(Attribute { name, value });
        }
    }

    /// Remove an attribute, returns true if it existed
    pub fn remove_attr(&mut self, name: &str) -> bool {
        match name {
            "class" => {
                let had = self.class_list.length() > 0;
                self.class_list.set_value("");
                had
            }
            "style" => {
                let had = !self.style.is_empty();
                self.style.set_css_text("");
                had
            }
            _ => {
                if name == "id" {
                    self.id = None;
                }
                let before = self.attrs.len();
                self.attrs.retain(|a| a.name != name);
                self.attrs.len() != before
            }
        }
    }

    /// Check for an attribute
    pub fn has_attr(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

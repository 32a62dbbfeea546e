//! Folio DOM - Document Object Model
//!
//! Arena-based DOM tree used by the Folio page runtime. Nodes are addressed
//! by [`NodeId`] handles which stay valid for the lifetime of the document,
//! even after a node has been detached.

mod classlist;
mod document;
mod forms;
mod geometry;
mod layout;
mod node;
mod selector;
mod style;
mod tree;

pub use classlist::DOMTokenList;
pub use document::{Document, ReadyState};
pub use geometry::{DOMRect, ElementGeometry};
pub use layout::{BlockLayout, DEFAULT_LINE_HEIGHT};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::{Selector, SelectorList};
pub use style::CssStyleDeclaration;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node not found")]
    NotFound,

    #[error("hierarchy request error")]
    HierarchyRequest,

    #[error("node is not an element")]
    NotAnElement,

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

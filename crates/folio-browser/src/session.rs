//! Scripted visitor sessions
//!
//! A session is a JSON document listing what a visitor does, one step at a
//! time:
//!
//! ```json
//! {
//!   "steps": [
//!     { "action": "scroll", "y": 400 },
//!     { "action": "click", "selector": ".nav-menu a" },
//!     { "action": "type", "selector": "#name", "text": "Ada" },
//!     { "action": "submit", "selector": "#contactForm" },
//!     { "action": "wait", "ms": 3500 }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use folio_dom::{DomError, NodeId};
use folio_runtime::Page;
use serde::Deserialize;

/// Session error
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid session {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("step {step}: no element matches `{selector}`")]
    NoMatch { step: usize, selector: String },
}

/// One visitor action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Scroll to an absolute offset
    Scroll { y: f64 },
    /// Scroll by a delta
    ScrollBy { dy: f64 },
    Resize { width: f64, height: f64 },
    Click { selector: String },
    /// Press keys in order
    Keys { keys: Vec<String> },
    /// Replace a field's value
    Type { selector: String, text: String },
    Submit { selector: String },
    MouseMove { x: f64, y: f64 },
    /// Pointer enters the element
    Hover { selector: String },
    /// Pointer leaves the element
    Leave { selector: String },
    /// Let time pass
    Wait { ms: f64 },
}

/// Session file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Session {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path).map_err(|source| SessionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SessionError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Run every step against `page`
    pub fn replay(&self, page: &mut Page) -> Result<(), SessionError> {
        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(step = index, ?step, "replaying");
            let find = |page: &Page, selector: &str| -> Result<NodeId, SessionError> {
                page.document()
                    .query_selector(selector)?
                    .ok_or_else(|| SessionError::NoMatch {
                        step: index,
                        selector: selector.to_string(),
                    })
            };

            match step {
                Step::Scroll { y } => page.scroll_to(*y),
                Step::ScrollBy { dy } => page.scroll_by(*dy),
                Step::Resize { width, height } => page.resize(*width, *height),
                Step::Click { selector } => {
                    let target = find(page, selector)?;
                    page.click(target);
                }
                Step::Keys { keys } => page.type_keys(keys.as_slice()),
                Step::Type { selector, text } => {
                    let field = find(page, selector)?;
                    page.document_mut().set_control_value(field, text)?;
                }
                Step::Submit { selector } => {
                    let form = find(page, selector)?;
                    page.submit(form);
                }
                Step::MouseMove { x, y } => page.mouse_move(*x, *y),
                Step::Hover { selector } => {
                    let target = find(page, selector)?;
                    page.mouse_enter(target);
                }
                Step::Leave { selector } => {
                    let target = find(page, selector)?;
                    page.mouse_leave(target);
                }
                Step::Wait { ms } => page.advance(*ms),
            }
        }
        Ok(())
    }
}

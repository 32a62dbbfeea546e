//! Form controls
//!
//! Text-entry controls (`input`, `textarea`) track a dirty value separately
//! from their default, so `reset` can restore what the markup declared.

use crate::{Document, DomError, DomResult, NodeId};

const CONTROL_TAGS: [&str; 2] = ["input", "textarea"];

impl Document {
    fn is_text_control(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| {
            CONTROL_TAGS.contains(&e.tag.as_str())
                && !matches!(
                    e.get_attr("type"),
                    Some("checkbox" | "radio" | "submit" | "button" | "reset")
                )
        })
    }

    /// Value declared by markup
    pub fn default_value(&self, id: NodeId) -> String {
        match self.element(id) {
            Some(e) if e.tag == "textarea" => self.text_content(id),
            Some(e) => e.get_attr("value").unwrap_or_default().to_string(),
            None => String::new(),
        }
    }

    /// Current value of a control
    pub fn control_value(&self, id: NodeId) -> String {
        match self.element(id).and_then(|e| e.value.clone()) {
            Some(value) => value,
            None => self.default_value(id),
        }
    }

    /// Set the current value, as typing would
    pub fn set_control_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        if !self.is_text_control(id) {
            return Err(DomError::NotAnElement);
        }
        if let Some(elem) = self.element_mut(id) {
            elem.value = Some(value.to_string());
        }
        Ok(())
    }

    /// Text controls belonging to `form`, in document order
    pub fn form_controls(&self, form: NodeId) -> Vec<NodeId> {
        self.tree
            .descendants(form)
            .into_iter()
            .filter(|&n| self.is_text_control(n))
            .collect()
    }

    /// Restore every control of `form` to its default; returns how many were reset
    pub fn reset_form(&mut self, form: NodeId) -> usize {
        let controls = self.form_controls(form);
        for &control in &controls {
            if let Some(elem) = self.element_mut(control) {
                elem.value = None;
            }
        }
        tracing::debug!(controls = controls.len(), "form reset");
        controls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_defaults() {
        let mut doc = Document::new("about:blank");
        let form = doc.create_element("form");
        let name = doc.create_element("input");
        doc.set_attr(name, "value", "Your name");
        let message = doc.create_element("textarea");
        let submit = doc.create_element("input");
        doc.set_attr(submit, "type", "submit");
        let body = doc.body();
        doc.append_child(body, form).unwrap();
        for control in [name, message, submit] {
            doc.append_child(form, control).unwrap();
        }

        doc.set_control_value(name, "Ada").unwrap();
        doc.set_control_value(message, "Hi").unwrap();
        assert!(doc.set_control_value(submit, "x").is_err());
        assert_eq!(doc.control_value(name), "Ada");

        assert_eq!(doc.reset_form(form), 2);
        assert_eq!(doc.control_value(name), "Your name");
        assert_eq!(doc.control_value(message), "");
    }
}

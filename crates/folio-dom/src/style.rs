//! Inline style declarations
//!
//! The `style` attribute of an element, kept as ordered property/value pairs.

/// CSSStyleDeclaration for an element's inline style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssStyleDeclaration {
    declarations: Vec<(String, String)>,
}

impl CssStyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name: value; name: value` text
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        style.set_css_text(text);
        style
    }

    /// Property names are case-insensitive except custom properties
    fn normalize(name: &str) -> String {
        let name = name.trim();
        if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        }
    }

    /// Get a property value
    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        let name = Self::normalize(name);
        self.declarations
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it
    pub fn set_property(&mut self, name: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.remove_property(name);
            return;
        }
        let name = Self::normalize(name);
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.declarations.push((name, value.to_string())),
        }
    }

    /// Remove a property, returning its old value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = Self::normalize(name);
        let pos = self.declarations.iter().position(|(n, _)| *n == name)?;
        Some(self.declarations.remove(pos).1)
    }

    /// Serialize as `name: value;` pairs
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace every declaration from text
    pub fn set_css_text(&mut self, text: &str) {
        self.declarations.clear();
        for decl in text.split(';') {
            if let Some((name, value)) = decl.split_once(':') {
                if !name.trim().is_empty() {
                    self.set_property(name, value);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiline_css_text() {
        let style = CssStyleDeclaration::parse(
            "
            position: fixed;
            top: 100px;
            background: rgba(167, 139, 250, 0.9);
        ",
        );
        assert_eq!(style.len(), 3);
        assert_eq!(style.get_property_value("TOP"), Some("100px"));
        assert_eq!(
            style.get_property_value("background"),
            Some("rgba(167, 139, 250, 0.9)")
        );
    }

    #[test]
    fn test_custom_properties_keep_case() {
        let mut style = CssStyleDeclaration::new();
        style.set_property("--vh", "8px");
        assert_eq!(style.get_property_value("--vh"), Some("8px"));
        assert_eq!(style.get_property_value("--VH"), None);
    }

    #[test]
    fn test_empty_value_removes() {
        let mut style = CssStyleDeclaration::parse("overflow: hidden; color: red");
        style.set_property("overflow", "");
        assert_eq!(style.get_property_value("overflow"), None);
        assert_eq!(style.css_text(), "color: red;");
    }
}

//! CSS selector subset
//!
//! Supports what page scripts typically query with: type, universal, `#id`,
//! `.class`, `[attr]` / `[attr="value"]`, descendant and child combinators,
//! and comma-separated selector lists.

use crate::{DomError, DomResult, DomTree, NodeId};

/// A comma-separated list of selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> DomResult<Self> {
        Parser::new(input).parse_list()
    }

    /// Check whether any selector in the list matches `node`
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, node))
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }
}

/// A complex selector: compounds joined by combinators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Each compound with the combinator linking it to the previous one
    parts: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatcher>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatcher {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Check whether this selector matches `node`
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.matches_at(tree, self.parts.len() - 1, node)
    }

    fn matches_at(&self, tree: &DomTree, idx: usize, node: NodeId) -> bool {
        let (combinator, compound) = &self.parts[idx];
        if !compound.matches(tree, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        let mut ancestors = tree
            .ancestors(node)
            .filter(|&a| tree.element(a).is_some());
        match combinator {
            Combinator::Child => ancestors
                .next()
                .is_some_and(|parent| self.matches_at(tree, idx - 1, parent)),
            Combinator::Descendant => ancestors.any(|a| self.matches_at(tree, idx - 1, a)),
        }
    }
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(elem) = tree.element(node) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != elem.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| elem.class_list.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|m| match (elem.attribute(&m.name), &m.value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected.as_str(),
            (None, _) => false,
        })
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> DomError {
        DomError::InvalidSelector {
            selector: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(mut self) -> DomResult<SelectorList> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_complex()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(c) => return Err(self.error(format!("unexpected `{c}`"))),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> DomResult<Selector> {
        let mut parts = vec![(Combinator::Descendant, self.parse_compound()?)];
        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_ws();
                    Combinator::Child
                }
                Some(_) if had_ws => Combinator::Descendant,
                Some(c) => return Err(self.error(format!("unexpected `{c}`"))),
            };
            parts.push((combinator, self.parse_compound()?));
        }
        Ok(Selector { parts })
    }

    fn parse_compound(&mut self) -> DomResult<Compound> {
        let mut compound = Compound::default();

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                compound.tag = Some("*".to_string());
            }
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.parse_ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.parse_attr()?);
                }
                _ => break,
            }
        }

        if compound.is_empty() {
            return Err(self.error("expected a selector"));
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> DomResult<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_attr(&mut self) -> DomResult<AttrMatcher> {
        self.skip_ws();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_ws();

        let value = if self.peek() == Some('=') {
            self.pos += 1;
            self.skip_ws();
            let value = match self.peek() {
                Some(q @ ('"' | '\'')) => {
                    self.pos += 1;
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c != q) {
                        self.pos += 1;
                    }
                    if self.peek().is_none() {
                        return Err(self.error("unterminated string"));
                    }
                    let value: String = self.chars[start..self.pos].iter().collect();
                    self.pos += 1;
                    value
                }
                _ => self.parse_ident()?,
            };
            self.skip_ws();
            Some(value)
        } else {
            None
        };

        if self.peek() != Some(']') {
            return Err(self.error("expected `]`"));
        }
        self.pos += 1;
        Ok(AttrMatcher { name, value })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let nav = tree.create_element("ul");
        tree.element_mut(nav).unwrap().set_attr("class", "nav-menu");
        let item = tree.create_element("li");
        let link = tree.create_element("a");
        tree.element_mut(link).unwrap().set_attr("href", "#about");
        let img = tree.create_element("img");
        tree.element_mut(img).unwrap().set_attr("loading", "lazy");
        tree.append_child(tree.root(), nav).unwrap();
        tree.append_child(nav, item).unwrap();
        tree.append_child(item, link).unwrap();
        tree.append_child(tree.root(), img).unwrap();
        (tree, nav, link, img)
    }

    #[test]
    fn test_descendant_combinator() {
        let (tree, nav, link, _) = tree();
        let sel = SelectorList::parse(".nav-menu a").unwrap();
        assert!(sel.matches(&tree, link));
        assert!(!sel.matches(&tree, nav));
    }

    #[test]
    fn test_child_combinator_requires_parent() {
        let (tree, _, link, _) = tree();
        assert!(!SelectorList::parse(".nav-menu > a").unwrap().matches(&tree, link));
        assert!(SelectorList::parse("li > a").unwrap().matches(&tree, link));
    }

    #[test]
    fn test_attribute_selectors() {
        let (tree, _, link, img) = tree();
        assert!(SelectorList::parse(r#"img[loading="lazy"]"#).unwrap().matches(&tree, img));
        assert!(SelectorList::parse("img[loading=lazy]").unwrap().matches(&tree, img));
        assert!(!SelectorList::parse("img[loading='eager']").unwrap().matches(&tree, img));
        assert!(SelectorList::parse("[href]").unwrap().matches(&tree, link));
    }

    #[test]
    fn test_selector_list() {
        let (tree, _, link, img) = tree();
        let sel = SelectorList::parse("a, button, .project-card").unwrap();
        assert_eq!(sel.selectors().len(), 3);
        assert!(sel.matches(&tree, link));
        assert!(!sel.matches(&tree, img));
    }

    #[test]
    fn test_invalid_selectors() {
        for bad in ["", "a >", ".", "a,,b", "[x", "img[loading=\"lazy]"] {
            assert!(SelectorList::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }
}

// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation

use super::element::Element;
use super::selector::Selector;
use crate::error::Result;

/// Parsed HTML document, elements kept in document order
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// All elements in document order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// First element matching `selector`
    pub fn query_selector(&self, selector: &str) -> Result<Option<&Element>> {
        let selector = Selector::parse(selector)?;
        Ok(self.elements.iter().find(|el| selector.matches(el)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut doc = Document::new();
        doc.push(Element::new("meta").with_attribute("charset", "utf-8"));
        doc.push(
            Element::new("meta")
                .with_attribute("name", "csrf-token")
                .with_attribute("content", "tok"),
        );
        doc.push(Element::new("div").with_attribute("id", "app"));
        doc
    }

    #[test]
    fn test_query_selector() {
        let doc = doc();
        assert_eq!(doc.query_selector("#app").unwrap().unwrap().tag_name(), "div");
        assert_eq!(
            doc.query_selector("meta").unwrap().unwrap().get_attribute("charset"),
            Some("utf-8")
        );
        let meta = doc.query_selector(r#"meta[name="csrf-token"]"#).unwrap().unwrap();
        assert_eq!(meta.get_attribute("content"), Some("tok"));
        assert!(doc.query_selector("span").unwrap().is_none());
    }

    #[test]
    fn test_query_selector_rejects_bad_selector() {
        let err = doc().query_selector("head > meta").unwrap_err();
        assert!(matches!(err, crate::error::Error::Selector { .. }));
    }
}

// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::document::Document;
use super::element::Element;
use crate::error::{Error, Result};

/// Parse HTML string into a Document
pub fn parse_html(html: &str) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    let mut doc = Document::new();
    collect(&dom.document, &mut doc);
    Ok(doc)
}

/// Walk the tree depth-first, flattening elements in document order
fn collect(handle: &Handle, doc: &mut Document) {
    if let NodeData::Element {
        ref name,
        ref attrs,
        ..
    } = handle.data
    {
        let mut element = Element::new(name.local.to_string());
        for attr in attrs.borrow().iter() {
            element.set_attribute(attr.name.local.to_string(), attr.value.to_string());
        }

        doc.push(element);
    }

    for child in handle.children.borrow().iter() {
        collect(child, doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_html() {
        let doc = parse_html("<html><body><p>Hello</p></body></html>").unwrap();
        let tags: Vec<_> = doc.elements().iter().map(|e| e.tag_name()).collect();
        assert_eq!(tags, vec!["html", "head", "body", "p"]);
    }

    #[test]
    fn test_parse_device_page() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head>
                <title> AWS DeepRacer </title>
                <meta charset="utf-8">
                <meta name="csrf-token" content="IjQ5ZmE3Yzk.Zx1xPw.abc">
            </head>
            <body>
                <div id="root"></div>
            </body>
            </html>
        "#;
        let doc = parse_html(html).unwrap();

        let meta = doc.query_selector("meta[name=csrf-token]").unwrap().unwrap();
        assert_eq!(meta.get_attribute("content"), Some("IjQ5ZmE3Yzk.Zx1xPw.abc"));
        assert!(doc.query_selector("div#root").unwrap().is_some());
    }

    #[test]
    fn test_parse_fragment_without_head() {
        // html5ever moves stray meta tags into the synthesized head
        let doc = parse_html(r#"<meta name="csrf-token" content="x"><p>hi</p>"#).unwrap();
        let tags: Vec<_> = doc.elements().iter().map(|e| e.tag_name()).collect();
        assert_eq!(tags, vec!["html", "head", "meta", "body", "p"]);
    }
}

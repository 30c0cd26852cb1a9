//! HTML → arena converter
//!
//! Parses editor HTML as a `<body>` fragment with html5ever, which recovers
//! from unterminated and unknown tags the way browsers do, then copies the
//! `RcDom` into a [`Document`] arena.
//!
//! - Comments, doctypes and processing instructions are dropped
//! - Character references are already decoded (`&nbsp;` → U+00A0)
//! - The copy is iterative, so pathological nesting cannot overflow the stack

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{LocalName, Namespace, QualName, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::attr::Attrs;
use crate::id::NodeId;
use crate::node::{Document, Element};

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Parse an HTML fragment into an arena document.
///
/// Never fails: any input, including the empty string, yields a document.
pub fn from_html(html: &str) -> Document {
    if html.is_empty() {
        return Document::new();
    }

    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts { drop_doctype: true, ..Default::default() },
        ..Default::default()
    };
    let context = QualName::new(None, Namespace::from(XHTML_NS), LocalName::from("body"));
    let dom = parse_fragment(RcDom::default(), opts, context, Vec::new()).one(html);
    let doc = from_rcdom(&dom);
    log::trace!("parsed {} input bytes into {} nodes", html.len(), doc.len());
    doc
}

/// Copy a parsed `RcDom` into an arena.
///
/// Fragment parsing wraps its result in a synthetic `<html>` element; its
/// children become the document roots.
pub fn from_rcdom(dom: &RcDom) -> Document {
    let mut doc = Document::new();
    let top = fragment_root(&dom.document);

    // (node, parent in the arena)
    let mut stack: Vec<(Handle, Option<NodeId>)> = top
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), None))
        .collect();

    while let Some((handle, parent)) = stack.pop() {
        match &handle.data {
            NodeData::Element { name, attrs, .. } => {
                let attrs: Attrs = attrs
                    .borrow()
                    .iter()
                    .map(|a| (a.name.local.to_string(), a.value.to_string()))
                    .collect();
                let id = doc.push_element(parent, Element::with_attrs(&*name.local, attrs));
                stack.extend(
                    handle.children.borrow().iter().rev().map(|c| (c.clone(), Some(id))),
                );
            }
            NodeData::Text { contents } => {
                let contents = contents.borrow();
                if !contents.is_empty() {
                    doc.push_text(parent, contents.to_string());
                }
            }
            NodeData::Document => {
                stack.extend(handle.children.borrow().iter().rev().map(|c| (c.clone(), parent)));
            }
            NodeData::Doctype { .. }
            | NodeData::Comment { .. }
            | NodeData::ProcessingInstruction { .. } => {}
        }
    }

    doc
}

fn fragment_root(document: &Handle) -> Handle {
    let children = document.children.borrow();
    let html = children.iter().find(|child| {
        matches!(&child.data, NodeData::Element { name, .. } if &*name.local == "html")
    });
    match html {
        Some(html) => html.clone(),
        None => document.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn root_tags(doc: &Document) -> Vec<String> {
        doc.roots()
            .iter()
            .map(|&id| doc.get(id).map(|n| n.name().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let doc = from_html("");
        assert!(doc.is_empty());
        assert!(doc.roots().is_empty());
    }

    #[test]
    fn test_fragment_roots() {
        let doc = from_html("<p>one</p><p>two</p>tail");
        assert_eq!(root_tags(&doc), ["p", "p", "#text"]);
        assert_eq!(doc.full_text(), "onetwotail");
    }

    #[test]
    fn test_attributes_and_nesting() {
        let doc = from_html(r#"<p class="ql-align-center"><a href="https://x.org">link</a></p>"#);
        let p = doc.roots()[0];
        let elem = doc.element(p).expect("p element");
        assert_eq!(elem.get_attr("class"), Some("ql-align-center"));

        let a = doc.children(p)[0];
        assert_eq!(doc.element(a).and_then(|e| e.get_attr("href")), Some("https://x.org"));
        assert_eq!(doc.text_content(a), "link");
    }

    #[test]
    fn test_entities_decoded() {
        let doc = from_html("<p><strong>&nbsp;</strong>&amp;Text</p>");
        assert_eq!(doc.full_text(), "\u{a0}&Text");
    }

    #[test]
    fn test_unclosed_tags_recovered() {
        let doc = from_html("<p>Unclosed paragraph");
        assert_eq!(doc.full_text(), "Unclosed paragraph");

        let doc = from_html("<strong>bold <em>both</strong> after");
        assert!(doc.full_text().contains("bold both"));
        assert!(doc.full_text().contains("after"));
    }

    #[test]
    fn test_comments_and_doctype_dropped() {
        let doc = from_html("<!DOCTYPE html><!-- note --><p>kept</p>");
        assert_eq!(doc.full_text(), "kept");
        assert!(doc.iter().all(|(_, n)| matches!(n, Node::Element(_) | Node::Text(_))));
    }

    #[test]
    fn test_orphan_list_item_kept() {
        let doc = from_html("<li>lonely</li>");
        assert_eq!(root_tags(&doc), ["li"]);
    }

    #[test]
    fn test_tag_names_lowercase() {
        let doc = from_html("<P><STRONG>x</STRONG></P>");
        assert_eq!(root_tags(&doc), ["p"]);
    }
}

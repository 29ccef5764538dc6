//! Edge case tests for fos-html
//!
//! Malformed markup, entities and shadow DOM templates as the checker sees them.

use fos_dom::NodeId;
use fos_html::{Document, HtmlParser, parse};

fn element_names(doc: &Document, parent: NodeId) -> Vec<String> {
    doc.tree()
        .children(parent)
        .filter_map(|(_, node)| node.as_element().map(|e| e.local_name.clone()))
        .collect()
}

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_empty_input() {
    let doc = parse("").unwrap();
    assert!(doc.document_element().is_valid());
    assert!(doc.body().is_valid());
    assert_eq!(doc.first_body_element(), None);
}

#[test]
fn test_parse_only_whitespace() {
    let doc = parse("   \t\n\r\n   ").unwrap();
    assert_eq!(doc.tree().children(doc.body()).count(), 0);
}

#[test]
fn test_parse_only_doctype() {
    let doc = parse("<!DOCTYPE html>").unwrap();
    assert!(doc.document_element().is_valid());
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    let doc = parse("<div><p><span>text").unwrap();
    let div = doc.first_body_element().unwrap();
    assert_eq!(doc.tree().text_content(div), "text");
}

#[test]
fn test_parse_extra_closing_tags() {
    let doc = parse("<div></div></div></div></div>").unwrap();
    assert_eq!(element_names(&doc, doc.body()), vec!["div"]);
}

#[test]
fn test_parse_duplicate_ids_kept() {
    let doc = parse(r#"<div><div id="foo"></div><span id="foo"></span></div>"#).unwrap();
    let outer = doc.first_body_element().unwrap();
    assert_eq!(element_names(&doc, outer), vec!["div", "span"]);

    // Lookup returns the first in tree order
    let first = doc.tree().children(outer).next().unwrap().0;
    assert_eq!(doc.get_element_by_id("foo"), Some(first));
}

// ============================================================================
// ATTRIBUTES AND ENTITIES
// ============================================================================

#[test]
fn test_parse_attribute_no_value() {
    let doc = parse("<input disabled>").unwrap();
    let input = doc.first_body_element().unwrap();
    assert_eq!(doc.tree().attribute(input, "disabled"), Some(""));
}

#[test]
fn test_parse_aria_attributes() {
    let doc = parse(r#"<svg role="img" aria-label="Logo"></svg>"#).unwrap();
    let svg = doc.first_body_element().unwrap();
    let tree = doc.tree();
    assert_eq!(tree.element(svg).unwrap().local_name, "svg");
    assert_eq!(tree.attribute(svg, "role"), Some("img"));
    assert_eq!(tree.attribute(svg, "aria-label"), Some("Logo"));
}

#[test]
fn test_parse_named_entities() {
    let doc = parse("<p>&lt;tag&gt; &amp; &quot;</p>").unwrap();
    let p = doc.first_body_element().unwrap();
    assert_eq!(doc.tree().text_content(p), "<tag> & \"");
}

#[test]
fn test_parse_comments_are_kept() {
    let doc = parse("<div><!-- note --></div>").unwrap();
    let div = doc.first_body_element().unwrap();
    assert_eq!(doc.tree().children(div).count(), 1);
    assert_eq!(doc.tree().text_content(div), "");
}

// ============================================================================
// SHADOW DOM
// ============================================================================

#[test]
fn test_closed_declarative_shadow_root() {
    let html = r#"<x-a><template shadowrootmode="closed"><img></template></x-a>"#;
    let doc = HtmlParser::new().parse(html).unwrap();
    let host = doc.first_body_element().unwrap();

    assert!(doc.tree().shadow_root(host).is_some());
    assert_eq!(doc.tree().open_shadow_root(host), None);
}

#[test]
fn test_nested_declarative_shadow_roots() {
    let html = r#"
        <x-outer>
            <template shadowrootmode="open">
                <x-inner>
                    <template shadowrootmode="open"><marquee>hi</marquee></template>
                </x-inner>
            </template>
        </x-outer>
    "#;
    let doc = parse(html).unwrap();
    let tree = doc.tree();
    let outer = doc.first_body_element().unwrap();
    let outer_root = tree.open_shadow_root(outer).unwrap();
    let inner = tree
        .children(outer_root)
        .find(|(_, n)| n.is_element())
        .unwrap()
        .0;
    let inner_root = tree.open_shadow_root(inner).unwrap();

    assert_eq!(element_names(&doc, inner_root), vec!["marquee"]);
}

#[test]
fn test_shadow_template_on_unsupported_host() {
    let html = r#"<button><template shadowrootmode="open"><span>x</span></template></button>"#;
    let doc = parse(html).unwrap();
    let button = doc.first_body_element().unwrap();

    assert_eq!(doc.tree().shadow_root(button), None);
    assert_eq!(element_names(&doc, button), vec!["template"]);
}

#[test]
fn test_parse_with_url() {
    let doc = HtmlParser::new()
        .parse_with_url("<p>x</p>", "https://example.com/a")
        .unwrap();
    assert_eq!(doc.url(), "https://example.com/a");
}

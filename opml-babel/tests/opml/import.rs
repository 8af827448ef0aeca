//! Import tests for OPML (OPML → canonical tree)
//!
//! These tests verify that OPML documents are correctly converted into the canonical
//! tree by checking the resulting nodes.

use crate::common::{import_fixture, texts};
use opml_babel::common::visit::{count_nodes, max_depth};
use opml_babel::format::Format;
use opml_babel::formats::OpmlFormat;
use opml_babel::model::{CHILDREN, GENERATOR, GENERATOR_FIELD};
use opml_babel::{import, FormatError, Node};

#[test]
fn test_subscriptions_head() {
    let doc = import_fixture("subscriptions.opml");

    assert_eq!(doc.head.scalar("title"), Some("Subscriptions"));
    assert_eq!(doc.head.scalar("ownerName"), Some("Ada & Co"));
    assert_eq!(doc.head.scalar("expansionState"), Some("1,3"));
    assert_eq!(doc.generator(), Some(GENERATOR));

    let names: Vec<_> = doc.head.fields().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "title",
            "dateCreated",
            "ownerName",
            "expansionState",
            GENERATOR_FIELD
        ]
    );
}

#[test]
fn test_subscriptions_outlines() {
    let doc = import_fixture("subscriptions.opml");
    let outlines = doc.outlines();

    assert_eq!(texts(outlines), vec!["Tech", "Solo", "Empty folder"]);
    assert_eq!(count_nodes(&doc), 5);
    assert_eq!(max_depth(outlines), 2);

    let tech = &outlines[0];
    assert_eq!(tech.scalar("title"), Some("Tech"));
    let feeds = tech.children().unwrap();
    assert_eq!(texts(feeds), vec!["Rust Blog", "Q&A <weekly>"]);
    assert_eq!(
        feeds[1].scalar("xmlUrl"),
        Some("http://example.com/rss?a=1&b=2")
    );

    let attribute_order: Vec<_> = feeds[0].scalars().map(|(name, _)| name).collect();
    assert_eq!(attribute_order, vec!["type", "text", "xmlUrl", "htmlUrl"]);
}

#[test]
fn test_outline_without_children_has_no_children_field() {
    let doc = import_fixture("subscriptions.opml");
    let solo = &doc.outlines()[1];
    let empty_folder = &doc.outlines()[2];

    assert!(solo.get(CHILDREN).is_none());
    assert!(empty_folder.get(CHILDREN).is_none());
}

#[test]
fn test_irregular_document() {
    let doc = import_fixture("irregular.opml");

    // Outlines in head are discarded
    assert!(doc.head.get(CHILDREN).is_none());
    assert_eq!(doc.head.scalar("title"), Some("Irregular"));

    // Unknown top-level elements are dropped
    assert!(doc.body.get("extra").is_none());

    let parent = &doc.outlines()[0];
    assert_eq!(parent.scalar("text"), Some("Parent"));
    // Repeated scalar elements keep the last occurrence
    assert_eq!(parent.scalar("note"), Some("second"));
    // Structured elements are flattened to their own text
    assert_eq!(parent.scalar("meta"), Some(""));

    let children = parent.children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].scalar("text"), Some("Child"));
    assert_eq!(children[1], Node::new());
}

#[test]
fn test_single_and_repeated_outlines_have_same_shape() {
    let one = import(r#"<opml><body><outline text="a"/></body></opml>"#).unwrap();
    let two = import(r#"<opml><body><outline text="a"/><outline text="b"/></body></opml>"#).unwrap();

    assert_eq!(texts(one.outlines()), vec!["a"]);
    assert_eq!(texts(two.outlines()), vec!["a", "b"]);
}

#[test]
fn test_body_scalars_are_kept() {
    let doc =
        import(r#"<opml><body note="kept"><outline text="a"/></body></opml>"#).unwrap();
    assert_eq!(doc.body.scalar("note"), Some("kept"));
    assert_eq!(texts(doc.outlines()), vec!["a"]);
}

#[test]
fn test_missing_sections_are_empty() {
    let doc = import(r#"<opml version="2.0"><head/></opml>"#).unwrap();
    assert!(doc.body.is_empty());
    assert!(doc.outlines().is_empty());
    assert_eq!(doc.head.len(), 1);
    assert_eq!(doc.generator(), Some(GENERATOR));
}

#[test]
fn test_whitespace_in_attributes_survives_character_references() {
    let doc = import(r#"<opml><body><outline text="a&#10;b&#9;c"/></body></opml>"#).unwrap();
    assert_eq!(doc.outlines()[0].scalar("text"), Some("a\nb\tc"));
}

#[test]
fn test_rejects_other_roots() {
    let result = import("<rss><channel/></rss>");
    assert_eq!(
        result,
        Err(FormatError::MalformedInput(
            "Root element is <rss>, expected <opml>".to_string()
        ))
    );
}

#[test]
fn test_rejects_empty_root() {
    assert!(matches!(
        import("<opml></opml>"),
        Err(FormatError::MalformedInput(message)) if message.contains("empty")
    ));
}

#[test]
fn test_rejects_malformed_xml() {
    let result = OpmlFormat::default().parse("<opml><body><outline></body></opml>");
    assert!(matches!(
        result,
        Err(FormatError::MalformedInput(message)) if message.starts_with("XML parsing error")
    ));
}

#[test]
fn test_prefixed_attributes_are_kept_apart() {
    let doc = import(
        r#"<opml xmlns:foo="http://x"><body><outline text="a" foo:bar="1" bar="2"/></body></opml>"#,
    )
    .unwrap();

    let outline = &doc.outlines()[0];
    assert_eq!(outline.scalar("text"), Some("a"));
    assert_eq!(outline.scalar("foo:bar"), Some("1"));
    assert_eq!(outline.scalar("bar"), Some("2"));
}

#[test]
fn test_doctype_is_accepted() {
    let doc = import(
        "<?xml version=\"1.0\"?>\n<!DOCTYPE opml>\n<opml version=\"2.0\"><body><outline text=\"a\"/></body></opml>",
    )
    .unwrap();
    assert_eq!(texts(doc.outlines()), vec!["a"]);
}

#[test]
fn test_head_text_is_not_trimmed() {
    let doc = import(
        r#"<opml><head><title> spaced </title><owner lang="en"> spaced </owner></head></opml>"#,
    )
    .unwrap();
    assert_eq!(doc.head.scalar("title"), Some(" spaced "));
    assert_eq!(doc.head.scalar("owner"), Some(" spaced "));
}

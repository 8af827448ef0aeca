//! Export → import round trips
//!
//! Any well-formed tree without empty `children` lists comes back unchanged, apart from
//! the generator stamp the importer adds.

use crate::common::{import_fixture, without_generator};
use opml_babel::formats::opml::export::export_with_options;
use opml_babel::{export, import, Document, ExportOptions, Node};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z]{0,6}".prop_filter("reserved names", |name| {
        !name.starts_with("xml") && name != "outline"
    })
}

fn attributes() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map(name(), "[ -~\t\n]{0,16}", 0..4)
        .prop_map(|map| map.into_iter().collect())
}

fn node_from(attributes: Vec<(String, String)>) -> Node {
    attributes
        .into_iter()
        .fold(Node::new(), |node, (name, value)| node.with_scalar(name, value))
}

fn outline() -> impl Strategy<Value = Node> {
    attributes()
        .prop_map(node_from)
        .prop_recursive(3, 24, 4, |inner| {
            (attributes(), prop::collection::vec(inner, 1..4))
                .prop_map(|(attributes, children)| node_from(attributes).with_children(children))
        })
}

fn document() -> impl Strategy<Value = Document> {
    (
        prop::collection::btree_map(name(), "[a-zA-Z0-9 &<>\"']{0,12}", 0..4),
        prop::collection::vec(outline(), 1..5),
    )
        .prop_map(|(head, outlines)| {
            let mut doc = Document::with_outlines(outlines);
            for (name, value) in head {
                doc.head.set_scalar(name, value);
            }
            doc
        })
}

proptest! {
    #[test]
    fn export_then_import_preserves_tree(doc in document()) {
        let options = ExportOptions {
            escape_head: true,
            ..ExportOptions::default()
        };
        let text = export_with_options(&doc, &options).unwrap();
        let back = import(&text).unwrap();
        prop_assert_eq!(without_generator(back), doc);
    }

    #[test]
    fn indent_unit_does_not_change_the_tree(doc in document(), spaces in 0usize..5) {
        let options = ExportOptions {
            indent: " ".repeat(spaces),
            escape_head: true,
        };
        let text = export_with_options(&doc, &options).unwrap();
        prop_assert_eq!(without_generator(import(&text).unwrap()), doc);
    }
}

#[test]
fn test_fixture_survives_export_and_import() {
    let doc = import_fixture("subscriptions.opml");
    let options = ExportOptions {
        escape_head: true,
        ..ExportOptions::default()
    };
    let text = export_with_options(&doc, &options).unwrap();
    assert_eq!(import(&text).unwrap(), doc);
}

#[test]
fn test_unescaped_head_markup_does_not_reimport() {
    // head values are written verbatim by default
    let doc = import_fixture("subscriptions.opml");
    let text = export(&doc).unwrap();
    assert!(text.contains("<ownerName>Ada & Co</ownerName>"));
    assert!(import(&text).is_err());
}

#[test]
fn test_local_namespace_declaration_survives_export() {
    let doc = import(
        r#"<opml><body><outline text="a" xmlns:foo="http://x" foo:bar="1"/></body></opml>"#,
    )
    .unwrap();
    let outline = &doc.outlines()[0];
    assert_eq!(outline.scalar("xmlns:foo"), Some("http://x"));

    let text = export(&doc).unwrap();
    assert_eq!(import(&text).unwrap(), doc);
}

//! Export tests for OPML (canonical tree → OPML)

use crate::common::{import_fixture, named};
use insta::assert_snapshot;
use opml_babel::formats::opml::export::{export_with_options, render_outline};
use opml_babel::model::{Value, CHILDREN};
use opml_babel::{export, Document, ExportOptions, FormatError, Node};

fn two_spaces() -> ExportOptions {
    ExportOptions {
        indent: "  ".to_string(),
        escape_head: true,
    }
}

#[test]
fn test_export_subscriptions_fixture() {
    let doc = import_fixture("subscriptions.opml");
    let output = export_with_options(&doc, &two_spaces()).unwrap();

    assert_snapshot!(output, @r#"
<?xml version="1.0" encoding="UTF-8"?>
<opml version="2.0">
  <head>
    <title>Subscriptions</title>
    <dateCreated>Mon, 05 Oct 2026 09:00:00 GMT</dateCreated>
    <ownerName>Ada &amp; Co</ownerName>
    <expansionState>1,3</expansionState>
  </head>
  <body>
    <outline text="Tech" title="Tech">
      <outline type="rss" text="Rust Blog" xmlUrl="https://blog.rust-lang.org/feed.xml" htmlUrl="https://blog.rust-lang.org/"/>
      <outline type="rss" text="Q&amp;A &lt;weekly&gt;" xmlUrl="http://example.com/rss?a=1&amp;b=2"/>
    </outline>
    <outline type="rss" text="Solo" xmlUrl="http://example.com/solo.xml"/>
    <outline text="Empty folder"/>
  </body>
</opml>
"#);
}

#[test]
fn test_indentation_grows_one_unit_per_level() {
    let mut node = named("level-0");
    for level in (1..4).rev() {
        node = named(&format!("level-{level}")).with_children(vec![node]);
    }
    // the loop builds level-1 > level-2 > level-3 > level-0 innermost
    let output = render_outline(&node, 2, "\t");

    for line in output.lines() {
        let depth = line.chars().take_while(|c| *c == '\t').count();
        assert!(depth >= 2, "line {line:?} is indented less than the body");
    }
    assert!(output.starts_with("\t\t<outline text=\"level-1\">\n"));
    assert!(output.contains("\n\t\t\t\t\t<outline text=\"level-0\"/>\n"));
    assert!(output.ends_with("\t\t</outline>\n"));
}

#[test]
fn test_output_has_no_trailing_newline() {
    let output = export(&Document::with_outlines(vec![named("a")])).unwrap();
    assert!(output.ends_with("</opml>"));
    assert!(!output.ends_with('\n'));
}

#[test]
fn test_malformed_tree_is_rejected_before_output() {
    let mut child = named("bad");
    child.insert(CHILDREN, Value::from("not a list"));
    let doc = Document::with_outlines(vec![
        named("ok"),
        named("parent").with_children(vec![child]),
    ]);

    assert_eq!(
        export(&doc),
        Err(FormatError::MalformedDocument {
            path: "body/outline[1]/outline[0]/children".to_string(),
            reason: "children must be a list of nodes".to_string(),
        })
    );
}

#[test]
fn test_nested_value_outside_children_is_rejected() {
    let mut doc = Document::new();
    doc.head.insert("title", Value::Nodes(vec![Node::new()]));
    assert!(matches!(
        export(&doc),
        Err(FormatError::MalformedDocument { path, .. }) if path == "head/title"
    ));
}

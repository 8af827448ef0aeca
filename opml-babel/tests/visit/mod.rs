//! Tree visitor tests over imported documents

use crate::common::import_fixture;
use opml_babel::common::visit::{find_first, visit, visit_mut};

#[test]
fn test_visit_is_depth_first_in_document_order() {
    let doc = import_fixture("subscriptions.opml");
    let mut seen = Vec::new();
    let completed = visit(doc.outlines(), |node| {
        seen.push(node.scalar("text").unwrap_or_default());
        true
    });

    assert!(completed);
    assert_eq!(
        seen,
        vec!["Tech", "Rust Blog", "Q&A <weekly>", "Solo", "Empty folder"]
    );
}

#[test]
fn test_visit_stops_when_visitor_returns_false() {
    let doc = import_fixture("subscriptions.opml");
    let mut seen = Vec::new();
    let completed = visit(doc.outlines(), |node| {
        let text = node.scalar("text").unwrap_or_default();
        seen.push(text);
        text != "Rust Blog"
    });

    assert!(!completed);
    assert_eq!(seen, vec!["Tech", "Rust Blog"]);
}

#[test]
fn test_find_first_feed() {
    let doc = import_fixture("subscriptions.opml");
    let feed = find_first(doc.outlines(), |node| node.scalar("type") == Some("rss"));
    assert_eq!(feed.and_then(|n| n.scalar("text")), Some("Rust Blog"));
}

#[test]
fn test_visit_mut_rewrites_every_outline() {
    let mut doc = import_fixture("subscriptions.opml");
    let outlines = doc.outlines_mut().expect("body has outlines");
    visit_mut(outlines, |node| {
        let upper = node.scalar("text").map(str::to_uppercase);
        if let Some(upper) = upper {
            node.set_scalar("text", upper);
        }
        true
    });

    let tech = &doc.outlines()[0];
    assert_eq!(tech.scalar("text"), Some("TECH"));
    assert_eq!(tech.children().unwrap()[0].scalar("text"), Some("RUST BLOG"));
}

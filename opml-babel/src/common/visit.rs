//! Depth-first traversal over outline nodes
//!
//!     Pre-order: a node is handed to the visitor before its children, and its whole subtree
//!     is finished before the next sibling. A visitor returning `false` stops the traversal at
//!     once; no further sibling or descendant is visited and the walk returns `false`.
//!
//!     Both walks keep an explicit stack of sibling iterators instead of recursing, so stack
//!     usage does not grow with the depth of the outline.

use crate::model::{Document, Node};

/// Visits every node of `nodes` in pre-order. Returns `true` only if the visitor accepted
/// every node.
pub fn visit<'a, F>(nodes: &'a [Node], mut visitor: F) -> bool
where
    F: FnMut(&'a Node) -> bool,
{
    let mut stack = vec![nodes.iter()];
    while let Some(siblings) = stack.last_mut() {
        let Some(node) = siblings.next() else {
            stack.pop();
            continue;
        };
        if !visitor(node) {
            return false;
        }
        if let Some(children) = node.children() {
            stack.push(children.iter());
        }
    }
    true
}

/// Mutable variant of [`visit`].
///
/// The visitor may change the node it is given, including its `children`; the walk descends
/// into whatever children the node has after the visitor returns.
pub fn visit_mut<F>(nodes: &mut [Node], mut visitor: F) -> bool
where
    F: FnMut(&mut Node) -> bool,
{
    let mut stack = vec![nodes.iter_mut()];
    while let Some(siblings) = stack.last_mut() {
        let Some(node) = siblings.next() else {
            stack.pop();
            continue;
        };
        if !visitor(node) {
            return false;
        }
        if let Some(children) = node.children_mut() {
            stack.push(children.iter_mut());
        }
    }
    true
}

/// Number of outline entries in the document body, at any depth.
pub fn count_nodes(doc: &Document) -> usize {
    let mut count = 0;
    visit(doc.outlines(), |_| {
        count += 1;
        true
    });
    count
}

/// First node, in document order, matching `predicate`.
pub fn find_first<'a, P>(nodes: &'a [Node], mut predicate: P) -> Option<&'a Node>
where
    P: FnMut(&Node) -> bool,
{
    let mut found = None;
    visit(nodes, |node| {
        if predicate(node) {
            found = Some(node);
            return false;
        }
        true
    });
    found
}

/// Deepest nesting level of the outline (0 for an empty body, 1 for a flat list).
pub fn max_depth(nodes: &[Node]) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(nodes, 1)];
    while let Some((level_nodes, depth)) = stack.pop() {
        for node in level_nodes {
            deepest = deepest.max(depth);
            if let Some(children) = node.children() {
                stack.push((children, depth + 1));
            }
        }
    }
    deepest
}

//! Guarded access to tree-sitter nodes.
//!
//! The Java grammar exposes most structure through named fields, but nothing
//! stops a malformed file from producing a node without them. Every lookup
//! here returns a typed result instead of assuming the shape.

use protocol::{ExtractError, ExtractResult};
use tree_sitter::Node;

pub fn text<'s>(node: Node, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

pub fn field<'t>(node: Node<'t>, name: &'static str) -> ExtractResult<Node<'t>> {
    node.child_by_field_name(name)
        .ok_or_else(|| ExtractError::MissingField {
            kind: node.kind().to_string(),
            field: name,
        })
}

pub fn field_text<'s>(node: Node, name: &'static str, source: &'s str) -> ExtractResult<&'s str> {
    field(node, name).map(|n| text(n, source))
}

/// Text of an optional field, empty when the field is absent.
pub fn optional_field_text<'s>(node: Node, name: &'static str, source: &'s str) -> &'s str {
    node.child_by_field_name(name)
        .map(|n| text(n, source))
        .unwrap_or_default()
}

pub fn expect_kind<'t>(node: Node<'t>, kind: &'static str) -> ExtractResult<Node<'t>> {
    if node.kind() == kind {
        Ok(node)
    } else {
        Err(ExtractError::UnexpectedKind {
            expected: kind,
            found: node.kind().to_string(),
        })
    }
}

pub fn children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

pub fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

pub fn children_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    children(node).into_iter().filter(|c| c.kind() == kind).collect()
}

pub fn first_child_of_kind<'t>(node: Node<'t>, kind: &'static str) -> ExtractResult<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found.ok_or_else(|| ExtractError::MissingChild {
        parent: node.kind().to_string(),
        kind,
    })
}

pub fn is_punctuation(node: Node) -> bool {
    matches!(node.kind(), "(" | ")" | ",")
}

/// Space-joined text of every `modifiers` child, in source order.
pub fn modifiers(node: Node, source: &str) -> String {
    children_of_kind(node, "modifiers")
        .into_iter()
        .map(|m| text(m, source))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The immediately preceding block comment, or an empty string.
pub fn docstring(node: Node, source: &str) -> String {
    node.prev_sibling()
        .filter(|sibling| sibling.kind() == "block_comment")
        .map(|sibling| text(sibling, source).to_string())
        .unwrap_or_default()
}

//! Tree query layer over tree-sitter nodes
//!
//! Every component addresses the document through the one half-open byte
//! `Range` defined here, so matching and edit planning cannot drift apart on
//! offset conventions. Node-kind predicates for the JSX shapes the engine
//! cares about live here as well.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

/// Half-open byte range over the original document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn of(node: &Node) -> Self {
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
        }
    }

    /// Cursor hit-test, inclusive on both ends: a cursor sitting directly
    /// after the closing brace still addresses the node.
    pub fn contains_cursor(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Get text content of a node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// JSX element, paired or self-closing
pub fn is_markup_element(node: &Node) -> bool {
    matches!(node.kind(), "jsx_element" | "jsx_self_closing_element")
}

pub fn is_object_literal(node: &Node) -> bool {
    node.kind() == "object"
}

/// Identifier or member access: a style value already pointing at a registry
pub fn is_reference_expression(node: &Node) -> bool {
    matches!(node.kind(), "identifier" | "member_expression")
}

/// First node satisfying `pred` in depth-first pre-order, short-circuiting
/// once found.
pub fn find_first<'tree, F>(node: Node<'tree>, pred: &F) -> Option<Node<'tree>>
where
    F: Fn(&Node) -> bool,
{
    if pred(&node) {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(found) = find_first(child, pred) {
            return Some(found);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::parse_tsx;

    #[test]
    fn range_contains_cursor_is_inclusive_on_both_ends() {
        let range = Range { start: 4, end: 9 };
        assert!(range.contains_cursor(4));
        assert!(range.contains_cursor(9));
        assert!(!range.contains_cursor(3));
        assert!(!range.contains_cursor(10));
    }

    #[test]
    fn find_first_returns_the_preorder_first_match() {
        let source = "const a = {x: 1}; const b = {y: 2};";
        let tree = parse_tsx(source).unwrap();
        let object = find_first(tree.root_node(), &|node| is_object_literal(node)).unwrap();
        assert_eq!(node_text(&object, source), "{x: 1}");
    }
}

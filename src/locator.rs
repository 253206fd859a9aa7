//! Style locator
//!
//! Finds the innermost `style` attribute whose value is an inline object
//! literal, starting from a cursor offset, and resolves the JSX element that
//! owns it. Attribute values that are already references (`styles.foo`, bare
//! identifiers) are skipped so extracted attributes stay untouched.

use tracing::debug;
use tree_sitter::{Node, Tree};

use crate::engine::Config;
use crate::error::{ExtractError, Result};
use crate::syntax::{self, Range};

/// Fallback entry base when the owning element's tag is not a plain
/// identifier (namespaced or member tags).
const FALLBACK_TAG: &str = "element";

/// A located extractable style attribute.
#[derive(Debug, Clone)]
pub struct StyleAttributeMatch {
    /// The whole `style={...}` attribute
    pub attribute: Range,
    /// The inline object literal inside the attribute value
    pub value: Range,
    /// The owning JSX element
    pub element: Range,
    /// Tag name of the owning element
    pub tag: String,
}

/// Find the innermost extractable style attribute containing `offset`.
///
/// `None` is the normal "nothing to extract here" outcome. The only error is
/// a matched attribute with no enclosing element, which no well-formed tree
/// produces.
pub fn locate(
    tree: &Tree,
    source: &str,
    offset: usize,
    config: &Config,
) -> Result<Option<StyleAttributeMatch>> {
    locate_in(tree.root_node(), source, offset, config)
}

fn locate_in(
    node: Node,
    source: &str,
    offset: usize,
    config: &Config,
) -> Result<Option<StyleAttributeMatch>> {
    if !Range::of(&node).contains_cursor(offset) {
        return Ok(None);
    }

    if node.kind() == "jsx_attribute" {
        if let Some(value) = attribute_style_value(&node, source, config) {
            if syntax::is_reference_expression(&value) {
                // Already extracted, leave it alone.
                return Ok(None);
            }
            if !syntax::is_object_literal(&value) {
                return Ok(None);
            }

            let element =
                resolve_owner(&node).ok_or(ExtractError::MalformedTree(node.start_byte()))?;
            let tag = tag_name(&element, source);
            debug!(
                "Matched style attribute on <{}> at bytes {}..{}",
                tag,
                node.start_byte(),
                node.end_byte()
            );

            return Ok(Some(StyleAttributeMatch {
                attribute: Range::of(&node),
                value: Range::of(&value),
                element: Range::of(&element),
                tag,
            }));
        }
    }

    // Children before siblings, so nested style attributes match innermost
    // first.
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(found) = locate_in(child, source, offset, config)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}

/// Unwrapped value of a `style` attribute: the expression inside the `{...}`
/// container, or the literal value when no container is present.
fn attribute_style_value<'tree>(
    attribute: &Node<'tree>,
    source: &str,
    config: &Config,
) -> Option<Node<'tree>> {
    let mut cursor = attribute.walk();
    let mut children = attribute
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment");

    let name = children.next()?;
    if syntax::node_text(&name, source) != config.attribute {
        return None;
    }

    let value = children.next()?;
    if value.kind() == "jsx_expression" {
        let mut cursor = value.walk();
        value
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment")
    } else {
        Some(value)
    }
}

/// Walk the parent chain to the owning markup element.
///
/// Attributes cannot exist outside an element in well-formed JSX, so a
/// missing owner is the caller's fatal condition.
fn resolve_owner<'tree>(attribute: &Node<'tree>) -> Option<Node<'tree>> {
    let mut current = attribute.parent();
    while let Some(node) = current {
        if syntax::is_markup_element(&node) {
            return Some(node);
        }
        current = node.parent();
    }
    None
}

fn tag_name(element: &Node, source: &str) -> String {
    let name = match element.kind() {
        "jsx_self_closing_element" => element.child_by_field_name("name"),
        _ => element
            .child_by_field_name("open_tag")
            .and_then(|open| open.child_by_field_name("name")),
    };

    match name {
        Some(node) if node.kind() == "identifier" => syntax::node_text(&node, source).to_string(),
        _ => FALLBACK_TAG.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::parse_tsx;

    fn locate_at(source: &str, needle: &str) -> Option<StyleAttributeMatch> {
        let tree = parse_tsx(source).unwrap();
        let offset = source.find(needle).unwrap();
        locate(&tree, source, offset, &Config::default()).unwrap()
    }

    #[test]
    fn matches_a_self_closing_element() {
        let source = "const x = <View style={{flex: 1}} />;";
        let matched = locate_at(source, "flex").unwrap();
        assert_eq!(matched.tag, "View");
        assert_eq!(matched.value.slice(source), "{flex: 1}");
    }

    #[test]
    fn matches_a_paired_element() {
        let source = "const x = <Text style={{color: 'red'}}>hi</Text>;";
        let matched = locate_at(source, "color").unwrap();
        assert_eq!(matched.tag, "Text");
    }

    #[test]
    fn skips_member_expression_values() {
        let source = "const x = <Text style={styles.text}>hi</Text>;";
        assert!(locate_at(source, "styles.text").is_none());
    }

    #[test]
    fn skips_bare_identifier_values() {
        let source = "const x = <Text style={textStyle}>hi</Text>;";
        assert!(locate_at(source, "textStyle").is_none());
    }

    #[test]
    fn skips_unsupported_value_shapes() {
        let source = "const x = <Text style={cond ? {a: 1} : {b: 2}}>hi</Text>;";
        assert!(locate_at(source, "cond").is_none());
    }

    #[test]
    fn offset_outside_any_style_attribute_is_absent() {
        let source = "const x = <Text style={{color: 'red'}}>hello</Text>;";
        assert!(locate_at(source, "hello").is_none());
    }

    #[test]
    fn member_tags_fall_back_to_the_literal_base() {
        let source = "const x = <UI.Box style={{flex: 1}} />;";
        let matched = locate_at(source, "flex").unwrap();
        assert_eq!(matched.tag, "element");
    }
}

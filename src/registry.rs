//! Style registry scanner
//!
//! Locates the unit's `StyleSheet.create({...})` call and the entry names it
//! already defines. Units are assumed to contain at most one registry; when
//! several exist the first in pre-order wins.

use std::collections::HashSet;

use tree_sitter::{Node, Tree};

use crate::engine::Config;
use crate::syntax::{self, Range};

/// Factory method name of the recognized registry pattern. Fixed for
/// compatibility; only the type identifier is configurable.
const FACTORY_METHOD: &str = "create";

/// The first recognized registry factory call in the unit.
#[derive(Debug, Clone)]
pub struct RegistryInfo {
    /// The whole `StyleSheet.create(...)` call
    pub call: Range,
    /// The object literal argument
    pub object: Range,
    /// Top-level plain `key: value` property names of the argument
    pub entry_names: HashSet<String>,
}

/// Scanner result. A first-found call whose argument is not an object
/// literal is reported as `Malformed` rather than skipped, so the engine can
/// refuse to plan a second registry into the unit.
#[derive(Debug, Clone)]
pub enum RegistryScan {
    Missing,
    Found(RegistryInfo),
    Malformed,
}

/// Find the first `<registry_type>.create(...)` call in pre-order.
pub fn find_registry(tree: &Tree, source: &str, config: &Config) -> RegistryScan {
    let Some(call) = syntax::find_first(tree.root_node(), &|node| {
        is_registry_call(node, source, config)
    }) else {
        return RegistryScan::Missing;
    };

    let Some(object) = call_object_argument(&call) else {
        return RegistryScan::Malformed;
    };

    let mut entry_names = HashSet::new();
    let mut cursor = object.walk();
    for property in object.named_children(&mut cursor) {
        // Shorthand, spread, method and computed properties carry no plain
        // `key: value` name and stay out of the set.
        if property.kind() != "pair" {
            continue;
        }
        if let Some(key) = property.child_by_field_name("key") {
            entry_names.insert(syntax::node_text(&key, source).to_string());
        }
    }

    RegistryScan::Found(RegistryInfo {
        call: Range::of(&call),
        object: Range::of(&object),
        entry_names,
    })
}

fn is_registry_call(node: &Node, source: &str, config: &Config) -> bool {
    if node.kind() != "call_expression" {
        return false;
    }
    let Some(callee) = node.child_by_field_name("function") else {
        return false;
    };
    if callee.kind() != "member_expression" {
        return false;
    }
    let (Some(object), Some(property)) = (
        callee.child_by_field_name("object"),
        callee.child_by_field_name("property"),
    ) else {
        return false;
    };

    object.kind() == "identifier"
        && syntax::node_text(&object, source) == config.registry_type
        && syntax::node_text(&property, source) == FACTORY_METHOD
}

/// Sole argument of the call, when it is an object literal.
fn call_object_argument<'tree>(call: &Node<'tree>) -> Option<Node<'tree>> {
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let first = arguments
        .named_children(&mut cursor)
        .find(|node| node.kind() != "comment")?;
    syntax::is_object_literal(&first).then_some(first)
}

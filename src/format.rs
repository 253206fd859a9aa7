//! Style formatter
//!
//! Re-renders a captured inline style object into the canonical multi-line
//! form used for registry entries.

use crate::error::Result;
use crate::language;
use crate::syntax;

/// Reformat the text of an inline style object literal.
///
/// The fragment is re-parsed in isolation, wrapped in parentheses so it sits
/// in expression position instead of reading as a block statement. Properties
/// render one per line with a two-space indent, in source order, each value's
/// text verbatim. Anything that is not a plain `key: value` pair is dropped.
/// Without an object literal in the fragment the input comes back verbatim.
pub fn format_style(style_text: &str) -> Result<String> {
    let fragment = format!("({})", style_text);
    let tree = language::parse_tsx(&fragment)?;

    let Some(object) = syntax::find_first(tree.root_node(), &|node| {
        syntax::is_object_literal(node)
    }) else {
        return Ok(style_text.to_string());
    };

    let mut lines = Vec::new();
    let mut cursor = object.walk();
    for property in object.named_children(&mut cursor) {
        if property.kind() != "pair" {
            continue;
        }
        let (Some(key), Some(value)) = (
            property.child_by_field_name("key"),
            property.child_by_field_name("value"),
        ) else {
            continue;
        };
        lines.push(format!(
            "  {}: {}",
            syntax::node_text(&key, &fragment),
            syntax::node_text(&value, &fragment)
        ));
    }

    Ok(format!("{{\n{}\n}}", lines.join(",\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_property_per_line_in_source_order() {
        let formatted = format_style("{ color: 'red',fontSize: 16 }").unwrap();
        assert_eq!(formatted, "{\n  color: 'red',\n  fontSize: 16\n}");
    }

    #[test]
    fn values_are_emitted_verbatim() {
        let formatted = format_style("{ width: size * 2, margin: compute(4) }").unwrap();
        assert_eq!(formatted, "{\n  width: size * 2,\n  margin: compute(4)\n}");
    }

    #[test]
    fn string_keys_keep_their_quotes() {
        let formatted = format_style("{ 'font-size': 12 }").unwrap();
        assert_eq!(formatted, "{\n  'font-size': 12\n}");
    }

    #[test]
    fn non_pair_properties_are_dropped() {
        let formatted = format_style("{ ...base, color: 'red', shorthand }").unwrap();
        assert_eq!(formatted, "{\n  color: 'red'\n}");
    }

    #[test]
    fn non_object_fragments_come_back_verbatim() {
        assert_eq!(format_style("styles.foo").unwrap(), "styles.foo");
    }
}

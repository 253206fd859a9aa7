//! Edit planner
//!
//! Turns a located style attribute, the registry scan and a generated entry
//! name into the two text edits that perform the extraction. Edits are
//! expressed in original-document offsets and must be applied as one atomic
//! multi-edit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::Config;
use crate::locator::StyleAttributeMatch;
use crate::registry::RegistryInfo;
use crate::syntax::Range;

/// Fallback indentation for registry entries when the registry call sits at
/// the left margin.
const DEFAULT_INDENT: &str = "    ";

/// One replacement over the original document text. Insertions use an empty
/// range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Range,
    pub replacement: String,
}

/// Ordered, pairwise non-overlapping edits over the original document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPlan {
    pub edits: Vec<TextEdit>,
}

impl EditPlan {
    fn new(mut edits: Vec<TextEdit>) -> Self {
        edits.sort_by_key(|edit| edit.range.start);
        Self { edits }
    }

    /// Ranges are pairwise disjoint once sorted by start.
    pub fn is_disjoint(&self) -> bool {
        self.edits
            .windows(2)
            .all(|pair| pair[0].range.end <= pair[1].range.start)
    }
}

/// Plan the extraction edits for `matched` under the scanned registry.
pub fn plan(
    matched: &StyleAttributeMatch,
    registry: Option<&RegistryInfo>,
    name: &str,
    formatted: &str,
    source: &str,
    config: &Config,
) -> EditPlan {
    let reference = TextEdit {
        range: matched.value,
        replacement: format!("{}.{}", config.registry_ident, name),
    };

    let insertion = match registry {
        Some(info) => append_entry_edit(info, name, formatted, source),
        None => new_registry_edit(name, formatted, source, config),
    };

    debug!(
        "Planned insertion at byte {} and replacement at bytes {}..{}",
        insertion.range.start, reference.range.start, reference.range.end
    );

    EditPlan::new(vec![insertion, reference])
}

/// Insert `\n<indent><name>: <formatted>,` right after the registry object's
/// opening brace.
fn append_entry_edit(info: &RegistryInfo, name: &str, formatted: &str, source: &str) -> TextEdit {
    let indent = line_indentation(source, info.call.start);
    let offset = info.object.start + 1;
    TextEdit {
        range: Range {
            start: offset,
            end: offset,
        },
        replacement: format!("\n{}{}: {},", indent, name, formatted),
    }
}

/// Synthesize a full registry declaration after the leading import block.
fn new_registry_edit(name: &str, formatted: &str, source: &str, config: &Config) -> TextEdit {
    let offset = registry_insert_offset(source);
    TextEdit {
        range: Range {
            start: offset,
            end: offset,
        },
        replacement: format!(
            "\nconst {} = {}.create({{\n    {}: {}\n}});\n",
            config.registry_ident, config.registry_type, name, formatted
        ),
    }
}

/// Leading whitespace of the line containing `offset`.
fn line_indentation(source: &str, offset: usize) -> String {
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let indent: String = source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    if indent.is_empty() {
        DEFAULT_INDENT.to_string()
    } else {
        indent
    }
}

/// Offset of the line following the leading run of import lines; document
/// start when the unit has no imports. Blank lines inside the run are
/// tolerated; the first other statement ends it.
fn registry_insert_offset(source: &str) -> usize {
    let mut offset = 0usize;
    let mut insert_at = 0usize;
    let mut saw_import = false;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with("import") {
            saw_import = true;
            insert_at = offset + line.len();
        } else if !trimmed.is_empty() {
            break;
        }
        offset += line.len();
    }

    if saw_import { insert_at } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_reads_the_line_containing_the_offset() {
        let source = "const a = 1;\n        const styles = x;\n";
        let offset = source.find("const styles").unwrap();
        assert_eq!(line_indentation(source, offset), "        ");
    }

    #[test]
    fn left_margin_lines_get_the_default_indent() {
        let source = "const styles = x;\n";
        assert_eq!(line_indentation(source, 0), DEFAULT_INDENT);
    }

    #[test]
    fn insert_offset_lands_after_the_last_leading_import() {
        let source = "import React from 'react';\nimport x from 'y';\n\nconst a = 1;\n";
        let expected = source.find("\nconst a").unwrap();
        assert_eq!(registry_insert_offset(source), expected);
    }

    #[test]
    fn insert_offset_ignores_imports_after_code() {
        let source = "import a from 'a';\nconst b = 1;\nimport c from 'c';\n";
        assert_eq!(registry_insert_offset(source), source.find("const b").unwrap());
    }

    #[test]
    fn no_imports_means_document_start() {
        assert_eq!(registry_insert_offset("const a = 1;\n"), 0);
    }
}

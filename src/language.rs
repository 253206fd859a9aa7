//! Shared language support (tree-sitter configuration)
//!
//! Single place where grammar selection lives. The engine only understands
//! TypeScript/TSX units; the TSX grammar is a superset that also parses plain
//! TS, JS and JSX source.

use tree_sitter::{Parser, Tree};

use crate::error::{ExtractError, Result};

/// The tree-sitter language for TSX source units
pub fn tsx_language() -> tree_sitter::Language {
    tree_sitter_typescript::LANGUAGE_TSX.into()
}

/// Parse one source unit into an immutable syntax tree
pub fn parse_tsx(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser.set_language(&tsx_language())?;
    parser.parse(source, None).ok_or(ExtractError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_tsx_unit() {
        let tree = parse_tsx("const x = <View style={{flex: 1}} />;").unwrap();
        assert_eq!(tree.root_node().kind(), "program");
    }
}

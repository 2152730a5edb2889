use tree_sitter::{Parser, Tree};

use crate::error::{CensusError, Result};

/// Python parser wrapper around tree-sitter.
///
/// Parsing is all-or-nothing: a tree containing any ERROR or MISSING
/// node is rejected as a syntax error, so downstream counters only
/// ever see well-formed trees.
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| CensusError::parse_error(format!("Failed to load Python grammar: {e}")))?;
        Ok(Self { parser })
    }

    /// Parse source text into a syntax tree, or fail with a syntax error
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| CensusError::parse_error("parser returned no tree"))?;

        if tree.root_node().has_error() {
            return Err(CensusError::parse_error(describe_first_error(&tree)));
        }

        Ok(tree)
    }
}

/// Locate the first ERROR/MISSING node for the error message
fn describe_first_error(tree: &Tree) -> String {
    let mut cursor = tree.root_node().walk();

    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return format!("syntax error near line {}, column {}", pos.row + 1, pos.column + 1);
        }

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return "syntax error".to_string();
            }
        }
    }
}

use std::collections::HashSet;
use tree_sitter::{Node, Tree};

/// Count the physical lines that carry a comment.
///
/// Working from the syntax tree instead of scanning for `#` keeps
/// marker characters inside string literals from being miscounted.
/// Two constructs qualify: `comment` nodes (inline or whole-line), and
/// documentation-style bare strings, i.e. an expression statement whose
/// sole expression is a triple-quoted string literal. Each line is
/// counted at most once no matter how many markers it holds.
pub fn count_comment_lines(tree: &Tree, source: &str) -> usize {
    let mut commented: HashSet<usize> = HashSet::new();
    let mut cursor = tree.root_node().walk();

    loop {
        let node = cursor.node();

        if node.kind() == "comment" || is_doc_string(node, source) {
            for line in node.start_position().row..=node.end_position().row {
                commented.insert(line);
            }
        }

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return commented.len();
            }
        }
    }
}

/// A bare string statement used as documentation: the statement's only
/// expression is a triple-quoted string. Single-quoted bare strings
/// are left alone.
fn is_doc_string(node: Node, source: &str) -> bool {
    if node.kind() != "expression_statement" || node.named_child_count() != 1 {
        return false;
    }
    let Some(child) = node.named_child(0) else {
        return false;
    };
    if child.kind() != "string" {
        return false;
    }

    child
        .utf8_text(source.as_bytes())
        .map(is_triple_quoted)
        .unwrap_or(false)
}

fn is_triple_quoted(text: &str) -> bool {
    // Skip prefix letters such as r, b, u, f before the quotes
    let rest = text.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    rest.starts_with("\"\"\"") || rest.starts_with("'''")
}

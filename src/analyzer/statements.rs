use tree_sitter::Node;

use super::exclude::ExclusionRules;

/// Statement-level taxonomy over tree-sitter-python node kinds.
///
/// Everything the grammar can produce falls into exactly one category;
/// `Other` covers expressions, patterns, and comments, which never
/// count on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeCategory {
    /// module / block: counts nothing itself, children counted
    Container,
    /// def / class: one statement plus its body, unless name-excluded
    Definition,
    /// decorators wrap a definition without adding to the count
    Decorated,
    /// compound statement header: one statement plus nested bodies
    Compound,
    /// elif / else / except / finally / case header lines
    Clause,
    /// unconditionally countable simple statement
    Simple,
    /// expression statement: countable only by effect
    Expression,
    Other,
}

impl NodeCategory {
    fn classify(kind: &str) -> Self {
        match kind {
            "module" | "block" => Self::Container,
            "function_definition" | "class_definition" => Self::Definition,
            "decorated_definition" => Self::Decorated,
            "if_statement" | "for_statement" | "while_statement" | "try_statement"
            | "with_statement" | "match_statement" => Self::Compound,
            "elif_clause" | "else_clause" | "except_clause" | "except_group_clause"
            | "finally_clause" | "case_clause" => Self::Clause,
            "import_statement" | "import_from_statement" | "future_import_statement"
            | "return_statement" | "raise_statement" | "break_statement"
            | "continue_statement" | "pass_statement" | "delete_statement"
            | "global_statement" | "nonlocal_statement" | "assert_statement" => Self::Simple,
            "expression_statement" => Self::Expression,
            _ => Self::Other,
        }
    }
}

/// Count the statements in a parsed Python module.
///
/// Each statement node counts once regardless of how many source lines
/// it spans. A def/class whose name matches one of the exclusion rules
/// contributes nothing at all: the header is not counted and the body
/// is never entered.
pub fn count_statements(root: Node, source: &str, rules: &ExclusionRules) -> usize {
    count_node(root, source, rules)
}

fn count_node(node: Node, source: &str, rules: &ExclusionRules) -> usize {
    match NodeCategory::classify(node.kind()) {
        NodeCategory::Container => sum_children(node, source, rules),
        NodeCategory::Decorated => node
            .child_by_field_name("definition")
            .map(|def| count_node(def, source, rules))
            .unwrap_or(0),
        NodeCategory::Definition => {
            if is_name_excluded(node, source, rules) {
                return 0;
            }
            1 + node
                .child_by_field_name("body")
                .map(|body| count_node(body, source, rules))
                .unwrap_or(0)
        }
        // Headers count one each; the sum walks into blocks and
        // trailing clauses while non-statement children yield zero.
        NodeCategory::Compound | NodeCategory::Clause => 1 + sum_children(node, source, rules),
        NodeCategory::Simple => 1,
        NodeCategory::Expression => usize::from(is_countable_expression(node)),
        NodeCategory::Other => 0,
    }
}

fn sum_children(node: Node, source: &str, rules: &ExclusionRules) -> usize {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .map(|child| count_node(child, source, rules))
        .sum()
}

fn is_name_excluded(definition: Node, source: &str, rules: &ExclusionRules) -> bool {
    if !rules.has_name_rules() {
        return false;
    }
    definition
        .child_by_field_name("name")
        .and_then(|name| name.utf8_text(source.as_bytes()).ok())
        .is_some_and(|name| rules.match_name(name).is_some())
}

/// An expression statement counts iff it assigns, or its expression
/// subtree contains a call or a suspension point. Bare literals,
/// names, and pure comparison/boolean/arithmetic expressions do not.
fn is_countable_expression(stmt: Node) -> bool {
    let mut cursor = stmt.walk();
    for child in stmt.named_children(&mut cursor) {
        match child.kind() {
            "assignment" | "augmented_assignment" => return true,
            _ if contains_call_or_suspension(child) => return true,
            _ => {}
        }
    }
    false
}

/// Search a whole expression subtree for a call or an await/yield.
/// `foo() < 1` is countable because the call is found below the
/// comparison, not at the top.
fn contains_call_or_suspension(node: Node) -> bool {
    let mut cursor = node.walk();

    loop {
        if matches!(cursor.node().kind(), "call" | "await" | "yield") {
            return true;
        }

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return false;
            }
        }
    }
}

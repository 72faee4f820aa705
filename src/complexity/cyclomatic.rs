//! Cyclomatic complexity of Python blocks.
//!
//! Blocks are reported in this order: module-level functions, then each class
//! followed by its methods. Nested functions are neither reported nor added
//! to their enclosing function.
//!
//! Each of these adds one path to the block that contains it:
//! `if`, `elif`, `for`, `while`, a loop's `else`, each `except` handler, a
//! `try`'s `else`, a conditional expression, each boolean operator, each
//! comprehension `for`/`if`, `assert`, and each refutable `case`.

use super::node_text;
use tree_sitter::Node;

const FUNCTION: &str = "function_definition";
const CLASS: &str = "class_definition";
const DECORATED: &str = "decorated_definition";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Function,
    Method,
    Class,
}

/// Complexity of one function, method or class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityBlock {
    pub name: String,
    pub kind: BlockKind,
    /// 1-based line of the `def`/`class` keyword
    pub line: usize,
    pub complexity: u32,
}

impl ComplexityBlock {
    pub fn new(name: impl Into<String>, kind: BlockKind, line: usize, complexity: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            line,
            complexity,
        }
    }
}

pub fn collect_blocks(root: Node<'_>, source: &[u8]) -> Vec<ComplexityBlock> {
    let mut functions = Vec::new();
    let mut classes = Vec::new();

    for definition in definitions(root) {
        match definition.kind() {
            FUNCTION => functions.push(function_block(definition, source, None)),
            CLASS => classes.extend(class_blocks(definition, source)),
            _ => {}
        }
    }

    functions.extend(classes);
    functions
}

/// Function and class definitions reachable from `node` without entering
/// another definition.
fn definitions(node: Node<'_>) -> Vec<Node<'_>> {
    let mut found = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            FUNCTION | CLASS => found.push(child),
            _ => found.extend(definitions(child)),
        }
    }
    found
}

fn function_block(node: Node<'_>, source: &[u8], class_name: Option<&str>) -> ComplexityBlock {
    let name = definition_name(node, source);
    let complexity = 1 + node
        .child_by_field_name("body")
        .map_or(0, |body| decision_points(body, source));

    match class_name {
        Some(class_name) => ComplexityBlock::new(
            format!("{class_name}.{name}"),
            BlockKind::Method,
            node.start_position().row + 1,
            complexity,
        ),
        None => ComplexityBlock::new(
            name,
            BlockKind::Function,
            node.start_position().row + 1,
            complexity,
        ),
    }
}

/// The class block followed by its methods.
///
/// A class scores the average of its methods (integer division) plus one
/// when it has more than one method; a class without methods scores its own
/// body. Nested classes are not reported.
fn class_blocks(node: Node<'_>, source: &[u8]) -> Vec<ComplexityBlock> {
    let name = definition_name(node, source);
    let body = node.child_by_field_name("body");

    let methods: Vec<ComplexityBlock> = body
        .map(definitions)
        .unwrap_or_default()
        .into_iter()
        .filter(|definition| definition.kind() == FUNCTION)
        .map(|definition| function_block(definition, source, Some(name)))
        .collect();

    let own = body.map_or(0, |body| decision_points(body, source));
    let real = 1 + own + methods.iter().map(|m| m.complexity).sum::<u32>();
    let complexity = match methods.len() {
        0 => real,
        n => real / n as u32 + u32::from(n > 1),
    };

    let mut blocks = Vec::with_capacity(methods.len() + 1);
    blocks.push(ComplexityBlock::new(
        name,
        BlockKind::Class,
        node.start_position().row + 1,
        complexity,
    ));
    blocks.extend(methods);
    blocks
}

fn definition_name<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.child_by_field_name("name")
        .map_or("<anonymous>", |name| node_text(name, source, "<anonymous>"))
}

/// Decision points below `node`, not counting nested definitions.
pub fn decision_points(node: Node<'_>, source: &[u8]) -> u32 {
    let mut total = 0;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if matches!(child.kind(), FUNCTION | CLASS | DECORATED) {
            continue;
        }
        total += node_weight(child, source) + decision_points(child, source);
    }
    total
}

fn node_weight(node: Node<'_>, source: &[u8]) -> u32 {
    match node.kind() {
        "if_statement" | "elif_clause" | "conditional_expression" | "boolean_operator"
        | "assert_statement" | "for_in_clause" | "if_clause" => 1,
        "for_statement" | "while_statement" => {
            1 + u32::from(node.child_by_field_name("alternative").is_some())
        }
        "try_statement" => {
            let mut cursor = node.walk();
            node.children(&mut cursor)
                .filter(|child| {
                    matches!(
                        child.kind(),
                        "except_clause" | "except_group_clause" | "else_clause"
                    )
                })
                .count() as u32
        }
        "case_clause" => u32::from(!is_wildcard_case(node, source)),
        _ => 0,
    }
}

/// `case _:` without a guard always matches and adds no path.
fn is_wildcard_case(node: Node<'_>, source: &[u8]) -> bool {
    let mut patterns = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "case_pattern" => patterns.push(child),
            "if_clause" => return false,
            _ => {}
        }
    }
    matches!(patterns.as_slice(), [pattern] if node_text(*pattern, source, "").trim() == "_")
}

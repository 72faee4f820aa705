use crate::analyzers::SourceAnalyzer;
use crate::complexity::{cyclomatic, halstead, ComplexityBlock};
use crate::errors::AnalysisError;
use crate::metrics::{LocCount, LocCounter};
use tree_sitter::{Node, Parser, Tree};

/// Python analyzer backed by tree-sitter.
///
/// A file is rejected as a whole when its parse tree has an error node, a
/// Python 2 only statement or nests deeper than [`MAX_NESTING_DEPTH`], so
/// every capability fails on the same inputs.
#[derive(Debug, Default)]
pub struct PythonAnalyzer {
    loc_counter: LocCounter,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line breakdown of the source; `physical_lines` is its `loc`.
    pub fn line_counts(&self, source: &str) -> Result<LocCount, AnalysisError> {
        let tree = parse_python(source)?;
        Ok(self.loc_counter.count_tree(&tree, source))
    }
}

impl SourceAnalyzer for PythonAnalyzer {
    fn complexity_of(&self, source: &str) -> Result<Vec<ComplexityBlock>, AnalysisError> {
        let tree = parse_python(source)?;
        Ok(cyclomatic::collect_blocks(tree.root_node(), source.as_bytes()))
    }

    fn volume_of(&self, source: &str) -> Result<f64, AnalysisError> {
        let tree = parse_python(source)?;
        Ok(halstead::count(tree.root_node(), source.as_bytes()).volume())
    }

    fn loc_of(&self, source: &str) -> Result<u64, AnalysisError> {
        let count = self.line_counts(source)?;
        log::trace!(
            "{} lines: {} code, {} comment, {} docstring, {} blank",
            count.physical_lines,
            count.code_lines,
            count.comment_lines,
            count.docstring_lines,
            count.blank_lines
        );
        Ok(count.physical_lines as u64)
    }
}

/// Deepest parse tree the analyzers accept. Their walks recurse once per
/// level, so anything deeper is rejected like a syntax error.
pub const MAX_NESTING_DEPTH: usize = 1000;

/// Parse Python 3 source, rejecting trees with syntax errors.
pub fn parse_python(source: &str) -> Result<Tree, AnalysisError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| AnalysisError::parser(format!("Failed to set Python language: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AnalysisError::parser("Failed to parse Python code"))?;

    check_tree(&tree)?;
    Ok(tree)
}

/// Pre-order walk with a cursor, so the check holds for any depth.
fn check_tree(tree: &Tree) -> Result<(), AnalysisError> {
    let mut cursor = tree.walk();
    let mut depth = 0;

    loop {
        let node = cursor.node();
        if depth > MAX_NESTING_DEPTH {
            let line = node.start_position().row + 1;
            return Err(AnalysisError::too_deep(line, MAX_NESTING_DEPTH));
        }
        if node.is_error() || node.is_missing() || is_python2_only(node) {
            return Err(syntax_error_at(node));
        }

        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                let root = tree.root_node();
                return if root.has_error() {
                    Err(syntax_error_at(root))
                } else {
                    Ok(())
                };
            }
            depth -= 1;
        }
    }
}

/// Statements the grammar still accepts but Python 3 rejects:
/// `print x`, `exec code` and `except E, e:`.
fn is_python2_only(node: Node<'_>) -> bool {
    match node.kind() {
        "print_statement" | "exec_statement" => true,
        "except_clause" => {
            let mut cursor = node.walk();
            let comma_alias = node.children(&mut cursor).any(|child| child.kind() == ",");
            comma_alias
        }
        _ => false,
    }
}

fn syntax_error_at(node: Node<'_>) -> AnalysisError {
    let position = node.start_position();
    AnalysisError::syntax(position.row + 1, position.column + 1)
}

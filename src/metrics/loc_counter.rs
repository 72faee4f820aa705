//! Raw line counting for Python source.
//!
//! - **Physical Lines**: every line of the file; this is the `loc` figure used
//!   by the maintainability index
//! - **Code Lines**: lines holding at least one code token
//! - **Comment Lines**: lines holding only a `#` comment
//! - **Docstring Lines**: lines holding only a string statement (docstrings
//!   and other bare string literals)
//! - **Blank Lines**: lines containing only whitespace
//!
//! The invariant `physical_lines == code_lines + comment_lines + docstring_lines + blank_lines`
//! always holds.
//!
//! Classification uses the parse tree, so `#` inside a string is not a
//! comment and a multi-line string assigned to a name is code.

use tree_sitter::{Node, Tree};

#[derive(Debug, Clone, Default)]
pub struct LocCounter;

impl LocCounter {
    pub fn new() -> Self {
        Self
    }

    /// Count lines of `content`, classified with its parse tree.
    pub fn count_tree(&self, tree: &Tree, content: &str) -> LocCount {
        let lines: Vec<&str> = content.lines().collect();
        let mut marks = vec![LineMarks::default(); lines.len()];
        mark_lines(tree.root_node(), &mut marks);

        let mut count = LocCount {
            physical_lines: lines.len(),
            ..LocCount::default()
        };

        for (line, marks) in lines.iter().zip(&marks) {
            match classify_line(line, marks) {
                LineType::Blank => count.blank_lines += 1,
                LineType::Comment => count.comment_lines += 1,
                LineType::Docstring => count.docstring_lines += 1,
                LineType::Code => count.code_lines += 1,
            }
        }

        count
    }
}

/// Individual file line count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocCount {
    /// Raw line count from file
    pub physical_lines: usize,
    /// Lines containing executable code
    pub code_lines: usize,
    /// Lines that are only a comment
    pub comment_lines: usize,
    /// Lines that are only part of a string statement
    pub docstring_lines: usize,
    /// Lines containing only whitespace
    pub blank_lines: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineType {
    Blank,
    Comment,
    Docstring,
    Code,
}

#[derive(Clone, Copy, Debug, Default)]
struct LineMarks {
    code: bool,
    comment: bool,
    docstring: bool,
}

fn classify_line(line: &str, marks: &LineMarks) -> LineType {
    if line.trim().is_empty() {
        LineType::Blank
    } else if marks.code {
        LineType::Code
    } else if marks.docstring {
        LineType::Docstring
    } else if marks.comment {
        LineType::Comment
    } else {
        // continuation backslashes and similar punctuation-only lines
        LineType::Code
    }
}

fn mark_lines(node: Node<'_>, marks: &mut [LineMarks]) {
    if node.kind() == "comment" {
        mark_rows(node, marks, |m| m.comment = true);
        return;
    }
    if is_string_statement(node) {
        mark_rows(node, marks, |m| m.docstring = true);
        return;
    }
    if node.child_count() == 0 || node.kind() == "string" {
        if node.end_byte() > node.start_byte() {
            mark_rows(node, marks, |m| m.code = true);
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        mark_lines(child, marks);
    }
}

/// An expression statement made of a single string literal.
fn is_string_statement(node: Node<'_>) -> bool {
    node.kind() == "expression_statement"
        && node.named_child_count() == 1
        && node
            .named_child(0)
            .is_some_and(|child| matches!(child.kind(), "string" | "concatenated_string"))
}

fn mark_rows(node: Node<'_>, marks: &mut [LineMarks], apply: impl Fn(&mut LineMarks)) {
    let start = node.start_position().row;
    let end_position = node.end_position();
    // a node ending at column 0 does not occupy its last row
    let end = if end_position.column == 0 && end_position.row > start {
        end_position.row - 1
    } else {
        end_position.row
    };
    for row in start..=end {
        if let Some(line) = marks.get_mut(row) {
            apply(line);
        }
    }
}

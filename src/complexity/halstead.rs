//! Halstead counts for Python source.
//!
//! Operators are arithmetic, bitwise, unary, boolean, comparison and
//! augmented-assignment operations; operands are the expressions they apply
//! to. Operators are identified by operation (`+` and `+=` are both `Add`).
//! Operands are identified by name for identifiers, by value for number and
//! string literals (`1` and `1.0` are one operand, as are `'a'` and `"a"`),
//! and by node otherwise, within the enclosing function (module level has no
//! function). Default arguments and decorators of a function are not
//! counted.

use super::node_text;
use std::collections::HashSet;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HalsteadCounts {
    /// η1
    pub distinct_operators: usize,
    /// η2
    pub distinct_operands: usize,
    /// N1
    pub total_operators: usize,
    /// N2
    pub total_operands: usize,
}

impl HalsteadCounts {
    pub fn vocabulary(&self) -> usize {
        self.distinct_operators + self.distinct_operands
    }

    pub fn length(&self) -> usize {
        self.total_operators + self.total_operands
    }

    /// `N · log2(η)`, zero for an empty vocabulary.
    pub fn volume(&self) -> f64 {
        let vocabulary = self.vocabulary();
        if vocabulary == 0 {
            return 0.0;
        }
        self.length() as f64 * (vocabulary as f64).log2()
    }
}

pub fn count(root: Node<'_>, source: &[u8]) -> HalsteadCounts {
    let mut visitor = HalsteadVisitor::new(source);
    visitor.visit(root, None);
    visitor.counts()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum OperandKey {
    Symbol(String),
    /// Bits of the numeric value
    Number(u64),
    Text { bytes: bool, value: String },
    Node(usize),
}

struct HalsteadVisitor<'s> {
    source: &'s [u8],
    operators: usize,
    operands: usize,
    operators_seen: HashSet<&'static str>,
    operands_seen: HashSet<(Option<&'s str>, OperandKey)>,
}

impl<'s> HalsteadVisitor<'s> {
    fn new(source: &'s [u8]) -> Self {
        Self {
            source,
            operators: 0,
            operands: 0,
            operators_seen: HashSet::new(),
            operands_seen: HashSet::new(),
        }
    }

    fn counts(&self) -> HalsteadCounts {
        HalsteadCounts {
            distinct_operators: self.operators_seen.len(),
            distinct_operands: self.operands_seen.len(),
            total_operators: self.operators,
            total_operands: self.operands,
        }
    }

    fn visit(&mut self, node: Node<'_>, context: Option<&'s str>) {
        match node.kind() {
            "function_definition" => {
                let name = node
                    .child_by_field_name("name")
                    .map(|name| node_text(name, self.source, "<anonymous>"));
                if let Some(body) = node.child_by_field_name("body") {
                    self.visit(body, name);
                }
                return;
            }
            "binary_operator" => {
                let operator = field_kind(node, "operator").map(binary_operator_name);
                self.record_fields(node, operator, &["left", "right"], context);
            }
            "augmented_assignment" => {
                let operator = field_kind(node, "operator")
                    .map(|op| binary_operator_name(op.trim_end_matches('=')));
                self.record_fields(node, operator, &["left", "right"], context);
            }
            "unary_operator" => {
                let operator = field_kind(node, "operator").map(unary_operator_name);
                self.record_fields(node, operator, &["argument"], context);
            }
            "not_operator" => {
                self.record_fields(node, Some("Not"), &["argument"], context);
            }
            "boolean_operator" => {
                let Some(kind) = field_kind(node, "operator") else {
                    return self.visit_children(node, context);
                };
                let mut operands = Vec::new();
                flatten_boolean(node, kind, &mut operands);
                self.record(&[boolean_operator_name(kind)], &operands, context);
                for operand in operands {
                    self.visit(operand, context);
                }
                return;
            }
            "comparison_operator" => {
                let mut operators = Vec::new();
                let mut operands = Vec::new();
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if child.is_named() {
                        if !child.is_extra() {
                            operands.push(child);
                        }
                    } else {
                        operators.push(comparison_operator_name(child.kind()));
                    }
                }
                self.record(&operators, &operands, context);
            }
            _ => {}
        }
        self.visit_children(node, context);
    }

    fn visit_children(&mut self, node: Node<'_>, context: Option<&'s str>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, context);
        }
    }

    fn record_fields(
        &mut self,
        node: Node<'_>,
        operator: Option<&'static str>,
        fields: &[&str],
        context: Option<&'s str>,
    ) {
        let Some(operator) = operator else {
            return;
        };
        let operands: Vec<Node<'_>> = fields
            .iter()
            .filter_map(|field| node.child_by_field_name(field))
            .collect();
        self.record(&[operator], &operands, context);
    }

    fn record(
        &mut self,
        operators: &[&'static str],
        operands: &[Node<'_>],
        context: Option<&'s str>,
    ) {
        self.operators += operators.len();
        self.operands += operands.len();
        self.operators_seen.extend(operators.iter().copied());
        for operand in operands {
            let key = self.operand_key(*operand);
            self.operands_seen.insert((context, key));
        }
    }

    fn operand_key(&self, node: Node<'_>) -> OperandKey {
        let node = unwrap_parentheses(node);
        let text = node_text(node, self.source, "");
        match node.kind() {
            "integer" | "float" => number_value(text).map_or_else(
                || OperandKey::Symbol(text.to_string()),
                |value| OperandKey::Number(value.to_bits()),
            ),
            // f-strings are expressions, not constants
            "string" => string_value(text).unwrap_or(OperandKey::Node(node.id())),
            "identifier" | "concatenated_string" | "true" | "false" | "none" => {
                OperandKey::Symbol(text.to_string())
            }
            _ => OperandKey::Node(node.id()),
        }
    }
}

/// Value of an integer or float literal; `None` for imaginary literals.
fn number_value(text: &str) -> Option<f64> {
    let digits = text.replace('_', "").to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(rest) = digits.strip_prefix(prefix) {
            return u64::from_str_radix(rest, radix).ok().map(|value| value as f64);
        }
    }
    if digits.ends_with('j') {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Contents of a plain or bytes string literal, without prefix and quotes.
fn string_value(text: &str) -> Option<OperandKey> {
    let quote_start = text.find(['\'', '"'])?;
    let prefix = text[..quote_start].to_ascii_lowercase();
    if prefix.contains('f') {
        return None;
    }

    let quoted = &text[quote_start..];
    let quote = ["\"\"\"", "'''", "\"", "'"].into_iter().find(|quote| {
        quoted.len() >= 2 * quote.len() && quoted.starts_with(*quote) && quoted.ends_with(*quote)
    })?;

    Some(OperandKey::Text {
        bytes: prefix.contains('b'),
        value: quoted[quote.len()..quoted.len() - quote.len()].to_string(),
    })
}

fn field_kind(node: Node<'_>, field: &str) -> Option<&'static str> {
    node.child_by_field_name(field).map(|child| child.kind())
}

fn unwrap_parentheses(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Operands of a chain of the same boolean operator, as one operation.
fn flatten_boolean<'t>(node: Node<'t>, kind: &str, operands: &mut Vec<Node<'t>>) {
    for field in ["left", "right"] {
        let Some(child) = node.child_by_field_name(field) else {
            continue;
        };
        if child.kind() == "boolean_operator" && field_kind(child, "operator") == Some(kind) {
            flatten_boolean(child, kind, operands);
        } else {
            operands.push(child);
        }
    }
}

fn binary_operator_name(token: &'static str) -> &'static str {
    match token {
        "+" => "Add",
        "-" => "Sub",
        "*" => "Mult",
        "@" => "MatMult",
        "/" => "Div",
        "//" => "FloorDiv",
        "%" => "Mod",
        "**" => "Pow",
        "<<" => "LShift",
        ">>" => "RShift",
        "|" => "BitOr",
        "&" => "BitAnd",
        "^" => "BitXor",
        other => other,
    }
}

fn unary_operator_name(token: &'static str) -> &'static str {
    match token {
        "-" => "USub",
        "+" => "UAdd",
        "~" => "Invert",
        other => other,
    }
}

fn boolean_operator_name(token: &'static str) -> &'static str {
    match token {
        "and" => "And",
        "or" => "Or",
        other => other,
    }
}

fn comparison_operator_name(token: &'static str) -> &'static str {
    match token {
        "==" => "Eq",
        "!=" | "<>" => "NotEq",
        "<" => "Lt",
        "<=" => "LtE",
        ">" => "Gt",
        ">=" => "GtE",
        "is" => "Is",
        "is not" => "IsNot",
        "in" => "In",
        "not in" => "NotIn",
        other => other,
    }
}

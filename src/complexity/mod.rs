//! Complexity measures over Python parse trees.

pub mod cyclomatic;
pub mod halstead;

pub use cyclomatic::{collect_blocks, BlockKind, ComplexityBlock};
pub use halstead::HalsteadCounts;

/// Text of a node, or `fallback` if it is not valid UTF-8.
pub(crate) fn node_text<'s>(
    node: tree_sitter::Node<'_>,
    source: &'s [u8],
    fallback: &'s str,
) -> &'s str {
    node.utf8_text(source).unwrap_or(fallback)
}

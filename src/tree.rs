//! ASCII tree rendering of AST nodes
//!
//! Every node becomes one line holding its label. Children follow their parent,
//! each introduced by `├─` (or `└─` for the last child), and the lines below a
//! child are indented by `│ ` (or two spaces under the last child):
//!
//! ```text
//! +
//! ├─1
//! └─*
//!   ├─2
//!   └─3
//! ```
//!
//! Rendering is a pure function of the tree.

use crate::parser::ast::{NodeKind, NodeRef, SourceLocation};

const BRANCH: &str = "├─";
const LAST_BRANCH: &str = "└─";
const PIPE: &str = "│ ";
const SPACE: &str = "  ";

/// One rendered line together with the node it shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub text: String,
    /// Nesting depth; the root is 0
    pub depth: usize,
    pub kind: NodeKind,
    pub location: Option<SourceLocation>,
    /// Mel type of a literal's value
    pub literal_type: Option<&'static str>,
}

/// Render `node` and its descendants, keeping per-line node information.
pub fn render_lines<'a>(node: impl Into<NodeRef<'a>>) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    render_node(node.into(), "", "", 0, &mut lines);
    lines
}

/// Render `node` and its descendants as plain text lines.
pub fn render_tree<'a>(node: impl Into<NodeRef<'a>>) -> Vec<String> {
    render_lines(node)
        .into_iter()
        .map(|line| line.text)
        .collect()
}

/// [`render_tree`] joined with newlines.
pub fn render_to_string<'a>(node: impl Into<NodeRef<'a>>) -> String {
    render_tree(node).join("\n")
}

fn render_node(
    node: NodeRef<'_>,
    lead: &str,
    indent: &str,
    depth: usize,
    out: &mut Vec<TreeLine>,
) {
    out.push(TreeLine {
        text: format!("{}{}", lead, node.label()),
        depth,
        kind: node.kind(),
        location: node.location(),
        literal_type: match node {
            NodeRef::Literal(lit) => Some(lit.value.type_name()),
            _ => None,
        },
    });

    let children = node.children();
    let last = children.len().saturating_sub(1);

    for (i, child) in children.into_iter().enumerate() {
        let (branch, rest) = if i == last {
            (LAST_BRANCH, SPACE)
        } else {
            (BRANCH, PIPE)
        };
        render_node(
            child,
            &format!("{}{}", indent, branch),
            &format!("{}{}", indent, rest),
            depth + 1,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, StartSymbol};

    fn render(source: &str, start: StartSymbol) -> Vec<String> {
        let root = parse(source, start).unwrap();
        render_tree(&root)
    }

    #[test]
    fn test_single_leaf() {
        assert_eq!(render("x", StartSymbol::Expression), vec!["x"]);
    }

    #[test]
    fn test_nested_binary() {
        assert_eq!(
            render("1 + 2 * 3", StartSymbol::Expression),
            vec!["+", "├─1", "└─*", "  ├─2", "  └─3"]
        );
    }

    #[test]
    fn test_pipe_continues_under_non_last_child() {
        assert_eq!(
            render("(1 - 2) - 3", StartSymbol::Expression),
            vec!["-", "├─-", "│ ├─1", "│ └─2", "└─3"]
        );
    }

    #[test]
    fn test_for_renders_empty_step_slot() {
        let lines = render("for i = 0 To 3 Next i", StartSymbol::Statements);
        assert_eq!(
            lines,
            vec![
                "...", "└─for", "  ├─=", "  │ ├─i", "  │ └─0", "  ├─3", "  ├─...", "  └─...",
            ]
        );
    }

    #[test]
    fn test_line_metadata() {
        let root = parse("a + b", StartSymbol::Expression).unwrap();
        let lines = render_lines(&root);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].kind, NodeKind::BinaryOp);
        assert_eq!(lines[0].depth, 0);
        assert_eq!(lines[2].depth, 1);
        assert_eq!(lines[2].location, Some(SourceLocation::new(1, 5)));
    }

    #[test]
    fn test_render_is_deterministic() {
        let source = "int[] xs = {1, 2}; void f(int n) { if (n > 0) then f(n - 1) end if }";
        let root = parse(source, StartSymbol::Program).unwrap();
        assert_eq!(render_to_string(&root), render_to_string(&root));
    }
}

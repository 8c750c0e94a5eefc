// Parse every bundled demo program and sanity-check its tree

use std::fs;
use std::path::Path;

use mel::parser::ast::{NodeKind, NodeRef};
use mel::parser::{parse, StartSymbol};
use mel::tree::{render_lines, render_tree};

fn demo(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e))
}

fn kinds_in(source: &str, start: StartSymbol) -> Vec<NodeKind> {
    let root = parse(source, start).unwrap_or_else(|e| panic!("{}", e));
    let mut kinds = Vec::new();
    root.node().visit(&mut |node| kinds.push(node.kind()));
    kinds
}

#[test]
fn test_functions_demo() {
    let kinds = kinds_in(&demo("functions.mel"), StartSymbol::Program);

    assert_eq!(kinds.iter().filter(|k| **k == NodeKind::Func).count(), 2);
    assert_eq!(kinds.iter().filter(|k| **k == NodeKind::If).count(), 2);
    assert!(kinds.contains(&NodeKind::For));
    assert!(kinds.contains(&NodeKind::VarsDeclList));
}

#[test]
fn test_arrays_demo() {
    let kinds = kinds_in(&demo("arrays.mel"), StartSymbol::Program);

    assert!(kinds.contains(&NodeKind::ArrayType));
    assert!(kinds.contains(&NodeKind::ExprList));
    assert!(kinds.contains(&NodeKind::ComplexIdent));
    assert!(kinds.contains(&NodeKind::While));
    assert!(kinds.contains(&NodeKind::DoWhile));
}

#[test]
fn test_delegates_demo() {
    let kinds = kinds_in(&demo("delegates.mel"), StartSymbol::Program);

    assert_eq!(kinds.iter().filter(|k| **k == NodeKind::Delegate).count(), 4);
    assert!(kinds.contains(&NodeKind::TypeList));
}

#[test]
fn test_script_demo() {
    let source = demo("script.mel");
    let root = parse(&source, StartSymbol::Statements).unwrap();
    let top: Vec<NodeKind> = root.node().children().iter().map(NodeRef::kind).collect();

    assert_eq!(
        top,
        vec![
            NodeKind::VarsDecl,
            NodeKind::VarsDecl,
            NodeKind::VarsDecl,
            NodeKind::Assign,
            NodeKind::Call,
            NodeKind::For,
            NodeKind::While,
        ]
    );
}

#[test]
fn test_script_is_not_a_program() {
    assert!(parse(&demo("script.mel"), StartSymbol::Program).is_err());
}

#[test]
fn test_rendered_prefix_width_matches_depth() {
    for name in ["functions.mel", "arrays.mel", "delegates.mel"] {
        let root = parse(&demo(name), StartSymbol::Program).unwrap();
        let lines = render_lines(&root);

        assert_eq!(lines.len(), render_tree(&root).len());
        for line in &lines {
            let prefix: String = line.text.chars().take(line.depth * 2).collect();
            let label: String = line.text.chars().skip(line.depth * 2).collect();

            assert!(
                prefix.chars().all(|c| matches!(c, '├' | '└' | '│' | '─' | ' ')),
                "{}: {:?}",
                name,
                line.text
            );
            assert!(!label.is_empty() && !label.starts_with(' '), "{}: {:?}", name, line.text);
        }
    }
}

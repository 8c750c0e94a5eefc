// Integration tests for the Mel parser, through the NodeRef query interface

use mel::parser::ast::{NodeKind, NodeRef, SourceLocation};
use mel::parser::literal::LiteralValue;
use mel::parser::{parse, parse_program, ErrorKind, Root, StartSymbol};

fn parse_ok(source: &str, start: StartSymbol) -> Root {
    parse(source, start).expect("Parsing failed")
}

fn labels(node: NodeRef) -> Vec<String> {
    node.children().iter().map(NodeRef::label).collect()
}

#[test]
fn test_parsing_is_deterministic() {
    let source = "int[] xs = {1, 2}; void f(int n) { for i = 0 To n xs[i] = i Next i }";
    assert_eq!(parse_program(source), parse_program(source));
}

#[test]
fn test_precedence() {
    let root = parse_ok("1 + 2 * 3", StartSymbol::Expression);
    let node = root.node();
    assert_eq!(node.label(), "+");
    assert_eq!(labels(node), vec!["1", "*"]);

    let root = parse_ok("1 * 2 + 3", StartSymbol::Expression);
    let node = root.node();
    assert_eq!(node.label(), "+");
    assert_eq!(labels(node), vec!["*", "3"]);
}

#[test]
fn test_subtraction_is_left_associative() {
    let root = parse_ok("1 - 2 - 3", StartSymbol::Expression);
    let node = root.node();

    assert_eq!(labels(node), vec!["-", "3"]);
    let inner = node.child(0).unwrap();
    assert_eq!(labels(inner), vec!["1", "2"]);
}

#[test]
fn test_literal_decoding() {
    let cases = [
        ("3.14", LiteralValue::Double(3.14)),
        ("True", LiteralValue::Bool(true)),
        ("'a'", LiteralValue::Char('a')),
        ("42", LiteralValue::Int(42)),
        ("\"hi\\n\"", LiteralValue::Str("hi\n".to_string())),
    ];

    for (source, expected) in cases {
        match parse_ok(source, StartSymbol::Expression).node() {
            NodeRef::Literal(lit) => {
                assert_eq!(lit.value, expected, "decoding {}", source);
                assert_eq!(lit.text, source);
            }
            other => panic!("Expected literal for {}, got {:?}", source, other.kind()),
        }
    }
}

#[test]
fn test_dim_declaration_arity() {
    let root = parse_ok("Dim s As int = 3", StartSymbol::Statements);
    let decl = root.node().child(0).unwrap();

    assert_eq!(decl.kind(), NodeKind::VarsDecl);
    assert_eq!(decl.children().len(), 2);
    assert_eq!(labels(decl), vec!["int", "="]);

    let init = decl.child(1).unwrap();
    assert_eq!(init.kind(), NodeKind::Declarator);
    assert_eq!(labels(init), vec!["s", "3"]);
}

#[test]
fn test_if_arity() {
    let without_else = parse_ok("if (x) then y = 1 end if", StartSymbol::Statements);
    let stmt = without_else.node().child(0).unwrap();
    assert_eq!(stmt.kind(), NodeKind::If);
    assert_eq!(stmt.children().len(), 2);

    let with_else = parse_ok("if (x) then y = 1 else y = 2 end if", StartSymbol::Statements);
    let stmt = with_else.node().child(0).unwrap();
    assert_eq!(stmt.children().len(), 3);
}

#[test]
fn test_for_always_has_four_children() {
    let root = parse_ok("for i = 1 To 10 Next i", StartSymbol::Statements);
    let stmt = root.node().child(0).unwrap();

    assert_eq!(stmt.kind(), NodeKind::For);
    let children = stmt.children();
    assert_eq!(children.len(), 4);
    assert_eq!(children[0].kind(), NodeKind::Assign);
    assert_eq!(children[1].label(), "10");

    // absent step and empty body are empty statement lists without a position
    for slot in &children[2..] {
        assert_eq!(slot.kind(), NodeKind::StmtList);
        assert!(slot.children().is_empty());
        assert_eq!(slot.location(), None);
    }
}

#[test]
fn test_unterminated_if_error_position() {
    let source = "void f() {\n  if (x) then\n    y = 1\n}\n";
    let err = parse_program(source).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.location(), Some(SourceLocation::new(4, 1)));
    assert_eq!(
        err.to_string(),
        "Parse error at line 4, column 1: expected statement, found '}'"
    );
}

#[test]
fn test_if_missing_end_at_end_of_file() {
    let err = parse("if (x) then\n  y = 1", StartSymbol::Statements).unwrap_err();
    assert_eq!(err.location(), Some(SourceLocation::new(2, 8)));
    assert!(err.to_string().contains("found end of file"));
}

#[test]
fn test_my_func_scenario() {
    let source = "void myFunc(int[] a, boolean b) { while (a>5) Dim a = 14 As int end while }";
    let program = parse_program(source).unwrap();
    let node = NodeRef::from(&program);

    let func = node.child(0).unwrap();
    assert_eq!(func.kind(), NodeKind::Func);
    assert_eq!(func.label(), "void myFunc");
    assert_eq!(labels(func), vec!["void", "func-vars", "..."]);

    let params = func.child(1).unwrap();
    assert_eq!(params.children().len(), 2);
    assert_eq!(labels(params.child(0).unwrap()), vec!["array int", "a"]);
    assert_eq!(labels(params.child(1).unwrap()), vec!["boolean", "b"]);

    let body = func.child(2).unwrap();
    let while_stmt = body.child(0).unwrap();
    assert_eq!(while_stmt.kind(), NodeKind::While);

    let condition = while_stmt.child(0).unwrap();
    assert_eq!(condition.label(), ">");
    assert_eq!(condition.location(), Some(SourceLocation::new(1, 43)));

    let decl = while_stmt.child(1).unwrap().child(0).unwrap();
    assert_eq!(decl.kind(), NodeKind::VarsDecl);
    assert_eq!(labels(decl), vec!["int", "="]);
    assert_eq!(labels(decl.child(1).unwrap()), vec!["a", "14"]);
}

#[test]
fn test_lexical_error_reported_before_syntax_error() {
    let err = parse_program("void f( {\nx = \"open\n}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
    assert_eq!(err.location().map(|loc| loc.line), Some(2));
}

#[test]
fn test_integer_overflow_is_literal_error() {
    let err = parse("x = 123456789012345678901", StartSymbol::Statements).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Literal);
    assert_eq!(err.location(), Some(SourceLocation::new(1, 5)));
}

#[test]
fn test_relational_chain_nests_left() {
    let root = parse_ok("a < b < c", StartSymbol::Expression);
    let node = root.node();
    assert_eq!(node.label(), "<");
    assert_eq!(labels(node), vec!["<", "c"]);
}

#[test]
fn test_visit_reaches_every_node() {
    let program = parse_program("int a, b; void f() { a = b + 1 }").unwrap();
    let mut kinds = Vec::new();
    NodeRef::from(&program).visit(&mut |node| kinds.push(node.kind()));

    assert_eq!(kinds.first(), Some(&NodeKind::Program));
    assert_eq!(kinds.iter().filter(|k| **k == NodeKind::BinaryOp).count(), 1);
    assert_eq!(kinds.iter().filter(|k| **k == NodeKind::Ident).count(), 4);
}

#[test]
fn test_while_and_also_combines_conditions() {
    let root = parse_ok(
        "while (i < n) AndAlso (ok) i = i + 1 end while",
        StartSymbol::Statements,
    );
    let condition = root.node().child(0).unwrap().child(0).unwrap();

    assert_eq!(condition.label(), "&&");
    assert_eq!(labels(condition), vec!["<", "ok"]);
}

#[test]
fn test_end_variable_before_if_on_next_line() {
    let root = parse_ok("y = end\nif (x) then z = 1 end if", StartSymbol::Statements);
    let node = root.node();

    assert_eq!(labels(node), vec!["=", "if"]);
    assert_eq!(labels(node.child(0).unwrap()), vec!["y", "end"]);
}

#[test]
fn test_numbers_with_bare_point() {
    for (source, expected) in [(".5", 0.5), ("1.", 1.0)] {
        match parse_ok(source, StartSymbol::Expression).node() {
            NodeRef::Literal(lit) => assert_eq!(lit.value, LiteralValue::Double(expected)),
            other => panic!("Expected literal for {}, got {:?}", source, other.kind()),
        }
    }
}

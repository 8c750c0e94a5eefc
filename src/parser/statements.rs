//! Statement parsing implementation
//!
//! This module handles parsing of all Mel statement types:
//!
//! - Declaration lists: `int x = 42, y;`
//! - `Dim` forms: `Dim x As int = 1`, `Dim x = 1 As int`, `Dim x = 1`, `Dim f(1)`
//! - Assignments and calls: `x = 1`, `xs[i] = 2`, `x As double = 1.5`, `f(x)`
//! - Control flow: `if`, `for … To … Next`, `while`, `do while … Loop`
//! - Nested blocks: `{ ... }`
//!
//! # Grammar
//!
//! ```text
//! statement ::= decl | simple ";"? | if_stmt | for_stmt | while_stmt
//!             | do_while_stmt | "{" statement* "}"
//! simple    ::= dim_stmt | ident "(" args ")" | ident "As" type "=" expr
//!             | target "=" expr
//! if_stmt   ::= "if" "(" expr ")" "then" statement* ("else" statement*)? "end if"
//! for_stmt  ::= "for" simple "To" expr statement* "Next" ident
//! while_stmt    ::= "while" "(" expr ")" ("AndAlso" "(" expr ")")? statement* "end while"
//! do_while_stmt ::= "do" "while" "(" expr ")" statement* "Loop"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;
use crate::parser::Result;

impl Parser {
    /// Parse statements until one of `terminators` is next. The terminator is left
    /// for the caller; running out of input first fails with `expected`.
    pub(crate) fn parse_stmt_list(
        &mut self,
        terminators: &[TokenKind],
        expected: &str,
    ) -> Result<StmtList> {
        let mut statements = Vec::new();

        while !terminators.contains(&self.peek_kind()) {
            if self.is_at_end() {
                return Err(self.unexpected(expected));
            }
            statements.push(self.parse_statement()?);
        }

        Ok(StmtList {
            location: statements.first().and_then(Stmt::location),
            statements,
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt> {
        if self.is_type_start() {
            return Ok(Stmt::VarsDecl(self.parse_vars_decl()?));
        }

        match self.peek_kind() {
            TokenKind::Dim | TokenKind::Ident => self.parse_simple_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::LBrace => self.parse_block(),
            _ => Err(self.unexpected("statement")),
        }
    }

    /// Parse a `Dim` or identifier-led statement, with its optional `;`.
    pub(crate) fn parse_simple_statement(&mut self) -> Result<Stmt> {
        let stmt = match self.peek_kind() {
            TokenKind::Dim => self.parse_dim_statement()?,
            TokenKind::Ident => {
                let ident = self.expect_identifier("at start of statement")?;
                self.parse_identifier_statement(ident)?
            }
            _ => return Err(self.unexpected("assignment, call or 'Dim'")),
        };

        self.match_token(TokenKind::Semicolon);
        Ok(stmt)
    }

    /// `Dim name ...`: a typed declaration, a plain assignment or a call
    fn parse_dim_statement(&mut self) -> Result<Stmt> {
        let location = self.advance().location;
        let ident = self.expect_identifier("after 'Dim'")?;

        match self.peek_kind() {
            TokenKind::LParen => Ok(Stmt::Call(self.parse_call_rest(ident)?)),
            TokenKind::LBracket => Ok(Stmt::Assign(self.parse_assignment(ident)?)),
            TokenKind::As => {
                self.advance();
                let ty = self.parse_type()?;
                let declarator = if self.match_token(TokenKind::Eq) {
                    let value = self.parse_expression()?;
                    Declarator::Init { ident, value }
                } else {
                    Declarator::Name(ident)
                };
                Ok(Stmt::VarsDecl(VarsDecl {
                    ty,
                    declarators: vec![declarator],
                    location,
                }))
            }
            TokenKind::Eq => {
                self.advance();
                let value = self.parse_expression()?;

                // `Dim x = e As T` declares; without the trailing type it only assigns
                if self.match_token(TokenKind::As) {
                    let ty = self.parse_type()?;
                    Ok(Stmt::VarsDecl(VarsDecl {
                        ty,
                        declarators: vec![Declarator::Init { ident, value }],
                        location,
                    }))
                } else {
                    Ok(Stmt::Assign(Assign {
                        location: ident.location,
                        target: AssignTarget::Ident(ident),
                        value,
                    }))
                }
            }
            _ => Err(self.unexpected("'As', '=', '[' or '(' after 'Dim' name")),
        }
    }

    /// Statement starting with an identifier that has already been consumed
    fn parse_identifier_statement(&mut self, ident: Ident) -> Result<Stmt> {
        match self.peek_kind() {
            TokenKind::LParen => Ok(Stmt::Call(self.parse_call_rest(ident)?)),
            TokenKind::Eq | TokenKind::LBracket => {
                Ok(Stmt::Assign(self.parse_assignment(ident)?))
            }
            TokenKind::As => {
                self.advance();
                let location = ident.location;
                let ty = self.parse_type()?;
                self.expect(TokenKind::Eq, "after 'As' type")?;
                let value = self.parse_expression()?;
                Ok(Stmt::VarsDecl(VarsDecl {
                    ty,
                    declarators: vec![Declarator::Init { ident, value }],
                    location,
                }))
            }
            _ => Err(self.unexpected("'=', '[', '(' or 'As' after identifier")),
        }
    }

    /// Parse `target = value` where the target name is already consumed
    fn parse_assignment(&mut self, ident: Ident) -> Result<Assign> {
        let location = ident.location;
        let target = if self.check(TokenKind::LBracket) {
            AssignTarget::ArrayElem(self.parse_index_rest(ident)?)
        } else {
            AssignTarget::Ident(ident)
        };

        self.expect(TokenKind::Eq, "in assignment")?;
        let value = self.parse_expression()?;

        Ok(Assign {
            target,
            value,
            location,
        })
    }

    /// Parse `( condition )`
    fn parse_condition(&mut self, after: &str) -> Result<Expr> {
        self.expect(TokenKind::LParen, after)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "after condition")?;
        Ok(condition)
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt> {
        let location = self.advance().location;
        let condition = self.parse_condition("after 'if'")?;
        self.expect(TokenKind::Then, "after if condition")?;

        let then_branch =
            self.parse_stmt_list(&[TokenKind::Else, TokenKind::EndIf], "'else' or 'end if'")?;

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(self.parse_stmt_list(&[TokenKind::EndIf], "'end if'")?)
        } else {
            None
        };

        self.expect(TokenKind::EndIf, "to close if statement")?;

        Ok(Stmt::If(If {
            condition,
            then_branch,
            else_branch,
            location,
        }))
    }

    /// Parse `for init To limit ... Next name`. There is no step clause.
    fn parse_for_statement(&mut self) -> Result<Stmt> {
        let location = self.advance().location;

        let init = self.parse_simple_statement()?;
        self.expect(TokenKind::To, "after for loop initializer")?;
        let condition = self.parse_expression()?;

        let body = self.parse_stmt_list(&[TokenKind::Next], "'Next' to close for loop")?;
        self.expect(TokenKind::Next, "to close for loop")?;
        self.expect_identifier("after 'Next'")?;

        Ok(Stmt::For(For {
            init: Box::new(init),
            condition,
            step: None,
            body,
            location,
        }))
    }

    /// Parse while statement; `AndAlso ( e )` is folded into the condition with `&&`
    fn parse_while_statement(&mut self) -> Result<Stmt> {
        let location = self.advance().location;
        let mut condition = self.parse_condition("after 'while'")?;

        if self.check(TokenKind::AndAlso) {
            let and_location = self.advance().location;
            let second = self.parse_condition("after 'AndAlso'")?;
            condition = Expr::Binary(BinaryOp {
                op: BinOp::And,
                left: Box::new(condition),
                right: Box::new(second),
                location: and_location,
            });
        }

        let body = self.parse_stmt_list(&[TokenKind::EndWhile], "'end while'")?;
        self.expect(TokenKind::EndWhile, "to close while loop")?;

        Ok(Stmt::While(While {
            condition,
            body,
            location,
        }))
    }

    /// Parse `do while ( e ) ... Loop`
    fn parse_do_while_statement(&mut self) -> Result<Stmt> {
        let location = self.advance().location;
        self.expect(TokenKind::While, "after 'do'")?;
        let condition = self.parse_condition("after 'do while'")?;

        let body = self.parse_stmt_list(&[TokenKind::Loop], "'Loop'")?;
        self.expect(TokenKind::Loop, "to close do-while loop")?;

        Ok(Stmt::DoWhile(DoWhile {
            condition,
            body,
            location,
        }))
    }

    /// Parse `{ ... }` as a nested statement list located at the brace
    fn parse_block(&mut self) -> Result<Stmt> {
        let location = self.advance().location;
        let list = self.parse_stmt_list(&[TokenKind::RBrace], "'}'")?;
        self.expect(TokenKind::RBrace, "to close block")?;

        Ok(Stmt::Block(StmtList {
            statements: list.statements,
            location: Some(location),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_stmts(source: &str) -> StmtList {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_statements().unwrap()
    }

    fn parse_one(source: &str) -> Stmt {
        let mut list = parse_stmts(source);
        assert_eq!(list.len(), 1, "expected exactly one statement in {:?}", source);
        list.statements.remove(0)
    }

    #[test]
    fn test_dim_forms() {
        match parse_one("Dim s As int = 3") {
            Stmt::VarsDecl(decl) => {
                assert_eq!(decl.ty.to_string(), "int");
                assert!(matches!(&decl.declarators[..], [Declarator::Init { .. }]));
                assert_eq!(decl.location, SourceLocation::new(1, 1));
            }
            other => panic!("Expected declaration, got {:?}", other),
        }

        match parse_one("Dim s = 3 As double") {
            Stmt::VarsDecl(decl) => assert_eq!(decl.ty.to_string(), "double"),
            other => panic!("Expected declaration, got {:?}", other),
        }

        match parse_one("Dim s As boolean") {
            Stmt::VarsDecl(decl) => {
                assert!(matches!(&decl.declarators[..], [Declarator::Name(_)]))
            }
            other => panic!("Expected declaration, got {:?}", other),
        }

        assert!(matches!(parse_one("Dim s = 3"), Stmt::Assign(_)));
        assert!(matches!(parse_one("Dim xs[1] = 3;"), Stmt::Assign(_)));
        assert!(matches!(parse_one("Dim f(1, 2)"), Stmt::Call(_)));
    }

    #[test]
    fn test_identifier_statements() {
        let list = parse_stmts("f(); x = 1; xs[i + 1] = x\ny As double = 2.0");
        assert_eq!(list.len(), 4);

        assert!(matches!(&list.statements[0], Stmt::Call(call) if call.args.is_empty()));
        assert!(matches!(
            &list.statements[1],
            Stmt::Assign(Assign { target: AssignTarget::Ident(_), .. })
        ));
        assert!(matches!(
            &list.statements[2],
            Stmt::Assign(Assign { target: AssignTarget::ArrayElem(_), .. })
        ));
        match &list.statements[3] {
            Stmt::VarsDecl(decl) => {
                assert_eq!(decl.ty.to_string(), "double");
                assert_eq!(decl.location, SourceLocation::new(2, 1));
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_if_with_and_without_else() {
        match parse_one("if (x > 1) then y = 1 end if") {
            Stmt::If(stmt) => {
                assert_eq!(stmt.then_branch.len(), 1);
                assert!(stmt.else_branch.is_none());
            }
            other => panic!("Expected if, got {:?}", other),
        }

        match parse_one("if (x) then else y = 2 z = 3 end if") {
            Stmt::If(stmt) => {
                assert!(stmt.then_branch.is_empty());
                assert_eq!(stmt.else_branch.map(|b| b.len()), Some(2));
            }
            other => panic!("Expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_for_loop() {
        match parse_one("for i = 0 To 10\n  s = s + i\nNext i") {
            Stmt::For(stmt) => {
                assert!(matches!(*stmt.init, Stmt::Assign(_)));
                assert!(matches!(stmt.condition, Expr::Literal(_)));
                assert!(stmt.step.is_none());
                assert_eq!(stmt.body.len(), 1);
            }
            other => panic!("Expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_for_requires_loop_variable_after_next() {
        let mut parser = Parser::new("for i = 0 To 3 Next").unwrap();
        let err = parser.parse_statements().unwrap_err();
        assert!(err.to_string().contains("expected identifier after 'Next'"));
    }

    #[test]
    fn test_while_and_also() {
        match parse_one("while (a > 5) AndAlso (b < 2) a = a - 1 end while") {
            Stmt::While(stmt) => match &stmt.condition {
                Expr::Binary(bin) => {
                    assert_eq!(bin.op, BinOp::And);
                    assert_eq!(bin.location, SourceLocation::new(1, 15));
                }
                other => panic!("Expected && condition, got {:?}", other),
            },
            other => panic!("Expected while, got {:?}", other),
        }
    }

    #[test]
    fn test_do_while() {
        match parse_one("do while (i < 3) i = i + 1 Loop") {
            Stmt::DoWhile(stmt) => assert_eq!(stmt.body.len(), 1),
            other => panic!("Expected do-while, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_block() {
        match parse_one("{ int x; { } }") {
            Stmt::Block(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list.location, Some(SourceLocation::new(1, 1)));
                assert!(matches!(&list.statements[1], Stmt::Block(inner) if inner.is_empty()));
            }
            other => panic!("Expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_if_reports_end_of_file() {
        let mut parser = Parser::new("if (x) then\n  y = 1\n").unwrap();
        let err = parser.parse_statements().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 3, column 1: expected 'else' or 'end if', found end of file"
        );
    }

    #[test]
    fn test_stray_terminator_is_not_a_statement() {
        let mut parser = Parser::new("x = 1 end while").unwrap();
        let err = parser.parse_statements().unwrap_err();
        assert!(err.to_string().contains("expected statement, found 'end while'"));
    }
}

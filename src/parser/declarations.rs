//! Declaration parsing implementation
//!
//! This module handles types and everything that declares a name:
//!
//! - Types: `int`, `double[]`, `delegate<int, char: boolean>`
//! - Declaration lists: `int a, b = 2, c As double = 1.5;`
//! - Array initializers: `int[] xs = { 1, 2, 3 };`
//! - Function definitions: `void f(int[] a, boolean b) { ... }`
//!
//! # Grammar
//!
//! ```text
//! item       ::= type ident ( "(" params ")" "{" stmt* "}" | declarator_rest )
//! decl       ::= type declarator ("," declarator)* ";"
//! declarator ::= ident
//!              | ident "=" expr
//!              | ident "As" type "=" expr
//!              | ident "="? "{" (expr ("," expr)*)? "}"     (array types only)
//! type       ::= simple ("[" "]")? | "delegate" "<" (type ("," type)*)? ":" type ">"
//! params     ::= (type ident ("," type ident)*)?
//! ```

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;
use crate::parser::Result;

/// What a top-level type-led construct turned out to be.
pub(crate) enum TopLevelItem {
    Func(Func),
    Vars(VarsDecl),
}

fn var_type_of(kind: TokenKind) -> Option<VarType> {
    match kind {
        TokenKind::Int => Some(VarType::Int),
        TokenKind::Char => Some(VarType::Char),
        TokenKind::Str => Some(VarType::String),
        TokenKind::Boolean => Some(VarType::Boolean),
        TokenKind::Double => Some(VarType::Double),
        TokenKind::Void => Some(VarType::Void),
        _ => None,
    }
}

impl Parser {
    /// Parse a function definition or a global declaration list. Both start with
    /// `type ident`; a following `(` selects the function form.
    pub(crate) fn parse_top_level_item(&mut self) -> Result<TopLevelItem> {
        if !self.is_type_start() {
            return Err(self.unexpected("function definition or declaration"));
        }

        let ty = self.parse_type()?;
        let name = self.expect_identifier("after type")?;

        if self.check(TokenKind::LParen) {
            Ok(TopLevelItem::Func(self.parse_function_rest(ty, name)?))
        } else {
            Ok(TopLevelItem::Vars(self.parse_vars_decl_rest(ty, name)?))
        }
    }

    /// Parse a type: simple, array or delegate
    pub(crate) fn parse_type(&mut self) -> Result<TypeNode> {
        let location = self.current_location();

        if self.match_token(TokenKind::Delegate) {
            return self.parse_delegate_rest(location);
        }

        let Some(ty) = var_type_of(self.peek_kind()) else {
            return Err(self.unexpected("type"));
        };
        self.advance();

        if self.match_token(TokenKind::LBracket) {
            self.expect(TokenKind::RBracket, "to close array type")?;
            Ok(TypeNode::Array {
                element: ty,
                location,
            })
        } else {
            Ok(TypeNode::Simple { ty, location })
        }
    }

    /// Parse `< types : return >` after the `delegate` keyword
    fn parse_delegate_rest(&mut self, location: SourceLocation) -> Result<TypeNode> {
        self.expect(TokenKind::Lt, "after 'delegate'")?;

        let mut types = Vec::new();
        if !self.check(TokenKind::Colon) {
            loop {
                types.push(self.parse_type()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::Colon, "before delegate return type")?;
        let return_type = self.parse_type()?;
        self.close_delegate()?;

        let params = TypeList {
            location: types.first().map(TypeNode::location),
            types,
        };

        Ok(TypeNode::Delegate(Delegate {
            params,
            return_type: Box::new(return_type),
            location,
        }))
    }

    /// Consume the `>` closing a delegate type. `x As delegate<:int>= f` lexes the
    /// `>=` as one token; it is split here, leaving the `=` in place.
    fn close_delegate(&mut self) -> Result<()> {
        if self.check(TokenKind::Ge) {
            let token = &mut self.tokens[self.position];
            token.kind = TokenKind::Eq;
            token.text = "=".to_string();
            token.location.column += 1;
            return Ok(());
        }

        self.expect(TokenKind::Gt, "to close delegate type")?;
        Ok(())
    }

    /// Parse a declaration list statement: `type declarator, ...;`
    pub(crate) fn parse_vars_decl(&mut self) -> Result<VarsDecl> {
        let ty = self.parse_type()?;
        let first = self.expect_identifier("in declaration")?;
        self.parse_vars_decl_rest(ty, first)
    }

    /// Continue a declaration list whose type and first name are already consumed
    fn parse_vars_decl_rest(&mut self, ty: TypeNode, first: Ident) -> Result<VarsDecl> {
        let location = ty.location();
        let mut declarators = vec![self.parse_declarator(&ty, first)?];

        while self.match_token(TokenKind::Comma) {
            let ident = self.expect_identifier("after ',' in declaration")?;
            declarators.push(self.parse_declarator(&ty, ident)?);
        }

        self.expect(TokenKind::Semicolon, "after declaration")?;

        Ok(VarsDecl {
            ty,
            declarators,
            location,
        })
    }

    fn parse_declarator(&mut self, ty: &TypeNode, ident: Ident) -> Result<Declarator> {
        if self.match_token(TokenKind::As) {
            let declared = self.parse_type()?;
            self.expect(TokenKind::Eq, "after 'As' type")?;
            let value = self.parse_expression()?;
            return Ok(Declarator::Typed {
                ident,
                ty: declared,
                value,
            });
        }

        let has_eq = self.match_token(TokenKind::Eq);

        if self.check(TokenKind::LBrace) {
            if !ty.is_array() {
                return Err(self.unexpected("expression (initializer lists need an array type)"));
            }
            let items = self.parse_initializer_list()?;
            return Ok(Declarator::ArrayInit { ident, items });
        }

        if has_eq {
            let value = self.parse_expression()?;
            Ok(Declarator::Init { ident, value })
        } else {
            Ok(Declarator::Name(ident))
        }
    }

    /// Parse `{ expr, ... }`
    fn parse_initializer_list(&mut self) -> Result<ExprList> {
        let location = self
            .expect(TokenKind::LBrace, "to open initializer list")?
            .location;

        let mut exprs = Vec::new();
        if !self.check(TokenKind::RBrace) {
            loop {
                exprs.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RBrace, "to close initializer list")?;

        Ok(ExprList { exprs, location })
    }

    /// Parse `( params ) { body }` after the return type and name
    fn parse_function_rest(&mut self, return_type: TypeNode, name: Ident) -> Result<Func> {
        let location = return_type.location();
        let params = self.parse_parameters()?;

        self.expect(TokenKind::LBrace, "before function body")?;
        let body = self.parse_stmt_list(&[TokenKind::RBrace], "'}' to close function body")?;
        self.expect(TokenKind::RBrace, "to close function body")?;

        Ok(Func {
            return_type,
            name,
            params,
            body,
            location,
        })
    }

    /// Parse parameter list: `(type name, type name, ...)`
    fn parse_parameters(&mut self) -> Result<FuncVarsList> {
        self.expect(TokenKind::LParen, "before parameter list")?;

        let mut vars = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let ty = self.parse_type()?;
                let ident = self.expect_identifier("as parameter name")?;
                vars.push(FuncVar { ty, ident });

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen, "after parameter list")?;

        Ok(FuncVarsList { vars })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_type_str(source: &str) -> TypeNode {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_type().unwrap()
    }

    fn parse_decl(source: &str) -> VarsDecl {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_vars_decl().unwrap()
    }

    #[test]
    fn test_simple_and_array_types() {
        assert!(matches!(
            parse_type_str("boolean"),
            TypeNode::Simple {
                ty: VarType::Boolean,
                ..
            }
        ));
        assert!(matches!(
            parse_type_str("double [ ]"),
            TypeNode::Array {
                element: VarType::Double,
                ..
            }
        ));
    }

    #[test]
    fn test_delegate_type() {
        let ty = parse_type_str("delegate<int, char[]: boolean>");
        match &ty {
            TypeNode::Delegate(delegate) => {
                assert_eq!(delegate.params.types.len(), 2);
                assert!(delegate.params.types[1].is_array());
                assert_eq!(delegate.return_type.to_string(), "boolean");
            }
            other => panic!("Expected delegate, got {:?}", other),
        }
        assert_eq!(ty.to_string(), "delegate<int, char[]: boolean>");
    }

    #[test]
    fn test_delegate_closed_by_greater_equal() {
        let mut parser = Parser::new("pick As delegate<int:int>= twice").unwrap();
        let list = parser.parse_statements().unwrap();

        match &list.statements[0] {
            Stmt::VarsDecl(decl) => {
                assert!(matches!(decl.ty, TypeNode::Delegate(_)));
                match &decl.declarators[0] {
                    Declarator::Init { ident, value } => {
                        assert_eq!(ident.name, "pick");
                        assert_eq!(value.location(), SourceLocation::new(1, 28));
                    }
                    other => panic!("Expected initializer, got {:?}", other),
                }
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_delegate_without_parameters() {
        let ty = parse_type_str("delegate<: void>");
        match ty {
            TypeNode::Delegate(delegate) => {
                assert!(delegate.params.types.is_empty());
                assert_eq!(delegate.params.location, None);
            }
            other => panic!("Expected delegate, got {:?}", other),
        }
    }

    #[test]
    fn test_declarator_forms() {
        let decl = parse_decl("int a, b = 2, c As double = 1.5;");

        assert_eq!(decl.declarators.len(), 3);
        assert!(matches!(&decl.declarators[0], Declarator::Name(i) if i.name == "a"));
        assert!(matches!(&decl.declarators[1], Declarator::Init { ident, .. } if ident.name == "b"));
        assert!(matches!(
            &decl.declarators[2],
            Declarator::Typed { ty: TypeNode::Simple { ty: VarType::Double, .. }, .. }
        ));
    }

    #[test]
    fn test_array_initializer() {
        let decl = parse_decl("int[] xs = { 1, 2 + 3 }, ys {};");

        match &decl.declarators[0] {
            Declarator::ArrayInit { items, .. } => assert_eq!(items.exprs.len(), 2),
            other => panic!("Expected array initializer, got {:?}", other),
        }
        match &decl.declarators[1] {
            Declarator::ArrayInit { items, .. } => assert!(items.exprs.is_empty()),
            other => panic!("Expected array initializer, got {:?}", other),
        }
    }

    #[test]
    fn test_initializer_list_requires_array_type() {
        let mut parser = Parser::new("int x = { 1 };").unwrap();
        assert!(parser.parse_vars_decl().is_err());
    }

    #[test]
    fn test_declaration_requires_semicolon() {
        let mut parser = Parser::new("int x = 1").unwrap();
        let err = parser.parse_vars_decl().unwrap_err();
        assert!(err.to_string().contains("expected ';' after declaration"));
    }

    #[test]
    fn test_function_with_delegate_parameter() {
        let mut parser =
            Parser::new("delegate<int: int> twice(delegate<int: int> f, int x) { }").unwrap();
        let program = parser.parse_program().unwrap();
        let func = program.functions().next().unwrap();

        assert_eq!(func.name.name, "twice");
        assert_eq!(func.params.vars.len(), 2);
        assert!(matches!(func.return_type, TypeNode::Delegate(_)));
        assert!(func.body.is_empty());
    }
}

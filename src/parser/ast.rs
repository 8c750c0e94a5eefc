// AST (Abstract Syntax Tree) definitions for the Mel front end
//
// Concrete nodes are owned structs grouped by role (`TypeNode`, `Expr`, `Stmt`,
// `Item`). `NodeRef` is the uniform borrowed view used by the tree renderer and
// anything else that walks the tree without caring about node roles.

use super::literal::LiteralValue;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Built-in scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Int,
    Char,
    String,
    Boolean,
    Double,
    Void,
}

impl VarType {
    pub fn name(self) -> &'static str {
        match self {
            VarType::Int => "int",
            VarType::Char => "char",
            VarType::String => "string",
            VarType::Boolean => "boolean",
            VarType::Double => "double",
            VarType::Void => "void",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type as written in the source
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Simple {
        ty: VarType,
        location: SourceLocation,
    },
    Array {
        element: VarType,
        location: SourceLocation,
    },
    Delegate(Delegate),
}

impl TypeNode {
    pub fn location(&self) -> SourceLocation {
        match self {
            TypeNode::Simple { location, .. } | TypeNode::Array { location, .. } => *location,
            TypeNode::Delegate(delegate) => delegate.location,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeNode::Array { .. })
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Simple { ty, .. } => write!(f, "{}", ty),
            TypeNode::Array { element, .. } => write!(f, "{}[]", element),
            TypeNode::Delegate(delegate) => {
                f.write_str("delegate<")?;
                for (i, ty) in delegate.params.types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                write!(f, ": {}>", delegate.return_type)
            }
        }
    }
}

/// Function type: `delegate<int, char: boolean>`
#[derive(Debug, Clone, PartialEq)]
pub struct Delegate {
    pub params: TypeList,
    pub return_type: Box<TypeNode>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeList {
    pub types: Vec<TypeNode>,
    pub location: Option<SourceLocation>,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Ge,
    Le,
    NotEq,
    Eq,
    Gt,
    Lt,
    // Bitwise
    BitAnd,
    BitOr,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Ge => ">=",
            BinOp::Le => "<=",
            BinOp::NotEq => "<>",
            BinOp::Eq => "==",
            BinOp::Gt => ">",
            BinOp::Lt => "<",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Text exactly as written, quotes included
    pub text: String,
    pub value: LiteralValue,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub location: SourceLocation,
}

/// Array element: `name[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexIdent {
    pub array: Ident,
    pub index: Box<Expr>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Ident,
    pub args: Vec<Expr>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub op: BinOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    /// Position of the operator token
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(Ident),
    ArrayElem(ComplexIdent),
    Call(Call),
    Binary(BinaryOp),
}

impl Expr {
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Literal(lit) => lit.location,
            Expr::Ident(ident) => ident.location,
            Expr::ArrayElem(elem) => elem.location,
            Expr::Call(call) => call.location,
            Expr::Binary(bin) => bin.location,
        }
    }
}

/// Brace initializer: `{ 1, 2, 3 }`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprList {
    pub exprs: Vec<Expr>,
    pub location: SourceLocation,
}

/// One variable inside a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Declarator {
    /// `x`
    Name(Ident),
    /// `x = value`
    Init { ident: Ident, value: Expr },
    /// `x As double = value`
    Typed {
        ident: Ident,
        ty: TypeNode,
        value: Expr,
    },
    /// `xs = { 1, 2 }`
    ArrayInit { ident: Ident, items: ExprList },
}

impl Declarator {
    pub fn ident(&self) -> &Ident {
        match self {
            Declarator::Name(ident)
            | Declarator::Init { ident, .. }
            | Declarator::Typed { ident, .. }
            | Declarator::ArrayInit { ident, .. } => ident,
        }
    }
}

/// `int a, b = 2;`: one declared type, one or more declarators
#[derive(Debug, Clone, PartialEq)]
pub struct VarsDecl {
    pub ty: TypeNode,
    pub declarators: Vec<Declarator>,
    pub location: SourceLocation,
}

/// Consecutive global declarations
#[derive(Debug, Clone, PartialEq)]
pub struct VarsDeclList {
    pub decls: Vec<VarsDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Ident(Ident),
    ArrayElem(ComplexIdent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: AssignTarget,
    pub value: Expr,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Expr,
    pub then_branch: StmtList,
    pub else_branch: Option<StmtList>,
    pub location: SourceLocation,
}

/// `for init To condition ... Next`. The step slot has no source syntax and
/// renders as [`EMPTY_STMT_LIST`] when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub init: Box<Stmt>,
    pub condition: Expr,
    pub step: Option<Box<Stmt>>,
    pub body: StmtList,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expr,
    pub body: StmtList,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhile {
    pub condition: Expr,
    pub body: StmtList,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarsDecl(VarsDecl),
    Assign(Assign),
    Call(Call),
    If(If),
    For(For),
    While(While),
    DoWhile(DoWhile),
    Block(StmtList),
}

impl Stmt {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Stmt::VarsDecl(decl) => Some(decl.location),
            Stmt::Assign(assign) => Some(assign.location),
            Stmt::Call(call) => Some(call.location),
            Stmt::If(stmt) => Some(stmt.location),
            Stmt::For(stmt) => Some(stmt.location),
            Stmt::While(stmt) => Some(stmt.location),
            Stmt::DoWhile(stmt) => Some(stmt.location),
            Stmt::Block(list) => list.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StmtList {
    pub statements: Vec<Stmt>,
    pub location: Option<SourceLocation>,
}

impl StmtList {
    pub const fn empty() -> Self {
        Self {
            statements: Vec::new(),
            location: None,
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Stands in for every optional statement slot that was left out of the source.
pub static EMPTY_STMT_LIST: StmtList = StmtList::empty();

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct FuncVar {
    pub ty: TypeNode,
    pub ident: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncVarsList {
    pub vars: Vec<FuncVar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub return_type: TypeNode,
    pub name: Ident,
    pub params: FuncVarsList,
    pub body: StmtList,
    pub location: SourceLocation,
}

/// Top-level program item
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Func(Func),
    Vars(VarsDeclList),
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Func> {
        self.items.iter().filter_map(|item| match item {
            Item::Func(func) => Some(func),
            Item::Vars(_) => None,
        })
    }
}

/// Syntactic role of a node, as seen through [`NodeRef`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Literal,
    Ident,
    VarType,
    ArrayType,
    Delegate,
    TypeList,
    BinaryOp,
    ComplexIdent,
    Call,
    ExprList,
    Declarator,
    VarsDecl,
    VarsDeclList,
    Assign,
    If,
    For,
    While,
    DoWhile,
    StmtList,
    FuncVar,
    FuncVarsList,
    Func,
    Program,
}

/// Borrowed, uniform view of any node in the tree.
///
/// Bare declarators (`Declarator::Name`) are presented as their identifier.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Literal(&'a Literal),
    Ident(&'a Ident),
    Type(&'a TypeNode),
    TypeList(&'a TypeList),
    Binary(&'a BinaryOp),
    ComplexIdent(&'a ComplexIdent),
    Call(&'a Call),
    ExprList(&'a ExprList),
    Declarator(&'a Declarator),
    VarsDecl(&'a VarsDecl),
    VarsDeclList(&'a VarsDeclList),
    Assign(&'a Assign),
    If(&'a If),
    For(&'a For),
    While(&'a While),
    DoWhile(&'a DoWhile),
    StmtList(&'a StmtList),
    FuncVar(&'a FuncVar),
    FuncVarsList(&'a FuncVarsList),
    Func(&'a Func),
    Program(&'a Program),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Literal(_) => NodeKind::Literal,
            NodeRef::Ident(_) => NodeKind::Ident,
            NodeRef::Type(TypeNode::Simple { .. }) => NodeKind::VarType,
            NodeRef::Type(TypeNode::Array { .. }) => NodeKind::ArrayType,
            NodeRef::Type(TypeNode::Delegate(_)) => NodeKind::Delegate,
            NodeRef::TypeList(_) => NodeKind::TypeList,
            NodeRef::Binary(_) => NodeKind::BinaryOp,
            NodeRef::ComplexIdent(_) => NodeKind::ComplexIdent,
            NodeRef::Call(_) => NodeKind::Call,
            NodeRef::ExprList(_) => NodeKind::ExprList,
            NodeRef::Declarator(_) => NodeKind::Declarator,
            NodeRef::VarsDecl(_) => NodeKind::VarsDecl,
            NodeRef::VarsDeclList(_) => NodeKind::VarsDeclList,
            NodeRef::Assign(_) => NodeKind::Assign,
            NodeRef::If(_) => NodeKind::If,
            NodeRef::For(_) => NodeKind::For,
            NodeRef::While(_) => NodeKind::While,
            NodeRef::DoWhile(_) => NodeKind::DoWhile,
            NodeRef::StmtList(_) => NodeKind::StmtList,
            NodeRef::FuncVar(_) => NodeKind::FuncVar,
            NodeRef::FuncVarsList(_) => NodeKind::FuncVarsList,
            NodeRef::Func(_) => NodeKind::Func,
            NodeRef::Program(_) => NodeKind::Program,
        }
    }

    /// Short display label, e.g. `if`, `+`, a literal's text or an identifier's name.
    pub fn label(&self) -> String {
        match self {
            NodeRef::Literal(lit) => lit.text.clone(),
            NodeRef::Ident(ident) => ident.name.clone(),
            NodeRef::Type(TypeNode::Simple { ty, .. }) => ty.to_string(),
            NodeRef::Type(TypeNode::Array { element, .. }) => format!("array {}", element),
            NodeRef::Type(TypeNode::Delegate(_)) => "delegate".to_string(),
            NodeRef::TypeList(_) => "type-list".to_string(),
            NodeRef::Binary(bin) => bin.op.symbol().to_string(),
            NodeRef::ComplexIdent(_) => "array_elem".to_string(),
            NodeRef::Call(_) => "call".to_string(),
            NodeRef::ExprList(_) => "{}".to_string(),
            NodeRef::Declarator(_) | NodeRef::Assign(_) => "=".to_string(),
            NodeRef::VarsDecl(_) => "var".to_string(),
            NodeRef::VarsDeclList(_) => "vars".to_string(),
            NodeRef::If(_) => "if".to_string(),
            NodeRef::For(_) => "for".to_string(),
            NodeRef::While(_) => "while".to_string(),
            NodeRef::DoWhile(_) => "do-while".to_string(),
            NodeRef::StmtList(_) => "...".to_string(),
            NodeRef::FuncVar(_) => "var-sign".to_string(),
            NodeRef::FuncVarsList(_) => "func-vars".to_string(),
            NodeRef::Func(func) => format!("{} {}", func.return_type, func.name.name),
            NodeRef::Program(_) => "program".to_string(),
        }
    }

    /// Ordered children. The count depends on the kind (and, for `if`, on whether
    /// an else branch exists), so check [`NodeRef::kind`] before indexing.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            NodeRef::Literal(_) | NodeRef::Ident(_) => Vec::new(),
            NodeRef::Type(TypeNode::Delegate(delegate)) => vec![
                NodeRef::TypeList(&delegate.params),
                NodeRef::Type(delegate.return_type.as_ref()),
            ],
            NodeRef::Type(_) => Vec::new(),
            NodeRef::TypeList(list) => list.types.iter().map(NodeRef::Type).collect(),
            NodeRef::Binary(bin) => vec![bin.left.as_ref().into(), bin.right.as_ref().into()],
            NodeRef::ComplexIdent(elem) => {
                vec![NodeRef::Ident(&elem.array), elem.index.as_ref().into()]
            }
            NodeRef::Call(call) => std::iter::once(NodeRef::Ident(&call.callee))
                .chain(call.args.iter().map(NodeRef::from))
                .collect(),
            NodeRef::ExprList(list) => list.exprs.iter().map(NodeRef::from).collect(),
            NodeRef::Declarator(declarator) => match declarator {
                Declarator::Name(_) => Vec::new(),
                Declarator::Init { ident, value } => {
                    vec![NodeRef::Ident(ident), value.into()]
                }
                Declarator::Typed { ident, ty, value } => {
                    vec![NodeRef::Ident(ident), NodeRef::Type(ty), value.into()]
                }
                Declarator::ArrayInit { ident, items } => {
                    vec![NodeRef::Ident(ident), NodeRef::ExprList(items)]
                }
            },
            NodeRef::VarsDecl(decl) => std::iter::once(NodeRef::Type(&decl.ty))
                .chain(decl.declarators.iter().map(NodeRef::from))
                .collect(),
            NodeRef::VarsDeclList(list) => list.decls.iter().map(NodeRef::VarsDecl).collect(),
            NodeRef::Assign(assign) => vec![(&assign.target).into(), (&assign.value).into()],
            NodeRef::If(stmt) => {
                let mut children = vec![
                    (&stmt.condition).into(),
                    NodeRef::StmtList(&stmt.then_branch),
                ];
                if let Some(else_branch) = &stmt.else_branch {
                    children.push(NodeRef::StmtList(else_branch));
                }
                children
            }
            NodeRef::For(stmt) => vec![
                NodeRef::from(&*stmt.init),
                NodeRef::from(&stmt.condition),
                stmt.step
                    .as_deref()
                    .map_or(NodeRef::StmtList(&EMPTY_STMT_LIST), NodeRef::from),
                NodeRef::StmtList(&stmt.body),
            ],
            NodeRef::While(stmt) => {
                vec![(&stmt.condition).into(), NodeRef::StmtList(&stmt.body)]
            }
            NodeRef::DoWhile(stmt) => {
                vec![(&stmt.condition).into(), NodeRef::StmtList(&stmt.body)]
            }
            NodeRef::StmtList(list) => list.statements.iter().map(NodeRef::from).collect(),
            NodeRef::FuncVar(var) => vec![NodeRef::Type(&var.ty), NodeRef::Ident(&var.ident)],
            NodeRef::FuncVarsList(list) => list.vars.iter().map(NodeRef::FuncVar).collect(),
            NodeRef::Func(func) => vec![
                NodeRef::Type(&func.return_type),
                NodeRef::FuncVarsList(&func.params),
                NodeRef::StmtList(&func.body),
            ],
            NodeRef::Program(program) => program.items.iter().map(NodeRef::from).collect(),
        }
    }

    /// Child at `index`, if the node has that many children.
    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.children().into_iter().nth(index)
    }

    /// Position of the token that introduced this node; `None` for synthesized
    /// and empty nodes.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            NodeRef::Literal(lit) => Some(lit.location),
            NodeRef::Ident(ident) => Some(ident.location),
            NodeRef::Type(ty) => Some(ty.location()),
            NodeRef::TypeList(list) => list.location,
            NodeRef::Binary(bin) => Some(bin.location),
            NodeRef::ComplexIdent(elem) => Some(elem.location),
            NodeRef::Call(call) => Some(call.location),
            NodeRef::ExprList(list) => Some(list.location),
            NodeRef::Declarator(declarator) => Some(declarator.ident().location),
            NodeRef::VarsDecl(decl) => Some(decl.location),
            NodeRef::VarsDeclList(list) => list.decls.first().map(|decl| decl.location),
            NodeRef::Assign(assign) => Some(assign.location),
            NodeRef::If(stmt) => Some(stmt.location),
            NodeRef::For(stmt) => Some(stmt.location),
            NodeRef::While(stmt) => Some(stmt.location),
            NodeRef::DoWhile(stmt) => Some(stmt.location),
            NodeRef::StmtList(list) => list.location,
            NodeRef::FuncVar(var) => Some(var.ty.location()),
            NodeRef::FuncVarsList(list) => list.vars.first().map(|var| var.ty.location()),
            NodeRef::Func(func) => Some(func.location),
            NodeRef::Program(_) => None,
        }
    }

    /// Calls `f` on this node and then on every descendant, depth first.
    pub fn visit(&self, f: &mut impl FnMut(NodeRef<'a>)) {
        f(*self);
        for child in self.children() {
            child.visit(f);
        }
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Literal(lit) => NodeRef::Literal(lit),
            Expr::Ident(ident) => NodeRef::Ident(ident),
            Expr::ArrayElem(elem) => NodeRef::ComplexIdent(elem),
            Expr::Call(call) => NodeRef::Call(call),
            Expr::Binary(bin) => NodeRef::Binary(bin),
        }
    }
}

impl<'a> From<&'a Stmt> for NodeRef<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::VarsDecl(decl) => NodeRef::VarsDecl(decl),
            Stmt::Assign(assign) => NodeRef::Assign(assign),
            Stmt::Call(call) => NodeRef::Call(call),
            Stmt::If(stmt) => NodeRef::If(stmt),
            Stmt::For(stmt) => NodeRef::For(stmt),
            Stmt::While(stmt) => NodeRef::While(stmt),
            Stmt::DoWhile(stmt) => NodeRef::DoWhile(stmt),
            Stmt::Block(list) => NodeRef::StmtList(list),
        }
    }
}

impl<'a> From<&'a Declarator> for NodeRef<'a> {
    fn from(declarator: &'a Declarator) -> Self {
        match declarator {
            Declarator::Name(ident) => NodeRef::Ident(ident),
            _ => NodeRef::Declarator(declarator),
        }
    }
}

impl<'a> From<&'a AssignTarget> for NodeRef<'a> {
    fn from(target: &'a AssignTarget) -> Self {
        match target {
            AssignTarget::Ident(ident) => NodeRef::Ident(ident),
            AssignTarget::ArrayElem(elem) => NodeRef::ComplexIdent(elem),
        }
    }
}

impl<'a> From<&'a Item> for NodeRef<'a> {
    fn from(item: &'a Item) -> Self {
        match item {
            Item::Func(func) => NodeRef::Func(func),
            Item::Vars(list) => NodeRef::VarsDeclList(list),
        }
    }
}

impl<'a> From<&'a TypeNode> for NodeRef<'a> {
    fn from(ty: &'a TypeNode) -> Self {
        NodeRef::Type(ty)
    }
}

impl<'a> From<&'a StmtList> for NodeRef<'a> {
    fn from(list: &'a StmtList) -> Self {
        NodeRef::StmtList(list)
    }
}

impl<'a> From<&'a Func> for NodeRef<'a> {
    fn from(func: &'a Func) -> Self {
        NodeRef::Func(func)
    }
}

impl<'a> From<&'a Program> for NodeRef<'a> {
    fn from(program: &'a Program) -> Self {
        NodeRef::Program(program)
    }
}

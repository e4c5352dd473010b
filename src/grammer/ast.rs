use super::token::Token;
use crate::semantics::symbols::Symbol;
use crate::semantics::types::Type;

#[derive(Debug, Clone)]
pub enum Stmt {
    // type { "*" | "[" UINT_64_LIT "]" } IDENT [ "=" expr ] ";"
    VarDecl {
        var_type: Type,
        ident: Token,
        init: Option<Expr>,
        /// Filled in by semantic analysis, copied by value from the table.
        symbol: Option<Symbol>,
    },
    // lvalue "=" expr ";"
    VarAssign {
        left: Expr,
        op: Token,
        right: Expr,
    },
    // "{" { stmt } "}"
    Block {
        stmts: Vec<Stmt>,
        /// Bytes of locals declared directly in this block, filled in by
        /// semantic analysis and reclaimed by the block's exit code.
        byte_size: usize,
    },
    // "if" expr stmt [ "else" stmt ]
    If {
        token: Token,
        cond: Expr,
        then_stmt: Box<Stmt>,
        else_stmt: Option<Box<Stmt>>,
    },
    // "assert" expr ";"
    Assert {
        token: Token,
        expr: Expr,
    },
    // expr ";"
    Expr(Expr),
}

#[derive(Debug, Clone)]
pub enum Expr {
    // expr ( "==" | "!=" | "<" | "<=" | ">" | ">=" | "+" | "-" | "*" | "/" ) expr
    Binary {
        ty: Type,
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    // ( "!" | "-" ) expr
    Prefix {
        ty: Type,
        op: Token,
        right: Box<Expr>,
    },
    // expr ( "++" | "--" )
    Postfix {
        ty: Type,
        op: Token,
        left: Box<Expr>,
    },
    // "*" expr
    Deref {
        ty: Type,
        op: Token,
        right: Box<Expr>,
    },
    // "&" expr
    Reference {
        ty: Type,
        op: Token,
        right: Box<Expr>,
    },
    // UINT_64_LIT | "true" | "false"
    Literal {
        ty: Type,
        token: Token,
    },
    // ident
    Ident {
        ty: Type,
        token: Token,
        symbol: Option<Symbol>,
    },
    // "(" expr ")"
    Group {
        ty: Type,
        inner: Box<Expr>,
    },
    // expr "[" expr "]"
    ArrayAccess {
        ty: Type,
        left: Box<Expr>,
        index: Box<Expr>,
        bracket: Token,
    },
}

impl Expr {
    pub fn ty(&self) -> &Type {
        match self {
            Expr::Binary { ty, .. }
            | Expr::Prefix { ty, .. }
            | Expr::Postfix { ty, .. }
            | Expr::Deref { ty, .. }
            | Expr::Reference { ty, .. }
            | Expr::Literal { ty, .. }
            | Expr::Ident { ty, .. }
            | Expr::Group { ty, .. }
            | Expr::ArrayAccess { ty, .. } => ty,
        }
    }

    /// Whether the expression denotes a storage location, i.e. may stand on
    /// the left of `=` and under `&`.
    pub fn is_addressable(&self) -> bool {
        match self {
            Expr::Ident { .. } => true,
            Expr::Deref { .. } => true,
            Expr::Reference { .. } => true,
            Expr::ArrayAccess { .. } => true,
            Expr::Group { inner, .. } => inner.is_addressable(),
            Expr::Binary { .. }
            | Expr::Prefix { .. }
            | Expr::Postfix { .. }
            | Expr::Literal { .. } => false,
        }
    }
}

// ----------------------------------------------------------------------------
// Pretty printing (plog / slog traces)
// ----------------------------------------------------------------------------

fn indent_str(n: usize) -> String {
    "  ".repeat(n)
}

impl Stmt {
    pub fn pretty(&self, indent: usize) -> String {
        let pad = indent_str(indent);
        let inner = indent_str(indent + 1);
        match self {
            Stmt::VarDecl {
                var_type,
                ident,
                init,
                ..
            } => {
                let mut out = format!("{pad}VarDeclStmt\n{pad}{{\n");
                out.push_str(&format!("{inner}VarType: {}\n", var_type.type_id()));
                out.push_str(&format!("{inner}Ident: {}\n", ident.lexeme));
                if let Some(init) = init {
                    out.push_str(&init.pretty(indent + 1));
                    out.push('\n');
                }
                out.push_str(&format!("{pad}}}"));
                out
            }
            Stmt::VarAssign { left, right, .. } => {
                format!(
                    "{pad}VarAssignStmt\n{pad}{{\n{}\n{}\n{pad}}}",
                    left.pretty(indent + 1),
                    right.pretty(indent + 1)
                )
            }
            Stmt::Block { stmts, byte_size } => {
                let mut out = format!("{pad}BlockStmt\n{pad}{{\n");
                out.push_str(&format!("{inner}ByteSize: {byte_size}\n"));
                for stmt in stmts {
                    out.push_str(&stmt.pretty(indent + 1));
                    out.push('\n');
                }
                out.push_str(&format!("{pad}}}"));
                out
            }
            Stmt::If {
                cond,
                then_stmt,
                else_stmt,
                ..
            } => {
                let mut out = format!("{pad}IfStmt\n{pad}{{\n");
                out.push_str(&cond.pretty(indent + 1));
                out.push('\n');
                out.push_str(&then_stmt.pretty(indent + 1));
                out.push('\n');
                if let Some(else_stmt) = else_stmt {
                    out.push_str(&else_stmt.pretty(indent + 1));
                    out.push('\n');
                }
                out.push_str(&format!("{pad}}}"));
                out
            }
            Stmt::Assert { expr, .. } => {
                format!(
                    "{pad}AssertStmt\n{pad}{{\n{}\n{pad}}}",
                    expr.pretty(indent + 1)
                )
            }
            Stmt::Expr(expr) => {
                format!(
                    "{pad}ExpressionStmt\n{pad}{{\n{}\n{pad}}}",
                    expr.pretty(indent + 1)
                )
            }
        }
    }
}

impl Expr {
    pub fn pretty(&self, indent: usize) -> String {
        let pad = indent_str(indent);
        let inner_pad = indent_str(indent + 1);
        match self {
            Expr::Binary {
                ty,
                left,
                op,
                right,
            } => {
                format!(
                    "{pad}BinaryExpression\n{pad}{{\n{inner_pad}Type: {}\n{}\n{inner_pad}Op: {}\n{}\n{pad}}}",
                    ty.type_id(),
                    left.pretty(indent + 1),
                    op.kind,
                    right.pretty(indent + 1)
                )
            }
            Expr::Prefix { ty, op, right } => {
                format!(
                    "{pad}PrefixExpression\n{pad}{{\n{inner_pad}Type: {}\n{inner_pad}Op: {}\n{}\n{pad}}}",
                    ty.type_id(),
                    op.kind,
                    right.pretty(indent + 1)
                )
            }
            Expr::Postfix { ty, op, left } => {
                format!(
                    "{pad}PostfixExpression\n{pad}{{\n{inner_pad}Type: {}\n{inner_pad}Op: {}\n{}\n{pad}}}",
                    ty.type_id(),
                    op.kind,
                    left.pretty(indent + 1)
                )
            }
            Expr::Deref { ty, right, .. } => {
                format!(
                    "{pad}DerefExpression\n{pad}{{\n{inner_pad}Type: {}\n{}\n{pad}}}",
                    ty.type_id(),
                    right.pretty(indent + 1)
                )
            }
            Expr::Reference { ty, right, .. } => {
                format!(
                    "{pad}ReferenceExpression\n{pad}{{\n{inner_pad}Type: {}\n{}\n{pad}}}",
                    ty.type_id(),
                    right.pretty(indent + 1)
                )
            }
            Expr::Literal { ty, token } => {
                format!(
                    "{pad}LiteralExpression\n{pad}{{\n{inner_pad}Type: {}\n{inner_pad}Value: {}\n{pad}}}",
                    ty.type_id(),
                    token.lexeme
                )
            }
            Expr::Ident { ty, token, .. } => {
                format!(
                    "{pad}IdentExpression\n{pad}{{\n{inner_pad}Type: {}\n{inner_pad}Value: {}\n{pad}}}",
                    ty.type_id(),
                    token.lexeme
                )
            }
            Expr::Group { ty, inner } => {
                format!(
                    "{pad}GroupExpression\n{pad}{{\n{inner_pad}Type: {}\n{}\n{pad}}}",
                    ty.type_id(),
                    inner.pretty(indent + 1)
                )
            }
            Expr::ArrayAccess {
                ty, left, index, ..
            } => {
                format!(
                    "{pad}ArrayAccessExpression\n{pad}{{\n{inner_pad}Type: {}\n{}\n{}\n{pad}}}",
                    ty.type_id(),
                    left.pretty(indent + 1),
                    index.pretty(indent + 1)
                )
            }
        }
    }
}

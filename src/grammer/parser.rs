use super::ast::{Expr, Stmt};
use super::parsercore::Parser;
use super::token::{Token, TokenKind};
use crate::error::ParseError;
use crate::semantics::types::Type;

impl Parser {
    /// Parse the whole token stream into top-level statements, recovering at
    /// statement boundaries. The parse succeeded only if the returned error
    /// list is empty.
    pub fn parse(mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut stmts = Vec::new();
        while !self.at_end() {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.error(err);
                    self.synchronize();
                }
            }
        }
        (stmts, self.take_errors())
    }

    /// statement = var-decl | var-assign | block | if | while | for | assert | expr-stmt
    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek().kind {
            TokenKind::Uint64
            | TokenKind::Uint32
            | TokenKind::Uint16
            | TokenKind::Uint8
            | TokenKind::Bool => self.parse_var_decl(),
            TokenKind::Star | TokenKind::Ident | TokenKind::OpenParen => self.parse_var_assign(),
            TokenKind::OpenCurly => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Assert => self.parse_assert(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// var-decl = type { "*" | "[" UINT_64_LIT "]" } IDENT [ "=" expr ] ";"
    fn parse_var_decl(&mut self) -> Result<Stmt, ParseError> {
        let type_token = self.consume();
        let mut var_type = keyword_type(&type_token);

        // Decorators stack onto the element type left to right, so the
        // outermost wrapper is the last one consumed.
        loop {
            if self.check(TokenKind::Star) {
                self.consume();
                var_type = Type::Ptr(Box::new(var_type));
            } else if self.check(TokenKind::OpenBracket) {
                self.consume();

                if !self.check(TokenKind::Uint64Lit) {
                    return Err(ParseError::new(
                        self.peek().clone(),
                        format!(
                            "Expected size specifier for array declaration but received '{}'",
                            self.peek().lexeme
                        ),
                    ));
                }
                let size_token = self.consume();
                let length: usize = size_token.lexeme.parse().map_err(|_| {
                    ParseError::new(
                        size_token.clone(),
                        format!("Invalid array length '{}'", size_token.lexeme),
                    )
                })?;

                self.expect(TokenKind::CloseBracket, "']' after array declaration")?;
                var_type = Type::Array(Box::new(var_type), length);
            } else {
                break;
            }
        }

        let ident = self.expect(TokenKind::Ident, "an identifier after the type")?;

        let init = if self.check(TokenKind::Assign) {
            self.consume();
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenKind::Semi, "';' after variable declaration")?;

        Ok(Stmt::VarDecl {
            var_type,
            ident,
            init,
            symbol: None,
        })
    }

    /// var-assign = lvalue "=" expr ";"
    ///
    /// Whether the left side really is addressable is the semantic pass's
    /// concern, not the parser's.
    fn parse_var_assign(&mut self) -> Result<Stmt, ParseError> {
        let left = self.parse_expression()?;
        let op = self.expect(TokenKind::Assign, "'=' for assignment")?;
        let right = self.parse_expression()?;
        self.expect(TokenKind::Semi, "';' at the end of statement")?;

        Ok(Stmt::VarAssign { left, op, right })
    }

    /// block = "{" { statement } "}"
    fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        self.consume(); // '{'

        let mut stmts = Vec::new();
        while !self.at_end() && !self.check(TokenKind::CloseCurly) {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.error(err);
                    self.synchronize();
                }
            }
        }

        self.expect(TokenKind::CloseCurly, "'}' at the end of block")?;

        Ok(Stmt::Block {
            stmts,
            byte_size: 0,
        })
    }

    /// if = "if" expr statement [ "else" statement ]
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let token = self.consume();
        let cond = self.parse_expression()?;
        let then_stmt = Box::new(self.parse_statement()?);

        let else_stmt = if self.check(TokenKind::Else) {
            self.consume();
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            token,
            cond,
            then_stmt,
            else_stmt,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let token = self.consume();
        Err(ParseError::new(token, "'while' statements are not supported"))
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let token = self.consume();
        Err(ParseError::new(token, "'for' statements are not supported"))
    }

    /// assert = "assert" expr ";"
    fn parse_assert(&mut self) -> Result<Stmt, ParseError> {
        let token = self.consume();
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semi, "';' after assert")?;

        Ok(Stmt::Assert { token, expr })
    }

    /// expr-stmt = expr ";"
    fn parse_expr_stmt(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semi, "';' at the end of statement")?;

        Ok(Stmt::Expr(expr))
    }

    // ------------------------------------------------------------------------
    // Expressions, precedence climbing from lowest to highest
    // ------------------------------------------------------------------------

    /// expression = equality
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_equality()
    }

    /// equality = comparison { ( "==" | "!=" ) comparison }
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;

        while self.check_any(&[TokenKind::Eq, TokenKind::Neq]) {
            let op = self.consume();
            let right = self.parse_comparison()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// comparison = term { ( "<" | "<=" | ">" | ">=" ) term }
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        while self.check_any(&[
            TokenKind::LessThan,
            TokenKind::LessEqThan,
            TokenKind::GreaterThan,
            TokenKind::GreaterEqThan,
        ]) {
            let op = self.consume();
            let right = self.parse_term()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// term = factor { ( "+" | "-" ) factor }
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;

        while self.check_any(&[TokenKind::Plus, TokenKind::Minus]) {
            let op = self.consume();
            let right = self.parse_factor()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// factor = prefix { ( "*" | "/" ) prefix }
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_prefix()?;

        while self.check_any(&[TokenKind::Star, TokenKind::FSlash]) {
            let op = self.consume();
            let right = self.parse_prefix()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// prefix = ( "!" | "-" | "*" | "&" ) prefix | postfix
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            TokenKind::Star => {
                let op = self.consume();
                let right = Box::new(self.parse_prefix()?);
                Ok(Expr::Deref {
                    ty: Type::Undefined,
                    op,
                    right,
                })
            }
            TokenKind::Ampersand => {
                let op = self.consume();
                let right = Box::new(self.parse_prefix()?);
                Ok(Expr::Reference {
                    ty: Type::Undefined,
                    op,
                    right,
                })
            }
            TokenKind::Not | TokenKind::Minus => {
                let op = self.consume();
                let right = Box::new(self.parse_prefix()?);
                Ok(Expr::Prefix {
                    ty: Type::Undefined,
                    op,
                    right,
                })
            }
            _ => self.parse_postfix(),
        }
    }

    /// postfix = primary { "[" expr "]" | "++" | "--" }
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;

        loop {
            if self.check(TokenKind::OpenBracket) {
                let bracket = self.consume();
                let index = Box::new(self.parse_expression()?);
                self.expect(TokenKind::CloseBracket, "']' after array access")?;
                left = Expr::ArrayAccess {
                    ty: Type::Undefined,
                    left: Box::new(left),
                    index,
                    bracket,
                };
            } else if self.check_any(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
                let op = self.consume();
                left = Expr::Postfix {
                    ty: Type::Undefined,
                    op,
                    left: Box::new(left),
                };
            } else {
                break;
            }
        }

        Ok(left)
    }

    /// primary = UINT_64_LIT | "true" | "false" | ident | "(" expr ")"
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            TokenKind::Uint64Lit | TokenKind::TrueLit | TokenKind::FalseLit => {
                let token = self.consume();
                Ok(Expr::Literal {
                    ty: literal_type(&token),
                    token,
                })
            }
            TokenKind::Ident => {
                let token = self.consume();
                Ok(Expr::Ident {
                    ty: Type::Undefined,
                    token,
                    symbol: None,
                })
            }
            TokenKind::OpenParen => {
                self.consume();
                let inner = Box::new(self.parse_expression()?);
                self.expect(TokenKind::CloseParen, "')' after group expression")?;
                Ok(Expr::Group {
                    ty: Type::Undefined,
                    inner,
                })
            }
            _ => Err(ParseError::new(self.peek().clone(), "Invalid expression")),
        }
    }
}

fn binary(left: Expr, op: Token, right: Expr) -> Expr {
    Expr::Binary {
        ty: Type::Undefined,
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

fn keyword_type(token: &Token) -> Type {
    match token.kind {
        TokenKind::Uint64 => Type::U64,
        TokenKind::Uint32 => Type::U32,
        TokenKind::Uint16 => Type::U16,
        TokenKind::Uint8 => Type::U8,
        TokenKind::Bool => Type::Bool,
        _ => Type::Undefined,
    }
}

fn literal_type(token: &Token) -> Type {
    match token.kind {
        TokenKind::Uint64Lit => Type::UintLiteral,
        TokenKind::TrueLit | TokenKind::FalseLit => Type::Bool,
        _ => Type::Undefined,
    }
}

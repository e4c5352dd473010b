use super::symbols::SymbolTable;
use super::types::Type;
use crate::error::SemanticError;
use crate::grammer::ast::{Expr, Stmt};
use crate::grammer::token::Token;
use std::fmt;

/// Validates typing and scoping and decorates the AST in place: every
/// expression's placeholder `Undefined` type is replaced with a concrete one,
/// identifier and declaration nodes receive their symbol records, and blocks
/// receive the byte size their exit code must reclaim.
///
/// Every error is pushed onto `errors` and also returned, so callers can
/// short-circuit the enclosing statement while the driver keeps the full
/// list. Blocks deliberately keep going past failed inner statements.
pub struct SemanticChecker {
    pub errors: Vec<SemanticError>,
    table: SymbolTable,
}

impl Default for SemanticChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticChecker {
    pub fn new() -> Self {
        let mut table = SymbolTable::new();
        table.push_scope(); // global scope
        SemanticChecker {
            errors: Vec::new(),
            table,
        }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    fn fail(&mut self, token: &Token, msg: String) -> SemanticError {
        let err = SemanticError::new(token.clone(), msg);
        self.errors.push(err.clone());
        err
    }

    fn record(&mut self, err: SemanticError) -> SemanticError {
        self.errors.push(err.clone());
        err
    }

    pub fn check_stmt(&mut self, stmt: &mut Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::VarDecl {
                var_type,
                ident,
                init,
                symbol,
            } => {
                if let Some(init) = init {
                    self.check_expr(init)?;
                    let init_ty = init.ty();
                    let compatible = var_type.equals(init_ty)
                        || (var_type.is_number() && init_ty.is_number());
                    if !compatible {
                        let msg = format!(
                            "Declared type {} and initialized value type {} do not match",
                            var_type.type_id(),
                            init_ty.type_id()
                        );
                        return Err(self.fail(ident, msg));
                    }
                }

                match self.table.declare(var_type.clone(), ident) {
                    Ok(sym) => {
                        *symbol = Some(sym);
                        Ok(())
                    }
                    Err(err) => Err(self.record(err)),
                }
            }

            Stmt::VarAssign { left, op, right } => {
                self.check_expr(left)?;
                self.check_expr(right)?;

                if !left.is_addressable() {
                    return Err(
                        self.fail(op, "Left side of assignment is not addressable".to_string())
                    );
                }

                match left.ty().binary_op("=", right.ty()) {
                    Some(_) => Ok(()),
                    None => {
                        let msg = format!(
                            "Cannot assign type {} to address with type {}",
                            right.ty().type_id(),
                            left.ty().type_id()
                        );
                        Err(self.fail(op, msg))
                    }
                }
            }

            Stmt::Block { stmts, byte_size } => {
                self.table.push_scope();
                for stmt in stmts.iter_mut() {
                    // Inner errors are already recorded; the block carries on.
                    let _ = self.check_stmt(stmt);
                }
                *byte_size = self.table.pop_scope();
                Ok(())
            }

            Stmt::If {
                token,
                cond,
                then_stmt,
                else_stmt,
            } => {
                self.check_expr(cond)?;
                if !matches!(cond.ty(), Type::Bool) {
                    return Err(
                        self.fail(token, "If statement condition must be of type BOOL".to_string())
                    );
                }
                self.check_stmt(then_stmt)?;
                if let Some(else_stmt) = else_stmt {
                    self.check_stmt(else_stmt)?;
                }
                Ok(())
            }

            Stmt::Assert { token, expr } => {
                self.check_expr(expr)?;
                if !matches!(expr.ty(), Type::Bool) {
                    return Err(
                        self.fail(token, "Assert expression must be of type BOOL".to_string())
                    );
                }
                Ok(())
            }

            Stmt::Expr(expr) => self.check_expr(expr),
        }
    }

    fn check_expr(&mut self, expr: &mut Expr) -> Result<(), SemanticError> {
        match expr {
            // The parser already stamped literal types from the token kind.
            Expr::Literal { .. } => Ok(()),

            Expr::Ident { ty, token, symbol } => match self.table.resolve(token) {
                Ok(sym) => {
                    *ty = sym.ty.clone();
                    *symbol = Some(sym);
                    Ok(())
                }
                Err(err) => Err(self.record(err)),
            },

            Expr::Group { ty, inner } => {
                self.check_expr(inner)?;
                *ty = inner.ty().clone();
                Ok(())
            }

            Expr::Binary {
                ty,
                left,
                op,
                right,
            } => {
                self.check_expr(left)?;
                self.check_expr(right)?;

                match left.ty().binary_op(&op.lexeme, right.ty()) {
                    Some(result) => {
                        *ty = result;
                        Ok(())
                    }
                    None => {
                        let msg = format!(
                            "Cannot use operator between types {} and {}",
                            left.ty().type_id(),
                            right.ty().type_id()
                        );
                        Err(self.fail(op, msg))
                    }
                }
            }

            Expr::Prefix { ty, op, right } => {
                self.check_expr(right)?;
                match right.ty().unary_op(&op.lexeme) {
                    Some(result) => {
                        *ty = result;
                        Ok(())
                    }
                    None => {
                        let msg = format!(
                            "Cannot use operator '{}' on type {}",
                            op.lexeme,
                            right.ty().type_id()
                        );
                        Err(self.fail(op, msg))
                    }
                }
            }

            Expr::Postfix { op, .. } => {
                let msg = format!("Postfix operator '{}' is not supported", op.lexeme);
                Err(self.fail(op, msg))
            }

            Expr::Deref { ty, op, right } => {
                self.check_expr(right)?;
                match right.ty().unary_op("*") {
                    Some(inner) => {
                        *ty = inner;
                        Ok(())
                    }
                    None => {
                        let msg = format!("Cannot dereference type {}", right.ty().type_id());
                        Err(self.fail(op, msg))
                    }
                }
            }

            Expr::Reference { ty, op, right } => {
                self.check_expr(right)?;
                if !right.is_addressable() {
                    return Err(self.fail(
                        op,
                        "Cannot take the address of an expression without an address".to_string(),
                    ));
                }
                match right.ty().unary_op("&") {
                    Some(ptr) => {
                        *ty = ptr;
                        Ok(())
                    }
                    None => {
                        let msg =
                            format!("Cannot take the address of type {}", right.ty().type_id());
                        Err(self.fail(op, msg))
                    }
                }
            }

            Expr::ArrayAccess {
                ty,
                left,
                index,
                bracket,
            } => {
                self.check_expr(left)?;
                self.check_expr(index)?;

                if !index.ty().is_number() {
                    let msg = format!(
                        "Array index must be a number type, found {}",
                        index.ty().type_id()
                    );
                    return Err(self.fail(bracket, msg));
                }

                let element = match left.ty() {
                    Type::Array(base, _) => Some((**base).clone()),
                    Type::Ptr(inner) => Some((**inner).clone()),
                    _ => None,
                };
                match element {
                    Some(element) => {
                        *ty = element;
                        Ok(())
                    }
                    None => {
                        let msg = format!("Cannot index type {}", left.ty().type_id());
                        Err(self.fail(bracket, msg))
                    }
                }
            }
        }
    }
}

impl fmt::Display for SemanticChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)
    }
}

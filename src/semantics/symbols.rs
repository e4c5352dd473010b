use super::types::Type;
use crate::error::SemanticError;
use crate::grammer::token::Token;
use std::fmt;

/// A declared variable. Records are copied by value into the AST nodes that
/// reference them; the table keeps its own copy.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub ident: String,
    pub ty: Type,
    /// Positive byte displacement below rbp; the variable lives at
    /// `[rbp - offset]`.
    pub offset: usize,
    pub size: usize,
    /// Declaration site, kept for diagnostics.
    pub token: Token,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ident: {}, type: {}, stack_offset: {}, size: {}",
            self.ident,
            self.ty.type_id(),
            self.offset,
            self.size
        )
    }
}

/// Lexically scoped symbol store. Symbols live on one stack; a second stack
/// of indices marks where each open scope begins. Both grow and shrink in
/// LIFO lockstep with block traversal.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<usize>,
    next_offset: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(self.symbols.len());
    }

    /// Close the innermost scope, dropping its symbols and returning the
    /// total bytes they occupied. The offset cursor shrinks by the same
    /// amount: the emitted `add rsp` gives that stack space back, so a
    /// sibling scope reuses it.
    pub fn pop_scope(&mut self) -> usize {
        let start = self.scopes.pop().unwrap_or(0);
        let freed: usize = self.symbols.drain(start..).map(|s| s.size).sum();
        self.next_offset -= freed;
        freed
    }

    pub fn declare(&mut self, ty: Type, token: &Token) -> Result<Symbol, SemanticError> {
        if self.current_scope_has(&token.lexeme) {
            return Err(SemanticError::new(
                token.clone(),
                format!("Redeclaration of symbol '{}'", token.lexeme),
            ));
        }

        let size = ty.size();
        let symbol = Symbol {
            ident: token.lexeme.clone(),
            ty,
            offset: self.next_offset + size,
            size,
            token: token.clone(),
        };
        self.next_offset += size;
        self.symbols.push(symbol.clone());

        Ok(symbol)
    }

    /// Innermost declaration wins: the stack is searched top to bottom.
    pub fn resolve(&self, ident: &Token) -> Result<Symbol, SemanticError> {
        for symbol in self.symbols.iter().rev() {
            if symbol.ident == ident.lexeme {
                return Ok(symbol.clone());
            }
        }

        Err(SemanticError::new(
            ident.clone(),
            format!("Undeclared symbol '{}'", ident.lexeme),
        ))
    }

    fn current_scope_has(&self, ident: &str) -> bool {
        let start = self.scopes.last().copied().unwrap_or(0);
        self.symbols[start..].iter().any(|s| s.ident == ident)
    }

    pub fn depth(&self) -> usize {
        self.symbols.len()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn next_offset(&self) -> usize {
        self.next_offset
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SymbolTable:")?;
        for symbol in &self.symbols {
            writeln!(f, "[ {} ]", symbol)?;
        }
        writeln!(f, "ScopeIndexTable:")?;
        for idx in &self.scopes {
            writeln!(f, "[ {} ]", idx)?;
        }
        write!(f, "next_offset: {}", self.next_offset)
    }
}

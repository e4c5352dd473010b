use crate::grammer::token::Token;
use thiserror::Error;

// Main error type for the compiler
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Lexical errors
#[derive(Debug, Error, Clone)]
#[error("Unrecognized token '{ch}' at line {line} at col {col}")]
pub struct LexError {
    pub ch: char,
    pub line: usize,
    pub col: usize,
}

// Parser errors carry the offending token so diagnostics can point at it.
#[derive(Debug, Error, Clone)]
#[error("Error at line {} at column {} at token {}\n\t{}", .token.line, .token.col, .token.kind, .msg)]
pub struct ParseError {
    pub token: Token,
    pub msg: String,
}

impl ParseError {
    pub fn new(token: Token, msg: impl Into<String>) -> Self {
        ParseError {
            token,
            msg: msg.into(),
        }
    }
}

// Semantic errors
#[derive(Debug, Error, Clone)]
#[error("Semantic error at line {} at col {}\n\t{}", .token.line, .token.col, .msg)]
pub struct SemanticError {
    pub token: Token,
    pub msg: String,
}

impl SemanticError {
    pub fn new(token: Token, msg: impl Into<String>) -> Self {
        SemanticError {
            token,
            msg: msg.into(),
        }
    }
}

// External toolchain errors (nasm / ld)
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        source: std::io::Error,
    },

    #[error("{tool} exited with status {status}")]
    Failed {
        tool: &'static str,
        status: std::process::ExitStatus,
    },
}

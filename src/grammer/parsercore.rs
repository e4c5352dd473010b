use super::token::{Token, TokenKind};
use crate::error::ParseError;

/// Token cursor shared by the grammar methods in `parser.rs`. The stream is
/// expected to end with an `EOF` token (the lexer guarantees this); the
/// cursor never advances past it.
pub struct Parser {
    tokens: Vec<Token>,
    idx: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(
            matches!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof)),
            "token stream must end with EOF"
        );
        Parser {
            tokens,
            idx: 0,
            errors: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, e: ParseError) {
        self.errors.push(e);
    }

    pub(crate) fn take_errors(self) -> Vec<ParseError> {
        self.errors
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.idx]
    }

    /// Consume the current token and return it. At EOF the cursor stays put
    /// and EOF is returned again.
    pub(crate) fn consume(&mut self) -> Token {
        let token = self.tokens[self.idx].clone();
        if self.idx + 1 < self.tokens.len() {
            self.idx += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|&kind| self.peek().kind == kind)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token if it has the expected kind, otherwise
    /// report what was found instead. `what` names the expected construct,
    /// e.g. `"';' after variable declaration"`.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.consume());
        }
        Err(ParseError::new(
            self.peek().clone(),
            format!("Expected {} but received '{}'", what, self.peek().lexeme),
        ))
    }

    /// Statement-level recovery: discard tokens until a statement terminator,
    /// a scope terminator, or EOF, then consume that sentinel. EOF itself is
    /// never consumed.
    pub(crate) fn synchronize(&mut self) {
        while !self.check_any(&[TokenKind::Semi, TokenKind::CloseCurly, TokenKind::Eof]) {
            self.consume();
        }
        if !self.at_end() {
            self.consume();
        }
    }
}

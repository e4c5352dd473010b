use super::token::{Token, TokenKind};
use crate::error::LexError;
use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Lex the whole source. Unrecognized characters are collected and
    /// skipped so a single run reports every lexical error at once. The
    /// token stream always ends with an `EOF` token.
    pub fn lex(self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        let mut last_line = 0;
        for (idx, line) in self.source.lines().enumerate() {
            last_line = idx + 1;
            LineLexer::new(line, last_line).lex(&mut tokens, &mut errors);
        }
        tokens.push(Token::new(TokenKind::Eof, String::new(), last_line.max(1), 0));
        (tokens, errors)
    }
}

struct LineLexer<'a> {
    iter: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> LineLexer<'a> {
    fn new(line: &'a str, line_no: usize) -> Self {
        Self {
            iter: line.chars().peekable(),
            line: line_no,
            col: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.iter.peek().copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.iter.clone().nth(1)
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.iter.next();
        if ch.is_some() {
            self.col += 1;
        }
        ch
    }
}

// ----------------------------------------------------------------------------
// Lexing
// ----------------------------------------------------------------------------

impl<'a> LineLexer<'a> {
    fn lex(mut self, tokens: &mut Vec<Token>, errors: &mut Vec<LexError>) {
        while let Some(ch0) = self.peek() {
            // 0. Skip whitespaces
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            let col = self.col;

            // 1. Double character token
            if let Some(ch1) = self.peek_next() {
                if let Some(kind) = double_char_token(ch0, ch1) {
                    self.consume();
                    self.consume();
                    tokens.push(Token::new(kind, format!("{ch0}{ch1}"), self.line, col));
                    continue;
                }
            }

            // 2. Single character token
            if let Some(kind) = single_char_token(ch0) {
                self.consume();
                tokens.push(Token::new(kind, ch0.to_string(), self.line, col));
                continue;
            }

            // 3. Number literal
            if ch0.is_ascii_digit() {
                let mut lexeme = String::new();
                while let Some(ch) = self.peek() {
                    if !ch.is_ascii_digit() {
                        break;
                    }
                    lexeme.push(ch);
                    self.consume();
                }
                tokens.push(Token::new(TokenKind::Uint64Lit, lexeme, self.line, col));
                continue;
            }

            // 4. Identifier or keyword
            if ch0.is_ascii_alphabetic() || ch0 == '_' {
                let mut lexeme = String::new();
                while let Some(ch) = self.peek() {
                    if !(ch.is_ascii_alphanumeric() || ch == '_') {
                        break;
                    }
                    lexeme.push(ch);
                    self.consume();
                }
                let kind = keyword(&lexeme).unwrap_or(TokenKind::Ident);
                tokens.push(Token::new(kind, lexeme, self.line, col));
                continue;
            }

            // Error
            self.consume();
            errors.push(LexError {
                ch: ch0,
                line: self.line,
                col,
            });
        }
    }
}

fn double_char_token(ch0: char, ch1: char) -> Option<TokenKind> {
    match (ch0, ch1) {
        ('=', '=') => Some(TokenKind::Eq),
        ('!', '=') => Some(TokenKind::Neq),
        ('<', '=') => Some(TokenKind::LessEqThan),
        ('>', '=') => Some(TokenKind::GreaterEqThan),
        ('+', '+') => Some(TokenKind::PlusPlus),
        ('-', '-') => Some(TokenKind::MinusMinus),
        _ => None,
    }
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        ';' => Some(TokenKind::Semi),
        '(' => Some(TokenKind::OpenParen),
        ')' => Some(TokenKind::CloseParen),
        '{' => Some(TokenKind::OpenCurly),
        '}' => Some(TokenKind::CloseCurly),
        '[' => Some(TokenKind::OpenBracket),
        ']' => Some(TokenKind::CloseBracket),
        '=' => Some(TokenKind::Assign),
        '<' => Some(TokenKind::LessThan),
        '>' => Some(TokenKind::GreaterThan),
        '!' => Some(TokenKind::Not),
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::FSlash),
        '&' => Some(TokenKind::Ampersand),
        _ => None,
    }
}

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "while" => Some(TokenKind::While),
        "for" => Some(TokenKind::For),
        "uint64" => Some(TokenKind::Uint64),
        "uint32" => Some(TokenKind::Uint32),
        "uint16" => Some(TokenKind::Uint16),
        "uint8" => Some(TokenKind::Uint8),
        "bool" => Some(TokenKind::Bool),
        "true" => Some(TokenKind::TrueLit),
        "false" => Some(TokenKind::FalseLit),
        "assert" => Some(TokenKind::Assert),
        _ => None,
    }
}

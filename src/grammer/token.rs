use std::fmt;

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based source line.
    pub line: usize,
    /// 1-based source column.
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, line: usize, col: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            col,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} Line: {} Col: {}",
            self.kind, self.lexeme, self.line, self.col
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Structural
    Eof,
    Semi, // ';'

    // Keywords
    If,     // "if"
    Else,   // "else"
    While,  // "while"
    For,    // "for"
    Uint64, // "uint64"
    Uint32, // "uint32"
    Uint16, // "uint16"
    Uint8,  // "uint8"
    Bool,   // "bool"
    Assert, // "assert"

    // Literals and identifiers
    Uint64Lit, // decimal integer run
    TrueLit,   // "true"
    FalseLit,  // "false"
    Ident,

    // Punctuation
    OpenParen,    // '('
    CloseParen,   // ')'
    OpenCurly,    // '{'
    CloseCurly,   // '}'
    OpenBracket,  // '['
    CloseBracket, // ']'

    // Operators
    Eq,            // '=='
    Neq,           // '!='
    LessThan,      // '<'
    LessEqThan,    // '<='
    GreaterThan,   // '>'
    GreaterEqThan, // '>='
    Not,           // '!'
    Plus,          // '+'
    PlusPlus,      // '++'
    Minus,         // '-'
    MinusMinus,    // '--'
    Star,          // '*'
    FSlash,        // '/'
    Assign,        // '='
    Ampersand,     // '&'
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Eof => "EOF",
            TokenKind::Semi => "SEMI",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Uint64 => "UINT_64",
            TokenKind::Uint32 => "UINT_32",
            TokenKind::Uint16 => "UINT_16",
            TokenKind::Uint8 => "UINT_8",
            TokenKind::Bool => "BOOL",
            TokenKind::Assert => "ASSERT",
            TokenKind::Uint64Lit => "UINT_64_LIT",
            TokenKind::TrueLit => "TRUE_LIT",
            TokenKind::FalseLit => "FALSE_LIT",
            TokenKind::Ident => "IDENT",
            TokenKind::OpenParen => "OPEN_PAREN",
            TokenKind::CloseParen => "CLOSE_PAREN",
            TokenKind::OpenCurly => "OPEN_CURLY",
            TokenKind::CloseCurly => "CLOSE_CURLY",
            TokenKind::OpenBracket => "OPEN_BRACKET",
            TokenKind::CloseBracket => "CLOSE_BRACKET",
            TokenKind::Eq => "EQ",
            TokenKind::Neq => "NEQ",
            TokenKind::LessThan => "LESS_THAN",
            TokenKind::LessEqThan => "LESS_EQ_THAN",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::GreaterEqThan => "GREATER_EQ_THAN",
            TokenKind::Not => "NOT",
            TokenKind::Plus => "PLUS",
            TokenKind::PlusPlus => "PLUS_PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::MinusMinus => "MINUS_MINUS",
            TokenKind::Star => "STAR",
            TokenKind::FSlash => "F_SLASH",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Ampersand => "AMPERSAND",
        })
    }
}

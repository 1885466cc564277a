use std::{fmt, rc::Rc};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub data: TokenType,
    pub line: usize,
}

impl Token {
    pub fn new(data: TokenType, line: usize) -> Self {
        Token { data, line }
    }

    pub fn kind(&self) -> TokenKind {
        self.data.kind()
    }
}

/// Coarse classification used by the token inspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,
    Operator,
    Keyword,
    Punctuation,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "NUMBER",
            Self::Identifier => "IDENTIFIER",
            Self::Operator => "OPERATOR",
            Self::Keyword => "KEYWORD",
            Self::Punctuation => "PUNCTUATION",
            Self::Eof => "EOF",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Semicolon,

    Minus,
    Plus,
    Star,
    StarStar,
    Slash,
    Percent,

    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    Identifier(Rc<str>),
    Number(f64),

    Else,
    If,
    Print,
    While,

    Eof,
}

impl TokenType {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::LeftParen | Self::RightParen | Self::LeftBrace | Self::RightBrace | Self::Semicolon => {
                TokenKind::Punctuation
            }
            Self::Minus
            | Self::Plus
            | Self::Star
            | Self::StarStar
            | Self::Slash
            | Self::Percent
            | Self::BangEqual
            | Self::Equal
            | Self::EqualEqual
            | Self::Greater
            | Self::GreaterEqual
            | Self::Less
            | Self::LessEqual => TokenKind::Operator,
            Self::Identifier(_) => TokenKind::Identifier,
            Self::Number(_) => TokenKind::Number,
            Self::Else | Self::If | Self::Print | Self::While => TokenKind::Keyword,
            Self::Eof => TokenKind::Eof,
        }
    }

    pub fn keyword(word: &str) -> Option<TokenType> {
        match word {
            "else" => Some(Self::Else),
            "if" => Some(Self::If),
            "print" => Some(Self::Print),
            "while" => Some(Self::While),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Identifier(id) => return write!(f, "{id}"),
            Self::Number(x) => return write!(f, "{x}"),
            Self::Eof => "end of input",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Semicolon => ";",
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Star => "*",
            Self::StarStar => "**",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::BangEqual => "!=",
            Self::Equal => "=",
            Self::EqualEqual => "==",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Else => "else",
            Self::If => "if",
            Self::Print => "print",
            Self::While => "while",
        };
        write!(f, "{text}")
    }
}

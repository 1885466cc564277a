use super::token::*;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErr {
    #[error("[line {line}] Unexpected character '{ch}'.")]
    UnexpectedChar { ch: char, line: usize },
}

impl LexErr {
    pub fn line(&self) -> usize {
        match self {
            Self::UnexpectedChar { line, .. } => *line,
        }
    }
}

struct Scanner<'a> {
    str: &'a [char],
    index: usize,
}

impl<'a> Scanner<'a> {
    fn advance(&mut self) -> Option<char> {
        let c = self.str.get(self.index).copied();
        if c.is_some() {
            self.index += 1;
        }
        c
    }

    // "match" is a keyword in the metalanguage already.
    fn match_next(&mut self, c: char) -> bool {
        let res = self.str.get(self.index).is_some_and(|d| c == *d);
        if res {
            self.index += 1;
        }
        res
    }

    fn peek(&self) -> Option<char> {
        self.str.get(self.index).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.str.get(self.index + 1).copied()
    }

    fn new(str: &'a [char]) -> Self {
        Self { index: 0, str }
    }

    fn index(&self) -> usize {
        self.index
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.index += 1;
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Turns source text into tokens, ending with a single [`TokenType::Eof`].
/// Fails on the first character that cannot start a token.
pub fn scan(code: &str) -> Result<Vec<Token>, LexErr> {
    let chars = code.chars().collect::<Vec<_>>();
    let mut scanner = Scanner::new(&chars);
    let mut result = vec![];
    let mut line: usize = 1;

    while let Some(c) = scanner.advance() {
        let tok = match c {
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,
            ';' => TokenType::Semicolon,
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '%' => TokenType::Percent,
            '*' => {
                if scanner.match_next('*') {
                    TokenType::StarStar
                } else {
                    TokenType::Star
                }
            }
            '/' => {
                if scanner.match_next('/') {
                    scanner.advance_while(|c| c != '\n');
                    continue;
                }
                TokenType::Slash
            }
            '>' => {
                if scanner.match_next('=') {
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                }
            }
            '=' => {
                if scanner.match_next('=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                }
            }
            '<' => {
                if scanner.match_next('=') {
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                }
            }
            '!' if scanner.match_next('=') => TokenType::BangEqual,
            '\n' => {
                line += 1;
                continue;
            }
            '\r' | '\t' | ' ' => continue,
            '0'..='9' => {
                let start = scanner.index() - 1;
                scanner.advance_while(|c| c.is_ascii_digit());

                // A fraction needs at least one digit after the point.
                if scanner.peek() == Some('.') && scanner.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                    scanner.advance();
                    scanner.advance_while(|c| c.is_ascii_digit());
                }

                let digits = chars[start..scanner.index()].iter().collect::<String>();
                // Digits with at most one point always parse.
                TokenType::Number(digits.parse().unwrap_or(f64::NAN))
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = scanner.index() - 1;
                scanner.advance_while(is_ident_char);

                let string = chars[start..scanner.index()].iter().collect::<String>();
                TokenType::keyword(&string).unwrap_or_else(|| TokenType::Identifier(string.into()))
            }
            c => return Err(LexErr::UnexpectedChar { ch: c, line }),
        };

        result.push(Token::new(tok, line));
    }

    result.push(Token::new(TokenType::Eof, line));
    debug!(tokens = result.len(), lines = line, "scanned source");
    Ok(result)
}

//! Lexer for script source code.
//!
//! Converts source text into a flat token sequence. Tokenization is driven
//! by an ordered table of anchored regular expressions: at each cursor
//! position the first matching pattern wins, so longer operators are listed
//! before their prefixes (`===` before `==` before `=`).

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;

use crate::error::Error;

/// Token kinds recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfFile,
    Keyword,
    Identifier,
    Number,
    String,

    // Arithmetic
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Exponentiation,

    // Update
    Increment,
    Decrement,

    // Assignment
    Equals,
    AdditionAssignment,
    SubtractionAssignment,
    MultiplicationAssignment,
    DivisionAssignment,

    // Comparison
    EqualTo,
    EqualToStrict,
    NotEqualTo,
    NotEqualToStrict,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,

    // Logical / bitwise
    And,
    Or,
    Not,
    Ampersand,
    Pipe,

    // Punctuation
    Semicolon,
    Colon,
    Comma,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Dot,
    QuestionMark,
    Arrow,
}

impl TokenKind {
    /// Stable name used in JSON dumps and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EndOfFile => "EndOfFile",
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Asterisk => "Asterisk",
            TokenKind::Slash => "Slash",
            TokenKind::Percent => "Percent",
            TokenKind::Exponentiation => "Exponentiation",
            TokenKind::Increment => "Increment",
            TokenKind::Decrement => "Decrement",
            TokenKind::Equals => "Equals",
            TokenKind::AdditionAssignment => "AdditionAssignment",
            TokenKind::SubtractionAssignment => "SubtractionAssignment",
            TokenKind::MultiplicationAssignment => "MultiplicationAssignment",
            TokenKind::DivisionAssignment => "DivisionAssignment",
            TokenKind::EqualTo => "EqualTo",
            TokenKind::EqualToStrict => "EqualToStrict",
            TokenKind::NotEqualTo => "NotEqualTo",
            TokenKind::NotEqualToStrict => "NotEqualToStrict",
            TokenKind::LessThan => "LessThan",
            TokenKind::LessThanOrEqualTo => "LessThanOrEqualTo",
            TokenKind::GreaterThan => "GreaterThan",
            TokenKind::GreaterThanOrEqualTo => "GreaterThanOrEqualTo",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            TokenKind::Ampersand => "Ampersand",
            TokenKind::Pipe => "Pipe",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Colon => "Colon",
            TokenKind::Comma => "Comma",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::LeftBracket => "LeftBracket",
            TokenKind::RightBracket => "RightBracket",
            TokenKind::Dot => "Dot",
            TokenKind::QuestionMark => "QuestionMark",
            TokenKind::Arrow => "Arrow",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A lexeme tagged with its kind and source position.
///
/// Lines are 1-based, columns 0-based. String tokens store their content
/// without the surrounding quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
            column,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "type": self.kind.name(),
            "value": &self.value,
            "line": self.line,
            "column": self.column,
        })
    }
}

const KEYWORDS: &str = "break|case|catch|class|const|continue|debugger|default|delete|do|else|\
                        export|extends|false|finally|for|function|if|import|in|instanceof|let|\
                        new|null|return|super|switch|this|throw|true|try|typeof|var|void|while|\
                        with|yield";

lazy_static! {
    /// Ordered pattern table; the first pattern matching at the cursor wins.
    /// Longer operators must precede their prefixes.
    static ref PATTERNS: Vec<(Regex, TokenKind)> = {
        let keyword_pattern = format!(r"^(?:{KEYWORDS})\b");
        let table: &[(&str, TokenKind)] = &[
            (keyword_pattern.as_str(), TokenKind::Keyword),
            (r"^[_$A-Za-z][_$A-Za-z0-9]*", TokenKind::Identifier),
            (r#"^"[^"]*""#, TokenKind::String),
            (r"^'[^']*'", TokenKind::String),
            (r"^0[xX][0-9a-fA-F]+", TokenKind::Number),
            (r"^\d[.\d]*", TokenKind::Number),
            (r"^=>", TokenKind::Arrow),
            (r"^===", TokenKind::EqualToStrict),
            (r"^==", TokenKind::EqualTo),
            (r"^=", TokenKind::Equals),
            (r"^>=", TokenKind::GreaterThanOrEqualTo),
            (r"^>", TokenKind::GreaterThan),
            (r"^<=", TokenKind::LessThanOrEqualTo),
            (r"^<", TokenKind::LessThan),
            (r"^&&", TokenKind::And),
            (r"^&", TokenKind::Ampersand),
            (r"^\|\|", TokenKind::Or),
            (r"^\|", TokenKind::Pipe),
            (r"^!==", TokenKind::NotEqualToStrict),
            (r"^!=", TokenKind::NotEqualTo),
            (r"^!", TokenKind::Not),
            (r"^\+=", TokenKind::AdditionAssignment),
            (r"^\+\+", TokenKind::Increment),
            (r"^\+", TokenKind::Plus),
            (r"^-=", TokenKind::SubtractionAssignment),
            (r"^--", TokenKind::Decrement),
            (r"^-", TokenKind::Minus),
            (r"^;", TokenKind::Semicolon),
            (r"^:", TokenKind::Colon),
            (r"^,", TokenKind::Comma),
            (r"^\*=", TokenKind::MultiplicationAssignment),
            (r"^\*\*", TokenKind::Exponentiation),
            (r"^\*", TokenKind::Asterisk),
            (r"^/=", TokenKind::DivisionAssignment),
            (r"^/", TokenKind::Slash),
            (r"^%", TokenKind::Percent),
            (r"^\(", TokenKind::LeftParen),
            (r"^\)", TokenKind::RightParen),
            (r"^\{", TokenKind::LeftBrace),
            (r"^\}", TokenKind::RightBrace),
            (r"^\[", TokenKind::LeftBracket),
            (r"^\]", TokenKind::RightBracket),
            (r"^\.", TokenKind::Dot),
            (r"^\?", TokenKind::QuestionMark),
        ];

        table
            .iter()
            .map(|(pattern, kind)| {
                // Patterns are static and known-good; a failure here is a
                // programming error caught by the unit tests below.
                (Regex::new(pattern).unwrap(), *kind)
            })
            .collect()
    };
}

/// Tokenizer with line/column tracking.
pub struct Lexer<'a> {
    source: &'a str,
    index: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            index: 0,
            line: 1,
            column: 0,
        }
    }

    /// Tokenize the whole source, appending the `EndOfFile` sentinel.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token()?;
            let done = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            self.skip_whitespace();

            if self.index >= self.source.len() {
                return Ok(Token::new(TokenKind::EndOfFile, "", self.line, self.column));
            }

            let rest = self.rest_of_line();
            if rest.starts_with("//") {
                self.index += rest.len();
                self.column += rest.len() as u32;
                continue;
            }

            for (pattern, kind) in PATTERNS.iter() {
                if let Some(m) = pattern.find(rest) {
                    let length = m.as_str().len();
                    let mut text = m.as_str();
                    if *kind == TokenKind::String {
                        text = &text[1..text.len() - 1];
                    }

                    let token = Token::new(*kind, text, self.line, self.column);
                    self.index += length;
                    self.column += length as u32;
                    return Ok(token);
                }
            }

            return Err(Error::lex(self.line, self.column, rest));
        }
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.source.as_bytes();
        while self.index < bytes.len() {
            match bytes[self.index] {
                b' ' | b'\t' | b'\r' => {
                    self.index += 1;
                    self.column += 1;
                }
                b'\n' => {
                    self.index += 1;
                    self.line += 1;
                    self.column = 0;
                }
                _ => break,
            }
        }
    }

    fn rest_of_line(&self) -> &'a str {
        let rest = &self.source[self.index..];
        match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        }
    }
}

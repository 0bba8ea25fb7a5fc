// File: src/lexer.rs
//
// Lexical analyzer (tokenizer) for definition expressions.
// Converts definition text into a stream of tokens for parsing.
//
// Supports:
// - Identifiers and 64-bit integer literals
// - Boolean literals: true, false
// - String literals with \n \t \\ \" escape sequences
// - Operators: +, -, *, /, !, ==, !=, <, >, <=, >=, &&, ||
// - Punctuation: ( ) [ ] ,
//
// Unlike a scripting-language lexer there is no recovery: any character
// outside the grammar is a hard error, because a definition is a single
// short expression and silent skipping would hide typos.

use crate::errors::DefGraphError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Int(i64),
    String(String),
    Bool(bool),
    Operator(String),
    Punctuation(char),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier `{}`", name),
            TokenKind::Int(value) => write!(f, "integer `{}`", value),
            TokenKind::String(_) => write!(f, "string literal"),
            TokenKind::Bool(value) => write!(f, "`{}`", value),
            TokenKind::Operator(op) => write!(f, "`{}`", op),
            TokenKind::Punctuation(c) => write!(f, "`{}`", c),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Tokenizes a definition into a vector of tokens ending with `Eof`.
///
/// Processes the input character by character. Each token records the
/// line and column where it starts, counted from 1, so parser errors can
/// point back into the definition text.
pub fn tokenize(source: &str) -> Result<Vec<Token>, DefGraphError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;
    let mut col = 1;

    while let Some(&c) = chars.peek() {
        let start_line = line;
        let start_col = col;
        match c {
            ' ' | '\t' | '\r' => {
                chars.next();
                col += 1;
            }
            '\n' => {
                chars.next();
                line += 1;
                col = 1;
            }
            '"' => {
                chars.next(); // skip opening quote
                col += 1;
                let mut s = String::new();
                let mut closed = false;
                while let Some(&ch) = chars.peek() {
                    chars.next();
                    col += 1;
                    if ch == '"' {
                        closed = true;
                        break;
                    }
                    if ch == '\n' {
                        line += 1;
                        col = 1;
                        s.push(ch);
                        continue;
                    }
                    if ch == '\\' {
                        if let Some(&esc) = chars.peek() {
                            chars.next();
                            col += 1;
                            match esc {
                                'n' => s.push('\n'),
                                't' => s.push('\t'),
                                '\\' => s.push('\\'),
                                '"' => s.push('"'),
                                _ => s.push(esc),
                            }
                        }
                    } else {
                        s.push(ch);
                    }
                }
                if !closed {
                    return Err(DefGraphError::parse(format!(
                        "unterminated string literal starting at line {}, column {}",
                        start_line, start_col
                    )));
                }
                tokens.push(Token {
                    kind: TokenKind::String(s),
                    line: start_line,
                    column: start_col,
                });
            }
            '0'..='9' => {
                let mut num = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_digit() {
                        num.push(ch);
                        chars.next();
                        col += 1;
                    } else {
                        break;
                    }
                }
                let parsed = num.parse::<i64>().map_err(|_| {
                    DefGraphError::parse(format!(
                        "integer literal `{}` at line {}, column {} is out of range",
                        num, start_line, start_col
                    ))
                })?;
                tokens.push(Token {
                    kind: TokenKind::Int(parsed),
                    line: start_line,
                    column: start_col,
                });
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        ident.push(ch);
                        chars.next();
                        col += 1;
                    } else {
                        break;
                    }
                }

                let kind = match ident.as_str() {
                    "true" => TokenKind::Bool(true),
                    "false" => TokenKind::Bool(false),
                    _ => TokenKind::Identifier(ident),
                };

                tokens.push(Token {
                    kind,
                    line: start_line,
                    column: start_col,
                });
            }
            '+' | '-' | '*' | '/' => {
                chars.next();
                col += 1;
                tokens.push(Token {
                    kind: TokenKind::Operator(c.to_string()),
                    line: start_line,
                    column: start_col,
                });
            }
            '<' | '>' | '!' => {
                chars.next();
                col += 1;
                // Check for <= >= !=
                let op = if chars.peek() == Some(&'=') {
                    chars.next();
                    col += 1;
                    format!("{}=", c)
                } else {
                    c.to_string()
                };
                tokens.push(Token {
                    kind: TokenKind::Operator(op),
                    line: start_line,
                    column: start_col,
                });
            }
            '=' | '&' | '|' => {
                // Only the doubled forms ==, &&, || exist
                chars.next();
                col += 1;
                if chars.peek() == Some(&c) {
                    chars.next();
                    col += 1;
                    tokens.push(Token {
                        kind: TokenKind::Operator(format!("{}{}", c, c)),
                        line: start_line,
                        column: start_col,
                    });
                } else {
                    return Err(DefGraphError::parse(format!(
                        "unexpected character `{}` at line {}, column {}",
                        c, start_line, start_col
                    )));
                }
            }
            '(' | ')' | '[' | ']' | ',' => {
                tokens.push(Token {
                    kind: TokenKind::Punctuation(c),
                    line: start_line,
                    column: start_col,
                });
                chars.next();
                col += 1;
            }
            _ => {
                return Err(DefGraphError::parse(format!(
                    "unexpected character `{}` at line {}, column {}",
                    c, start_line, start_col
                )));
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        line,
        column: col,
    });

    Ok(tokens)
}

// File: src/parser.rs
//
// Recursive descent parser for definition expressions.
// Transforms a sequence of tokens into an abstract syntax tree.
//
// The parser implements a traditional precedence cascade, lowest binding
// first:
//
//   ||  <  &&  <  == !=  <  < > <= >=  <  + -  <  * /  <  prefix ! -  <  call
//
// Parentheses group, `[...]` builds arrays, and `name(...)` is a call.
// The callee of a call must be a plain identifier; arbitrary expressions
// in call position are rejected.
//
// The parser uses a single-token lookahead and advances through the token
// stream as it builds the AST. A definition is exactly one expression:
// leftover tokens after it are an error, as is an empty input.

use crate::ast::Expr;
use crate::errors::DefGraphError;
use crate::lexer::{tokenize, Token, TokenKind};

/// Parses a whole definition into its expression tree.
///
/// This is the entry point used by the CLI, the REPL, and the web
/// wrapper. Tokenizes `source`, parses a single expression, and rejects
/// both empty input and trailing tokens.
pub fn parse_definition(source: &str) -> Result<Expr, DefGraphError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    if matches!(parser.peek(), TokenKind::Eof) {
        return Err(DefGraphError::parse("empty definition"));
    }
    let expr = parser.parse_expr()?;
    match parser.peek() {
        TokenKind::Eof => Ok(expr),
        other => Err(parser.error_at(format!("unexpected {} after expression", other))),
    }
}

/// Parser maintains position in the token stream and provides one method
/// per precedence level.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from a vector of tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it
    fn peek(&self) -> &TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    /// Consume and return the current token kind, then advance to the next
    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        self.pos += 1;
        kind
    }

    /// Line/column of the current token, for error messages
    fn position(&self) -> (usize, usize) {
        let index = self.pos.min(self.tokens.len().saturating_sub(1));
        self.tokens
            .get(index)
            .map(|t| (t.line, t.column))
            .unwrap_or((0, 0))
    }

    fn error_at(&self, message: impl Into<String>) -> DefGraphError {
        let (line, column) = self.position();
        DefGraphError::parse(format!(
            "{} at line {}, column {}",
            message.into(),
            line,
            column
        ))
    }

    fn expect_punctuation(&mut self, expected: char) -> Result<(), DefGraphError> {
        if matches!(self.peek(), TokenKind::Punctuation(c) if *c == expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_at(format!("expected `{}` but found {}", expected, self.peek())))
        }
    }

    /// Parse one expression at the lowest precedence level
    pub fn parse_expr(&mut self) -> Result<Expr, DefGraphError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, DefGraphError> {
        let mut left = self.parse_and()?;

        while matches!(self.peek(), TokenKind::Operator(op) if op == "||") {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Infix {
                op: "||".into(),
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, DefGraphError> {
        let mut left = self.parse_equality()?;

        while matches!(self.peek(), TokenKind::Operator(op) if op == "&&") {
            self.advance();
            let right = self.parse_equality()?;
            left = Expr::Infix {
                op: "&&".into(),
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, DefGraphError> {
        let mut left = self.parse_comparison()?;

        while matches!(self.peek(), TokenKind::Operator(op) if matches!(op.as_str(), "==" | "!="))
        {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => break,
            };
            let right = self.parse_comparison()?;
            left = Expr::Infix {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, DefGraphError> {
        let mut left = self.parse_additive()?;

        while matches!(self.peek(), TokenKind::Operator(op) if matches!(op.as_str(), "<" | ">" | "<=" | ">="))
        {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => break,
            };
            let right = self.parse_additive()?;
            left = Expr::Infix {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, DefGraphError> {
        let mut left = self.parse_multiplicative()?;

        while matches!(self.peek(), TokenKind::Operator(op) if matches!(op.as_str(), "+" | "-")) {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => break,
            };
            let right = self.parse_multiplicative()?;
            left = Expr::Infix {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, DefGraphError> {
        let mut left = self.parse_prefix()?;

        while matches!(self.peek(), TokenKind::Operator(op) if matches!(op.as_str(), "*" | "/")) {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => break,
            };
            let right = self.parse_prefix()?;
            left = Expr::Infix {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expr, DefGraphError> {
        if let TokenKind::Operator(op) = self.peek() {
            if op == "!" || op == "-" {
                let op = op.clone();
                self.advance();
                let right = self.parse_prefix()?;
                return Ok(Expr::Prefix {
                    op,
                    right: Box::new(right),
                });
            }
        }
        self.parse_call()
    }

    fn parse_call(&mut self) -> Result<Expr, DefGraphError> {
        let expr = self.parse_primary()?;

        // Only a bare identifier can be called, so there is no chaining
        // loop here: the result of a call is never callable again.
        if let Expr::Identifier(name) = &expr {
            if matches!(self.peek(), TokenKind::Punctuation('(')) {
                let function = name.clone();
                self.advance(); // (
                let args = self.parse_call_args()?;
                return Ok(Expr::Call { function, args });
            }
        }

        Ok(expr)
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expr>, DefGraphError> {
        let mut args = Vec::new();

        while !matches!(self.peek(), TokenKind::Punctuation(')')) {
            if matches!(self.peek(), TokenKind::Eof) {
                return Err(self.error_at("expected `)` to close argument list"));
            }
            args.push(self.parse_expr()?);
            if matches!(self.peek(), TokenKind::Punctuation(',')) {
                self.advance();
            } else {
                break;
            }
        }

        self.expect_punctuation(')')?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, DefGraphError> {
        match self.peek() {
            TokenKind::Punctuation('(') => {
                self.advance(); // (
                let expr = self.parse_expr()?;
                self.expect_punctuation(')')?;
                Ok(expr)
            }
            TokenKind::Punctuation('[') => self.parse_array_literal(),
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expr::Identifier(name))
            }
            TokenKind::Int(value) => {
                let value = *value;
                self.advance();
                Ok(Expr::Int(value))
            }
            TokenKind::String(s) => {
                let s = s.clone();
                self.advance();
                Ok(Expr::String(s))
            }
            TokenKind::Bool(b) => {
                let b = *b;
                self.advance();
                Ok(Expr::Bool(b))
            }
            other => Err(self.error_at(format!("unexpected {}", other))),
        }
    }

    fn parse_array_literal(&mut self) -> Result<Expr, DefGraphError> {
        self.advance(); // consume [
        let mut elements = Vec::new();

        while !matches!(self.peek(), TokenKind::Punctuation(']')) {
            if matches!(self.peek(), TokenKind::Eof) {
                return Err(self.error_at("expected `]` to close array"));
            }
            elements.push(self.parse_expr()?);
            if matches!(self.peek(), TokenKind::Punctuation(',')) {
                self.advance();
            } else {
                break;
            }
        }

        self.expect_punctuation(']')?;
        Ok(Expr::Array(elements))
    }
}

//! Parser for the body of a bracket term, e.g. `[variant=birch|oak, snowy=false]`
//!
//! The body is split at commas into clauses. Every clause is either
//! `name=value|value` or `value|value`, the latter using the default property.
//! Whitespace is allowed at both ends of a clause and around the `=`. Empty
//! values in a `|` list are dropped.

use bop_common::{Ident, Span};
use bop_error::{QueryError, QueryErrorKind, QueryResult};
use logos::{Lexer, Logos};
use smol_str::SmolStr;

use crate::BlockPosQuery;

#[derive(Debug, Eq, PartialEq, Clone, Copy, logos::Logos)]
enum TokenKind {
    #[regex(r"[a-zA-Z_0-9]+")]
    Word,

    #[token("=")]
    Assign,

    #[token("|")]
    Pipe,

    #[regex("[ \t\r\n]+")]
    Whitespace,

    EndOfInput,

    Error,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    span: Span,
}

struct PropertyParser<'a> {
    source: &'a str,
    tokens: Lexer<'a, TokenKind>,
    offset: usize,
    current: Token,
    /// The clause without surrounding whitespace, used for error reporting
    clause: Span,
}

impl<'a> PropertyParser<'a> {
    fn new(source: &'a str, clause: Span) -> Self {
        let tokens = TokenKind::lexer(clause.text(source));
        let mut parser = PropertyParser {
            source,
            tokens,
            offset: clause.start(),
            current: Token {
                kind: TokenKind::Error,
                span: Span::EMPTY,
            },
            clause: trimmed(source, clause),
        };
        parser.bump();
        parser
    }

    fn bump(&mut self) -> Token {
        let previous = self.current;
        let kind = match self.tokens.next() {
            Some(Ok(kind)) => kind,
            Some(Err(())) => TokenKind::Error,
            None => TokenKind::EndOfInput,
        };
        let span = self.offset + Span::from(self.tokens.span());
        self.current = Token { kind, span };
        previous
    }

    fn skip_whitespace(&mut self) {
        if self.current.kind == TokenKind::Whitespace {
            self.bump();
        }
    }

    fn error(&self) -> QueryError {
        QueryError::new(QueryErrorKind::MalformedProperty, self.clause, self.source)
    }

    /// Collects `value|value|...`, empty values are dropped
    fn values(&mut self, values: &mut Vec<&'a str>) {
        loop {
            match self.current.kind {
                TokenKind::Pipe => {
                    self.bump();
                }
                TokenKind::Word => values.push(self.bump().span.text(self.source)),
                _ => break,
            }
        }
    }

    fn parse_clause(&mut self, default_property: &str) -> QueryResult<BlockPosQuery> {
        self.skip_whitespace();
        let mut name = default_property;
        let mut values = Vec::new();
        if self.current.kind == TokenKind::Word {
            let first = self.bump().span.text(self.source);
            if self.current.kind == TokenKind::Pipe {
                values.push(first);
                self.values(&mut values);
            } else {
                self.skip_whitespace();
                if self.current.kind == TokenKind::Assign {
                    self.bump();
                    self.skip_whitespace();
                    name = first;
                    self.values(&mut values);
                } else {
                    values.push(first);
                }
            }
        } else {
            self.values(&mut values);
        }

        self.skip_whitespace();
        if values.is_empty() || self.current.kind != TokenKind::EndOfInput {
            return Err(self.error());
        }
        Ok(BlockPosQuery::Property {
            name: Ident::new(name),
            values: values
                .into_iter()
                .map(|value| SmolStr::from(value.to_lowercase()))
                .collect(),
        })
    }
}

fn trimmed(source: &str, span: Span) -> Span {
    let text = span.text(source);
    let leading = text.len() - text.trim_start().len();
    let inner = text.trim();
    Span::new(span.start() + leading, inner.len())
}

/// Parses the bracket term at `span` into one property query per clause.
/// A negated bracket negates every clause on its own.
pub fn parse_properties(
    source: &str,
    span: Span,
    negated: bool,
    default_property: &str,
) -> QueryResult<Vec<BlockPosQuery>> {
    // Strip the brackets
    let body = Span::new(span.start() + 1, span.len().saturating_sub(2));

    let mut clauses = Vec::new();
    let mut start = body.start();
    for clause in body.text(source).split(',') {
        clauses.push(Span::new(start, clause.len()));
        start += clause.len() + 1;
    }
    // Trailing empty clauses are ignored, but a bracket needs at least one clause
    while clauses.len() > 1
        && clauses
            .last()
            .is_some_and(|clause| clause.text(source).trim().is_empty())
    {
        clauses.pop();
    }

    clauses
        .into_iter()
        .map(|clause| {
            let query = PropertyParser::new(source, clause).parse_clause(default_property)?;
            Ok(if negated { query.negate() } else { query })
        })
        .collect()
}

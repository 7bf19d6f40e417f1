//! Parser for block query strings
//!
//! ```text
//! query    := sub_spec (',' sub_spec)*
//! sub_spec := term*
//! term     := '!'? (block | '%'class | '$'class | '~'material | '@'predefined | '[' clauses ']')
//! ```
//!
//! Terms of a sub specification are AND-ed, the sub specifications are OR-ed.
//! An empty sub specification matches anything, trailing ones are ignored.
//! Whitespace is only allowed around commas and at both ends of the input.

use bop_common::{Config, Span, DEFAULT_PROPERTY_NAME};
use bop_error::{QueryError, QueryErrorKind, QueryResult, ReferenceKind};
use bop_world::{BlockRegistry, Material};
use log::debug;
use logos::{Lexer, Logos};

use crate::{
    property_parser::parse_properties,
    token::{Token, TokenKind},
    trace::trace_token,
    BlockPosQuery, CompoundQuery, PredefinedQueries,
};

/// Everything names in a query are resolved against
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    pub registry: &'a BlockRegistry,
    pub predefined: &'a PredefinedQueries,
    /// Property used by bracket clauses without an explicit name
    pub default_property: &'a str,
}

impl<'a> ParseContext<'a> {
    pub fn new(registry: &'a BlockRegistry, predefined: &'a PredefinedQueries) -> Self {
        ParseContext {
            registry,
            predefined,
            default_property: DEFAULT_PROPERTY_NAME,
        }
    }

    /// Takes the default property from `config`
    pub fn with_config(mut self, config: &'a Config) -> Self {
        self.default_property = &config.default_property;
        self
    }
}

/// Compiles `input` into a query
pub fn parse(input: &str, context: &ParseContext) -> QueryResult<BlockPosQuery> {
    let mut parser = Parser::new(input, *context);
    let query = parse_root(&mut parser)?;
    debug!("Parsed block query '{input}'");
    Ok(query)
}

pub struct Parser<'a, 'ctx> {
    pub input: &'a str,
    tokens: Lexer<'a, TokenKind>,
    current: Token,
    context: ParseContext<'ctx>,
}

impl<'a, 'ctx> Parser<'a, 'ctx> {
    pub fn new(input: &'a str, context: ParseContext<'ctx>) -> Self {
        let tokens = TokenKind::lexer(input);
        let current = Token {
            kind: TokenKind::Error,
            span: Span::EMPTY,
        };
        let mut parser = Parser {
            input,
            tokens,
            current,
            context,
        };
        parser.skip();
        parser
    }

    /// Consumes the current token
    fn bump(&mut self) -> Token {
        let token = self.current;
        trace_token!("Consumed {token}");
        self.skip();
        token
    }

    fn skip(&mut self) {
        let kind = match self.tokens.next() {
            Some(Ok(kind)) => kind,
            Some(Err(())) => TokenKind::Error,
            None => TokenKind::EndOfInput,
        };
        let span = Span::from(self.tokens.span());
        self.current = Token { span, kind };
    }

    fn consume_whitespace(&mut self) {
        while self.current.kind == TokenKind::Whitespace {
            self.bump();
        }
    }

    /// Creates an error for the current token
    fn unexpected(&self, expected: &[&str]) -> QueryError {
        QueryError::new(
            QueryErrorKind::Syntax {
                expected: expected.iter().map(ToString::to_string).collect(),
            },
            self.current.span,
            self.input,
        )
    }

    fn unknown(&self, kind: ReferenceKind, token: Token) -> QueryError {
        QueryError::new(
            QueryErrorKind::UnknownReference {
                kind,
                name: name_of(self.input, token).to_string(),
            },
            token.span,
            self.input,
        )
    }
}

/// The text of `token` without its sigil
fn name_of(input: &str, token: Token) -> &str {
    let span = token.span;
    let sigil = token.kind.sigil_len().min(span.len());
    Span::new(span.start() + sigil, span.len() - sigil).text(input)
}

const TERM: &str = "query term";

pub fn parse_root(parser: &mut Parser) -> QueryResult<BlockPosQuery> {
    let mut any = CompoundQuery::or();
    // Empty sub specifications match anything unless nothing else follows them
    let mut empty = None;
    parser.consume_whitespace();
    loop {
        let is_empty = !parser.current.kind.is_term();
        let query = parse_sub_spec(parser)?;
        if is_empty {
            empty = Some(query);
        } else {
            if let Some(empty) = empty.take() {
                any.add(empty);
            }
            any.add(query);
        }

        parser.consume_whitespace();
        match parser.current.kind {
            TokenKind::Comma => {
                parser.bump();
                parser.consume_whitespace();
            }
            TokenKind::EndOfInput => break,
            _ if is_empty => return Err(parser.unexpected(&[TERM, "','", "end of input"])),
            _ => return Err(parser.unexpected(&["','", "end of input"])),
        }
    }
    Ok(any.instance())
}

/// Parses the terms up to the next comma
pub fn parse_sub_spec(parser: &mut Parser) -> QueryResult<BlockPosQuery> {
    let mut all = CompoundQuery::and();
    while parser.current.kind.is_term() {
        parse_term(parser, &mut all)?;
    }
    Ok(all.instance())
}

/// Parses one term, which can add several queries for bracket terms
pub fn parse_term(parser: &mut Parser, all: &mut CompoundQuery) -> QueryResult<()> {
    let negated = parser.current.kind == TokenKind::Bang;
    if negated {
        parser.bump();
    }

    let token = parser.current;
    let context = parser.context;
    let name = name_of(parser.input, token);

    let query = match token.kind {
        TokenKind::BlockName => {
            let block = context
                .registry
                .get(name)
                .ok_or_else(|| parser.unknown(ReferenceKind::Block, token))?;
            BlockPosQuery::blocks([block])
        }
        TokenKind::ClassInclusive | TokenKind::ClassExact => {
            let class = context
                .registry
                .classes()
                .resolve(name)
                .ok_or_else(|| parser.unknown(ReferenceKind::Class, token))?;
            BlockPosQuery::Class {
                class,
                strict: token.kind == TokenKind::ClassExact,
            }
        }
        TokenKind::Material => {
            let material = Material::from_name(name)
                .ok_or_else(|| parser.unknown(ReferenceKind::Material, token))?;
            BlockPosQuery::materials([material])
        }
        TokenKind::Predefined => context
            .predefined
            .reference(name)
            .ok_or_else(|| parser.unknown(ReferenceKind::Predefined, token))?,
        TokenKind::Properties => {
            let clauses = parse_properties(
                parser.input,
                token.span,
                negated,
                context.default_property,
            )?;
            for clause in clauses {
                all.add(clause);
            }
            parser.bump();
            return Ok(());
        }
        _ => return Err(parser.unexpected(&[TERM])),
    };

    parser.bump();
    all.add(if negated { query.negate() } else { query });
    Ok(())
}

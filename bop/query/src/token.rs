use core::fmt;

use bop_common::Span;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let start = self.span.start();
        let end = self.span.end();
        write!(f, "{}@{start}..{end}", self.kind)
    }
}

#[derive(logos::Logos, Debug, Eq, PartialEq, Clone, Copy)]
pub enum TokenKind {
    #[token("!")]
    Bang,

    #[token(",")]
    Comma,

    /// `%BlockLeaves`
    #[regex(r"%[a-zA-Z_0-9]+")]
    ClassInclusive,

    /// `$BlockLeaves`
    #[regex(r"\$[a-zA-Z_0-9]+")]
    ClassExact,

    /// `~water`
    #[regex(r"~[a-zA-Z_0-9]+")]
    Material,

    /// `@airAbove`
    #[regex(r"@[a-zA-Z_0-9]+")]
    Predefined,

    /// `[variant=birch|oak, snowy=false]`, the body is parsed separately
    #[regex(r"\[[^\]]*\]")]
    Properties,

    /// `sand` or `biomesoplenty:grass`
    #[regex(r"[a-zA-Z_0-9:]+")]
    BlockName,

    #[regex("[ \t\r\n]+")]
    Whitespace,

    EndOfInput,

    Error,
}

impl TokenKind {
    /// Whether this token starts a query term
    pub fn is_term(self) -> bool {
        matches!(
            self,
            TokenKind::Bang
                | TokenKind::ClassInclusive
                | TokenKind::ClassExact
                | TokenKind::Material
                | TokenKind::Predefined
                | TokenKind::Properties
                | TokenKind::BlockName
        )
    }

    /// Length of the sigil in front of the name
    pub fn sigil_len(self) -> usize {
        match self {
            TokenKind::ClassInclusive
            | TokenKind::ClassExact
            | TokenKind::Material
            | TokenKind::Predefined => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for TokenKind {
    #[allow(clippy::use_debug)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

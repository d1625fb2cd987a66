//! Token kinds for the two populations the pipeline produces: the scanner's
//! [RawTokenKind] (every lexical rule, including the transient partial-string
//! and RST delimiter forms) and the compressor's [TokenKind] (only the kinds
//! that may reach the parser). The narrowing from one to the other happens in
//! [crate::compress]; there is no path for a transient raw token to become a
//! [Token] other than being consumed by a recorder.

use std::fmt::{self, Display, Formatter};

/// Lexical kind emitted directly by the scanner (§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawTokenKind {
    LeftParen,
    RightParen,
    Newline,
    Whitespace,
    Word,
    Number,
    Deref,
    QuotedLiteral,
    UnquotedLiteral,
    BeginDoubleQuoted,
    EndDoubleQuoted,
    BeginSingleQuoted,
    EndSingleQuoted,
    Comment,
    BeginRSTComment,
    BeginInlineRST,
    EndInlineRST,
}

impl RawTokenKind {
    /// Whether this raw kind is a begin/end partial-string or RST delimiter —
    /// a recorder must consume it; it can never survive compression on its own.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            RawTokenKind::BeginDoubleQuoted
                | RawTokenKind::EndDoubleQuoted
                | RawTokenKind::BeginSingleQuoted
                | RawTokenKind::EndSingleQuoted
                | RawTokenKind::BeginRSTComment
                | RawTokenKind::BeginInlineRST
                | RawTokenKind::EndInlineRST
        )
    }
}

/// Kind of a token that survived compression (§3.1) and may be fed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    Number,
    Deref,
    QuotedLiteral,
    UnquotedLiteral,
    Comment,
    Rst,
    LeftParen,
    RightParen,
    Newline,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Narrows a [RawTokenKind] that the scanner emitted unchanged (`Word`,
/// `Number`, ...) into its durable [TokenKind]. Transient kinds and
/// `Whitespace` have no direct narrowing — they are only ever replaced by a
/// recorder's fused token or dropped by the post-compression filter.
impl TryFrom<RawTokenKind> for TokenKind {
    type Error = ();

    fn try_from(kind: RawTokenKind) -> Result<Self, Self::Error> {
        match kind {
            RawTokenKind::LeftParen => Ok(TokenKind::LeftParen),
            RawTokenKind::RightParen => Ok(TokenKind::RightParen),
            RawTokenKind::Newline => Ok(TokenKind::Newline),
            RawTokenKind::Word => Ok(TokenKind::Word),
            RawTokenKind::Number => Ok(TokenKind::Number),
            RawTokenKind::Deref => Ok(TokenKind::Deref),
            RawTokenKind::QuotedLiteral => Ok(TokenKind::QuotedLiteral),
            RawTokenKind::UnquotedLiteral => Ok(TokenKind::UnquotedLiteral),
            RawTokenKind::Comment => Ok(TokenKind::Comment),
            RawTokenKind::Whitespace
            | RawTokenKind::BeginDoubleQuoted
            | RawTokenKind::EndDoubleQuoted
            | RawTokenKind::BeginSingleQuoted
            | RawTokenKind::EndSingleQuoted
            | RawTokenKind::BeginRSTComment
            | RawTokenKind::BeginInlineRST
            | RawTokenKind::EndInlineRST => Err(()),
        }
    }
}

/// A scanner-produced token, still possibly transient (§4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub kind: RawTokenKind,
    pub content: String,
    pub line: usize,
    pub column: usize,
}

impl RawToken {
    pub fn new(kind: RawTokenKind, content: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            content: content.into(),
            line,
            column,
        }
    }
}

/// A compressed token (§3.1) — the only kind the parser ever sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, content: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            content: content.into(),
            line,
            column,
        }
    }

    /// Whether this token is a word-class atom that the parser may turn into
    /// an argument [Word](crate::ast::Word) (§4.3.1).
    pub fn is_word_class(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Word
                | TokenKind::Number
                | TokenKind::QuotedLiteral
                | TokenKind::UnquotedLiteral
                | TokenKind::Deref
        )
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}:{}", self.kind, self.content, self.line, self.column)
    }
}

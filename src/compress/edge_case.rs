//! The two edge-case handlers of §4.2, applied when no recorder is active.

use crate::token::{RawTokenKind, TokenKind};

/// **StrayNestedParen**: tracks nesting depth across the whole stream. A
/// parenthesis belongs to the outermost call only at depth 1; anything
/// deeper is really argument data (`f ( ( ABC ) )`) and is rewritten to
/// `UnquotedLiteral` in place.
///
/// `depth` is updated as a side effect: callers pass the depth *before* this
/// token, and the returned depth is what it should be *after*.
pub fn stray_nested_paren(kind: RawTokenKind, depth: u32) -> (TokenKind, u32) {
    match kind {
        RawTokenKind::LeftParen => {
            let depth = depth + 1;
            let token_kind = if depth > 1 {
                TokenKind::UnquotedLiteral
            } else {
                TokenKind::LeftParen
            };
            (token_kind, depth)
        }
        RawTokenKind::RightParen => {
            let token_kind = if depth > 1 {
                TokenKind::UnquotedLiteral
            } else {
                TokenKind::RightParen
            };
            (token_kind, depth.saturating_sub(1))
        }
        other => unreachable!("stray_nested_paren called on {:?}", other),
    }
}

/// **StrayEndQuoted**: an end-quoted partial seen outside an active
/// multi-line string was a false positive from the scanner's single-line
/// boundary rules; rewrite it to `UnquotedLiteral` with the same content.
pub fn stray_end_quoted() -> TokenKind {
    TokenKind::UnquotedLiteral
}

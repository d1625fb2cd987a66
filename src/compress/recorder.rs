//! The four recorders of §4.2: small state-bearing functions that each
//! consume a contiguous run of raw tokens starting at a particular trigger
//! kind and fuse the run into durable output tokens. None of them own the
//! stream; `compress` hands each a mutable splice point so the
//! same-flavor-begin-quote edge case can rescan and reinsert tokens in place.

use crate::scanner::scan_fragment;
use crate::token::{RawToken, RawTokenKind, Token, TokenKind};
use crate::util::Position;
use crate::SyntaxError;

fn is_comment_like(token: &RawToken) -> bool {
    matches!(
        token.kind,
        RawTokenKind::Comment | RawTokenKind::BeginRSTComment
    ) || token.content.trim_start().starts_with('#')
}

/// **CommentedLine**: fuses a `#`-led token with any further tokens on the
/// same source line into one `Comment` token. Returns the fused token and the
/// index of the first token not consumed.
pub fn record_commented_line(raw: &[RawToken], start: usize) -> (Token, usize) {
    let anchor = &raw[start];
    let mut i = start;
    let mut pieces = Vec::new();
    while i < raw.len() && raw[i].line == anchor.line && raw[i].kind != RawTokenKind::Newline {
        pieces.push(raw[i].content.as_str());
        i += 1;
    }
    (
        Token::new(TokenKind::Comment, pieces.concat(), anchor.line, anchor.column),
        i,
    )
}

/// **RSTCommentBlock**: starting at `BeginRSTComment`, pastes each
/// comment-class line into its own `RST` token, preserving the `Newline`
/// tokens between them, and stops before the first line that is not
/// comment-class (§4.2.1).
pub fn record_rst_comment_block(raw: &[RawToken], start: usize) -> (Vec<Token>, usize) {
    let mut out = Vec::new();
    let mut i = start;

    loop {
        let line_start = i;
        let mut pieces = Vec::new();
        let mut is_comment_line = false;
        let mut first = true;
        while i < raw.len() && raw[i].kind != RawTokenKind::Newline {
            if first {
                is_comment_line = is_comment_like(&raw[i]);
                first = false;
            }
            pieces.push(raw[i].content.as_str());
            i += 1;
        }
        if !is_comment_line {
            return (out, line_start);
        }
        let anchor = &raw[line_start];
        out.push(Token::new(TokenKind::Rst, pieces.concat(), anchor.line, anchor.column));

        if i < raw.len() && raw[i].kind == RawTokenKind::Newline {
            out.push(Token::new(TokenKind::Newline, raw[i].content.clone(), raw[i].line, raw[i].column));
            i += 1;
        }
        if i >= raw.len() {
            return (out, i);
        }
    }
}

/// **InlineRST**: starting at `BeginInlineRST`, pastes each covered line into
/// one `RST` token (delimiter lines included) and closes one token after the
/// line containing the matching `EndInlineRST`.
pub fn record_inline_rst(raw: &[RawToken], start: usize) -> Result<(Vec<Token>, usize), SyntaxError> {
    let mut out = Vec::new();
    let mut i = start;

    loop {
        let line_start = i;
        let mut pieces = Vec::new();
        let mut saw_end = false;
        while i < raw.len() && raw[i].kind != RawTokenKind::Newline {
            if raw[i].kind == RawTokenKind::EndInlineRST {
                saw_end = true;
            }
            pieces.push(raw[i].content.as_str());
            i += 1;
        }
        let anchor = &raw[line_start];
        out.push(Token::new(TokenKind::Rst, pieces.concat(), anchor.line, anchor.column));

        if i < raw.len() && raw[i].kind == RawTokenKind::Newline {
            out.push(Token::new(TokenKind::Newline, raw[i].content.clone(), raw[i].line, raw[i].column));
            i += 1;
        }
        if saw_end {
            return Ok((out, i));
        }
        if i >= raw.len() {
            let anchor = &raw[start];
            return Err(SyntaxError::malformed(
                Position::new(anchor.line, anchor.column),
                "unterminated inline RST block",
            ));
        }
    }
}

/// **MultilineString**: starting at a `BeginDoubleQuoted`/`BeginSingleQuoted`,
/// concatenates raw token contents byte-wise (embedded `Newline`s included
/// verbatim as `"\n"`) through the matching end-quoted partial, producing one
/// `QuotedLiteral`.
///
/// Edge case: a further begin-quoted token of the *same* flavor while active
/// is not a new string — its first character closes this one. The remainder
/// of that token is re-scanned as a fresh line fragment and spliced back into
/// `raw` at the same index so the outer loop picks it up normally.
pub fn record_multiline_string(
    raw: &mut Vec<RawToken>,
    start: usize,
) -> Result<(Token, usize), SyntaxError> {
    let begin_kind = raw[start].kind;
    let end_kind = match begin_kind {
        RawTokenKind::BeginDoubleQuoted => RawTokenKind::EndDoubleQuoted,
        RawTokenKind::BeginSingleQuoted => RawTokenKind::EndSingleQuoted,
        other => unreachable!("record_multiline_string called on {:?}", other),
    };
    let anchor_line = raw[start].line;
    let anchor_column = raw[start].column;
    let mut content = String::new();
    let mut i = start;

    loop {
        if i >= raw.len() {
            return Err(SyntaxError::malformed(
                Position::new(anchor_line, anchor_column),
                "unterminated quoted string",
            ));
        }

        if i != start && raw[i].kind == begin_kind {
            let tok = raw[i].clone();
            let closing = tok
                .content
                .chars()
                .next()
                .expect("begin-quote token is never empty");
            content.push(closing);
            let rest_offset = closing.len_utf8();
            let rest = tok.content[rest_offset..].to_string();
            let rescanned = scan_fragment(&rest, tok.line, tok.column + rest_offset)
                .map_err(SyntaxError::from)?;
            raw.splice(i..i + 1, rescanned);
            return Ok((
                Token::new(TokenKind::QuotedLiteral, content, anchor_line, anchor_column),
                i,
            ));
        }

        if raw[i].kind == end_kind {
            content.push_str(&raw[i].content);
            return Ok((
                Token::new(TokenKind::QuotedLiteral, content, anchor_line, anchor_column),
                i + 1,
            ));
        }

        content.push_str(&raw[i].content);
        i += 1;
    }
}

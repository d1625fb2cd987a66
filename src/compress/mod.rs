//! Token compressor (§4.2): a single forward pass over the scanner's raw
//! token stream that activates recorders to fuse multi-token runs into
//! single semantic tokens, applies edge-case handlers everywhere else, and
//! drops whitespace. The result is the only token population the parser ever
//! sees.

mod edge_case;
mod recorder;

use crate::token::{RawToken, RawTokenKind, Token, TokenKind};
use crate::util::Position;
use crate::SyntaxError;

/// Compress a raw scanner output into the durable token stream (§4.2).
///
/// Fails with [SyntaxError] if an inline RST block or multi-line string is
/// never closed, or if parentheses are unbalanced at end of stream (the
/// redesigned behavior of §9 — the distilled source only asserted this).
pub fn compress(mut raw: Vec<RawToken>) -> Result<Vec<Token>, SyntaxError> {
    let mut out = Vec::new();
    let mut i = 0usize;
    let mut paren_depth = 0u32;
    let mut last_position = Position::new(1, 1);

    while i < raw.len() {
        let kind = raw[i].kind;
        last_position = Position::new(raw[i].line, raw[i].column);

        match kind {
            RawTokenKind::Whitespace => {
                i += 1;
            }
            RawTokenKind::BeginRSTComment => {
                crate::log().log_success(last_position, &"RSTCommentBlock");
                let (tokens, next_i) = recorder::record_rst_comment_block(&raw, i);
                out.extend(tokens);
                i = next_i;
            }
            RawTokenKind::BeginInlineRST => {
                crate::log().log_success(last_position, &"InlineRST");
                let (tokens, next_i) = recorder::record_inline_rst(&raw, i)?;
                out.extend(tokens);
                i = next_i;
            }
            RawTokenKind::Comment => {
                crate::log().log_success(last_position, &"CommentedLine");
                let (token, next_i) = recorder::record_commented_line(&raw, i);
                out.push(token);
                i = next_i;
            }
            RawTokenKind::BeginDoubleQuoted | RawTokenKind::BeginSingleQuoted => {
                crate::log().log_success(last_position, &"MultilineString");
                let (token, next_i) = recorder::record_multiline_string(&mut raw, i)?;
                out.push(token);
                i = next_i;
            }
            RawTokenKind::EndDoubleQuoted | RawTokenKind::EndSingleQuoted => {
                out.push(Token::new(
                    edge_case::stray_end_quoted(),
                    raw[i].content.clone(),
                    raw[i].line,
                    raw[i].column,
                ));
                i += 1;
            }
            RawTokenKind::EndInlineRST => {
                // A closing delimiter reached outside an active InlineRST
                // recorder is a stray fragment; treat it as ordinary comment
                // text rather than failing the whole parse.
                out.push(Token::new(
                    TokenKind::Comment,
                    raw[i].content.clone(),
                    raw[i].line,
                    raw[i].column,
                ));
                i += 1;
            }
            RawTokenKind::LeftParen | RawTokenKind::RightParen => {
                let (token_kind, next_depth) = edge_case::stray_nested_paren(kind, paren_depth);
                paren_depth = next_depth;
                out.push(Token::new(token_kind, raw[i].content.clone(), raw[i].line, raw[i].column));
                i += 1;
            }
            _ => {
                let token_kind = TokenKind::try_from(kind)
                    .expect("non-transient, non-whitespace raw kind always narrows");
                out.push(Token::new(token_kind, raw[i].content.clone(), raw[i].line, raw[i].column));
                i += 1;
            }
        }
    }

    if paren_depth != 0 {
        crate::log().log_failure(last_position);
        return Err(SyntaxError::malformed(
            last_position,
            format!("unbalanced parentheses at end of input (depth {})", paren_depth),
        ));
    }

    Ok(out)
}

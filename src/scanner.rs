//! Line-by-line, priority-ordered lexical scanner (§4.1).
//!
//! The scanner has no state between lines: each line is re-scanned from
//! column 1 with the same ordered rule list. A rule is a compiled
//! [regex::Regex] anchored at the start of the remaining line, plus, for the
//! handful of rules the `regex` crate cannot express directly (word
//! boundaries against a following letter or parenthesis), a manual boundary
//! check against the bytes immediately surrounding the match.

use crate::token::{RawToken, RawTokenKind};
use crate::util::Position;
use crate::ScanError;
use once_cell::sync::Lazy;
use regex::Regex;

fn boundary_before_ok(line: &str, cursor: usize) -> bool {
    match line[..cursor].chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace() || c == '(',
    }
}

fn boundary_after_ok(line: &str, end: usize) -> bool {
    match line[end..].chars().next() {
        None => true,
        Some(c) => c.is_whitespace() || c == ')',
    }
}

fn extends_word(line: &str, end: usize) -> bool {
    // Anything other than whitespace, end-of-line or a parenthesis right
    // after a word-shaped match means the match is really part of a larger
    // compound literal (e.g. `FOO-BAR`, `${X}y`).
    match line[end..].chars().next() {
        None => false,
        Some(c) => !(c.is_whitespace() || c == '(' || c == ')'),
    }
}

static QUOTED_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(?:"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*')"#).unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+").unwrap());
static LEFT_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(").unwrap());
static RIGHT_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\)").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap());
static DEREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$\{[A-Za-z_][A-Za-z0-9_]*\}").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\S\n]+").unwrap());
static BEGIN_DOUBLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"(?:\\.|[^"\\])*"#).unwrap());
static BEGIN_SINGLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^'(?:\\.|[^'\\])*").unwrap());
static END_DOUBLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^(?:[^\s"\\]|\\.)*""#).unwrap());
static END_SINGLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[^\s'\\]|\\.)*'").unwrap());
static BEGIN_RST_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\.rst:[ \t\r]*$").unwrap());
static BEGIN_INLINE_RST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\[(=*)\[\.rst:[ \t\r]*$").unwrap());
static END_INLINE_RST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\](=*)\][ \t\r]*$").unwrap());
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#.*").unwrap());
static UNQUOTED_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s()]+").unwrap());

/// Try every rule in priority order at `cursor`, returning the matched byte
/// length on the first applicable rule. Boundary-sensitive rules (`Word`,
/// `Number`, `Deref`, quoted forms) additionally validate the characters
/// immediately surrounding the candidate match.
fn dispatch(line: &str, cursor: usize) -> Option<(RawTokenKind, usize)> {
    let rest = &line[cursor..];

    if let Some(m) = QUOTED_LITERAL.find(rest) {
        if boundary_before_ok(line, cursor) && boundary_after_ok(line, cursor + m.end()) {
            return Some((RawTokenKind::QuotedLiteral, m.end()));
        }
    }
    if let Some(m) = NUMBER.find(rest) {
        if !extends_word(line, cursor + m.end()) {
            return Some((RawTokenKind::Number, m.end()));
        }
    }
    if LEFT_PAREN.is_match(rest) {
        return Some((RawTokenKind::LeftParen, 1));
    }
    if RIGHT_PAREN.is_match(rest) {
        return Some((RawTokenKind::RightParen, 1));
    }
    if let Some(m) = WORD.find(rest) {
        if !extends_word(line, cursor + m.end()) {
            return Some((RawTokenKind::Word, m.end()));
        }
    }
    if let Some(m) = DEREF.find(rest) {
        if !extends_word(line, cursor + m.end()) {
            return Some((RawTokenKind::Deref, m.end()));
        }
    }
    if let Some(m) = WHITESPACE.find(rest) {
        return Some((RawTokenKind::Whitespace, m.end()));
    }
    if boundary_before_ok(line, cursor) {
        if let Some(m) = BEGIN_DOUBLE_QUOTED.find(rest) {
            return Some((RawTokenKind::BeginDoubleQuoted, m.end()));
        }
        if let Some(m) = BEGIN_SINGLE_QUOTED.find(rest) {
            return Some((RawTokenKind::BeginSingleQuoted, m.end()));
        }
    }
    if let Some(m) = END_DOUBLE_QUOTED.find(rest) {
        if boundary_after_ok(line, cursor + m.end()) {
            return Some((RawTokenKind::EndDoubleQuoted, m.end()));
        }
    }
    if let Some(m) = END_SINGLE_QUOTED.find(rest) {
        if boundary_after_ok(line, cursor + m.end()) {
            return Some((RawTokenKind::EndSingleQuoted, m.end()));
        }
    }
    if let Some(m) = BEGIN_RST_COMMENT.find(rest) {
        return Some((RawTokenKind::BeginRSTComment, m.end()));
    }
    if BEGIN_INLINE_RST.is_match(rest) {
        let m = BEGIN_INLINE_RST.find(rest).unwrap();
        return Some((RawTokenKind::BeginInlineRST, m.end()));
    }
    if END_INLINE_RST.is_match(rest) {
        let m = END_INLINE_RST.find(rest).unwrap();
        return Some((RawTokenKind::EndInlineRST, m.end()));
    }
    if let Some(m) = COMMENT.find(rest) {
        return Some((RawTokenKind::Comment, m.end()));
    }
    if let Some(m) = UNQUOTED_LITERAL.find(rest) {
        return Some((RawTokenKind::UnquotedLiteral, m.end()));
    }
    None
}

/// Re-scan a fragment of a single line (used by the compressor's
/// same-flavor-begin-quote edge case to re-tokenize the remainder of a token
/// that turned out to contain the string's closing quote). `start_column` is
/// the column the fragment begins at in the original source.
pub(crate) fn scan_fragment(
    fragment: &str,
    line: usize,
    start_column: usize,
) -> Result<Vec<RawToken>, ScanError> {
    let mut tokens = Vec::new();
    let mut cursor = 0usize;
    let mut column = start_column;
    while cursor < fragment.len() {
        match dispatch(fragment, cursor) {
            Some((kind, len)) => {
                let content = &fragment[cursor..cursor + len];
                tokens.push(RawToken::new(kind, content, line, column));
                cursor += len;
                column += len;
            }
            None => {
                return Err(ScanError::new(
                    Position::new(line, column),
                    &fragment[cursor..],
                ));
            }
        }
    }
    Ok(tokens)
}

/// Scan `text` into a flat, ordered sequence of [RawToken]s (§4.1). Fails
/// with [ScanError] on the first line containing a substring no rule matches.
pub fn scan(text: &str) -> Result<Vec<RawToken>, ScanError> {
    let mut tokens = Vec::new();
    let mut line_no = 1usize;
    let mut rest = text;

    loop {
        let (line, has_newline) = match rest.find('\n') {
            Some(idx) => (&rest[..idx], true),
            None => (rest, false),
        };

        let mut cursor = 0usize;
        let mut column = 1usize;
        while cursor < line.len() {
            match dispatch(line, cursor) {
                Some((kind, len)) => {
                    let content = &line[cursor..cursor + len];
                    crate::log().log_success(Position::new(line_no, column), &content);
                    tokens.push(RawToken::new(kind, content, line_no, column));
                    cursor += len;
                    column += len;
                }
                None => {
                    crate::log().log_failure(Position::new(line_no, column));
                    return Err(ScanError::new(
                        Position::new(line_no, column),
                        &line[cursor..],
                    ));
                }
            }
        }
        if has_newline {
            tokens.push(RawToken::new(RawTokenKind::Newline, "\n", line_no, column));
            rest = &rest[line.len() + 1..];
            line_no += 1;
            if rest.is_empty() {
                break;
            }
        } else {
            break;
        }
    }

    Ok(tokens)
}

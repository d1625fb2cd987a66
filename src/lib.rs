//! A tokenizer and recursive-descent parser producing an abstract syntax
//! tree for CMake source text.
//!
//! # Overview
//!
//! CMake's grammar is small but lexically irregular: commands are
//! parenthesized argument lists, arguments are either identifiers, numbers,
//! variable dereferences, quoted strings that may span several lines, or
//! nearly-unconstrained "compound" literals, and documentation comments
//! (RST) are a first-class construct. Parsing proceeds in four stages, each
//! owning its own module:
//!
//! 1. [scanner] — a single left-to-right, line-by-line pass producing a flat
//!    sequence of raw tokens with no lookahead across lines.
//! 2. [compress] — a forward pass that fuses multi-token runs (comments, RST
//!    blocks, multi-line strings) into single semantic tokens and drops
//!    whitespace, narrowing [token::RawTokenKind] down to [token::TokenKind].
//! 3. [parser] — recursive descent over the compressed stream, producing a
//!    [ast::ToplevelBody].
//! 4. [visitor] — a schema-driven, depth-first walk over the tree.
//!
//! # Example
//!
//! ```
//! use cmake_ast::{parse, Statement};
//!
//! let tree = parse("my_function (ARG_ONE ARG_TWO)\n", None).unwrap();
//! match &tree.statements[0] {
//!     Statement::FunctionCall(call) => assert_eq!(call.name, "my_function"),
//!     _ => unreachable!(),
//! }
//! ```

pub mod ast;
mod compress;
mod error;
mod parser;
mod scanner;
pub mod token;
pub mod util;
pub mod visitor;

pub use ast::{
    FunctionCall, HeaderBody, HeaderOnly, IfBlock, Statement, ToplevelBody, Word, WordType,
};
pub use error::{ScanError, SyntaxError};
pub use token::{Token, TokenKind};
pub use util::{Log, Position};
pub use visitor::{recurse, Callbacks};

use once_cell::sync::OnceCell;

static LOG: OnceCell<Log<&'static str>> = OnceCell::new();

/// Configure the verbosity the scanner's rule dispatch and the compressor's
/// recorder activations log at (§3.4). Gated behind `#[cfg(debug_assertions)]`
/// at the call site, the same as the teacher's `set_log` on its lexeme units
/// — but exposed once at the crate level here, since this crate has no
/// public per-rule objects to configure individually. May only be called
/// once; a later call returns `Err` without changing the active level.
pub fn set_log(log: Log<&'static str>) -> Result<(), String> {
    LOG.set(log).map_err(|_| "log level already set".to_string())
}

pub(crate) fn log() -> &'static Log<&'static str> {
    LOG.get_or_init(|| Log::None)
}

/// Scan and compress `text` into the durable token sequence (§6). Internally
/// this runs the scanner, then the compressor; a caller that only needs
/// tokens (an editor's syntax highlighter, for instance) can stop here
/// without paying for a tree.
///
/// The compressor can itself fail on malformed input (an unterminated
/// multi-line string or inline RST block, or unbalanced parens at end of
/// stream), which is not a *scan* failure, so this returns `SyntaxError`
/// rather than narrowing to `ScanError`; a `ScanError` converts into it for
/// free via [SyntaxError]'s `From` impl.
pub fn tokenize(text: &str) -> Result<Vec<Token>, SyntaxError> {
    let raw = scanner::scan(text)?;
    compress::compress(raw)
}

/// Parse `text` into a [ToplevelBody] (§6). If `tokens` is supplied the
/// scanner and compressor are skipped and this token sequence is parsed
/// directly (useful for re-parsing after an edit that only touched tokens
/// downstream of compression, or for testing the parser in isolation).
///
/// Fails with [SyntaxError] on malformed block structure; a scan failure
/// during the internal tokenization is wrapped as `SyntaxError::Scan`.
pub fn parse(text: &str, tokens: Option<Vec<Token>>) -> Result<ToplevelBody, SyntaxError> {
    let tokens = match tokens {
        Some(tokens) => tokens,
        None => {
            let raw = scanner::scan(text)?;
            compress::compress(raw)?
        }
    };
    parser::parse_tokens(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_call_end_to_end() {
        let tree = parse("my_function ()\n", None).unwrap();
        assert_eq!(tree.statements.len(), 1);
        match &tree.statements[0] {
            Statement::FunctionCall(call) => {
                assert_eq!(call.name, "my_function");
                assert!(call.arguments.is_empty());
            }
            other => panic!("expected FunctionCall, got {:?}", other),
        }
    }

    #[test]
    fn syntax_error_on_missing_footer_parens() {
        let err = parse("function (func)\nendfunction", None).unwrap_err();
        assert!(matches!(err, SyntaxError::Malformed { .. }));
    }

    #[test]
    fn rst_block_then_function_call() {
        let tree = parse("#.rst:\n# ABC\nfunction_call ()\n", None).unwrap();
        assert_eq!(tree.statements.len(), 1);
        match &tree.statements[0] {
            Statement::FunctionCall(call) => {
                assert_eq!(call.name, "function_call");
                assert_eq!(call.line, 3);
            }
            other => panic!("expected FunctionCall, got {:?}", other),
        }
    }

    #[test]
    fn tokenize_then_parse_reuses_tokens() {
        let tokens = tokenize("foreach (X Y)\nendforeach ()\n").unwrap();
        let tree = parse("", Some(tokens)).unwrap();
        assert_eq!(tree.statements.len(), 1);
    }
}

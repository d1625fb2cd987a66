//! Whole-pipeline fixtures (§8 "End-to-end scenarios" and "Boundary
//! behaviors"), mirroring the teacher's top-level integration-style tests but
//! living at the crate root since this crate has no internal `examples`
//! module of its own.

use cmake_ast::{parse, tokenize, Statement, SyntaxError, TokenKind, WordType};

fn call<'a>(statements: &'a [Statement], index: usize) -> &'a cmake_ast::FunctionCall {
    match &statements[index] {
        Statement::FunctionCall(call) => call,
        other => panic!("expected FunctionCall at index {}, got {:?}", index, other),
    }
}

#[test]
fn scenario_simple_call() {
    let tree = parse("my_function ()\n", None).unwrap();
    assert_eq!(tree.statements.len(), 1);
    let c = call(&tree.statements, 0);
    assert_eq!(c.name, "my_function");
    assert!(c.arguments.is_empty());
}

#[test]
fn scenario_call_with_args() {
    let tree = parse("my_function (ARG_ONE ARG_TWO)\n", None).unwrap();
    let c = call(&tree.statements, 0);
    assert_eq!(c.arguments.len(), 2);
    assert_eq!(c.arguments[0].word_type, WordType::Variable);
    assert_eq!(c.arguments[0].contents, "ARG_ONE");
    assert_eq!(c.arguments[1].contents, "ARG_TWO");
}

#[test]
fn scenario_foreach_block() {
    let text = "foreach (VAR ${LIST})\n  message (STATUS \"${VAR}\")\nendforeach ()\n";
    let tree = parse(text, None).unwrap();
    match &tree.statements[0] {
        Statement::ForeachStatement(hb) => {
            assert_eq!(hb.header.name, "foreach");
            assert_eq!(hb.footer.name, "endforeach");
            match &hb.body[0] {
                Statement::FunctionCall(inner) => assert_eq!(inner.name, "message"),
                other => panic!("expected FunctionCall, got {:?}", other),
            }
        }
        other => panic!("expected ForeachStatement, got {:?}", other),
    }
}

#[test]
fn scenario_if_elseif_else() {
    let text = concat!(
        "if (FOO)\n",
        "  message (IF)\n",
        "elseif (BAR)\n",
        "  message (ELSEIF)\n",
        "else ()\n",
        "  message (ELSE)\n",
        "endif ()\n",
    );
    let tree = parse(text, None).unwrap();
    match &tree.statements[0] {
        Statement::IfBlock(block) => {
            let if_arg = call(&block.if_statement.body, 0).arguments[0].contents.clone();
            assert_eq!(if_arg, "IF");
            assert_eq!(block.elseif_statements.len(), 1);
            let elseif_arg = call(&block.elseif_statements[0].body, 0).arguments[0].contents.clone();
            assert_eq!(elseif_arg, "ELSEIF");
            let else_clause = block.else_statement.as_ref().unwrap();
            let else_arg = call(&else_clause.body, 0).arguments[0].contents.clone();
            assert_eq!(else_arg, "ELSE");
            assert_eq!(block.footer.name, "endif");
        }
        other => panic!("expected IfBlock, got {:?}", other),
    }
}

#[test]
fn scenario_multiline_string() {
    let tree = parse("f (\"MULTI\nLINE\nSTRING\")\n", None).unwrap();
    let c = call(&tree.statements, 0);
    assert_eq!(c.arguments.len(), 1);
    assert_eq!(c.arguments[0].word_type, WordType::String);
    assert_eq!(c.arguments[0].contents, "\"MULTI\nLINE\nSTRING\"");
    assert_eq!(c.arguments[0].line, 1);
}

#[test]
fn scenario_rst_block_then_code() {
    let tokens = tokenize("#.rst:\n# ABC\nfunction_call ()\n").unwrap();
    let rst: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Rst).collect();
    assert_eq!(rst.len(), 2);
    assert_eq!(rst[0].content, "#.rst:");
    assert_eq!(rst[1].content, "# ABC");

    let tree = parse("", Some(tokens)).unwrap();
    let c = call(&tree.statements, 0);
    assert_eq!(c.name, "function_call");
    assert_eq!(c.line, 3);
}

#[test]
fn scenario_syntax_error_on_missing_footer_parens() {
    let err = parse("function (func)\nendfunction", None).unwrap_err();
    assert!(matches!(err, SyntaxError::Malformed { .. }));
}

#[test]
fn boundary_closing_quote_as_first_character_of_line() {
    let tree = parse("f (\"ABC\n\")\n", None).unwrap();
    let c = call(&tree.statements, 0);
    assert_eq!(c.arguments[0].contents, "\"ABC\n\"");
}

#[test]
fn boundary_two_adjacent_multiline_strings() {
    let tree = parse("f (\"A\nB\" \"C\nD\")\n", None).unwrap();
    let c = call(&tree.statements, 0);
    assert_eq!(c.arguments.len(), 2);
    assert_eq!(c.arguments[0].contents, "\"A\nB\"");
    assert_eq!(c.arguments[1].contents, "\"C\nD\"");
}

#[test]
fn boundary_nested_parens_become_compound_literals() {
    let tree = parse("f ( ( ABC ) )\n", None).unwrap();
    let c = call(&tree.statements, 0);
    let contents: Vec<&str> = c.arguments.iter().map(|w| w.contents.as_str()).collect();
    assert_eq!(contents, vec!["(", "ABC", ")"]);
    assert_eq!(c.arguments[0].word_type, WordType::CompoundLiteral);
    assert_eq!(c.arguments[2].word_type, WordType::CompoundLiteral);
}

#[test]
fn boundary_hash_inside_quoted_string_is_not_a_comment() {
    let tree = parse("f (\"# not a comment\")\n", None).unwrap();
    let c = call(&tree.statements, 0);
    assert_eq!(c.arguments[0].word_type, WordType::String);
    assert_eq!(c.arguments[0].contents, "\"# not a comment\"");
}

#[test]
fn invariant_anchor_columns_start_at_one_per_line() {
    let tokens = tokenize("a (b)\nc (d)\n").unwrap();
    let first_of_each_line: Vec<_> = tokens
        .iter()
        .filter(|t| t.column == 1)
        .map(|t| t.line)
        .collect();
    assert!(first_of_each_line.contains(&1));
    assert!(first_of_each_line.contains(&2));
}

#[test]
fn invariant_no_transient_tokens_escape_compression() {
    let tokens = tokenize("f (\"MULTI\nLINE\") #.rst:\nmore stuff\n").unwrap();
    // TokenKind has no Whitespace/BeginX/EndX variants at all, so the only
    // way to check this invariant is structural: every token kind present is
    // drawn from the durable enum, which by construction excludes them.
    assert!(tokens.iter().all(|t| matches!(
        t.kind,
        TokenKind::Word
            | TokenKind::Number
            | TokenKind::Deref
            | TokenKind::QuotedLiteral
            | TokenKind::UnquotedLiteral
            | TokenKind::Comment
            | TokenKind::Rst
            | TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::Newline
    )));
}

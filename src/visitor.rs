//! Schema-driven depth-first visitor (§4.4). The schema is a static
//! per-variant dispatch table rather than a reflective field lookup, per the
//! REDESIGN FLAGS — one `match` arm per node kind, each listing its
//! single-child and multi-child fields and the callback key to invoke.

use crate::ast::{FunctionCall, HeaderBody, HeaderOnly, IfBlock, Statement, ToplevelBody, Word};

/// One callback slot: `(kind_name, node, depth) -> ()`. Missing slots mean
/// "no action," matching the §6 contract that unrecognized callback keys are
/// simply absent rather than erroring.
pub type Callback<'a, T> = dyn Fn(&str, &T, usize) + 'a;

/// The registered callbacks for a [recurse] walk. Each field is a visitor
/// hook keyed to the node kind named in §6; a `None` field means that node
/// kind is visited without side effects.
#[derive(Default)]
pub struct Callbacks<'a> {
    pub toplevel: Option<Box<Callback<'a, ToplevelBody>>>,
    pub while_stmnt: Option<Box<Callback<'a, HeaderBody>>>,
    pub foreach: Option<Box<Callback<'a, HeaderBody>>>,
    pub function_def: Option<Box<Callback<'a, HeaderBody>>>,
    pub macro_def: Option<Box<Callback<'a, HeaderBody>>>,
    pub if_block: Option<Box<Callback<'a, IfBlock>>>,
    pub if_stmnt: Option<Box<Callback<'a, HeaderOnly>>>,
    pub elseif_stmnt: Option<Box<Callback<'a, HeaderOnly>>>,
    pub else_stmnt: Option<Box<Callback<'a, HeaderOnly>>>,
    pub function_call: Option<Box<Callback<'a, FunctionCall>>>,
    pub word: Option<Box<Callback<'a, Word>>>,
}

fn invoke<T>(callback: &Option<Box<Callback<'_, T>>>, kind_name: &str, node: &T, depth: usize) {
    if let Some(f) = callback {
        f(kind_name, node, depth);
    }
}

/// Walk `tree` depth-first, pre-order, invoking `callbacks` at every node.
/// `depth(ToplevelBody) == 0`; each field visited below is one level deeper
/// than its parent (§4.4, §9 "Visitor depth law").
pub fn recurse(tree: &ToplevelBody, callbacks: &Callbacks<'_>) {
    invoke(&callbacks.toplevel, "ToplevelBody", tree, 0);
    for statement in &tree.statements {
        visit_statement(statement, callbacks, 1);
    }
}

fn visit_statement(statement: &Statement, callbacks: &Callbacks<'_>, depth: usize) {
    match statement {
        Statement::FunctionCall(call) => visit_function_call(call, callbacks, depth),
        Statement::FunctionDefinition(hb) => {
            invoke(&callbacks.function_def, "FunctionDefinition", hb, depth);
            visit_header_body(hb, callbacks, depth);
        }
        Statement::MacroDefinition(hb) => {
            invoke(&callbacks.macro_def, "MacroDefinition", hb, depth);
            visit_header_body(hb, callbacks, depth);
        }
        Statement::ForeachStatement(hb) => {
            invoke(&callbacks.foreach, "ForeachStatement", hb, depth);
            visit_header_body(hb, callbacks, depth);
        }
        Statement::WhileStatement(hb) => {
            invoke(&callbacks.while_stmnt, "WhileStatement", hb, depth);
            visit_header_body(hb, callbacks, depth);
        }
        Statement::IfBlock(block) => {
            invoke(&callbacks.if_block, "IfBlock", block, depth);
            visit_if_block(block, callbacks, depth);
        }
    }
}

/// `single` field: `header`. `multi` fields: `body`, then `footer`.
fn visit_header_body(node: &HeaderBody, callbacks: &Callbacks<'_>, depth: usize) {
    let child_depth = depth + 1;
    visit_function_call(&node.header, callbacks, child_depth);
    for statement in &node.body {
        visit_statement(statement, callbacks, child_depth);
    }
    visit_function_call(&node.footer, callbacks, child_depth);
}

/// `single` field: `header`. `multi` field: `body`. No footer.
fn visit_header_only(node: &HeaderOnly, callbacks: &Callbacks<'_>, depth: usize) {
    let child_depth = depth + 1;
    visit_function_call(&node.header, callbacks, child_depth);
    for statement in &node.body {
        visit_statement(statement, callbacks, child_depth);
    }
}

/// `single` fields: `if_statement`, then `footer`. `multi` fields:
/// `elseif_statements`, then `else_statement` (at most one element).
fn visit_if_block(node: &IfBlock, callbacks: &Callbacks<'_>, depth: usize) {
    let child_depth = depth + 1;
    invoke(&callbacks.if_stmnt, "IfStatement", &node.if_statement, child_depth);
    visit_header_only(&node.if_statement, callbacks, child_depth);

    for clause in &node.elseif_statements {
        invoke(&callbacks.elseif_stmnt, "ElseIfStatement", clause, child_depth);
        visit_header_only(clause, callbacks, child_depth);
    }
    if let Some(clause) = &node.else_statement {
        invoke(&callbacks.else_stmnt, "ElseStatement", clause, child_depth);
        visit_header_only(clause, callbacks, child_depth);
    }

    visit_function_call(&node.footer, callbacks, child_depth);
}

/// `multi` field: `arguments`.
fn visit_function_call(node: &FunctionCall, callbacks: &Callbacks<'_>, depth: usize) {
    invoke(&callbacks.function_call, "FunctionCall", node, depth);
    let child_depth = depth + 1;
    for argument in &node.arguments {
        invoke(&callbacks.word, "Word", argument, child_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compress::compress, parser::parse_tokens, scanner::scan};
    use std::cell::RefCell;

    fn parse_str(text: &str) -> ToplevelBody {
        let tokens = compress(scan(text).unwrap()).unwrap();
        parse_tokens(&tokens).unwrap()
    }

    #[test]
    fn depth_law_holds() {
        let tree = parse_str("foreach (VAR ${LIST})\n  message (STATUS \"${VAR}\")\nendforeach ()\n");
        let depths: RefCell<Vec<(String, usize)>> = RefCell::new(Vec::new());

        let callbacks = Callbacks {
            toplevel: Some(Box::new(|name, _node, depth| {
                depths.borrow_mut().push((name.to_string(), depth));
            })),
            foreach: Some(Box::new(|name, _node, depth| {
                depths.borrow_mut().push((name.to_string(), depth));
            })),
            function_call: Some(Box::new(|name, _node, depth| {
                depths.borrow_mut().push((name.to_string(), depth));
            })),
            word: Some(Box::new(|name, _node, depth| {
                depths.borrow_mut().push((name.to_string(), depth));
            })),
            ..Callbacks::default()
        };

        recurse(&tree, &callbacks);

        let recorded = depths.into_inner();
        assert_eq!(recorded[0], ("ToplevelBody".to_string(), 0));
        assert_eq!(
            recorded.iter().find(|(name, _)| name == "ForeachStatement").unwrap().1,
            1
        );
        // header/footer FunctionCalls sit one level below the ForeachStatement.
        let header_depth = recorded
            .iter()
            .find(|(name, _)| name == "FunctionCall")
            .unwrap()
            .1;
        assert_eq!(header_depth, 2);
        let word_depth = recorded.iter().find(|(name, _)| name == "Word").unwrap().1;
        assert_eq!(word_depth, 3);
    }

    #[test]
    fn depth_law_holds_through_if_elseif_else() {
        let text = concat!(
            "if (FOO)\n",
            "  message (IF)\n",
            "elseif (BAR)\n",
            "  message (ELSEIF)\n",
            "else ()\n",
            "  message (ELSE)\n",
            "endif ()\n",
        );
        let tree = parse_str(text);
        let events: RefCell<Vec<(String, String, usize)>> = RefCell::new(Vec::new());

        let callbacks = Callbacks {
            if_block: Some(Box::new(|name, _node, depth| {
                events.borrow_mut().push((name.to_string(), "if_block".to_string(), depth));
            })),
            if_stmnt: Some(Box::new(|name, _node, depth| {
                events.borrow_mut().push((name.to_string(), "if".to_string(), depth));
            })),
            elseif_stmnt: Some(Box::new(|name, _node, depth| {
                events.borrow_mut().push((name.to_string(), "elseif".to_string(), depth));
            })),
            else_stmnt: Some(Box::new(|name, _node, depth| {
                events.borrow_mut().push((name.to_string(), "else".to_string(), depth));
            })),
            function_call: Some(Box::new(|name, node, depth| {
                events.borrow_mut().push((name.to_string(), node.name.clone(), depth));
            })),
            word: Some(Box::new(|name, node, depth| {
                events.borrow_mut().push((name.to_string(), node.contents.clone(), depth));
            })),
            ..Callbacks::default()
        };

        recurse(&tree, &callbacks);
        let recorded = events.into_inner();

        let find = |kind: &str, label: &str| {
            recorded
                .iter()
                .find(|(k, l, _)| k == kind && l == label)
                .unwrap_or_else(|| panic!("no event for {} {}", kind, label))
                .2
        };

        assert_eq!(find("IfBlock", "if_block"), 1);
        assert_eq!(find("IfStatement", "if"), 2);
        assert_eq!(find("ElseIfStatement", "elseif"), 2);
        assert_eq!(find("ElseStatement", "else"), 2);

        // Headers and bodies of if/elseif/else sit one level below their
        // clause, not at the clause's own depth (the regression this guards
        // against visited them at the clause's depth instead of depth + 1).
        assert_eq!(find("FunctionCall", "if"), 3);
        assert_eq!(find("FunctionCall", "elseif"), 3);
        assert_eq!(find("FunctionCall", "else"), 3);
        assert_eq!(
            recorded
                .iter()
                .filter(|(k, l, d)| k == "FunctionCall" && l == "message" && *d == 3)
                .count(),
            3
        );
        assert_eq!(find("Word", "IF"), 4);
        assert_eq!(find("Word", "ELSEIF"), 4);
        assert_eq!(find("Word", "ELSE"), 4);

        // The endif footer belongs to the IfBlock itself, one level below it.
        assert_eq!(find("FunctionCall", "endif"), 2);
    }

    #[test]
    fn missing_callbacks_are_noop() {
        let tree = parse_str("my_function ()\n");
        recurse(&tree, &Callbacks::default());
    }
}

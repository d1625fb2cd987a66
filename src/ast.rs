//! Tree node types produced by the parser (§3.3) and their `ptree`
//! pretty-printing, mirroring the teacher's `ASTNode::print` convenience.

use crate::token::{Token, TokenKind};
use ptree::{print_tree, write_tree, TreeItem};
use std::borrow::Cow;
use std::io;

/// The kind of value an argument-position [Word] carries (§3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordType {
    String,
    Number,
    VariableDereference,
    Variable,
    CompoundLiteral,
}

impl WordType {
    /// Classify a surviving atom's [TokenKind] into its [WordType] (§3.2).
    /// Panics if `kind` is not a word-class kind; callers must check
    /// [Token::is_word_class] first.
    pub fn from_token_kind(kind: TokenKind) -> Self {
        match kind {
            TokenKind::QuotedLiteral => WordType::String,
            TokenKind::Number => WordType::Number,
            TokenKind::Deref => WordType::VariableDereference,
            TokenKind::Word => WordType::Variable,
            TokenKind::UnquotedLiteral => WordType::CompoundLiteral,
            other => panic!("{:?} is not a word-class token kind", other),
        }
    }
}

/// An argument-position value (§3.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub word_type: WordType,
    pub contents: String,
    pub line: usize,
    pub column: usize,
}

impl Word {
    pub fn from_token(token: &Token) -> Self {
        Self {
            word_type: WordType::from_token_kind(token.kind),
            contents: token.content.clone(),
            line: token.line,
            column: token.column,
        }
    }
}

/// A CMake command invocation `name(args...)` (§3.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<Word>,
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

/// A header-body-footer node shared by `function`, `macro`, `foreach`, `while`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBody {
    pub header: FunctionCall,
    pub body: Vec<Statement>,
    pub footer: FunctionCall,
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

/// A header-body node with no footer: `if`, `elseif`, `else`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOnly {
    pub header: FunctionCall,
    pub body: Vec<Statement>,
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

/// The full `if (...) ... elseif (...) ... else () ... endif ()` construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfBlock {
    pub if_statement: HeaderOnly,
    pub elseif_statements: Vec<HeaderOnly>,
    pub else_statement: Option<HeaderOnly>,
    pub footer: FunctionCall,
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

/// Any node that may appear in a body sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    FunctionCall(FunctionCall),
    FunctionDefinition(HeaderBody),
    MacroDefinition(HeaderBody),
    ForeachStatement(HeaderBody),
    WhileStatement(HeaderBody),
    IfBlock(IfBlock),
}

/// The root of a parsed tree: an ordered sequence of top-level statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToplevelBody {
    pub statements: Vec<Statement>,
}

impl ToplevelBody {
    /// Pretty-print this tree to stdout, the same convenience the teacher's
    /// `ASTNode::print` offers.
    pub fn print(&self) -> io::Result<()> {
        print_tree(self)
    }

    /// Render this tree to any [io::Write] sink.
    pub fn write_to<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        write_tree(self, sink)
    }
}

fn statement_label(statement: &Statement) -> &'static str {
    match statement {
        Statement::FunctionCall(_) => "FunctionCall",
        Statement::FunctionDefinition(_) => "FunctionDefinition",
        Statement::MacroDefinition(_) => "MacroDefinition",
        Statement::ForeachStatement(_) => "ForeachStatement",
        Statement::WhileStatement(_) => "WhileStatement",
        Statement::IfBlock(_) => "IfBlock",
    }
}

impl TreeItem for ToplevelBody {
    type Child = OwnedPrintNode;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &ptree::Style) -> io::Result<()> {
        write!(f, "ToplevelBody")
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::Owned(self.statements.iter().map(OwnedPrintNode::from_statement).collect())
    }
}

/// An owned, cloned view of one tree node used to drive `ptree::TreeItem`,
/// whose children must be `Clone + 'static` — the same reason the teacher's
/// own `ASTNode::print` clones into an intermediate printable shape.
#[derive(Clone)]
pub enum OwnedPrintNode {
    Statement(Statement),
    HeaderBody(&'static str, HeaderBody),
    HeaderOnly(&'static str, HeaderOnly),
    IfBlock(IfBlock),
    FunctionCall(FunctionCall),
    Word(Word),
}

impl OwnedPrintNode {
    fn from_statement(statement: &Statement) -> Self {
        OwnedPrintNode::Statement(statement.clone())
    }

    fn label(&self) -> String {
        match self {
            OwnedPrintNode::Statement(s) => statement_label(s).to_string(),
            OwnedPrintNode::HeaderBody(name, hb) => format!("{} ({}:{})", name, hb.line, hb.column),
            OwnedPrintNode::HeaderOnly(name, ho) => format!("{} ({}:{})", name, ho.line, ho.column),
            OwnedPrintNode::IfBlock(b) => format!("IfBlock ({}:{})", b.line, b.column),
            OwnedPrintNode::FunctionCall(c) => format!("FunctionCall {} ({}:{})", c.name, c.line, c.column),
            OwnedPrintNode::Word(w) => format!("Word {:?} {:?}", w.word_type, w.contents),
        }
    }

    fn children(&self) -> Vec<OwnedPrintNode> {
        match self {
            OwnedPrintNode::Statement(s) => match s {
                Statement::FunctionCall(c) => vec![OwnedPrintNode::FunctionCall(c.clone())],
                Statement::FunctionDefinition(hb) => {
                    vec![OwnedPrintNode::HeaderBody("FunctionDefinition", hb.clone())]
                }
                Statement::MacroDefinition(hb) => {
                    vec![OwnedPrintNode::HeaderBody("MacroDefinition", hb.clone())]
                }
                Statement::ForeachStatement(hb) => {
                    vec![OwnedPrintNode::HeaderBody("ForeachStatement", hb.clone())]
                }
                Statement::WhileStatement(hb) => {
                    vec![OwnedPrintNode::HeaderBody("WhileStatement", hb.clone())]
                }
                Statement::IfBlock(b) => vec![OwnedPrintNode::IfBlock(b.clone())],
            },
            OwnedPrintNode::HeaderBody(_, hb) => {
                let mut v = vec![OwnedPrintNode::FunctionCall(hb.header.clone())];
                v.extend(hb.body.iter().map(OwnedPrintNode::from_statement));
                v.push(OwnedPrintNode::FunctionCall(hb.footer.clone()));
                v
            }
            OwnedPrintNode::HeaderOnly(_, ho) => {
                let mut v = vec![OwnedPrintNode::FunctionCall(ho.header.clone())];
                v.extend(ho.body.iter().map(OwnedPrintNode::from_statement));
                v
            }
            OwnedPrintNode::IfBlock(b) => {
                let mut v = vec![OwnedPrintNode::HeaderOnly("IfStatement", b.if_statement.clone())];
                v.extend(
                    b.elseif_statements
                        .iter()
                        .map(|e| OwnedPrintNode::HeaderOnly("ElseIfStatement", e.clone())),
                );
                if let Some(e) = &b.else_statement {
                    v.push(OwnedPrintNode::HeaderOnly("ElseStatement", e.clone()));
                }
                v.push(OwnedPrintNode::FunctionCall(b.footer.clone()));
                v
            }
            OwnedPrintNode::FunctionCall(c) => c.arguments.iter().cloned().map(OwnedPrintNode::Word).collect(),
            OwnedPrintNode::Word(_) => Vec::new(),
        }
    }
}

impl TreeItem for OwnedPrintNode {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &ptree::Style) -> io::Result<()> {
        write!(f, "{}", self.label())
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::Owned(OwnedPrintNode::children(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_type_classification() {
        let token = Token::new(TokenKind::Deref, "${X}", 1, 1);
        let word = Word::from_token(&token);
        assert_eq!(word.word_type, WordType::VariableDereference);
        assert_eq!(word.contents, "${X}");
    }

    #[test]
    #[should_panic]
    fn word_type_rejects_non_word_class() {
        WordType::from_token_kind(TokenKind::LeftParen);
    }

    #[test]
    fn tree_prints_without_panicking() {
        let tree = ToplevelBody {
            statements: vec![Statement::FunctionCall(FunctionCall {
                name: "my_function".to_string(),
                arguments: vec![Word {
                    word_type: WordType::Variable,
                    contents: "ARG".to_string(),
                    line: 1,
                    column: 13,
                }],
                line: 1,
                column: 1,
                index: 0,
            })],
        };
        let mut sink = Vec::new();
        tree.write_to(&mut sink).unwrap();
        let rendered = String::from_utf8(sink).unwrap();
        assert!(rendered.contains("ToplevelBody"));
        assert!(rendered.contains("my_function"));
        assert!(rendered.contains("ARG"));
    }
}

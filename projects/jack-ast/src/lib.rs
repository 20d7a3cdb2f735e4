//! Lossless parse tree for Jack.
//!
//! A [Node] is tagged with the grammar nonterminal it was built from and owns
//! its children in source order. Children are either leaf [Token]s, including
//! keywords and punctuation, or nested nodes, so walking the leaves of a tree
//! reproduces the token stream it was parsed from.

use jack_types::Span;

mod token;
#[cfg(feature = "serde")]
mod serde_impl;

pub use token::{Keyword, Symbol, Token, TokenKind};

pub trait AstNode {
    fn span(&self) -> Span;
}

/// One kind per grammar nonterminal that produces a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl NodeKind {
    /// Element name used by the serializers.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::ClassVarDec => "classVarDec",
            NodeKind::SubroutineDec => "subroutineDec",
            NodeKind::ParameterList => "parameterList",
            NodeKind::SubroutineBody => "subroutineBody",
            NodeKind::VarDec => "varDec",
            NodeKind::Statements => "statements",
            NodeKind::LetStatement => "letStatement",
            NodeKind::IfStatement => "ifStatement",
            NodeKind::WhileStatement => "whileStatement",
            NodeKind::DoStatement => "doStatement",
            NodeKind::ReturnStatement => "returnStatement",
            NodeKind::Expression => "expression",
            NodeKind::Term => "term",
            NodeKind::ExpressionList => "expressionList",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Token(Token),
    Node(Node),
}

impl Child {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Child::Token(token) => Some(token),
            Child::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Child>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, children: Vec::new() }
    }

    pub fn push_token(&mut self, token: Token) {
        self.children.push(Child::Token(token));
    }

    pub fn push_node(&mut self, node: Node) {
        self.children.push(Child::Node(node));
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct child nodes, in order.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_node)
    }

    /// Direct child tokens, in order.
    pub fn child_tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(Child::as_token)
    }

    /// All leaf tokens of the subtree in source order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for child in &self.children {
            match child {
                Child::Token(token) => out.push(token),
                Child::Node(node) => node.collect_tokens(out),
            }
        }
    }

    /// All nodes of the given kind in the subtree, in pre-order.
    pub fn find_all(&self, kind: NodeKind) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_nodes(kind, &mut out);
        out
    }

    fn collect_nodes<'a>(&'a self, kind: NodeKind, out: &mut Vec<&'a Node>) {
        if self.kind == kind {
            out.push(self);
        }
        for node in self.child_nodes() {
            node.collect_nodes(kind, out);
        }
    }
}

impl AstNode for Token {
    fn span(&self) -> Span {
        self.span
    }
}

/// Covers the first through the last leaf token; empty nodes such as an
/// empty `parameterList` have an empty span.
impl AstNode for Node {
    fn span(&self) -> Span {
        let tokens = self.tokens();
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => Span { start: first.span.start, end: last.span.end },
            _ => Span::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, text: &str, start: usize) -> Token {
        Token { kind, text: text.to_string(), span: Span::new(start, start + text.len()), line: 1 }
    }

    #[test]
    fn test_tokens_flatten_in_order() {
        let mut term = Node::new(NodeKind::Term);
        term.push_token(token(TokenKind::IntegerConstant(1), "1", 8));
        let mut expr = Node::new(NodeKind::Expression);
        expr.push_node(term);

        let mut stmt = Node::new(NodeKind::LetStatement);
        stmt.push_token(token(TokenKind::Keyword(Keyword::Let), "let", 0));
        stmt.push_token(token(TokenKind::Identifier, "x", 4));
        stmt.push_token(token(TokenKind::Symbol(Symbol::Eq), "=", 6));
        stmt.push_node(expr);
        stmt.push_token(token(TokenKind::Symbol(Symbol::Semicolon), ";", 9));

        let texts: Vec<&str> = stmt.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["let", "x", "=", "1", ";"]);
        assert_eq!(stmt.span(), Span::new(0, 10));
        assert_eq!(stmt.find_all(NodeKind::Term).len(), 1);
        assert_eq!(stmt.child_nodes().count(), 1);
        assert_eq!(stmt.child_tokens().count(), 4);
    }

    #[test]
    fn test_empty_node_span() {
        let node = Node::new(NodeKind::ParameterList);
        assert!(node.is_empty());
        assert_eq!(node.span(), Span::default());
    }
}

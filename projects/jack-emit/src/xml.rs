use std::fmt::Write;

use jack_ast::{Child, Node, Token};
use jack_types::Result;

use crate::Emitter;

const INDENT: &str = "  ";

/// Tag-nesting renderer: one `<label>`/`</label>` pair per node, one
/// `<kind> lexeme </kind>` line per token.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEmitter;

impl Emitter for XmlEmitter {
    fn emit_tree(&self, node: &Node) -> Result<String> {
        let mut out = String::new();
        write_node(&mut out, node, 0);
        Ok(out)
    }

    fn emit_tokens(&self, tokens: &[Token]) -> Result<String> {
        let mut out = String::from("<tokens>\n");
        for token in tokens {
            write_token(&mut out, token, 0);
        }
        out.push_str("</tokens>\n");
        Ok(out)
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let label = node.kind.label();
    let _ = writeln!(out, "{}<{}>", INDENT.repeat(depth), label);
    for child in &node.children {
        match child {
            Child::Token(token) => write_token(out, token, depth + 1),
            Child::Node(node) => write_node(out, node, depth + 1),
        }
    }
    let _ = writeln!(out, "{}</{}>", INDENT.repeat(depth), label);
}

fn write_token(out: &mut String, token: &Token, depth: usize) {
    let label = token.kind.label();
    let _ = writeln!(out, "{}<{}> {} </{}>", INDENT.repeat(depth), label, escape(&token.text), label);
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

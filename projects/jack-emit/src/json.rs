use jack_ast::{Node, Token};
use jack_types::Result;
use serde::Serialize;

use crate::Emitter;

/// Object-nesting renderer built on `serde_json`. A node is `{ label: [...] }`
/// and a token is `{ kind: lexeme }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

#[derive(Serialize)]
struct TokenListing<'a> {
    tokens: &'a [Token],
}

impl Emitter for JsonEmitter {
    fn emit_tree(&self, node: &Node) -> Result<String> {
        let mut out = serde_json::to_string_pretty(node)?;
        out.push('\n');
        Ok(out)
    }

    fn emit_tokens(&self, tokens: &[Token]) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&TokenListing { tokens })?;
        out.push('\n');
        Ok(out)
    }
}

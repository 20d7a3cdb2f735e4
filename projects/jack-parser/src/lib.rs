pub mod classifier;
pub mod lexer;
pub mod parser;
pub mod stream;

pub use classifier::classify;
pub use lexer::{tokenize, Lexer};
pub use parser::{ExprContext, Parser};
pub use stream::TokenStream;

use jack_ast::Node;
use jack_types::Result;

/// Parses one source unit into its `class` tree.
pub fn parse(source: &str) -> Result<Node> {
    Parser::new(source)?.parse_class()
}

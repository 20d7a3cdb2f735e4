//! Renders parse trees and token listings to text.
//!
//! Both renderers are pure: the same tree always yields the same bytes, and
//! children are written in the order the tree stores them.

use jack_ast::{Node, Token};
use jack_types::Result;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

mod json;
mod xml;

pub use json::JsonEmitter;
pub use xml::XmlEmitter;

pub trait Emitter {
    fn emit_tree(&self, node: &Node) -> Result<String>;

    fn emit_tokens(&self, tokens: &[Token]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
        }
    }

    pub fn emitter(self) -> Box<dyn Emitter + Send + Sync> {
        match self {
            OutputFormat::Xml => Box::new(XmlEmitter),
            OutputFormat::Json => Box::new(JsonEmitter),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}', expected 'xml' or 'json'", other)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

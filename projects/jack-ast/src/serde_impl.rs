use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Child, Node, Token};

/// `{ "<kind>": "<lexeme>" }`
impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.kind.label(), &self.text)?;
        map.end()
    }
}

/// `{ "<label>": [children...] }`; children stay an ordered array so repeated
/// sibling labels never collide.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.kind.label(), &self.children)?;
        map.end()
    }
}

impl Serialize for Child {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Child::Token(token) => token.serialize(serializer),
            Child::Node(node) => node.serialize(serializer),
        }
    }
}

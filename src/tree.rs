//! Loading node trees produced by an external Handlebars parser.
//!
//! Accepts the shape `Node` serializes to, and the short type tags used by
//! PHP Handlebars token trees (`_t`, `_v`, `#`):
//!
//! ```json
//! [
//!   { "type": "text", "value": "<ul>" },
//!   { "type": "block", "name": "each", "args": "items", "nodes": [
//!     { "type": "variable", "name": "this" }
//!   ] }
//! ]
//! ```

use crate::ast::{BlockKind, Node, Template};
use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    value: Option<String>,
    name: Option<String>,
    args: Option<String>,
    #[serde(default)]
    nodes: Vec<RawNode>,
}

impl TryFrom<RawNode> for Node {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Node> {
        let missing = |field| Error::MalformedNode {
            kind: raw.kind.clone(),
            field,
        };

        match raw.kind.as_str() {
            "text" | "_t" => Ok(Node::Text {
                value: raw.value.ok_or_else(|| missing("value"))?,
            }),
            "variable" | "_v" => Ok(Node::Variable {
                name: raw.name.ok_or_else(|| missing("name"))?,
            }),
            "block" | "#" => {
                let name = raw.name.as_deref().ok_or_else(|| missing("name"))?;
                let kind = BlockKind::from_name(name)
                    .ok_or_else(|| Error::UnsupportedNodeKind(name.to_string()))?;
                let children = raw
                    .nodes
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Node::Block {
                    kind,
                    args: raw.args,
                    children,
                })
            }
            other => Err(Error::UnsupportedNodeKind(other.to_string())),
        }
    }
}

/// Reads a JSON array of nodes.
pub fn nodes_from_json(json: &str) -> Result<Template> {
    let raw: Vec<RawNode> = serde_json::from_str(json)?;
    raw.into_iter().map(Node::try_from).collect()
}

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    If,
    Each,
    Unless,
}

impl BlockKind {
    /// Maps a Handlebars block helper name (`{{#each ...}}`) to a kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "if" => Some(BlockKind::If),
            "each" => Some(BlockKind::Each),
            "unless" => Some(BlockKind::Unless),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::If => "if",
            BlockKind::Each => "each",
            BlockKind::Unless => "unless",
        }
    }
}

/// One element of a parsed Handlebars template.
///
/// Serializes to the same shape `tree::nodes_from_json` reads back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text {
        value: String,
    },
    Variable {
        name: String, // e.g., "this.title"
    },
    Block {
        #[serde(rename = "name")]
        kind: BlockKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        args: Option<String>, // raw control expression, e.g. "properties.items"
        #[serde(rename = "nodes")]
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable { name: name.into() }
    }

    pub fn block(kind: BlockKind, args: Option<&str>, children: Vec<Node>) -> Self {
        Node::Block {
            kind,
            args: args.map(str::to_string),
            children,
        }
    }
}

pub type Template = Vec<Node>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A node or block helper the transpiler has no emission rule for.
    #[error("unsupported node kind: {0}")]
    UnsupportedNodeKind(String),

    #[error("parse error at byte {offset}: {message}")]
    Parse { message: String, offset: usize },

    #[error("malformed '{kind}' node: missing field '{field}'")]
    MalformedNode { kind: String, field: &'static str },

    #[error("block nesting exceeds the configured limit of {limit}")]
    NestingTooDeep { limit: usize },

    #[error("invalid node tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(message: impl Into<String>, offset: usize) -> Self {
        Error::Parse {
            message: message.into(),
            offset,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Transpile options, optionally loaded from a TOML file.
//!
//! ```toml
//! max_depth = 32
//!
//! [syntax]
//! var_open = "{{ "
//! var_close = " }}"
//! ```

use crate::error::{Error, Result};
use crate::syntax::TargetSyntax;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranspileOptions {
    pub syntax: TargetSyntax,
    /// Maximum block nesting depth before the walk gives up.
    pub max_depth: usize,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            syntax: TargetSyntax::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TranspileOptions {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let opts: TranspileOptions = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        if opts.max_depth == 0 {
            return Err(Error::Config("max_depth must be at least 1".to_string()));
        }
        Ok(opts)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading transpile options");
        Self::from_toml_str(&text)
    }
}

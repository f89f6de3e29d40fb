//! Wrapping a transpiled body into a Twig component file.

use serde::{Deserialize, Serialize};

/// Metadata written into the `{# @file ... #}` docblock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHeader {
    pub title: String,
    pub see: Option<String>,
    pub version: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
}

impl ComponentHeader {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn docblock(&self) -> String {
        let mut out = String::from("{# @file\n");
        out.push_str(&format!(
            "  * This is a component template for the {} component\n",
            self.title
        ));
        for (tag, value) in [
            ("see", &self.see),
            ("version", &self.version),
            ("date", &self.date),
            ("author", &self.author),
        ] {
            if let Some(value) = value {
                out.push_str(&format!("  * @{} {}\n", tag, value));
            }
        }
        out.push_str("  * #}\n");
        out
    }
}

/// A complete component template: docblock followed by the Twig body.
pub fn component_document(header: &ComponentHeader, body: &str) -> String {
    let mut out = header.docblock();
    out.push_str(body);
    out
}

//! Delimiter conventions of the emitted (Twig) template.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSyntax {
    pub var_open: String,
    pub var_close: String,
    pub block_open: String,
    pub block_close: String,
    /// Token emitted when a loop references its own iterator name.
    pub loop_index: String,
}

impl Default for TargetSyntax {
    fn default() -> Self {
        Self {
            var_open: "{{".to_string(),
            var_close: "}}".to_string(),
            block_open: "{%".to_string(),
            block_close: "%}".to_string(),
            loop_index: "loop.index0".to_string(),
        }
    }
}

impl TargetSyntax {
    pub fn interpolate(&self, expr: &str) -> String {
        format!("{}{}{}", self.var_open, expr, self.var_close)
    }

    fn tag(&self, body: &str) -> String {
        format!("{} {} {}", self.block_open, body, self.block_close)
    }

    pub fn open_if(&self, cond: &str) -> String {
        self.tag(&format!("if {}", cond))
    }

    pub fn open_if_not(&self, cond: &str) -> String {
        self.tag(&format!("if not {}", cond))
    }

    pub fn end_if(&self) -> String {
        self.tag("endif")
    }

    pub fn open_for(&self, var: &str, iterable: &str) -> String {
        self.tag(&format!("for {} in {}", var, iterable))
    }

    pub fn end_for(&self) -> String {
        self.tag("endfor")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tags_are_twig() {
        let s = TargetSyntax::default();
        assert_eq!(s.interpolate("title"), "{{title}}");
        assert_eq!(s.open_if("properties.show"), "{% if properties.show %}");
        assert_eq!(s.open_if_not("hidden"), "{% if not hidden %}");
        assert_eq!(s.end_if(), "{% endif %}");
        assert_eq!(s.open_for("i", "properties.items"), "{% for i in properties.items %}");
        assert_eq!(s.end_for(), "{% endfor %}");
    }

    #[test]
    fn custom_var_delimiters() {
        let s = TargetSyntax {
            var_open: "{{ ".into(),
            var_close: " }}".into(),
            ..TargetSyntax::default()
        };
        assert_eq!(s.interpolate("x"), "{{ x }}");
    }
}

//! twigbars: transpile Handlebars component templates into Twig.
//!
//! This crate takes the Handlebars source of a design-system component
//! and rewrites it as a Twig template that a Drupal theme can include.
//! Nothing is evaluated; the output is template source, not rendered HTML.
//!
//! Supported subset:
//! - Literal text (passed through unchanged).
//! - `{{ path }}` interpolation.
//! - `{{#if cond}} ... {{/if}}` and `{{#unless cond}} ... {{/unless}}`.
//! - `{{#each path}} ... {{/each}}`, including nesting, with `this` and
//!   `this.x` rewritten to a one-letter loop variable.
//!
//! Not supported (rejected with [`Error::UnsupportedNodeKind`]):
//! - `{{else}}`, `{{^inverse}}` sections.
//! - Partials, comments, unescaped `{{{ }}}` output.
//! - Any other block helper (`with`, `lookup`, custom helpers).
//!
//! Output semantics:
//! - Emitted fragments are joined with a single space, so inter-tag
//!   whitespace differs from the source template.
//! - Inside `each`, naming the loop variable (or the collection path)
//!   emits `loop.index0`.
//! - An `each` block without a collection path produces nothing.
//!
//! The pipeline is `parser::parse` (or `tree::nodes_from_json` for trees
//! produced elsewhere) followed by [`Transpiler::render`].

pub mod ast;
pub mod config;
pub mod document;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod syntax;
pub mod transpile;
pub mod tree;

pub use ast::{BlockKind, Node, Template};
pub use config::TranspileOptions;
pub use document::{component_document, ComponentHeader};
pub use error::{Error, Result};
pub use syntax::TargetSyntax;
pub use transpile::Transpiler;

/// Parse Handlebars `source` and emit Twig with default options.
pub fn transpile(source: &str) -> Result<String> {
    transpile_with_options(source, &TranspileOptions::default())
}

pub fn transpile_with_options(source: &str, options: &TranspileOptions) -> Result<String> {
    let tree = parser::Parser::new(source)?
        .with_max_depth(options.max_depth)
        .parse()?;
    Transpiler::new(options.clone()).render(&tree)
}

use crate::ast::{BlockKind, Node};
use crate::config::TranspileOptions;
use crate::error::{Error, Result};
use crate::scope::{iterator_for, ScopeStack};
use tracing::{debug, trace, warn};

/// Converts parsed Handlebars node trees into Twig source.
///
/// Holds only options; every `render` call builds its own scope stack and
/// output buffer.
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    options: TranspileOptions,
}

impl Transpiler {
    pub fn new(options: TranspileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TranspileOptions {
        &self.options
    }

    /// Emits the whole tree. Emitted fragments are joined with a single space.
    pub fn render(&self, nodes: &[Node]) -> Result<String> {
        let mut walker = Walker {
            options: &self.options,
            buffer: Vec::new(),
            depth: 0,
        };
        let mut scopes = ScopeStack::new();
        walker.walk(nodes, &mut scopes)?;
        debug_assert_eq!(scopes.depth(), 0);
        Ok(walker.buffer.join(" "))
    }
}

/// Per-call state.
struct Walker<'o> {
    options: &'o TranspileOptions,
    buffer: Vec<String>,
    depth: usize,
}

impl Walker<'_> {
    fn walk(&mut self, nodes: &[Node], scopes: &mut ScopeStack) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text { value } => self.buffer.push(value.clone()),
                Node::Variable { name } => self.variable(name, scopes),
                Node::Block {
                    kind,
                    args,
                    children,
                } => self.block(*kind, args.as_deref(), children, scopes)?,
            }
        }
        Ok(())
    }

    fn variable(&mut self, name: &str, scopes: &ScopeStack) {
        let syntax = &self.options.syntax;
        let resolved = scopes.resolve(name, &syntax.loop_index);
        trace!(name, resolved = %resolved, "resolved variable");
        let fragment = syntax.interpolate(&resolved);
        self.buffer.push(fragment);
    }

    fn block(
        &mut self,
        kind: BlockKind,
        args: Option<&str>,
        children: &[Node],
        scopes: &mut ScopeStack,
    ) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }
        debug!(kind = kind.as_str(), args, depth = self.depth, "emitting block");

        self.depth += 1;
        let result = match kind {
            BlockKind::If => self.conditional(args, false, children, scopes),
            BlockKind::Unless => self.conditional(args, true, children, scopes),
            BlockKind::Each => self.each(args, children, scopes),
        };
        self.depth -= 1;
        result
    }

    fn conditional(
        &mut self,
        args: Option<&str>,
        negate: bool,
        children: &[Node],
        scopes: &mut ScopeStack,
    ) -> Result<()> {
        let syntax = &self.options.syntax;
        let cond = args.unwrap_or_default();
        let open = if negate {
            syntax.open_if_not(cond)
        } else {
            syntax.open_if(cond)
        };
        self.buffer.push(open);
        self.walk(children, scopes)?;
        let close = self.options.syntax.end_if();
        self.buffer.push(close);
        Ok(())
    }

    fn each(&mut self, args: Option<&str>, children: &[Node], scopes: &mut ScopeStack) -> Result<()> {
        let Some((iterable, iterator)) = args.and_then(|a| Some((a.trim(), iterator_for(a)?))) else {
            warn!(args, "skipping each block without a collection path");
            return Ok(());
        };

        let open = self.options.syntax.open_for(&iterator, iterable);
        self.buffer.push(open);
        {
            let mut scope = scopes.enter(iterator, iterable);
            self.walk(children, &mut scope)?;
        }
        let close = self.options.syntax.end_for();
        self.buffer.push(close);
        Ok(())
    }
}

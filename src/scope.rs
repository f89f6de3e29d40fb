//! Iterator scoping for `each` blocks.
//!
//! Inside `{{#each items}}` Handlebars refers to the current element as
//! `this`; Twig needs a named loop variable instead. Each `each` block binds
//! a one-letter iterator, and variable references inside the body are
//! rewritten against the innermost one.

use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

/// One active `each` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopScope {
    pub iterator: String,
    /// The collection path exactly as written in the block arguments.
    pub collection: String,
}

/// Active loop scopes, innermost last.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<LoopScope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn top(&self) -> Option<&LoopScope> {
        self.scopes.last()
    }

    /// Binds `iterator` over `collection` until the returned guard is dropped.
    pub fn enter(
        &mut self,
        iterator: impl Into<String>,
        collection: impl Into<String>,
    ) -> ScopeGuard<'_> {
        self.scopes.push(LoopScope {
            iterator: iterator.into(),
            collection: collection.into(),
        });
        ScopeGuard { stack: self }
    }

    /// Rewrites a Handlebars variable path for the current scope.
    ///
    /// Only the innermost scope is consulted. Referencing the loop by its
    /// iterator or its collection path yields `loop_index`, `this` yields the
    /// iterator, and `this.x` yields `<iterator>.x`.
    pub fn resolve<'a>(&self, name: &'a str, loop_index: &'a str) -> Cow<'a, str> {
        let Some(top) = self.top() else {
            return Cow::Borrowed(name);
        };

        if name == top.iterator {
            Cow::Borrowed(loop_index)
        } else if name == "this" {
            Cow::Owned(top.iterator.clone())
        } else if let Some(rest) = name.strip_prefix("this.") {
            Cow::Owned(format!("{}.{}", top.iterator, rest))
        } else if name == top.collection {
            Cow::Borrowed(loop_index)
        } else {
            Cow::Borrowed(name)
        }
    }
}

/// Pops its iterator on drop, so the stack stays balanced when the walk
/// inside the block bails out with `?` or unwinds.
pub struct ScopeGuard<'a> {
    stack: &'a mut ScopeStack,
}

impl Deref for ScopeGuard<'_> {
    type Target = ScopeStack;

    fn deref(&self) -> &ScopeStack {
        &*self.stack
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut ScopeStack {
        &mut *self.stack
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.stack.scopes.pop();
    }
}

/// Derives the loop variable for an `each` collection path: the first
/// character of its last dotted segment (`properties.items` -> `i`).
///
/// Returns `None` when there is no such character, e.g. `""` or `"items."`.
pub fn iterator_for(args: &str) -> Option<String> {
    let segment = args.trim().rsplit('.').next()?;
    segment.chars().next().map(String::from)
}

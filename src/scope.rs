//! Lexical scope records.
//!
//! Scopes are stored in an arena and referenced by [`ScopeId`]; the parent
//! relation is an index, not a live back-reference. The parser creates one
//! [`ScopeKind::Global`] scope per parse and attaches every other scope
//! beneath it; scopes are never destroyed during parsing — the whole tree
//! is handed to the caller inside the
//! [`TranslationUnit`](crate::ast::TranslationUnit).

use std::ops::Index;

/// Index of a scope in its [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// What kind of construct a scope belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Namespace,
    Class,
    Block,
}

/// A lexical nesting unit.
#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Namespace/class scopes carry the declared name; blocks are anonymous.
    pub name: Option<String>,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
}

/// Arena owning every scope of one parse.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope and links it under `parent` (only the global scope
    /// has no parent).
    pub fn insert(
        &mut self,
        kind: ScopeKind,
        name: Option<String>,
        parent: Option<ScopeId>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            kind,
            name,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.scopes[parent.0].children.push(id);
        }
        id
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl Index<ScopeId> for ScopeArena {
    type Output = Scope;

    fn index(&self, id: ScopeId) -> &Scope {
        self.get(id)
    }
}

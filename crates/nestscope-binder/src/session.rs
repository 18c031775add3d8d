//! Free-function interface for drivers.
//!
//! Thin wrappers over [`ScopeTree`] so a driver can sequence a session as a
//! flat list of calls. The tree is always passed explicitly; there is no
//! ambient session state.

use crate::error::BindingError;
use crate::resolver::Resolution;
use crate::scope::{DeclarationIntent, ScopeId, ScopeNode};
use crate::tree::ScopeTree;
use nestscope_common::Name;

/// A tree holding only a freshly created module frame.
#[must_use]
pub fn new_session() -> ScopeTree {
    ScopeTree::new()
}

/// Push a child of the current frame and return its id.
pub fn enter_scope(tree: &mut ScopeTree) -> Result<ScopeId, BindingError> {
    tree.push_child()
}

/// Pop the current frame. Fails with [`BindingError::PopAtRoot`] at the module frame.
pub fn exit_scope(tree: &mut ScopeTree) -> Result<ScopeNode, BindingError> {
    tree.pop()
}

pub fn resolve_write(
    tree: &mut ScopeTree,
    name: impl Into<Name>,
    intent: DeclarationIntent,
) -> Result<Resolution, BindingError> {
    tree.resolve_write(name, intent)
}

pub fn resolve_read(tree: &ScopeTree, name: &str) -> Result<Resolution, BindingError> {
    tree.resolve_read(name)
}

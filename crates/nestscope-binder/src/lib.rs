//! Lexical scope frames and static name resolution.
//!
//! This crate is organized into several modules:
//! - `scope` - `ScopeNode`, one lexical frame and its binding records
//! - `tree` - `ScopeTree`, the live chain of frames with push/pop
//! - `resolver` - local, enclosing and global binding rules, and reads
//! - `error` - `BindingError` and its diagnostic conversion
//! - `session` - free-function interface for drivers

pub mod error;
pub mod resolver;
pub mod scope;
pub mod session;
pub mod tree;

pub use error::BindingError;
pub use resolver::{AccessKind, Resolution};
pub use scope::{BindingRecord, DeclarationIntent, ScopeId, ScopeKind, ScopeNode};
pub use session::{enter_scope, exit_scope, new_session, resolve_read, resolve_write};
pub use tree::{ScopeChain, ScopeTree, ScopeTreeStats};

#[cfg(test)]
#[path = "../tests/scope_node_tests.rs"]
mod scope_node_tests;
#[cfg(test)]
#[path = "../tests/scope_tree_tests.rs"]
mod scope_tree_tests;
#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;
#[cfg(test)]
#[path = "../tests/session_tests.rs"]
mod session_tests;
#[cfg(test)]
#[path = "../tests/error_tests.rs"]
mod error_tests;

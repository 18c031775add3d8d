//! Values for resolved bindings.
//!
//! The resolver only says which frame owns a binding. The driver keeps the
//! values itself, keyed by that frame, and drops a frame's values when the
//! frame is popped.

use nestscope_binder::ScopeId;
use nestscope_common::Name;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct ValueStore {
    frames: FxHashMap<ScopeId, FxHashMap<Name, String>>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for `name` in `scope`, returning the previous value.
    pub fn store(&mut self, scope: ScopeId, name: Name, value: impl Into<String>) -> Option<String> {
        self.frames
            .entry(scope)
            .or_default()
            .insert(name, value.into())
    }

    pub fn get(&self, scope: ScopeId, name: &str) -> Option<&str> {
        self.frames
            .get(&scope)
            .and_then(|values| values.get(name))
            .map(String::as_str)
    }

    /// Forget every value held by `scope`. Returns how many were dropped.
    pub fn discard_frame(&mut self, scope: ScopeId) -> usize {
        self.frames.remove(&scope).map_or(0, |values| values.len())
    }

    pub fn len(&self) -> usize {
        self.frames.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! The live chain of frames for one resolution session.
//!
//! Frames follow stack discipline: entering a nested definition pushes a
//! child of the current frame, leaving it pops that frame again. Only the
//! chain from the module frame to the current frame is alive at any time, so
//! the chain is stored as a stack whose ids strictly increase from root to
//! top. Lookups by id are a binary search on that stack.

use crate::error::BindingError;
use crate::scope::{ScopeId, ScopeNode};
use nestscope_common::Name;
use nestscope_common::limits::{INITIAL_FRAME_CAPACITY, MAX_SCOPE_DEPTH};
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Owns the module frame and every live nested frame.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    /// `frames[0]` is the module frame, the last entry is the current frame.
    frames: Vec<ScopeNode>,
    pub(crate) next_id: u32,
    max_depth: usize,
    /// Parent hops a walk may take: every live frame once.
    walk_limit: usize,
}

/// Snapshot of the tree's size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScopeTreeStats {
    pub live_frames: usize,
    pub depth: usize,
    pub owned_bindings: usize,
    pub declarations: usize,
    pub frames_created: u32,
}

impl ScopeTreeStats {
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Scope Tree Summary:\n\
             - Live frames: {}\n\
             - Current depth: {}\n\
             - Owned bindings: {}\n\
             - Declarations: {}\n\
             - Frames created this session: {}",
            self.live_frames,
            self.depth,
            self.owned_bindings,
            self.declarations,
            self.frames_created
        )
    }
}

impl ScopeTree {
    /// Start a session with a fresh module frame.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_depth(MAX_SCOPE_DEPTH)
    }

    /// Like [`ScopeTree::new`] with a custom nesting cap.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        let mut frames = Vec::with_capacity(INITIAL_FRAME_CAPACITY);
        frames.push(ScopeNode::module());
        Self {
            frames,
            next_id: 1,
            max_depth,
            walk_limit: max_depth.saturating_add(1),
        }
    }

    /// Push an unlabeled child of the current frame.
    pub fn push_child(&mut self) -> Result<ScopeId, BindingError> {
        self.push_frame(None)
    }

    /// Push a child of the current frame with a label for rendering.
    pub fn push_child_named(&mut self, label: impl Into<Name>) -> Result<ScopeId, BindingError> {
        self.push_frame(Some(label.into()))
    }

    fn push_frame(&mut self, label: Option<Name>) -> Result<ScopeId, BindingError> {
        if self.depth() >= self.max_depth {
            return Err(BindingError::ScopeDepthExceeded {
                limit: self.max_depth,
            });
        }
        let id = ScopeId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(BindingError::ScopeIdsExhausted { created: self.next_id })?;
        let frame = ScopeNode::function(id, self.current_frame(), label);
        debug!(
            scope = %id,
            parent = %self.current_id(),
            depth = frame.depth,
            label = frame.label.as_ref().map(Name::as_str),
            "enter scope"
        );
        self.frames.push(frame);
        Ok(id)
    }

    /// Discard the current frame and hand it back.
    pub fn pop(&mut self) -> Result<ScopeNode, BindingError> {
        if self.frames.len() == 1 {
            return Err(BindingError::PopAtRoot);
        }
        let frame = self.frames.pop().ok_or(BindingError::PopAtRoot)?;
        debug!(
            scope = %frame.id,
            bindings = frame.names.len(),
            "exit scope"
        );
        Ok(frame)
    }

    #[must_use]
    pub fn current_frame(&self) -> &ScopeNode {
        // `frames` always holds the module frame.
        &self.frames[self.frames.len() - 1]
    }

    pub(crate) fn current_frame_mut(&mut self) -> &mut ScopeNode {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    #[must_use]
    pub fn current_id(&self) -> ScopeId {
        self.current_frame().id
    }

    #[must_use]
    pub fn root_frame(&self) -> &ScopeNode {
        &self.frames[0]
    }

    pub(crate) fn root_frame_mut(&mut self) -> &mut ScopeNode {
        &mut self.frames[0]
    }

    #[must_use]
    pub fn is_root_current(&self) -> bool {
        self.frames.len() == 1
    }

    /// Number of nested frames between the module frame and the current one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Look up a live frame. Popped frames are gone.
    #[must_use]
    pub fn frame(&self, id: ScopeId) -> Option<&ScopeNode> {
        self.frames
            .binary_search_by_key(&id, |frame| frame.id)
            .ok()
            .map(|index| &self.frames[index])
    }

    /// Follow parent links starting at `start` (inclusive).
    #[must_use]
    pub fn chain(&self, start: Option<ScopeId>) -> ScopeChain<'_> {
        ScopeChain {
            tree: self,
            next: start,
            steps: 0,
        }
    }

    /// Strict ancestors of `id`, nearest first, ending with the module frame.
    #[must_use]
    pub fn ancestors(&self, id: ScopeId) -> SmallVec<[ScopeId; 8]> {
        let parent = self.frame(id).and_then(ScopeNode::parent);
        self.chain(parent).map(ScopeNode::id).collect()
    }

    #[must_use]
    pub fn stats(&self) -> ScopeTreeStats {
        let mut stats = ScopeTreeStats {
            live_frames: self.frames.len(),
            depth: self.depth(),
            frames_created: self.next_id,
            ..ScopeTreeStats::default()
        };
        for frame in &self.frames {
            for record in frame.names.values() {
                if record.owns_binding {
                    stats.owned_bindings += 1;
                }
                if record.intent.is_some() {
                    stats.declarations += 1;
                }
            }
        }
        stats
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a parent chain, nearest frame first.
pub struct ScopeChain<'a> {
    tree: &'a ScopeTree,
    next: Option<ScopeId>,
    steps: usize,
}

impl<'a> Iterator for ScopeChain<'a> {
    type Item = &'a ScopeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        if self.steps >= self.tree.walk_limit {
            self.next = None;
            return None;
        }
        self.steps += 1;
        let frame = self.tree.frame(id)?;
        trace!(scope = %id, hop = self.steps - 1, "walk scope");
        self.next = frame.parent;
        Some(frame)
    }
}

//! Centralized limits and thresholds for the scope resolver.
//!
//! Resolution is O(nesting depth) for every operation. These caps keep a
//! runaway driver (an enter without a matching exit inside a loop, say) from
//! growing the frame stack without bound.

/// Maximum number of frames below the module frame.
///
/// `ScopeTree::push_child` fails with `ScopeDepthExceeded` once the live
/// chain would grow past this many nested frames. `ScopeTree::with_max_depth`
/// overrides it per tree; parent-chain walks are bounded by the tree's own cap.
///
/// ```python
/// def a():
///     def b():
///         def c():
///             ...  # 4096 levels deep and the driver is told to stop
/// ```
pub const MAX_SCOPE_DEPTH: usize = 4096;

/// Initial capacity of the live frame stack.
pub const INITIAL_FRAME_CAPACITY: usize = 8;

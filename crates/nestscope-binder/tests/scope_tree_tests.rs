use super::*;
use nestscope_common::limits::MAX_SCOPE_DEPTH;

#[test]
fn test_new_tree_has_only_root() {
    let tree = ScopeTree::new();
    assert!(tree.is_root_current());
    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.current_id(), ScopeId::ROOT);
    assert_eq!(tree.root_frame().kind(), ScopeKind::Module);
    assert_eq!(tree.stats().live_frames, 1);
}

#[test]
fn test_push_makes_child_current() {
    let mut tree = ScopeTree::new();
    let s1 = tree.push_child_named("scope_test").unwrap();
    assert_eq!(tree.current_id(), s1);
    assert_eq!(tree.current_frame().parent(), Some(ScopeId::ROOT));

    let s2 = tree.push_child().unwrap();
    assert_eq!(tree.current_frame().parent(), Some(s1));
    assert_eq!(tree.depth(), 2);
    assert!(!tree.is_root_current());
    assert!(s2 > s1);
}

#[test]
fn test_pop_restores_parent() {
    let mut tree = ScopeTree::new();
    let s1 = tree.push_child().unwrap();
    let s2 = tree.push_child_named("do_local").unwrap();

    let popped = tree.pop().unwrap();
    assert_eq!(popped.id(), s2);
    assert_eq!(popped.label().map(|l| l.as_str()), Some("do_local"));
    assert_eq!(tree.current_id(), s1);
    assert!(tree.frame(s2).is_none());

    tree.pop().unwrap();
    assert!(tree.is_root_current());
}

#[test]
fn test_pop_at_root_fails() {
    let mut tree = ScopeTree::new();
    assert_eq!(tree.pop().unwrap_err(), BindingError::PopAtRoot);

    tree.push_child().unwrap();
    tree.pop().unwrap();
    assert_eq!(tree.pop().unwrap_err(), BindingError::PopAtRoot);
    // Still usable afterwards.
    assert!(tree.push_child().is_ok());
}

#[test]
fn test_ids_are_never_reused() {
    let mut tree = ScopeTree::new();
    let s1 = tree.push_child().unwrap();
    let s2 = tree.push_child().unwrap();
    tree.pop().unwrap();
    let s3 = tree.push_child().unwrap();
    assert_ne!(s2, s3);
    assert_eq!(tree.current_frame().parent(), Some(s1));
    assert_eq!(tree.stats().frames_created, 4);
}

#[test]
fn test_frame_lookup_only_sees_live_frames() {
    let mut tree = ScopeTree::new();
    let s1 = tree.push_child().unwrap();
    let s2 = tree.push_child().unwrap();
    assert_eq!(tree.frame(ScopeId::ROOT).map(ScopeNode::id), Some(ScopeId::ROOT));
    assert_eq!(tree.frame(s1).map(ScopeNode::id), Some(s1));
    assert_eq!(tree.frame(s2).map(ScopeNode::id), Some(s2));
    assert!(tree.frame(ScopeId(42)).is_none());
    assert!(tree.frame(ScopeId(u32::MAX)).is_none());
}

#[test]
fn test_ancestors_nearest_first() {
    let mut tree = ScopeTree::new();
    let s1 = tree.push_child().unwrap();
    let s2 = tree.push_child().unwrap();
    let s3 = tree.push_child().unwrap();

    assert_eq!(tree.ancestors(s3).as_slice(), &[s2, s1, ScopeId::ROOT]);
    assert_eq!(tree.ancestors(s1).as_slice(), &[ScopeId::ROOT]);
    assert!(tree.ancestors(ScopeId::ROOT).is_empty());
}

#[test]
fn test_chain_ends_at_root() {
    let mut tree = ScopeTree::new();
    tree.push_child().unwrap();
    tree.push_child().unwrap();
    let chain: Vec<ScopeId> = tree.chain(Some(tree.current_id())).map(ScopeNode::id).collect();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.last(), Some(&ScopeId::ROOT));
    assert_eq!(tree.chain(None).count(), 0);
}

#[test]
fn test_depth_limit() {
    let mut tree = ScopeTree::with_max_depth(2);
    tree.push_child().unwrap();
    tree.push_child().unwrap();
    assert_eq!(
        tree.push_child().unwrap_err(),
        BindingError::ScopeDepthExceeded { limit: 2 }
    );
    assert_eq!(tree.depth(), 2);

    tree.pop().unwrap();
    assert!(tree.push_child().is_ok());
}

#[test]
fn test_default_depth_limit() {
    let mut tree = ScopeTree::new();
    for _ in 0..MAX_SCOPE_DEPTH {
        tree.push_child().unwrap();
    }
    assert!(tree.push_child().unwrap_err().is_fatal());

    let deepest = tree.current_id();
    assert_eq!(tree.ancestors(deepest).len(), MAX_SCOPE_DEPTH);
}

#[test]
fn test_raised_depth_limit_walks_whole_chain() {
    let depth = MAX_SCOPE_DEPTH + 500;
    let mut tree = ScopeTree::with_max_depth(depth + 1);
    tree.resolve_write("spam", DeclarationIntent::Local).unwrap();
    let outer = tree.push_child().unwrap();
    tree.resolve_write("eggs", DeclarationIntent::Local).unwrap();
    for _ in 1..depth {
        tree.push_child().unwrap();
    }
    assert_eq!(tree.depth(), depth);

    let read = tree.resolve_read("spam").unwrap();
    assert_eq!(read.target, ScopeId::ROOT);
    assert_eq!(read.hops as usize, depth);

    let write = tree.resolve_write("eggs", DeclarationIntent::Enclosing).unwrap();
    assert_eq!(write.target, outer);
    assert_eq!(write.hops as usize, depth - 1);

    assert_eq!(tree.ancestors(tree.current_id()).len(), depth);
    assert!(tree.push_child().is_ok());
    assert!(tree.push_child().unwrap_err().is_fatal());
}

#[test]
fn test_scope_ids_exhausted() {
    let mut tree = ScopeTree::new();
    tree.next_id = u32::MAX - 1;
    let last = tree.push_child().unwrap();
    assert_eq!(last, ScopeId(u32::MAX - 1));
    tree.pop().unwrap();

    let err = tree.push_child().unwrap_err();
    assert_eq!(err, BindingError::ScopeIdsExhausted { created: u32::MAX });
    assert!(err.is_fatal());
    assert!(tree.is_root_current());
    assert_eq!(tree.stats().live_frames, 1);
}

#[test]
fn test_stats_counts_live_frames_only() {
    let mut tree = ScopeTree::new();
    tree.push_child().unwrap();
    tree.resolve_write("spam", DeclarationIntent::Local).unwrap();
    tree.push_child().unwrap();
    tree.resolve_write("spam", DeclarationIntent::Global).unwrap();
    tree.resolve_write("eggs", DeclarationIntent::Local).unwrap();

    let stats = tree.stats();
    assert_eq!(stats.live_frames, 3);
    assert_eq!(stats.depth, 2);
    // spam in S1, spam in root, eggs in S2
    assert_eq!(stats.owned_bindings, 3);
    // Local spam in S1, Global spam and Local eggs in S2
    assert_eq!(stats.declarations, 3);

    tree.pop().unwrap();
    let stats = tree.stats();
    assert_eq!(stats.live_frames, 2);
    assert_eq!(stats.owned_bindings, 2);
    assert_eq!(stats.declarations, 1);
    assert!(stats.summary().contains("Live frames: 2"));
}

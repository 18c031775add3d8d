use crate::driver::{Driver, TraceEvent, run_demo};
use crate::reporter::Reporter;
use nestscope_binder::{BindingError, DeclarationIntent, ScopeId, ScopeTree};

#[test]
fn test_demo_prints_expected_lines() {
    let report = run_demo().unwrap();
    assert_eq!(
        report.lines,
        vec![
            "after local assignment: Test spam",
            "after nonlocal assignment: non local value",
            "after global assignment: non local value",
            "at module scope: global value",
        ]
    );
}

#[test]
fn test_demo_write_targets() {
    let report = run_demo().unwrap();
    let writes: Vec<(String, ScopeId)> = report
        .events
        .iter()
        .filter_map(|event| match event {
            TraceEvent::Write {
                resolution,
                target_label,
                ..
            } => Some((target_label.clone(), resolution.target)),
            _ => None,
        })
        .collect();

    assert_eq!(writes.len(), 4);
    assert_eq!(writes[0].0, "scope_test");
    assert_eq!(writes[1].0, "do_local");
    assert_eq!(writes[2].0, "scope_test");
    assert_eq!(writes[2].1, writes[0].1);
    assert_eq!(writes[3].0, "<module>");
    assert_eq!(writes[3].1, ScopeId::ROOT);
}

#[test]
fn test_demo_final_read_is_from_root() {
    let report = run_demo().unwrap();
    let last_read = report
        .events
        .iter()
        .rev()
        .find_map(|event| match event {
            TraceEvent::Read { resolution, .. } => Some(resolution.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(last_read.from, ScopeId::ROOT);
    assert_eq!(last_read.target, ScopeId::ROOT);
    assert_eq!(last_read.hops, 0);
}

#[test]
fn test_demo_stats_snapshot() {
    let stats = run_demo().unwrap().stats.unwrap();
    // root and scope_test
    assert_eq!(stats.live_frames, 2);
    assert_eq!(stats.depth, 1);
    // spam in scope_test and in the module frame
    assert_eq!(stats.owned_bindings, 2);
    assert_eq!(stats.frames_created, 5);
}

#[test]
fn test_demo_json_shape() {
    let report = run_demo().unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["lines"].as_array().unwrap().len(), 4);
    assert_eq!(json["events"][0]["event"], "enter");
    assert_eq!(json["events"][0]["label"], "scope_test");
    assert_eq!(json["events"][1]["event"], "write");
    assert_eq!(json["events"][1]["resolution"]["intent"], "local");
    assert!(json["stats"]["live_frames"].is_number());
}

#[test]
fn test_exit_drops_frame_values() {
    let mut driver = Driver::new();
    driver.enter("outer").unwrap();
    driver.assign("spam", "outer value").unwrap();
    driver.enter("inner").unwrap();
    driver.assign("spam", "inner value").unwrap();
    driver.assign("eggs", "inner only").unwrap();
    assert_eq!(driver.values().len(), 3);

    driver.exit().unwrap();
    assert_eq!(driver.values().len(), 1);
    assert_eq!(driver.read("spam").unwrap(), "outer value");
    assert!(driver.read("eggs").is_err());
}

#[test]
fn test_enclosing_without_binding_surfaces_binding_error() {
    let mut driver = Driver::new();
    driver.enter("outer").unwrap();
    driver.enter("inner").unwrap();
    let err = driver
        .assign_as("spam", DeclarationIntent::Enclosing, "value")
        .unwrap_err();
    let binding = err.downcast_ref::<BindingError>().unwrap();
    assert!(matches!(
        binding,
        BindingError::NoBindingFoundInEnclosingScopes { .. }
    ));
    assert!(err.to_string().contains("failed to assign 'spam' as enclosing"));
    // The driver keeps working.
    assert!(driver.assign("spam", "local").is_ok());
}

#[test]
fn test_unbalanced_exit() {
    let mut driver = Driver::new();
    let err = driver.exit().unwrap_err();
    assert_eq!(
        err.downcast_ref::<BindingError>(),
        Some(&BindingError::PopAtRoot)
    );
}

#[test]
fn test_global_declaration_then_plain_assignment() {
    let mut driver = Driver::new();
    driver.enter("f").unwrap();
    driver
        .assign_as("counter", DeclarationIntent::Global, "0")
        .unwrap();
    let res = driver.assign("counter", "1").unwrap();
    assert_eq!(res.target, ScopeId::ROOT);
    driver.exit().unwrap();
    assert_eq!(driver.read("counter").unwrap(), "1");
}

#[test]
fn test_depth_limited_driver() {
    let mut driver = Driver::with_tree(ScopeTree::with_max_depth(1));
    driver.enter("a").unwrap();
    let err = driver.enter("b").unwrap_err();
    assert!(err.downcast_ref::<BindingError>().unwrap().is_fatal());
    assert_eq!(driver.tree().depth(), 1);
}

#[test]
fn test_render_plain_lines() {
    let report = run_demo().unwrap();
    let text = Reporter::new(false).render_report(&report, false);
    assert_eq!(text.lines().count(), 4);
    assert!(text.ends_with("at module scope: global value\n"));
}

#[test]
fn test_render_trace_indents_by_depth() {
    let report = run_demo().unwrap();
    let text = Reporter::new(false).render_report(&report, true);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "enter scope_test #1");
    assert!(lines[1].starts_with("  write spam [local] #1 -> #1 (0 hops) scope_test"));
    assert!(lines[2].starts_with("  enter do_local #2"));
    assert!(lines[3].starts_with("    write spam [local]"));
    assert!(lines[4].starts_with("  exit  do_local #2, 1 value(s) dropped"));
    assert!(text.contains("write spam [enclosing] #3 -> #1 (1 hop) scope_test = \"non local value\""));
    assert!(text.contains("write spam [global] #4 -> #0 (2 hops) <module> = \"global value\""));
    assert_eq!(*lines.last().unwrap(), "print at module scope: global value (<module>)");
}

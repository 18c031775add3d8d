//! Demonstration driver.
//!
//! Replays a nested-function program as an ordered sequence of calls against
//! one [`ScopeTree`]: enter a definition's frame when it is called, resolve
//! every read and write, pop the frame when the body finishes. Values live
//! in a [`ValueStore`] keyed by the frame each resolution names.

use anyhow::{Context, Result, anyhow};
use nestscope_binder::{DeclarationIntent, Resolution, ScopeId, ScopeTree, ScopeTreeStats};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::value_store::ValueStore;

/// One step of a replay, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Enter {
        scope: ScopeId,
        label: String,
        depth: u32,
    },
    Exit {
        scope: ScopeId,
        label: String,
        dropped_values: usize,
    },
    Write {
        resolution: Resolution,
        target_label: String,
        value: String,
    },
    Read {
        resolution: Resolution,
        target_label: String,
        value: String,
    },
    Print {
        line: String,
        scope_label: String,
    },
}

/// Everything a replay produced.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DemoReport {
    pub events: Vec<TraceEvent>,
    pub lines: Vec<String>,
    /// Tree statistics taken while the outer function's frame was still live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ScopeTreeStats>,
}

pub struct Driver {
    tree: ScopeTree,
    values: ValueStore,
    labels: FxHashMap<ScopeId, String>,
    report: DemoReport,
}

impl Driver {
    pub fn new() -> Self {
        Self::with_tree(ScopeTree::new())
    }

    pub fn with_tree(tree: ScopeTree) -> Self {
        let mut labels = FxHashMap::default();
        labels.insert(ScopeId::ROOT, tree.root_frame().display_name());
        Self {
            tree,
            values: ValueStore::new(),
            labels,
            report: DemoReport::default(),
        }
    }

    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    fn label_of(&self, scope: ScopeId) -> String {
        self.labels
            .get(&scope)
            .cloned()
            .unwrap_or_else(|| scope.to_string())
    }

    /// Enter the body of the definition called `label`.
    pub fn enter(&mut self, label: &str) -> Result<ScopeId> {
        let scope = self
            .tree
            .push_child_named(label)
            .with_context(|| format!("failed to enter '{label}'"))?;
        self.labels.insert(scope, label.to_string());
        self.report.events.push(TraceEvent::Enter {
            scope,
            label: label.to_string(),
            depth: self.tree.current_frame().depth(),
        });
        Ok(scope)
    }

    /// Leave the current frame, dropping the values it owned.
    pub fn exit(&mut self) -> Result<ScopeId> {
        let frame = self.tree.pop().context("unbalanced scope exit")?;
        let scope = frame.id();
        let dropped_values = self.values.discard_frame(scope);
        let label = self.labels.remove(&scope).unwrap_or_else(|| frame.display_name());
        debug!(scope = %scope, dropped_values, "frame values dropped");
        self.report.events.push(TraceEvent::Exit {
            scope,
            label,
            dropped_values,
        });
        Ok(scope)
    }

    /// Plain assignment, honoring any declaration already made in this frame.
    pub fn assign(&mut self, name: &str, value: &str) -> Result<Resolution> {
        let resolution = self
            .tree
            .resolve_assignment(name)
            .with_context(|| format!("failed to assign '{name}'"))?;
        self.record_write(resolution, value)
    }

    /// Declare `name` with `intent` in the current frame and assign to it.
    pub fn assign_as(
        &mut self,
        name: &str,
        intent: DeclarationIntent,
        value: &str,
    ) -> Result<Resolution> {
        let resolution = self
            .tree
            .resolve_write(name, intent)
            .with_context(|| format!("failed to assign '{name}' as {intent}"))?;
        self.record_write(resolution, value)
    }

    fn record_write(&mut self, resolution: Resolution, value: &str) -> Result<Resolution> {
        self.values
            .store(resolution.target, resolution.name.clone(), value);
        let target_label = self.label_of(resolution.target);
        self.report.events.push(TraceEvent::Write {
            resolution: resolution.clone(),
            target_label,
            value: value.to_string(),
        });
        Ok(resolution)
    }

    /// Read the value `name` resolves to from the current frame.
    pub fn read(&mut self, name: &str) -> Result<String> {
        let resolution = self
            .tree
            .resolve_read(name)
            .with_context(|| format!("failed to read '{name}'"))?;
        let value = self
            .values
            .get(resolution.target, name)
            .ok_or_else(|| {
                anyhow!(
                    "'{name}' is bound in {} but holds no value",
                    self.label_of(resolution.target)
                )
            })?
            .to_string();
        let target_label = self.label_of(resolution.target);
        self.report.events.push(TraceEvent::Read {
            resolution,
            target_label,
            value: value.clone(),
        });
        Ok(value)
    }

    /// Read `name` and emit `"{prefix} {value}"` as an output line.
    pub fn print(&mut self, prefix: &str, name: &str) -> Result<String> {
        let value = self.read(name)?;
        let line = format!("{prefix} {value}");
        info!(%line, "print");
        let scope_label = self.label_of(self.tree.current_id());
        self.report.lines.push(line.clone());
        self.report.events.push(TraceEvent::Print {
            line: line.clone(),
            scope_label,
        });
        Ok(line)
    }

    pub fn snapshot_stats(&mut self) {
        self.report.stats = Some(self.tree.stats());
    }

    pub fn finish(self) -> DemoReport {
        self.report
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

const NAME: &str = "spam";

/// The three-way binding demonstration.
///
/// `scope_test` binds `spam` locally, then calls three nested definitions
/// that assign `spam` as a local, as an enclosing rebinding and as a global
/// rebinding, printing `spam` after each call. Finally `spam` is printed from
/// module scope, where only the global rebinding is visible.
///
/// Output prefixes are normalized to one `"<when>: <value>"` shape per line
/// (`after nonlocal assignment:`, and a separate `at module scope:` line)
/// rather than reproducing the Python demo's wording character for character.
pub fn run_demo() -> Result<DemoReport> {
    let mut driver = Driver::new();

    driver.enter("scope_test")?;
    driver.assign(NAME, "Test spam")?;

    driver.enter("do_local")?;
    driver.assign(NAME, "local value")?;
    driver.exit()?;
    driver.print("after local assignment:", NAME)?;

    driver.enter("do_nonlocal")?;
    driver.assign_as(NAME, DeclarationIntent::Enclosing, "non local value")?;
    driver.exit()?;
    driver.print("after nonlocal assignment:", NAME)?;

    driver.enter("do_global")?;
    driver.assign_as(NAME, DeclarationIntent::Global, "global value")?;
    driver.exit()?;
    driver.print("after global assignment:", NAME)?;

    driver.snapshot_stats();
    driver.exit()?;

    // Module scope is the root frame itself, the same frame global writes target.
    driver.print("at module scope:", NAME)?;

    Ok(driver.finish())
}

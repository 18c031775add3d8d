//! Lexical frames.
//!
//! A [`ScopeNode`] is one namespace: the module frame or the body of one
//! nested definition. It records, per name, the declaration intent written in
//! this frame and whether this frame owns the binding itself. No values are
//! stored here; the caller keeps values keyed by the frame a resolution names.

use crate::error::BindingError;
use nestscope_common::Name;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Identity of a frame within one session.
///
/// Ids are handed out in creation order and never reused, so a frame popped
/// earlier never aliases a sibling pushed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    /// The module frame. Exactly one per session, always the root.
    Module,
    /// A nested function-like definition.
    Function,
}

/// How a write to a name in a frame is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationIntent {
    /// Plain assignment: the binding lives in the frame doing the write.
    Local,
    /// Rebinds the nearest non-module enclosing frame that owns the name.
    Enclosing,
    /// Rebinds the module frame.
    Global,
}

impl DeclarationIntent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DeclarationIntent::Local => "local",
            DeclarationIntent::Enclosing => "enclosing",
            DeclarationIntent::Global => "global",
        }
    }
}

impl fmt::Display for DeclarationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a frame knows about one name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindingRecord {
    /// Intent declared for the name in this frame, if any.
    pub intent: Option<DeclarationIntent>,
    /// Whether the binding lives in this frame.
    pub owns_binding: bool,
}

/// A single lexical frame.
#[derive(Clone, Debug)]
pub struct ScopeNode {
    pub(crate) id: ScopeId,
    pub(crate) kind: ScopeKind,
    pub(crate) label: Option<Name>,
    pub(crate) parent: Option<ScopeId>,
    pub(crate) depth: u32,
    pub(crate) names: FxHashMap<Name, BindingRecord>,
}

impl ScopeNode {
    pub(crate) fn module() -> Self {
        Self {
            id: ScopeId::ROOT,
            kind: ScopeKind::Module,
            label: None,
            parent: None,
            depth: 0,
            names: FxHashMap::default(),
        }
    }

    pub(crate) fn function(id: ScopeId, parent: &ScopeNode, label: Option<Name>) -> Self {
        Self {
            id,
            kind: ScopeKind::Function,
            label,
            parent: Some(parent.id),
            depth: parent.depth + 1,
            names: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ScopeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    #[must_use]
    pub fn label(&self) -> Option<&Name> {
        self.label.as_ref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Number of parent hops from this frame to the module frame.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// Label if the driver gave one, otherwise the id.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.label, self.kind) {
            (Some(label), _) => label.to_string(),
            (None, ScopeKind::Module) => "<module>".to_string(),
            (None, ScopeKind::Function) => self.id.to_string(),
        }
    }

    #[must_use]
    pub fn record(&self, name: &str) -> Option<BindingRecord> {
        self.names.get(name).copied()
    }

    #[must_use]
    pub fn intent_of(&self, name: &str) -> Option<DeclarationIntent> {
        self.names.get(name).and_then(|record| record.intent)
    }

    /// Whether the binding for `name` lives in this exact frame.
    #[must_use]
    pub fn has_local_binding(&self, name: &str) -> bool {
        self.names.get(name).is_some_and(|record| record.owns_binding)
    }

    /// Fails if `name` already carries a different intent in this frame.
    pub fn check_intent(&self, name: &str, intent: DeclarationIntent) -> Result<(), BindingError> {
        match self.intent_of(name) {
            Some(existing) if existing != intent => Err(BindingError::RedeclarationConflict {
                name: Name::from(name),
                scope: self.id,
                existing,
                requested: intent,
            }),
            _ => Ok(()),
        }
    }

    /// Record `intent` for `name` in this frame.
    ///
    /// Repeating the intent already recorded is a no-op. A `Local` declaration
    /// makes this frame own the binding. Returns whether a binding was created
    /// here by this call.
    pub fn declare(
        &mut self,
        name: impl Into<Name>,
        intent: DeclarationIntent,
    ) -> Result<bool, BindingError> {
        let name = name.into();
        self.check_intent(name.as_str(), intent)?;
        let record = self.names.entry(name).or_default();
        record.intent = Some(intent);
        if intent == DeclarationIntent::Local && !record.owns_binding {
            record.owns_binding = true;
            return Ok(true);
        }
        Ok(false)
    }

    /// Make this frame own a binding for `name` without recording an intent.
    ///
    /// Returns whether the binding is new.
    pub fn bind(&mut self, name: impl Into<Name>) -> bool {
        let record = self.names.entry(name.into()).or_default();
        let created = !record.owns_binding;
        record.owns_binding = true;
        created
    }

    /// Names whose binding lives in this frame, sorted.
    #[must_use]
    pub fn bindings(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self
            .names
            .iter()
            .filter(|(_, record)| record.owns_binding)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Explicit declarations made in this frame, sorted by name.
    #[must_use]
    pub fn declarations(&self) -> Vec<(Name, DeclarationIntent)> {
        let mut decls: Vec<(Name, DeclarationIntent)> = self
            .names
            .iter()
            .filter_map(|(name, record)| record.intent.map(|intent| (name.clone(), intent)))
            .collect();
        decls.sort_by(|a, b| a.0.cmp(&b.0));
        decls
    }
}

//! Binding rules.
//!
//! Resolution maps `(current frame, name, access)` to the frame that owns the
//! binding. It is static: the answer depends only on the declarations and
//! writes already recorded in the live frames.
//!
//! Writes:
//! - `Local` binds in the current frame and never looks outward.
//! - `Enclosing` rebinds the nearest strict ancestor, other than the module
//!   frame, that owns the name. A frame on the way that declared the name
//!   `Global` ends the search.
//! - `Global` binds in the module frame, creating the binding if needed. The
//!   current frame records the intent but owns nothing.
//!
//! Reads walk outward from the current frame to the nearest owner, the module
//! frame included. A frame on the way that declared the name `Global` sends
//! the lookup straight to the module frame.

use crate::error::BindingError;
use crate::scope::{DeclarationIntent, ScopeId};
use crate::tree::ScopeTree;
use nestscope_common::Name;
use serde::Serialize;
use tracing::{debug, debug_span, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    Read,
    Write,
}

/// Where one access to a name lands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub name: Name,
    pub access: AccessKind,
    /// Intent the write was resolved under; `None` for reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<DeclarationIntent>,
    /// Frame the access happened in.
    pub from: ScopeId,
    /// Frame that owns the binding.
    pub target: ScopeId,
    /// Parent hops from `from` to `target`.
    pub hops: u32,
    /// Whether a write created the binding in `target`.
    pub created: bool,
}

impl Resolution {
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.from == self.target
    }
}

impl ScopeTree {
    /// Resolve a write to `name` in the current frame under `intent`.
    pub fn resolve_write(
        &mut self,
        name: impl Into<Name>,
        intent: DeclarationIntent,
    ) -> Result<Resolution, BindingError> {
        let name = name.into();
        let from = self.current_id();
        let _span = debug_span!("resolve_write", ident = %name, %intent, scope = %from).entered();

        let result = self.bind_write(name, intent, from);
        match &result {
            Ok(resolution) => debug!(
                target_scope = %resolution.target,
                hops = resolution.hops,
                created = resolution.created,
                "write resolved"
            ),
            Err(err) => warn!(%err, "write rejected"),
        }
        result
    }

    /// Resolve a plain assignment to `name`.
    ///
    /// Uses the intent already declared for `name` in the current frame, or
    /// `Local` when there is none.
    pub fn resolve_assignment(&mut self, name: impl Into<Name>) -> Result<Resolution, BindingError> {
        let name = name.into();
        let intent = self
            .current_frame()
            .intent_of(name.as_str())
            .unwrap_or(DeclarationIntent::Local);
        self.resolve_write(name, intent)
    }

    fn bind_write(
        &mut self,
        name: Name,
        intent: DeclarationIntent,
        from: ScopeId,
    ) -> Result<Resolution, BindingError> {
        self.current_frame().check_intent(name.as_str(), intent)?;

        let (target, hops, created) = match intent {
            DeclarationIntent::Local => {
                let created = self.current_frame_mut().declare(name.clone(), intent)?;
                (from, 0, created)
            }
            DeclarationIntent::Enclosing => {
                let (target, hops) = self.find_enclosing_owner(name.as_str())?;
                self.current_frame_mut().declare(name.clone(), intent)?;
                (target, hops, false)
            }
            DeclarationIntent::Global => {
                let hops = self.current_frame().depth();
                self.current_frame_mut().declare(name.clone(), intent)?;
                let created = self.root_frame_mut().bind(name.clone());
                (ScopeId::ROOT, hops, created)
            }
        };

        Ok(Resolution {
            name,
            access: AccessKind::Write,
            intent: Some(intent),
            from,
            target,
            hops,
            created,
        })
    }

    /// Nearest strict ancestor below the module frame that owns `name`.
    fn find_enclosing_owner(&self, name: &str) -> Result<(ScopeId, u32), BindingError> {
        let current = self.current_frame();
        for (hop, frame) in self.chain(current.parent()).enumerate() {
            if frame.is_root() || frame.intent_of(name) == Some(DeclarationIntent::Global) {
                break;
            }
            if frame.has_local_binding(name) {
                return Ok((frame.id(), hop as u32 + 1));
            }
        }
        Err(BindingError::NoBindingFoundInEnclosingScopes {
            name: Name::from(name),
            scope: current.id(),
        })
    }

    /// Resolve a read of `name` from the current frame. Never mutates.
    pub fn resolve_read(&self, name: &str) -> Result<Resolution, BindingError> {
        let from = self.current_id();
        let _span = debug_span!("resolve_read", ident = name, scope = %from).entered();

        let result = self.lookup(name, from);
        match &result {
            Ok(resolution) => debug!(
                target_scope = %resolution.target,
                hops = resolution.hops,
                "read resolved"
            ),
            Err(err) => warn!(%err, "read unresolved"),
        }
        result
    }

    fn lookup(&self, name: &str, from: ScopeId) -> Result<Resolution, BindingError> {
        let unbound = || BindingError::UnboundName {
            name: Name::from(name),
            scope: from,
        };
        let found = |target: ScopeId, hops: u32| Resolution {
            name: Name::from(name),
            access: AccessKind::Read,
            intent: None,
            from,
            target,
            hops,
            created: false,
        };

        for (hop, frame) in self.chain(Some(from)).enumerate() {
            if frame.has_local_binding(name) {
                return Ok(found(frame.id(), hop as u32));
            }
            if frame.intent_of(name) == Some(DeclarationIntent::Global) {
                let root = self.root_frame();
                if root.has_local_binding(name) {
                    return Ok(found(root.id(), self.current_frame().depth()));
                }
                return Err(unbound());
            }
        }
        Err(unbound())
    }
}

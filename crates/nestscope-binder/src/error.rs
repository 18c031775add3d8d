//! Binding errors.

use crate::scope::{DeclarationIntent, ScopeId};
use nestscope_common::diagnostics::{Diagnostic, diagnostic_codes, diagnostic_messages};
use nestscope_common::{Name, format_message};
use thiserror::Error;

/// Errors surfaced by frame management and name resolution.
///
/// None of these poison the tree: after any error the session can keep
/// resolving other names. `PopAtRoot` and `ScopeDepthExceeded` point at an
/// unbalanced driver, see [`BindingError::is_fatal`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("'{name}' is already declared {existing} in scope {scope}, cannot redeclare it {requested}")]
    RedeclarationConflict {
        name: Name,
        scope: ScopeId,
        existing: DeclarationIntent,
        requested: DeclarationIntent,
    },

    #[error("no binding for enclosing name '{name}' found from scope {scope}")]
    NoBindingFoundInEnclosingScopes { name: Name, scope: ScopeId },

    #[error("name '{name}' is not bound in scope {scope} or any enclosing scope")]
    UnboundName { name: Name, scope: ScopeId },

    #[error("cannot exit the module scope")]
    PopAtRoot,

    #[error("scope nesting exceeds the maximum depth of {limit}")]
    ScopeDepthExceeded { limit: usize },

    #[error("scope ids exhausted after {created} frames")]
    ScopeIdsExhausted { created: u32 },
}

impl BindingError {
    /// Whether the error means the driver's enter/exit sequence is broken.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BindingError::PopAtRoot
                | BindingError::ScopeDepthExceeded { .. }
                | BindingError::ScopeIdsExhausted { .. }
        )
    }

    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            BindingError::RedeclarationConflict { .. } => diagnostic_codes::REDECLARATION_CONFLICT,
            BindingError::NoBindingFoundInEnclosingScopes { .. } => {
                diagnostic_codes::NO_BINDING_FOUND_IN_ENCLOSING_SCOPES
            }
            BindingError::UnboundName { .. } => diagnostic_codes::UNBOUND_NAME,
            BindingError::PopAtRoot => diagnostic_codes::POP_AT_ROOT,
            BindingError::ScopeDepthExceeded { .. } => diagnostic_codes::SCOPE_DEPTH_EXCEEDED,
            BindingError::ScopeIdsExhausted { .. } => diagnostic_codes::SCOPE_IDS_EXHAUSTED,
        }
    }

    /// Name the failing operation was about, if any.
    #[must_use]
    pub fn name(&self) -> Option<&Name> {
        match self {
            BindingError::RedeclarationConflict { name, .. }
            | BindingError::NoBindingFoundInEnclosingScopes { name, .. }
            | BindingError::UnboundName { name, .. } => Some(name),
            BindingError::PopAtRoot
            | BindingError::ScopeDepthExceeded { .. }
            | BindingError::ScopeIdsExhausted { .. } => None,
        }
    }

    /// Convert into a diagnostic using the shared message templates.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            BindingError::RedeclarationConflict {
                name,
                scope,
                existing,
                requested,
            } => Diagnostic::error(
                Some(scope.0),
                format_message(diagnostic_messages::REDECLARATION_CONFLICT, &[
                    name.as_str(),
                    existing.as_str(),
                    requested.as_str(),
                ]),
                self.code(),
            )
            .with_related(
                scope.0,
                format_message(diagnostic_messages::PREVIOUS_DECLARATION, &[
                    name.as_str(),
                    existing.as_str(),
                ]),
            ),
            BindingError::NoBindingFoundInEnclosingScopes { name, scope } => Diagnostic::error(
                Some(scope.0),
                format_message(diagnostic_messages::NO_BINDING_FOUND_IN_ENCLOSING_SCOPES, &[
                    name.as_str(),
                ]),
                self.code(),
            ),
            BindingError::UnboundName { name, scope } => Diagnostic::error(
                Some(scope.0),
                format_message(diagnostic_messages::UNBOUND_NAME, &[name.as_str()]),
                self.code(),
            ),
            BindingError::PopAtRoot => Diagnostic::error(
                None,
                diagnostic_messages::POP_AT_ROOT.to_string(),
                self.code(),
            ),
            BindingError::ScopeDepthExceeded { limit } => Diagnostic::error(
                None,
                format_message(diagnostic_messages::SCOPE_DEPTH_EXCEEDED, &[&limit.to_string()]),
                self.code(),
            ),
            BindingError::ScopeIdsExhausted { created } => Diagnostic::error(
                None,
                format_message(diagnostic_messages::SCOPE_IDS_EXHAUSTED, &[&created.to_string()]),
                self.code(),
            ),
        }
    }
}

//! Diagnostic types and message lookup for the scope resolver.
//!
//! Every binding error the resolver can report has a stable numeric code and a
//! message template in [`DIAGNOSTIC_MESSAGES`]. Templates use `{0}`, `{1}`, ...
//! placeholders that [`format_message`] fills in.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Related information for a diagnostic (e.g. the frame holding a previous declaration).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub scope: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A resolver diagnostic with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Frame the failing operation ran in, `None` for session-level errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<u32>,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(scope: Option<u32>, message: String, code: u32) -> Self {
        Self {
            scope,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, scope: u32, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            scope,
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const REDECLARATION_CONFLICT: u32 = 1001;
    pub const NO_BINDING_FOUND_IN_ENCLOSING_SCOPES: u32 = 1002;
    pub const UNBOUND_NAME: u32 = 1003;
    pub const POP_AT_ROOT: u32 = 1004;
    pub const SCOPE_DEPTH_EXCEEDED: u32 = 1005;
    pub const SCOPE_IDS_EXHAUSTED: u32 = 1006;
    pub const PREVIOUS_DECLARATION: u32 = 1100;
}

pub mod diagnostic_messages {
    pub const REDECLARATION_CONFLICT: &str =
        "Name '{0}' is already declared {1} in this scope and cannot be redeclared {2}.";
    pub const NO_BINDING_FOUND_IN_ENCLOSING_SCOPES: &str =
        "No binding for enclosing name '{0}' found.";
    pub const UNBOUND_NAME: &str = "Cannot find name '{0}'.";
    pub const POP_AT_ROOT: &str = "Cannot exit the module scope.";
    pub const SCOPE_DEPTH_EXCEEDED: &str = "Scope nesting exceeds the maximum depth of {0}.";
    pub const SCOPE_IDS_EXHAUSTED: &str = "Scope ids exhausted after {0} frames.";
    pub const PREVIOUS_DECLARATION: &str = "'{0}' was declared {1} here.";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::REDECLARATION_CONFLICT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::REDECLARATION_CONFLICT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_BINDING_FOUND_IN_ENCLOSING_SCOPES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_BINDING_FOUND_IN_ENCLOSING_SCOPES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNBOUND_NAME,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNBOUND_NAME,
    },
    DiagnosticMessage {
        code: diagnostic_codes::POP_AT_ROOT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::POP_AT_ROOT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SCOPE_DEPTH_EXCEEDED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::SCOPE_DEPTH_EXCEEDED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SCOPE_IDS_EXHAUSTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::SCOPE_IDS_EXHAUSTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PREVIOUS_DECLARATION,
        category: DiagnosticCategory::Message,
        message: diagnostic_messages::PREVIOUS_DECLARATION,
    },
];

/// Look up a diagnostic message definition by code.
///
/// Returns the `DiagnosticMessage` with template string containing `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}

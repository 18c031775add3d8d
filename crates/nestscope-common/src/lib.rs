//! Common types and utilities for the nestscope scope resolver.
//!
//! This crate provides foundational types used across all nestscope crates:
//! - Identifier text (`Name`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Resolver limits and thresholds

// Identifier text shared between frames and resolutions
pub mod name;
pub use name::Name;

// Diagnostic types and message lookup
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};

// Centralized limits and thresholds
pub mod limits;

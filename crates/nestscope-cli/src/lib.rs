//! Command-line driver for the nestscope resolver.
//!
//! - `args` - clap command line
//! - `driver` - replays the nested-function demonstration against a `ScopeTree`
//! - `value_store` - values keyed by the frame a resolution names
//! - `reporter` - text rendering of traces and diagnostics
//! - `tracing_config` - opt-in tracing subscriber setup

pub mod args;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
pub mod value_store;

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;

//! Tracing configuration.
//!
//! The filter comes from `--log`, then `NESTSCOPE_LOG`, then `RUST_LOG`. A
//! bare level such as `debug` is narrowed to the nestscope crates so the
//! resolver's spans are not buried under dependency output; a full directive
//! list is passed through untouched.
//!
//! The format comes from `--log-format`, then `NESTSCOPE_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` output
//! - `tree`: `tracing-tree` output, one indent level per `resolve_*` span
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! nestscope --log debug --log-format tree demo
//! NESTSCOPE_LOG="nestscope_binder=trace" nestscope demo
//! ```
//!
//! No subscriber is installed when no filter is given.

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Crates whose events a bare level applies to.
const OWN_TARGETS: &[&str] = &["nestscope_binder", "nestscope_cli", "nestscope"];

const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub directives: String,
    pub format: LogFormat,
}

impl LogConfig {
    /// Pick the filter and format from command-line values and environment
    /// values, command line first. `None` when no filter is given anywhere.
    pub fn resolve(
        cli_filter: Option<&str>,
        cli_format: Option<LogFormat>,
        env_filter: Option<&str>,
        rust_log: Option<&str>,
        env_format: Option<&str>,
    ) -> Option<Self> {
        let filter = cli_filter.or(env_filter).or(rust_log)?;
        let format = cli_format
            .or_else(|| env_format.map(LogFormat::parse))
            .unwrap_or_default();
        Some(Self {
            directives: scoped_directives(filter),
            format,
        })
    }

    fn from_env(cli_filter: Option<&str>, cli_format: Option<LogFormat>) -> Option<Self> {
        let env_filter = std::env::var("NESTSCOPE_LOG").ok();
        let rust_log = std::env::var("RUST_LOG").ok();
        let env_format = std::env::var("NESTSCOPE_LOG_FORMAT").ok();
        Self::resolve(
            cli_filter,
            cli_format,
            env_filter.as_deref(),
            rust_log.as_deref(),
            env_format.as_deref(),
        )
    }
}

/// Expand a bare level into per-crate directives for the nestscope crates.
pub fn scoped_directives(filter: &str) -> String {
    let filter = filter.trim();
    let lowered = filter.to_lowercase();
    if !LEVELS.contains(&lowered.as_str()) {
        return filter.to_string();
    }
    OWN_TARGETS
        .iter()
        .map(|target| format!("{target}={lowered}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialise the global tracing subscriber.
///
/// All output goes to stderr so it never mixes with the demo output on stdout.
pub fn init_tracing(cli_filter: Option<&str>, cli_format: Option<LogFormat>) {
    let Some(config) = LogConfig::from_env(cli_filter, cli_format) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(&config.directives);

    match config.format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

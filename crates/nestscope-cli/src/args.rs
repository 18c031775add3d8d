use clap::{Parser, Subcommand, ValueEnum};

use crate::tracing_config::LogFormat;

/// CLI arguments for the nestscope binary.
#[derive(Parser, Debug)]
#[command(
    name = "nestscope",
    version,
    about = "Static lexical scope resolution for nested definitions"
)]
pub struct CliArgs {
    /// Enable color and formatting in output. Defaults to on when stdout is a terminal.
    #[arg(long, global = true)]
    pub pretty: Option<bool>,

    /// Tracing filter such as `debug` or `nestscope_binder=trace`. A bare
    /// level applies to the nestscope crates only. Overrides `NESTSCOPE_LOG`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    /// Tracing output format. Overrides `NESTSCOPE_LOG_FORMAT`.
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Replay the local / enclosing / global demonstration.
    Demo {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Show every scope entry, exit and resolution, not only the printed lines.
        #[arg(long)]
        trace: bool,
    },
    /// Replay the demonstration and print the scope tree statistics taken
    /// before the outer function returns.
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demo_defaults() {
        let args = CliArgs::parse_from(["nestscope", "demo"]);
        assert_eq!(args.pretty, None);
        assert_eq!(
            args.command,
            Command::Demo {
                format: OutputFormat::Text,
                trace: false,
            }
        );
    }

    #[test]
    fn test_parse_demo_json_with_trace() {
        let args =
            CliArgs::parse_from(["nestscope", "demo", "--format", "json", "--trace", "--pretty", "false"]);
        assert_eq!(args.pretty, Some(false));
        assert_eq!(
            args.command,
            Command::Demo {
                format: OutputFormat::Json,
                trace: true,
            }
        );
    }

    #[test]
    fn test_parse_stats() {
        let args = CliArgs::parse_from(["nestscope", "stats"]);
        assert_eq!(args.command, Command::Stats);
        assert_eq!(args.log, None);
        assert_eq!(args.log_format, None);
    }

    #[test]
    fn test_parse_log_flags_after_subcommand() {
        let args =
            CliArgs::parse_from(["nestscope", "demo", "--log", "trace", "--log-format", "tree"]);
        assert_eq!(args.log.as_deref(), Some("trace"));
        assert_eq!(args.log_format, Some(LogFormat::Tree));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["nestscope"]).is_err());
    }
}

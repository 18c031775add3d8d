#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use nestscope_binder::BindingError;
use nestscope_cli::args::{CliArgs, Command, OutputFormat};
use nestscope_cli::driver::{self, DemoReport};
use nestscope_cli::reporter::Reporter;
use nestscope_cli::tracing_config;

const EXIT_RESOLUTION_FAILED: i32 = 1;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    // No subscriber unless --log, NESTSCOPE_LOG or RUST_LOG gives a filter.
    tracing_config::init_tracing(args.log.as_deref(), args.log_format);
    let pretty = args.pretty.unwrap_or_else(|| std::io::stdout().is_terminal());
    let reporter = Reporter::new(pretty);

    let report = match driver::run_demo() {
        Ok(report) => report,
        Err(err) => return report_failure(&reporter, err),
    };

    match args.command {
        Command::Demo { format, trace } => print_demo(&reporter, &report, format, trace),
        Command::Stats => {
            let stats = report
                .stats
                .context("demo finished without a statistics snapshot")?;
            println!("{}", stats.summary());
            Ok(())
        }
    }
}

fn print_demo(
    reporter: &Reporter,
    report: &DemoReport,
    format: OutputFormat,
    trace: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", reporter.render_report(report, trace)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(report).context("failed to serialize report")?
        ),
    }
    Ok(())
}

/// Binding errors are rendered as diagnostics; anything else propagates.
fn report_failure(reporter: &Reporter, err: anyhow::Error) -> Result<()> {
    let Some(binding) = err.downcast_ref::<BindingError>() else {
        return Err(err);
    };
    eprintln!("{err:#}");
    eprint!("{}", reporter.render(&[binding.to_diagnostic()]));
    std::process::exit(EXIT_RESOLUTION_FAILED);
}

use colored::Colorize;

use crate::driver::{DemoReport, TraceEvent};
use nestscope_binder::Resolution;
use nestscope_common::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// Render a replay: the printed lines, or every event when `trace` is set.
    pub fn render_report(&self, report: &DemoReport, trace: bool) -> String {
        let mut out = String::new();
        if !trace {
            for line in &report.lines {
                out.push_str(line);
                out.push('\n');
            }
            return out;
        }

        let mut depth = 0usize;
        for event in &report.events {
            if let TraceEvent::Exit { .. } = event {
                depth = depth.saturating_sub(1);
            }
            out.push_str(&"  ".repeat(depth));
            out.push_str(&self.format_event(event));
            out.push('\n');
            if let TraceEvent::Enter { .. } = event {
                depth += 1;
            }
        }
        out
    }

    pub fn format_event(&self, event: &TraceEvent) -> String {
        match event {
            TraceEvent::Enter { scope, label, .. } => {
                format!("{} {} {}", self.keyword("enter"), label, self.dim(&scope.to_string()))
            }
            TraceEvent::Exit {
                scope,
                label,
                dropped_values,
            } => format!(
                "{} {} {}",
                self.keyword("exit"),
                label,
                self.dim(&format!("{scope}, {dropped_values} value(s) dropped"))
            ),
            TraceEvent::Write {
                resolution,
                target_label,
                value,
            } => format!(
                "{} {} {} = {:?}",
                self.keyword("write"),
                self.format_resolution(resolution),
                target_label,
                value
            ),
            TraceEvent::Read {
                resolution,
                target_label,
                value,
            } => format!(
                "{} {} {} -> {:?}",
                self.keyword("read"),
                self.format_resolution(resolution),
                target_label,
                value
            ),
            TraceEvent::Print { line, scope_label } => {
                format!("{} {} {}", self.keyword("print"), line, self.dim(&format!("({scope_label})")))
            }
        }
    }

    fn format_resolution(&self, resolution: &Resolution) -> String {
        let intent = resolution
            .intent
            .map(|intent| format!(" [{intent}]"))
            .unwrap_or_default();
        let hops = if resolution.hops == 1 { "hop" } else { "hops" };
        format!(
            "{}{} {}",
            resolution.name,
            intent,
            self.dim(&format!("{} -> {} ({} {hops})", resolution.from, resolution.target, resolution.hops))
        )
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = format_location(diagnostic.scope);
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
        }
        output
    }

    fn format_related(&self, related: &DiagnosticRelatedInformation) -> String {
        let prefix = if self.color {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };
        format!(
            "{}: {} - {}",
            prefix,
            format_location(Some(related.scope)),
            related.message_text
        )
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("NS{code}");
        if self.color {
            label.dimmed().to_string()
        } else {
            label
        }
    }

    fn keyword(&self, text: &str) -> String {
        let padded = format!("{text:<5}");
        if self.color {
            padded.cyan().bold().to_string()
        } else {
            padded
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

fn format_location(scope: Option<u32>) -> String {
    match scope {
        Some(0) => "<module>".to_string(),
        Some(id) => format!("scope #{id}"),
        None => "<session>".to_string(),
    }
}

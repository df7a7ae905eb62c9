//! Diagnostic output. Text mode is a one-line-per-diagnostic format meant
//! for a terminal; JSON mode dumps the same records as a `serde_json`
//! array for a calling tool to parse.

use std::io::Write;

use yang_common::{Diagnostic, DiagnosticCategory};

use crate::args::ColorMode;

pub fn print_text(out: &mut impl Write, diagnostics: &[Diagnostic], color: ColorMode) -> std::io::Result<()> {
    let colorize = match color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
    };
    for diag in diagnostics {
        let severity = match diag.category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "note",
        };
        if colorize {
            let code = severity_color(diag.category);
            writeln!(out, "\x1b[{code}m{severity}[{}]\x1b[0m {}: {}", diag.code, diag.path, diag.message)?;
        } else {
            writeln!(out, "{severity}[{}] {}: {}", diag.code, diag.path, diag.message)?;
        }
        if let Some(app_tag) = &diag.app_tag {
            writeln!(out, "  app-tag: {app_tag}")?;
        }
    }
    Ok(())
}

fn severity_color(category: DiagnosticCategory) -> &'static str {
    match category {
        DiagnosticCategory::Error => "31",
        DiagnosticCategory::Warning => "33",
        DiagnosticCategory::Message => "36",
    }
}

pub fn print_json(out: &mut impl Write, diagnostics: &[Diagnostic]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, diagnostics)?;
    writeln!(out)?;
    Ok(())
}

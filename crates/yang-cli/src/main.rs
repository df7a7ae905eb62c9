mod args;
mod fixture;
mod printer;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::{CliArgs, OutputFormat};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let text = std::fs::read_to_string(&args.fixture)
        .with_context(|| format!("reading fixture file '{}'", args.fixture.display()))?;
    let parsed: fixture::FixtureFile =
        serde_json::from_str(&text).with_context(|| format!("parsing fixture file '{}'", args.fixture.display()))?;

    let mut built = fixture::build(parsed)?;
    let mut sink = yang_common::DiagnosticSink::new();

    let report = yang_resolve::resolve_unres_schema(&mut built.registry, &mut built.worklist, &mut sink);
    let report = match report {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!(%err, "resolution aborted without reaching a fixpoint");
            yang_resolve::ResolveReport::default()
        }
    };

    let diagnostics = sink.into_diagnostics();
    match args.format {
        OutputFormat::Text => printer::print_text(&mut std::io::stdout(), &diagnostics, args.color)?,
        OutputFormat::Json => printer::print_json(&mut std::io::stdout(), &diagnostics)?,
    }

    if args.stats {
        let mut stderr = std::io::stderr();
        writeln!(
            stderr,
            "rounds: {} ({:?}), schema items resolved: {}",
            report.round_count(),
            report.rounds,
            report.schema_items_resolved
        )?;
    }

    if diagnostics.iter().any(|d| d.category == yang_common::DiagnosticCategory::Error) {
        std::process::exit(1);
    }
    Ok(())
}

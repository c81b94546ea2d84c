use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use grokfix_core::{escape, placeholder, strip, validate};

#[derive(Parser)]
#[command(name = "grokfix", about = "Batch normalization tools for Grok log-format catalogs")]
struct Cli {
    /// Write debug traces to stderr (RUST_LOG controls the filter).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove every data_table member from the catalog, then validate.
    Strip {
        /// Input catalog (JSON-like; not required to be valid JSON yet).
        #[arg(default_value = "LOGCENTER-LOG-FORMAT.sql")]
        input: PathBuf,
        /// Where to write the stripped catalog.
        #[arg(short, long, default_value = "GROK-PATTERN-CONVERTER.sql")]
        output: PathBuf,
    },
    /// Repair malformed backslash escapes in grok_exp/samplelog strings.
    Escapes {
        /// Input catalog with broken escapes.
        #[arg(default_value = "GROK-PATTERN-CONVERTER.sql")]
        input: PathBuf,
        /// Where to write the repaired, pretty-printed catalog.
        #[arg(short, long, default_value = "GROK-PATTERN-CONVERTER-FIXED.json")]
        output: PathBuf,
    },
    /// Rewrite dangling %{PATTERN:FIELD:} / %{PATTERN:} placeholders in place.
    Placeholders {
        /// Catalog file to rewrite (must parse as JSON).
        #[arg(default_value = "setting_logformat.json")]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::debug!("debug tracing enabled");
    }

    match cli.command {
        Command::Strip { input, output } => run_strip(&input, &output),
        Command::Escapes { input, output } => run_escapes(&input, &output),
        Command::Placeholders { file } => run_placeholders(&file),
    }
}

// ---------------------------------------------------------------------------
// strip
// ---------------------------------------------------------------------------

fn run_strip(input: &Path, output: &Path) -> anyhow::Result<()> {
    println!("Processing {}...", input.display());
    println!("Removing data_table entries...");

    let text = read_input(input)?;
    let outcome = strip::strip_str(&text, strip::DEFAULT_TARGET_FIELD)?;
    fs::write(output, &outcome.output)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Removed {} data_table span(s), {} line(s) -> {}",
        outcome.spans_removed,
        outcome.lines_removed,
        output.display()
    );

    println!("\nValidating output JSON...");
    match validate::check(&outcome.output) {
        Ok((_, stats)) => {
            println!(
                "Output file is valid JSON: {} records, {} patterns",
                stats.records, stats.patterns
            );
        }
        Err(failure) => report_parse_failure(&failure, &outcome.output, output)?,
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// escapes
// ---------------------------------------------------------------------------

fn run_escapes(input: &Path, output: &Path) -> anyhow::Result<()> {
    println!("Processing {}...", input.display());

    let text = read_input(input)?;
    let outcome = escape::fix_escapes(&text);
    println!("Repaired escapes on {} line(s)", outcome.lines_changed);

    match validate::check(&outcome.output) {
        Ok((value, stats)) => {
            let pretty = serde_json::to_string_pretty(&value)?;
            fs::write(output, pretty)
                .with_context(|| format!("writing {}", output.display()))?;
            println!(
                "Wrote {}: {} records, {} patterns",
                output.display(),
                stats.records,
                stats.patterns
            );
        }
        Err(failure) => {
            // Keep the raw repaired text for manual follow-up.
            fs::write(output, &outcome.output)
                .with_context(|| format!("writing {}", output.display()))?;
            report_parse_failure(&failure, &outcome.output, output)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// placeholders
// ---------------------------------------------------------------------------

fn run_placeholders(file: &Path) -> anyhow::Result<()> {
    println!("Processing {}...", file.display());

    let text = read_input(file)?;
    let mut catalog: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} must parse as JSON", file.display()))?;

    let report = placeholder::fix_placeholders(&mut catalog)?;
    for fix in &report.fixes {
        println!("Format ID: {}", fix.format_id);
        if !fix.double_colon.is_empty() {
            println!("  double-colon placeholders: {:?}", fix.double_colon);
        }
        if !fix.empty_type.is_empty() {
            println!("  empty-type placeholders: {:?}", fix.empty_type);
        }
    }
    println!("\nTotal fixed: {}", report.total_fixed());

    fs::write(file, serde_json::to_string_pretty(&catalog)?)
        .with_context(|| format!("writing {}", file.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Report a non-fatal parse failure and persist the unparsed text next to the
/// intended output for manual inspection.
fn report_parse_failure(
    failure: &validate::ParseFailure,
    unparsed: &str,
    output: &Path,
) -> anyhow::Result<()> {
    println!("Warning: output is not valid JSON - {}", failure.message);
    println!(
        "Offending line {} (column {}): {}",
        failure.line, failure.column, failure.snippet
    );

    let debug_path = validate::debug_artifact_path(output);
    fs::write(&debug_path, unparsed)
        .with_context(|| format!("writing {}", debug_path.display()))?;
    println!("Debug copy written to {}", debug_path.display());
    Ok(())
}

//! Redaction engine CLI.
//!
//! This binary drives the shroud library: plan and apply redactions from
//! word-box input, restore redacted documents from a ledger and key, and
//! preview span detection over plain text or a PDF's extracted text.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use shroud::redaction::{DrawInstruction, OverlayInstruction};
use shroud::{
    apply_redaction, apply_restoration, extract, JsonWordSource, Ledger, PdfBackend,
    RedactionEngine, RedactionKey, RegexSpanDetector, SpanDetector, WordSource,
};

/// Reversible PII Redaction Tool
///
/// Detects PII in word-box input, covers it with opaque overlays, and seals
/// each covered fragment so the one-time key can restore it later.
#[derive(Parser)]
#[command(name = "shroud")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a redaction pass and optionally apply it to a PDF
    Redact(RedactArgs),

    /// Restore redacted fragments from a ledger and key
    Restore(RestoreArgs),

    /// Preview span detection without redacting anything
    Detect(DetectArgs),
}

#[derive(Args)]
struct RedactArgs {
    /// Word-box JSON produced by the extraction collaborator
    #[arg(short, long, value_name = "FILE")]
    words: PathBuf,

    /// Detection severity (0 = nothing, 100 = everything)
    #[arg(short, long, default_value_t = 60)]
    severity: u8,

    /// Where to write the encrypted-fragment ledger
    #[arg(short, long, value_name = "FILE")]
    ledger: PathBuf,

    /// Also write the overlay plan as JSON
    #[arg(long, value_name = "FILE")]
    plan: Option<PathBuf>,

    /// Write the one-time key to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    key_out: Option<PathBuf>,

    /// Extra detection patterns (can be specified multiple times)
    #[arg(short, long, value_name = "LABEL=REGEX")]
    pattern: Vec<String>,

    /// PDF to paint overlays onto
    #[arg(short, long, value_name = "FILE", requires = "output")]
    input: Option<PathBuf>,

    /// Redacted PDF output path
    #[arg(short, long, value_name = "FILE", requires = "input")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct RestoreArgs {
    /// Ledger written by a redaction pass
    #[arg(short, long, value_name = "FILE")]
    ledger: PathBuf,

    /// One-time key, base64url
    #[arg(short, long, value_name = "BASE64", conflicts_with = "key_file")]
    key: Option<String>,

    /// File containing the one-time key
    #[arg(long, value_name = "FILE")]
    key_file: Option<PathBuf>,

    /// Also write the draw plan (with recovered text) as JSON
    #[arg(long, value_name = "FILE")]
    plan: Option<PathBuf>,

    /// Redacted PDF to draw restored text onto
    #[arg(short, long, value_name = "FILE", requires = "output")]
    input: Option<PathBuf>,

    /// Restored PDF output path
    #[arg(short, long, value_name = "FILE", requires = "input")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct DetectArgs {
    /// Plain-text file to scan
    #[arg(long, value_name = "FILE", conflicts_with = "pdf")]
    text: Option<PathBuf>,

    /// PDF whose extracted text to scan
    #[arg(long, value_name = "FILE")]
    pdf: Option<PathBuf>,

    /// Detection severity (0 = nothing, 100 = everything)
    #[arg(short, long, default_value_t = 60)]
    severity: u8,

    /// Extra detection patterns (can be specified multiple times)
    #[arg(short, long, value_name = "LABEL=REGEX")]
    pattern: Vec<String>,
}

#[derive(Serialize)]
struct OverlayPlanFile<'a> {
    overlays: &'a [OverlayInstruction],
}

#[derive(Serialize)]
struct DrawPlanFile<'a> {
    draws: &'a [DrawInstruction],
}

/// Command handler carrying the shared verbosity flag.
struct ShroudHandler {
    verbose: bool,
}

impl ShroudHandler {
    fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn redact(&self, args: &RedactArgs) -> Result<()> {
        let source = JsonWordSource::from_path(&args.words)
            .with_context(|| format!("Failed to read word boxes from {}", args.words.display()))?;
        let pages = source.pages()?;

        if self.verbose {
            println!("Words:    {}", args.words.display());
            println!("Severity: {}", args.severity);
            println!("Pages:    {}", pages.len());
        }

        let detector = build_detector(&args.pattern)?;
        let engine = RedactionEngine::new(detector, args.severity);
        let (plan, key) = engine
            .plan_redaction(&pages)
            .with_context(|| "Redaction planning failed")?;

        // Apply to the PDF before writing anything, so a render failure
        // leaves no partial artifacts behind.
        if let (Some(input), Some(output)) = (&args.input, &args.output) {
            let mut backend = PdfBackend::open(input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            apply_redaction(&mut backend, &plan)?;
            backend.save(output)?;
            if self.verbose {
                println!("Overlaid: {}", output.display());
            }
        }

        fs::write(&args.ledger, plan.ledger.to_json()?)
            .with_context(|| format!("Failed to write ledger to {}", args.ledger.display()))?;

        if let Some(plan_path) = &args.plan {
            let json = serde_json::to_string_pretty(&OverlayPlanFile {
                overlays: &plan.overlays,
            })?;
            fs::write(plan_path, json)
                .with_context(|| format!("Failed to write plan to {}", plan_path.display()))?;
        }

        match &args.key_out {
            Some(path) => {
                fs::write(path, key.to_base64())
                    .with_context(|| format!("Failed to write key to {}", path.display()))?;
                println!("Key written to {}", path.display());
            }
            None => println!("Key: {}", key.to_base64()),
        }

        if plan.is_noop() {
            println!("⚠ No PII found; empty ledger written");
        } else {
            println!(
                "✓ Redacted {} fragment(s) → {}",
                plan.ledger.fragment_count(),
                args.ledger.display()
            );
        }

        Ok(())
    }

    fn restore(&self, args: &RestoreArgs) -> Result<()> {
        let key = load_key(args.key.as_deref(), args.key_file.as_deref())?;
        let ledger_json = fs::read_to_string(&args.ledger)
            .with_context(|| format!("Failed to read ledger from {}", args.ledger.display()))?;
        let ledger = Ledger::from_json(&ledger_json)?;

        if self.verbose {
            println!("Ledger:    {}", args.ledger.display());
            println!("Fragments: {}", ledger.fragment_count());
        }

        let restoration =
            shroud::plan_restoration(&key, &ledger).with_context(|| "Restoration failed")?;

        if let (Some(input), Some(output)) = (&args.input, &args.output) {
            let mut backend = PdfBackend::open(input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            apply_restoration(&mut backend, &restoration)?;
            backend.save(output)?;
            if self.verbose {
                println!("Restored PDF: {}", output.display());
            }
        }

        if let Some(plan_path) = &args.plan {
            let json = serde_json::to_string_pretty(&DrawPlanFile {
                draws: &restoration.draws,
            })?;
            fs::write(plan_path, json)
                .with_context(|| format!("Failed to write plan to {}", plan_path.display()))?;
        }

        println!("✓ Recovered {} fragment(s)", restoration.draws.len());
        if restoration.failed > 0 {
            println!(
                "⚠ {} fragment(s) failed authentication and were skipped",
                restoration.failed
            );
        }

        Ok(())
    }

    fn detect(&self, args: &DetectArgs) -> Result<()> {
        let content = match (&args.text, &args.pdf) {
            (Some(path), None) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, Some(path)) => extract::pdf_text(path)
                .with_context(|| format!("Text extraction failed for {}", path.display()))?,
            _ => anyhow::bail!("Specify exactly one of --text or --pdf"),
        };

        let detector = build_detector(&args.pattern)?;
        let spans = detector.detect(&content, args.severity)?;

        for span in &spans {
            let snippet = content.get(span.start..span.end).unwrap_or("<invalid span>");
            println!(
                "  {:<16} [{}..{}) {}",
                span.label, span.start, span.end, snippet
            );
        }

        if spans.is_empty() {
            println!("⚠ No spans found at severity {}", args.severity);
        } else {
            println!("✓ Found {} span(s) at severity {}", spans.len(), args.severity);
        }

        Ok(())
    }
}

/// Builds the regex detector, registering any `LABEL=REGEX` extras.
fn build_detector(patterns: &[String]) -> Result<Box<dyn SpanDetector>> {
    let mut detector = RegexSpanDetector::new();
    for spec in patterns {
        let (label, regex) = parse_pattern(spec)?;
        detector
            .add_pattern(label, regex)
            .with_context(|| format!("Invalid pattern '{}'", spec))?;
    }
    Ok(Box::new(detector))
}

fn parse_pattern(spec: &str) -> Result<(&str, &str)> {
    match spec.split_once('=') {
        Some((label, regex)) if !label.is_empty() && !regex.is_empty() => Ok((label, regex)),
        _ => anyhow::bail!("Pattern must be LABEL=REGEX, got '{}'", spec),
    }
}

fn load_key(key: Option<&str>, key_file: Option<&Path>) -> Result<RedactionKey> {
    let encoded = match (key, key_file) {
        (Some(text), None) => text.to_string(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read key from {}", path.display()))?,
        _ => anyhow::bail!("Specify exactly one of --key or --key-file"),
    };
    Ok(RedactionKey::from_base64(&encoded)?)
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let handler = ShroudHandler::new(cli.verbose);

    match &cli.command {
        Commands::Redact(args) => handler.redact(args),
        Commands::Restore(args) => handler.restore(args),
        Commands::Detect(args) => handler.detect(args),
    }
}

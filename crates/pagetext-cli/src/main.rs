use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use pagetext_core::{ExtractOptions, TextExtractor};
use pagetext_core::options::{DEFAULT_X_TOLERANCE, DEFAULT_Y_TOLERANCE};
use pagetext_mupdf::MupdfBackend;

/// Caps the PDF backend's diagnostics so stdout stays pure page text.
const BACKEND_LOG_CAP: &str = "pagetext_mupdf=error";

/// Print the text of a PDF page by page, separated by page-break markers
#[derive(Parser, Debug)]
#[command(name = "pagetext", version, about, long_about = None)]
struct Cli {
    /// Path to the PDF file
    #[arg(allow_hyphen_values = true)]
    pdf_path: PathBuf,

    /// Maximum horizontal gap (points) between glyphs of the same word
    #[arg(long, default_value_t = DEFAULT_X_TOLERANCE, allow_negative_numbers = true)]
    x_tolerance: f32,

    /// Maximum vertical offset (points) between glyphs of the same line
    #[arg(long, default_value_t = DEFAULT_Y_TOLERANCE, allow_negative_numbers = true)]
    y_tolerance: f32,

    /// Disable layout-preserving output
    #[arg(long)]
    no_layout: bool,

    /// Keep whitespace glyphs inside words
    #[arg(long)]
    keep_blank_chars: bool,

    /// Arguments after the path are accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _rest: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let options = match ExtractOptions::builder()
        .x_tolerance(cli.x_tolerance)
        .y_tolerance(cli.y_tolerance)
        .layout(!cli.no_layout)
        .keep_blank_chars(cli.keep_blank_chars)
        .build()
    {
        Ok(options) => options,
        Err(e) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
    };
    tracing::debug!(path = %cli.pdf_path.display(), ?options, "extracting");

    let backend = MupdfBackend::new();
    let extractor = TextExtractor::new(&backend).with_options(options);
    let text = extractor
        .extract_text(&cli.pdf_path)
        .with_context(|| format!("failed to extract text from {}", cli.pdf_path.display()))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Send diagnostics to stderr. `RUST_LOG` sets the base level (default
/// `warn`); the backend is always capped at `error`.
fn init_logging() -> anyhow::Result<()> {
    let backend_cap: Directive = BACKEND_LOG_CAP.parse()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive(backend_cap);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

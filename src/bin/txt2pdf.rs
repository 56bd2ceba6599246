//! CLI binary for txt2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use txt2pdf::{convert_to_file, ConversionConfig, FontSource};

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (writes roman.pdf next to the input)
  txt2pdf roman.txt

  # Explicit output path
  txt2pdf roman.fb2 -o out/roman.pdf

  # Force the input encoding instead of detecting it
  txt2pdf --encoding windows-1251 legacy.txt

  # Use a specific bundled-font directory
  txt2pdf --font-dir /opt/fonts roman.txt

  # Machine-readable summary
  txt2pdf --json roman.txt

FONTS:
  Full Unicode output needs a TTF family; see assets/fonts/README.md.
  Search order: --font-dir, then TXT2PDF_FONTS_DIR, then assets/fonts next
  to the executable. Without any of these, one well-known system font path
  per OS family is probed; as a last resort the PDF built-in Helvetica is
  used, which renders non-Latin text as replacement glyphs.

ENVIRONMENT VARIABLES:
  TXT2PDF_FONTS_DIR     Directory holding the bundled font family
  RUST_LOG              Tracing filter (e.g. txt2pdf=debug)
"#;

/// Convert plain-text and FB2 files to PDF with encoding detection.
#[derive(Parser, Debug)]
#[command(
    name = "txt2pdf",
    version,
    about = "Convert plain-text and FB2 files to PDF with encoding detection",
    long_about = "Convert plain-text and FB2 e-book files to paginated PDF documents. \
The input's character encoding is detected statistically (UTF-8, windows-1251, koi8-r, …) \
and the text is rendered with a Unicode-capable font resolved through a fallback cascade.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input file (.txt or .fb2).
    input: PathBuf,

    /// Write the PDF to this path instead of next to the input.
    #[arg(short, long, env = "TXT2PDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Skip detection and decode with this encoding label.
    #[arg(long, env = "TXT2PDF_ENCODING")]
    encoding: Option<String>,

    /// Directory holding the bundled font family.
    #[arg(long, env = "TXT2PDF_FONTS_DIR")]
    font_dir: Option<PathBuf>,

    /// Body font size in points (6–32).
    #[arg(long, env = "TXT2PDF_FONT_SIZE", default_value_t = 12)]
    font_size: u8,

    /// Output a structured JSON summary instead of text.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TXT2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "TXT2PDF_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ConversionConfig::builder().font_size(cli.font_size);
    if let Some(ref dir) = cli.font_dir {
        builder = builder.font_dir(dir);
    }
    if let Some(ref label) = cli.encoding {
        builder = builder.encoding_override(label);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("pdf"));

    let output = convert_to_file(&cli.input, &output_path, &config)
        .with_context(|| format!("Conversion failed for {}", cli.input.display()))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
    } else if !cli.quiet {
        eprintln!(
            "✔ {}  ({}, {}, {} bytes, {}ms)",
            output.pdf_path.display(),
            output.encoding,
            describe_font(output.font_source),
            output.stats.pdf_bytes,
            output.stats.duration_ms,
        );
        if !output.font_source.is_unicode() {
            eprintln!(
                "  note: no Unicode font was found; non-Latin text renders as replacement glyphs. \
                 See assets/fonts/README.md."
            );
        }
    }

    Ok(())
}

fn describe_font(source: FontSource) -> &'static str {
    match source {
        FontSource::Bundled => "bundled font family",
        FontSource::System => "system font",
        FontSource::Builtin => "built-in Helvetica",
    }
}

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rtl_docx::Config;

#[derive(Parser)]
#[command(name = "rtl-docx")]
#[command(about = "Convert Markdown files to right-to-left Word documents")]
#[command(version)]
struct Cli {
    /// Input Markdown file (defaults to the configured input)
    input: Option<PathBuf>,

    /// Output DOCX file (defaults to input name with a _rtl.docx suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file; compiled defaults are used when it does not exist
    #[arg(short, long, default_value = "rtl-docx.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(config = %cli.config.display(), "loaded config");

    let (input, output) = config.resolve_paths(cli.input, cli.output);

    // Read input file
    let markdown = fs::read_to_string(&input)
        .with_context(|| format!("Error reading {}", input.display()))?;
    info!(input = %input.display(), bytes = markdown.len(), "read markdown");

    // Convert markdown to DOCX
    let docx_bytes = rtl_docx::markdown_to_docx(&markdown)?;

    // Write DOCX
    fs::write(&output, docx_bytes)
        .with_context(|| format!("Error writing {}", output.display()))?;
    info!(output = %output.display(), "wrote document");

    println!("Document has been created successfully!");
    Ok(())
}

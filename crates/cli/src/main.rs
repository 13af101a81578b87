mod cli;
mod config;
mod formatter;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::formatter::{format_summary, ColorMode, OutputFormat, Summary};
use xmlmap::{to_json_string, XmlToJson};

fn setup_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one transform and return the rendered JSON plus its summary.
fn run(cli: &Cli) -> Result<(String, Summary)> {
    let config = config::load_config(cli.config.as_deref())?;

    let service = XmlToJson::from_schema_file_with_config(&cli.mapping, &config)
        .with_context(|| format!("Failed to compile mapping schema: {:?}", cli.mapping))?;
    tracing::debug!(entries = service.table().len(), "Mapping schema compiled");

    let value = service
        .transform_file(&cli.input)
        .with_context(|| format!("Failed to transform input document: {:?}", cli.input))?;

    let format = match &cli.format {
        Some(f) => OutputFormat::from_str(f),
        None => OutputFormat::from_pretty(config.output.pretty),
    };
    let json = to_json_string(&value, format.is_pretty()).context("Failed to serialize JSON")?;

    Ok((json, Summary::of(&value)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let (json, summary) = run(&cli)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            let colorize = ColorMode::from_str(&cli.color).should_colorize();
            eprintln!(
                "{}",
                format_summary(&cli.input.display().to_string(), &summary, colorize)
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

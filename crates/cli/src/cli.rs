//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xmlmap")]
#[command(author, version, about = "Transform XML into JSON using a mapping schema", long_about = None)]
pub struct Cli {
    /// Mapping schema (XML) declaring which input paths to keep and how
    #[arg(short, long, env = "XMLMAP_MAPPING")]
    pub mapping: PathBuf,

    /// Input XML document
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to config file (defaults to the user config file when present)
    #[arg(short, long, env = "XMLMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: pretty or compact (overrides the config file)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Color for the summary line: auto, always or never
    #[arg(long, default_value = "auto")]
    pub color: String,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

//! CLI arguments and parsing

use clap::Parser;
use std::path::PathBuf;

/// Build the sales dashboard document from a transactions CSV
#[derive(Parser, Debug)]
#[command(name = "retail-dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pipeline configuration file (YAML)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Source CSV file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// DuckDB store file, rebuilt on every run
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Dashboard JSON output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cotizador")]
#[command(about = "Quotation generator: JSON store + fixed-layout PDF output")]
pub struct Cli {
    /// Optional TOML file with the company profile and quote options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides the quotation store file
    #[arg(long)]
    pub store_file: Option<PathBuf>,

    /// Overrides the PDF output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a new quotation interactively and generate its PDF
    New,
    /// List stored quotations with their computed amounts
    List,
    /// Re-render the PDF for an existing quotation
    Render { id: u64 },
}

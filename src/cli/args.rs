//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Reportgen markdown-to-JSON report converter CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL used to build absolute asset and image links
    #[arg(short, long, value_hint = clap::ValueHint::Url)]
    pub base_url: String,

    /// Root directory containing the report tree to convert
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub root_dir: PathBuf,

    /// Name of the output directory created under the root
    #[arg(short, long)]
    pub output_dir_name: String,

    /// Capture report bodies into overview/configuration/use-cases sections
    /// instead of a single full-content payload
    #[arg(short, long)]
    pub sections: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

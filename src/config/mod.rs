//! Run configuration assembled from CLI arguments.

use std::path::PathBuf;
use thiserror::Error;

use crate::cli::Cli;
use crate::report::segment::SegmentMode;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("root directory `{0}` does not exist or is not a directory")]
    RootMissing(PathBuf),

    #[error("directory with name \"{0}\" already exists")]
    OutputExists(String),
}

/// Parameters for a single conversion run.
///
/// The base URL is kept verbatim: output links are literal concatenations
/// of it with the `/reports/` and `/reports/images/` prefixes.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base URL for absolute asset and image links.
    pub base_url: String,
    /// Input tree root.
    pub root_dir: PathBuf,
    /// Output directory (root joined with the output directory name).
    pub output_dir: PathBuf,
    /// Full-content vs section-aware capture.
    pub mode: SegmentMode,
}

impl RunConfig {
    /// Build and validate the run configuration.
    ///
    /// The output directory must not already exist; a collision is fatal
    /// for the run and nothing is written.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if !cli.root_dir.is_dir() {
            return Err(ConfigError::RootMissing(cli.root_dir.clone()));
        }

        let output_dir = cli.root_dir.join(&cli.output_dir_name);
        if output_dir.exists() {
            return Err(ConfigError::OutputExists(cli.output_dir_name.clone()));
        }

        let mode = if cli.sections {
            SegmentMode::Sectioned
        } else {
            SegmentMode::FullContent
        };

        Ok(Self {
            base_url: cli.base_url.clone(),
            root_dir: cli.root_dir.clone(),
            output_dir,
            mode,
        })
    }

    /// Directory receiving per-report JSON files and the aggregate outputs.
    pub fn reports_dir(&self) -> PathBuf {
        self.output_dir.join("reports")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli_for(root: &std::path::Path, output_name: &str) -> Cli {
        Cli::try_parse_from([
            "reportgen",
            "--base-url",
            "https://x",
            "--root-dir",
            root.to_str().unwrap(),
            "--output-dir-name",
            output_name,
        ])
        .unwrap()
    }

    #[test]
    fn test_output_collision_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("out")).unwrap();

        let err = RunConfig::from_cli(&cli_for(dir.path(), "out")).unwrap_err();
        assert!(matches!(err, ConfigError::OutputExists(name) if name == "out"));
    }

    #[test]
    fn test_missing_root_rejected() {
        let err = RunConfig::from_cli(&cli_for(std::path::Path::new("/nonexistent/root"), "out"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::RootMissing(_)));
    }

    #[test]
    fn test_valid_config() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::from_cli(&cli_for(dir.path(), "out")).unwrap();
        assert_eq!(config.output_dir, dir.path().join("out"));
        assert_eq!(config.reports_dir(), dir.path().join("out/reports"));
        assert_eq!(config.mode, SegmentMode::FullContent);
    }
}

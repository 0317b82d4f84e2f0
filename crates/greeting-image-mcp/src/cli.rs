//! Command line arguments.

use std::path::PathBuf;

use thiserror::Error;

use greeting_image_mcp_core::ServerConfig;

/// Errors from argument parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// `--config` was given without a path
    #[error("--config requires a path")]
    MissingConfigPath,

    /// An argument the server does not understand
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// YAML configuration file
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if arg == "--config" {
                let path = args.next().ok_or(CliError::MissingConfigPath)?;
                parsed.config = Some(PathBuf::from(path));
            } else if let Some(path) = arg.strip_prefix("--config=") {
                if path.is_empty() {
                    return Err(CliError::MissingConfigPath);
                }
                parsed.config = Some(PathBuf::from(path));
            } else {
                return Err(CliError::UnknownArgument(arg));
            }
        }

        Ok(parsed)
    }

    /// Parse the current process arguments.
    pub fn from_env() -> Result<Self, CliError> {
        Self::parse(std::env::args().skip(1))
    }

    /// Load the configuration file, or defaults when none was given.
    pub fn load_config(&self) -> greeting_image_mcp_core::Result<ServerConfig> {
        match &self.config {
            Some(path) => ServerConfig::from_file(path),
            None => Ok(ServerConfig::default()),
        }
    }
}

//! Configuration errors.
//!
//! Errors raised by Figma API calls live in [`crate::figma::error`]. Neither
//! kind ever carries the access token in its message.

use std::path::PathBuf;

use thiserror::Error;

/// Why a configuration could not be loaded.
///
/// Each file-related variant names the file involved, so the startup message
/// points at what to fix.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read config file {}", path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or has keys outside the `figma` and
    /// `logging` sections.
    #[error("cannot parse config file {}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error, with line and column.
        #[source]
        source: serde_json::Error,
    },

    /// A config file named on the command line does not exist.
    ///
    /// A missing `~/.figma-tokens-mcp/config.json` is not an error; the
    /// built-in defaults apply instead.
    #[error("config file {} does not exist", path.display())]
    NotFound {
        /// Path given on the command line.
        path: PathBuf,
    },

    /// A setting parsed but has an unusable value.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// Which setting is wrong and why.
        message: String,
    },
}
